//! CSV ingestion of the raw survey export.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{IngestionError, IngestionResult};
use crate::survey;
use crate::types::{DataSet, Schema, Value};

use super::{EncodingPolicy, IngestionOptions};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Ingest a survey CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - CSV must have headers; the header row becomes an all-`Utf8` schema, verbatim.
/// - Empty fields and exact [`IngestionOptions::na_values`] matches become [`Value::Null`];
///   other values are kept as-is (not trimmed).
/// - Short rows are padded with nulls; rows longer than the header are rejected.
pub fn ingest_survey_csv_from_path(
    path: impl AsRef<Path>,
    options: &IngestionOptions,
) -> IngestionResult<DataSet> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let ds = ingest_survey_csv_from_bytes(&bytes, options)?;
    info!(
        path = %path.display(),
        rows = ds.row_count(),
        columns = ds.column_count(),
        "extracted survey export"
    );
    Ok(ds)
}

/// Decode `bytes` according to `options.encoding` and ingest them.
pub fn ingest_survey_csv_from_bytes(
    bytes: &[u8],
    options: &IngestionOptions,
) -> IngestionResult<DataSet> {
    let text = decode(bytes, options.encoding)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(text.as_bytes());
    ingest_survey_csv_from_reader(&mut rdr, options)
}

/// Ingest CSV data from an existing CSV reader.
///
/// The reader should be `flexible` so that short rows reach the padding logic.
pub fn ingest_survey_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    options: &IngestionOptions,
) -> IngestionResult<DataSet> {
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();
    check_headers(&headers, options)?;

    let na_values: HashSet<&str> = options.na_values.iter().map(String::as_str).collect();
    let width = headers.len();
    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based, and the header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;
        if record.len() > width {
            return Err(IngestionError::SchemaMismatch {
                message: format!(
                    "row {user_row} has {} fields but the header has {width}",
                    record.len()
                ),
            });
        }

        let mut row: Vec<Value> = record
            .iter()
            .map(|raw| {
                if raw.is_empty() || na_values.contains(raw) {
                    Value::Null
                } else {
                    Value::from(raw)
                }
            })
            .collect();
        row.resize(width, Value::Null);
        rows.push(row);
    }

    Ok(DataSet::new(Schema::utf8(headers), rows))
}

fn check_headers(headers: &[String], options: &IngestionOptions) -> IngestionResult<()> {
    let mut seen = HashSet::with_capacity(headers.len());
    if let Some(dup) = headers.iter().find(|h| !seen.insert(h.as_str())) {
        return Err(IngestionError::SchemaMismatch {
            message: format!("duplicate header '{dup}'"),
        });
    }

    if options.required_headers {
        if let Some(missing) = survey::required_raw_headers().find(|r| !seen.contains(r)) {
            return Err(IngestionError::SchemaMismatch {
                message: format!(
                    "missing required column '{missing}'. headers={:?}",
                    headers
                ),
            });
        }
    }
    Ok(())
}

fn decode(bytes: &[u8], policy: EncodingPolicy) -> IngestionResult<Cow<'_, str>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(err) => match policy {
            EncodingPolicy::Strict => Err(IngestionError::Encoding {
                encoding: "utf-8",
                message: err.to_string(),
            }),
            EncodingPolicy::Windows1252Fallback => {
                warn!(
                    valid_up_to = err.valid_up_to(),
                    "input is not utf-8, decoding as windows-1252"
                );
                let (text, _had_errors) =
                    encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
                Ok(text)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient() -> IngestionOptions {
        IngestionOptions {
            required_headers: false,
            ..Default::default()
        }
    }

    #[test]
    fn empty_fields_are_null_and_values_untrimmed() {
        let ds = ingest_survey_csv_from_bytes(b"a,b\n x ,\n", &lenient()).unwrap();
        assert_eq!(ds.rows, vec![vec![Value::from(" x "), Value::Null]]);
    }

    #[test]
    fn missing_value_tokens_are_null() {
        let ds = ingest_survey_csv_from_bytes(b"a,b,c,d\nN/A,NA, NA,Nantes\n", &lenient()).unwrap();
        assert_eq!(
            ds.rows[0],
            vec![Value::Null, Value::Null, Value::from(" NA"), Value::from("Nantes")]
        );

        let opts = IngestionOptions {
            na_values: vec!["-".to_string()],
            ..lenient()
        };
        let ds = ingest_survey_csv_from_bytes(b"a,b,c\n-,NA,\n", &opts).unwrap();
        assert_eq!(ds.rows[0], vec![Value::Null, Value::from("NA"), Value::Null]);
    }

    #[test]
    fn short_rows_are_padded() {
        let ds = ingest_survey_csv_from_bytes(b"a,b,c\n1\n", &lenient()).unwrap();
        assert_eq!(ds.rows[0], vec![Value::from("1"), Value::Null, Value::Null]);
    }

    #[test]
    fn long_rows_are_rejected() {
        let err = ingest_survey_csv_from_bytes(b"a,b\n1,2,3\n", &lenient()).unwrap_err();
        assert!(err.to_string().contains("row 2 has 3 fields"));
    }

    #[test]
    fn bom_is_stripped() {
        let ds = ingest_survey_csv_from_bytes(b"\xEF\xBB\xBFa\nx\n", &lenient()).unwrap();
        assert_eq!(ds.schema.index_of("a"), Some(0));
    }

    #[test]
    fn invalid_utf8_is_strict_by_default() {
        let input = b"a\nS\xE3o Paulo\n";
        let err = ingest_survey_csv_from_bytes(input, &lenient()).unwrap_err();
        assert!(matches!(err, IngestionError::Encoding { encoding: "utf-8", .. }));

        let opts = IngestionOptions {
            encoding: EncodingPolicy::Windows1252Fallback,
            ..lenient()
        };
        let ds = ingest_survey_csv_from_bytes(input, &opts).unwrap();
        assert_eq!(ds.rows[0][0], Value::from("São Paulo"));
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let err = ingest_survey_csv_from_bytes(b"a,a\n1,2\n", &lenient()).unwrap_err();
        assert_eq!(err.to_string(), "schema mismatch: duplicate header 'a'");
    }
}
