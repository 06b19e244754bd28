//! Extraction of the raw survey export.
//!
//! Most callers should use [`ingest_survey_csv_from_path`], which:
//!
//! - decodes the file per [`IngestionOptions::encoding`]
//! - checks the survey's question headers are present
//! - reads empty fields and [`IngestionOptions::na_values`] tokens as null
//! - produces an all-text [`crate::types::DataSet`] ready for [`crate::transform`]

pub mod csv;

use serde::{Deserialize, Deserializer, de};

pub use csv::{
    ingest_survey_csv_from_bytes, ingest_survey_csv_from_path, ingest_survey_csv_from_reader,
};

/// How to treat input that is not valid UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingPolicy {
    /// Fail with [`crate::error::IngestionError::Encoding`].
    #[default]
    Strict,
    /// Decode as Windows-1252 (a superset of printable Latin-1) and log a warning.
    Windows1252Fallback,
}

/// Options controlling extraction.
///
/// Use [`Default`] for the standard survey export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestionOptions {
    pub encoding: EncodingPolicy,
    /// Require every raw survey header (see [`crate::survey::required_raw_headers`]).
    pub required_headers: bool,
    /// Field delimiter byte. Written as a one-character string in config files.
    #[serde(deserialize_with = "deserialize_delimiter")]
    pub delimiter: u8,
    /// Field values read as null, matched exactly. Empty fields are always null.
    pub na_values: Vec<String>,
}

/// Missing-value tokens recognised by default, the usual spreadsheet and dataframe spellings.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            encoding: EncodingPolicy::default(),
            required_headers: true,
            delimiter: b',',
            na_values: DEFAULT_NA_VALUES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

fn deserialize_delimiter<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let s = String::deserialize(deserializer)?;
    match s.as_bytes() {
        [b] => Ok(*b),
        _ => Err(de::Error::custom(format!(
            "delimiter must be a single ASCII character, got {s:?}"
        ))),
    }
}
