//! Delimited-text sink.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ExportError, ExportResult};
use crate::types::DataSet;

use super::{LoadStats, RecordSink};

/// Writes cleaned tables as CSV.
#[derive(Debug)]
pub struct CsvSink<W: Write> {
    writer: W,
    delimiter: u8,
    path: Option<PathBuf>,
}

impl<W: Write> CsvSink<W> {
    /// Create a sink over any writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            delimiter: b',',
            path: None,
        }
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl CsvSink<BufWriter<File>> {
    /// Create (or truncate) the file at `path`, creating missing parent directories.
    pub fn create(path: impl AsRef<Path>) -> ExportResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            ..Self::new(BufWriter::new(file))
        })
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn load(&mut self, dataset: &DataSet) -> ExportResult<LoadStats> {
        let rows = write_delimited(dataset, &mut self.writer, self.delimiter)?;
        let stats = LoadStats {
            rows,
            columns: dataset.column_count(),
        };
        match &self.path {
            Some(path) => info!(
                path = %path.display(),
                rows = stats.rows,
                columns = stats.columns,
                "loaded cleaned table"
            ),
            None => info!(rows = stats.rows, columns = stats.columns, "loaded cleaned table"),
        }
        Ok(stats)
    }
}

/// Write `dataset` as comma-separated text and return the number of records written.
///
/// Null cells become empty fields. An empty dataset is refused.
pub fn write_csv<W: Write>(dataset: &DataSet, writer: W) -> ExportResult<usize> {
    write_delimited(dataset, writer, b',')
}

fn write_delimited<W: Write>(dataset: &DataSet, writer: W, delimiter: u8) -> ExportResult<usize> {
    if dataset.is_empty() {
        return Err(ExportError::EmptyDataSet);
    }

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    wtr.write_record(dataset.schema.field_names())?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(|v| v.to_text().unwrap_or_default()))?;
    }
    wtr.flush()?;
    Ok(dataset.row_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Schema, Value};

    fn sample() -> DataSet {
        DataSet::new(
            Schema::utf8(["City", "Annual_Salary"]),
            vec![
                vec![Value::from("Portland, OR"), Value::from("85000")],
                vec![Value::Null, Value::Int64(1)],
            ],
        )
    }

    #[test]
    fn nulls_are_written_as_empty_fields() {
        let mut out = Vec::new();
        assert_eq!(write_csv(&sample(), &mut out).unwrap(), 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "City,Annual_Salary\n\"Portland, OR\",85000\n,1\n"
        );
    }

    #[test]
    fn empty_dataset_is_refused() {
        let mut sink = CsvSink::new(Vec::new());
        let err = sink.load(&DataSet::empty()).unwrap_err();
        assert!(matches!(err, ExportError::EmptyDataSet));
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn custom_delimiter() {
        let mut sink = CsvSink::new(Vec::new()).with_delimiter(b'|');
        let stats = sink.load(&sample()).unwrap();
        assert_eq!(stats, LoadStats { rows: 2, columns: 2 });
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.starts_with("City|Annual_Salary\nPortland, OR|85000\n"));
    }
}
