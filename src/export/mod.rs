//! Load-stage handoff of the cleaned table.
//!
//! The warehouse load itself (object storage upload and `COPY`) lives outside this crate. What
//! lives here is the serialization contract the warehouse relies on: a header row in canonical
//! column order, one record per row, and null cells written as empty fields so that
//! `NULL AS '' BLANKSASNULL EMPTYASNULL` maps them back to SQL `NULL`.

pub mod csv;

use crate::error::ExportResult;
use crate::types::DataSet;

pub use csv::{CsvSink, write_csv};

/// Counters returned by a successful [`RecordSink::load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows: usize,
    pub columns: usize,
}

/// Destination for a cleaned table.
pub trait RecordSink {
    /// Write `dataset` to the destination.
    ///
    /// Implementations must refuse an empty dataset with
    /// [`crate::error::ExportError::EmptyDataSet`].
    fn load(&mut self, dataset: &DataSet) -> ExportResult<LoadStats>;
}
