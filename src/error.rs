use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for extraction.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Convenience result type for a single transformation step.
pub type TransformResult<T> = Result<T, TransformError>;

/// Convenience result type for the load-stage handoff.
pub type ExportResult<T> = Result<T, ExportError>;

/// Convenience result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience result type for a full extract → transform → load run.
pub type EtlResult<T> = Result<T, EtlError>;

/// Error type returned while reading the raw survey export.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The raw bytes are not valid in the expected text encoding.
    #[error("input is not valid {encoding}: {message}")]
    Encoding {
        encoding: &'static str,
        message: String,
    },

    /// The input does not have the shape of a survey export (missing headers, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },
}

/// Error raised by a single cleaning step.
///
/// The transformer logs these at critical severity and turns them into an empty result; use
/// [`crate::transform::Transformer::try_transform`] to observe them directly.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A step needs a column that is not in the table.
    #[error("{step}: missing expected column '{column}'")]
    MissingColumn {
        step: &'static str,
        column: String,
    },

    /// A text-only step met a value of another type.
    #[error("{step}: unsupported {found} value in column '{column}' at row {row}")]
    UnsupportedValue {
        step: &'static str,
        column: String,
        row: usize,
        found: &'static str,
    },

    /// A step returned a table with no rows.
    #[error("{step}: step returned an empty table")]
    EmptyResult { step: &'static str },
}

impl TransformError {
    /// Name of the step that raised the error.
    pub fn step(&self) -> &'static str {
        match self {
            Self::MissingColumn { step, .. }
            | Self::UnsupportedValue { step, .. }
            | Self::EmptyResult { step } => *step,
        }
    }
}

/// Error returned while serializing the cleaned table for the warehouse.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// An empty table is the transformer's failure signal and is never loaded.
    #[error("refusing to load an empty dataset")]
    EmptyDataSet,
}

/// Error returned while loading an [`crate::config::EtlConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {message}")]
    Invalid { message: String },
}

/// Top-level error for [`crate::job::EtlJob::run`].
#[derive(Debug, Error)]
pub enum EtlError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("extract failed: {0}")]
    Ingestion(#[from] IngestionError),

    /// The transformer returned an empty table for a non-empty input.
    #[error("transformation failed at step '{step}'")]
    TransformationFailed { step: String },

    #[error("load failed: {0}")]
    Export(#[from] ExportError),
}
