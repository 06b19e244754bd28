//! `salary-survey-etl` cleans the raw export of a free-text salary survey into a fixed,
//! warehouse-ready table.
//!
//! The heart of the crate is [`transform::Transformer`], a fail-fast pipeline of cleaning steps
//! that turns a raw [`types::DataSet`] (question-text headers, free text answers) into the
//! 18-column canonical table listed in [`survey::CANONICAL_COLUMNS`]. Around it sit a thin CSV
//! source ([`ingestion`]), a CSV sink for the warehouse handoff ([`export`]), and a job runner
//! ([`job::EtlJob`]) configured from JSON ([`config::EtlConfig`]).
//!
//! ## What the transformer does
//!
//! - drops exact duplicate rows (first occurrence kept) and reports completely null rows
//! - renames survey questions to short column names
//! - normalizes job titles and derives a `Seniority` column
//! - reduces salaries and bonuses to digit strings
//! - canonicalizes currencies, countries, demographics, experience ranges, states and cities
//! - reformats timestamps as `YYYY-MM-DD HH:MM:SS`
//! - collapses whitespace everywhere and projects onto the canonical columns
//!
//! If any step fails the result is an empty table, and the failure is logged at critical
//! severity. [`transform::Transformer::transform_with_report`] also returns the run's
//! [`observability::TransformReport`].
//!
//! ## Quick example: run a job
//!
//! ```no_run
//! use salary_survey_etl::config::EtlConfig;
//! use salary_survey_etl::job::EtlJob;
//! use salary_survey_etl::logging::init_logging;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EtlConfig::from_json_path("etl.json")?;
//! init_logging(&config.logging)?;
//!
//! let summary = EtlJob::new(config).run()?;
//! println!("loaded {} of {} rows", summary.loaded_rows, summary.extracted_rows);
//! # Ok(())
//! # }
//! ```
//!
//! ## Quick example: clean an in-memory table
//!
//! ```no_run
//! use salary_survey_etl::ingestion::{ingest_survey_csv_from_path, IngestionOptions};
//! use salary_survey_etl::transform::{Transformer, TransformOptions};
//!
//! # fn main() -> Result<(), salary_survey_etl::IngestionError> {
//! let raw = ingest_survey_csv_from_path("survey.csv", &IngestionOptions::default())?;
//! let transformer = Transformer::new(TransformOptions { drop_null_rows: true });
//! let (cleaned, report) = transformer.transform_with_report(raw);
//! if report.failed() {
//!     eprintln!("failed at {:?}", report.failed_step());
//! }
//! println!("rows={}", cleaned.row_count());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod job;
pub mod logging;
pub mod observability;
pub mod survey;
pub mod transform;
pub mod types;

pub use error::{
    ConfigError, ConfigResult, EtlError, EtlResult, ExportError, ExportResult, IngestionError,
    IngestionResult, TransformError, TransformResult,
};
pub use transform::{Transformer, transform_data};
