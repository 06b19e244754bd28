//! The cleaning pipeline.
//!
//! [`Transformer::transform`] turns a raw survey [`DataSet`] (long question-text headers, free
//! text answers) into the 18-column canonical table described in [`crate::survey`].
//!
//! A run goes through:
//!
//! 1. exact duplicate removal (first occurrence kept)
//! 2. completely-null row detection (removal only with [`TransformOptions::drop_null_rows`])
//! 3. the per-field steps in [`steps::PIPELINE`], ending with whitespace cleanup, text coercion
//!    and projection onto [`crate::survey::CANONICAL_COLUMNS`]
//!
//! The pipeline is fail-fast: the first step that errors aborts the run. [`Transformer::transform`]
//! then returns an empty table, which callers must read as "transformation failed". An empty
//! *input* is returned unchanged before any step runs.
//!
//! ## Example
//!
//! ```rust
//! use salary_survey_etl::survey::{self, RENAME_MAP};
//! use salary_survey_etl::transform::Transformer;
//! use salary_survey_etl::types::{DataSet, Schema, Value};
//!
//! let headers: Vec<&str> = RENAME_MAP
//!     .iter()
//!     .map(|(raw, _)| *raw)
//!     .filter(|raw| *raw != "Seniority")
//!     .collect();
//! let row = headers
//!     .iter()
//!     .map(|h| match survey::canonical_name(h) {
//!         Some("Job_Title") => Value::from("Senior Software Engineer!!"),
//!         Some("Annual_Salary") => Value::from("$85,000"),
//!         _ => Value::Null,
//!     })
//!     .collect();
//! let raw = DataSet::new(Schema::utf8(headers.iter().copied()), vec![row]);
//!
//! let cleaned = Transformer::default().transform(raw);
//! assert_eq!(cleaned.column_count(), 18);
//! assert_eq!(cleaned.value(0, "Job_Title"), Some(&Value::from("senior software engineer")));
//! assert_eq!(cleaned.value(0, "Seniority"), Some(&Value::from("Senior")));
//! assert_eq!(cleaned.value(0, "Annual_Salary"), Some(&Value::from("85000")));
//! ```

pub mod column;
pub mod steps;
pub mod tables;
pub mod text;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::Deserialize;
use tracing::{debug_span, info_span};

use crate::error::{TransformError, TransformResult};
use crate::observability::{
    Severity, TracingObserver, TransformEvent, TransformObserver, TransformReport,
};
use crate::types::DataSet;

pub use steps::{PIPELINE, Step};

/// Options controlling a transformation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformOptions {
    /// Remove completely null rows instead of only reporting them.
    ///
    /// Off by default, in which case such rows flow through the pipeline and come out holding
    /// only the categorical defaults.
    pub drop_null_rows: bool,
}

/// Runs the cleaning pipeline over one table at a time.
///
/// A `Transformer` holds no per-run state; one instance can serve any number of runs.
#[derive(Clone)]
pub struct Transformer {
    options: TransformOptions,
    observer: Arc<dyn TransformObserver>,
    alert_at_or_above: Severity,
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformer")
            .field("options", &self.options)
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish_non_exhaustive()
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(TransformOptions::default())
    }
}

impl Transformer {
    /// Create a transformer that reports through [`TracingObserver`].
    pub fn new(options: TransformOptions) -> Self {
        Self {
            options,
            observer: Arc::new(TracingObserver),
            alert_at_or_above: Severity::Critical,
        }
    }

    /// Replace the observer that receives events live.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn TransformObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Severity at which [`TransformObserver::on_alert`] is also invoked.
    #[must_use]
    pub fn with_alert_threshold(mut self, severity: Severity) -> Self {
        self.alert_at_or_above = severity;
        self
    }

    /// Clean `raw`. Returns an empty table if any step fails.
    pub fn transform(&self, raw: DataSet) -> DataSet {
        self.transform_with_report(raw).0
    }

    /// Clean `raw` and return the run's event report alongside the result.
    pub fn transform_with_report(&self, raw: DataSet) -> (DataSet, TransformReport) {
        let mut report = TransformReport::default();
        let out = self.run(raw, &mut report).unwrap_or_else(|_| DataSet::empty());
        (out, report)
    }

    /// Clean `raw`, surfacing the failing step's error instead of an empty table.
    pub fn try_transform(&self, raw: DataSet) -> TransformResult<DataSet> {
        self.run(raw, &mut TransformReport::default())
    }

    fn run(&self, raw: DataSet, report: &mut TransformReport) -> TransformResult<DataSet> {
        let span = info_span!("transform", rows = raw.row_count());
        let _enter = span.enter();
        let started = Instant::now();

        if raw.is_empty() {
            self.emit(report, TransformEvent::EmptyInput);
            return Ok(raw);
        }
        self.emit(
            report,
            TransformEvent::RunStarted {
                rows: raw.row_count(),
                columns: raw.column_count(),
            },
        );

        let mut ds = self.prepare(raw, report);

        for step in PIPELINE {
            self.emit(report, TransformEvent::StepStarted { step: step.name });
            let _step_span = debug_span!("step", step = step.name).entered();

            ds = match (step.apply)(ds) {
                Ok(out) if out.is_empty() => {
                    let err = TransformError::EmptyResult { step: step.name };
                    return Err(self.fail(report, step.name, err));
                }
                Ok(out) => out,
                Err(err) => return Err(self.fail(report, step.name, err)),
            };
        }

        self.emit(
            report,
            TransformEvent::RunFinished {
                rows: ds.row_count(),
                columns: ds.column_count(),
                elapsed: started.elapsed(),
            },
        );
        Ok(ds)
    }

    /// Deduplication and null-row handling, ahead of the field steps.
    fn prepare(&self, raw: DataSet, report: &mut TransformReport) -> DataSet {
        let (mut ds, dedup) = steps::table::deduplicate(raw);
        if dedup.duplicated_rows > 0 {
            self.emit(
                report,
                TransformEvent::DuplicatesFound {
                    rows: dedup.duplicated_rows,
                    removed: dedup.removed,
                },
            );
        }

        let null_rows = steps::table::count_null_rows(&ds);
        if null_rows == 0 {
            self.emit(report, TransformEvent::NoNullRows);
            return ds;
        }

        let dropped = self.options.drop_null_rows;
        if dropped {
            ds = steps::table::drop_null_rows(ds);
        }
        self.emit(
            report,
            TransformEvent::NullRowsFound {
                rows: null_rows,
                dropped,
            },
        );
        ds
    }

    fn fail(
        &self,
        report: &mut TransformReport,
        step: &'static str,
        err: TransformError,
    ) -> TransformError {
        self.emit(
            report,
            TransformEvent::StepFailed {
                step,
                error: err.to_string(),
            },
        );
        err
    }

    fn emit(&self, report: &mut TransformReport, event: TransformEvent) {
        self.observer.on_event(&event);
        if event.severity() >= self.alert_at_or_above {
            self.observer.on_alert(&event);
        }
        report.push(event);
    }
}

/// Clean `raw` with default options.
pub fn transform_data(raw: DataSet) -> DataSet {
    Transformer::default().transform(raw)
}
