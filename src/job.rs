//! Extract → transform → load, end to end.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, info_span, warn};

use crate::config::EtlConfig;
use crate::error::{EtlError, EtlResult};
use crate::export::{CsvSink, RecordSink};
use crate::ingestion::ingest_survey_csv_from_path;
use crate::observability::{TransformObserver, TransformReport};
use crate::transform::Transformer;

/// Outcome of a successful [`EtlJob::run`].
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub extracted_rows: usize,
    pub transformed_rows: usize,
    pub loaded_rows: usize,
    pub output: PathBuf,
    pub report: TransformReport,
    /// The export was empty, so nothing was transformed or written.
    pub skipped: bool,
}

/// One configured pipeline run.
#[derive(Clone)]
pub struct EtlJob {
    config: EtlConfig,
    observer: Option<Arc<dyn TransformObserver>>,
}

impl std::fmt::Debug for EtlJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EtlJob")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl EtlJob {
    pub fn new(config: EtlConfig) -> Self {
        Self {
            config,
            observer: None,
        }
    }

    /// Report transform events to `observer` instead of the default tracing observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn TransformObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &EtlConfig {
        &self.config
    }

    /// Run the job. Stages run strictly in sequence; the sink is only opened once the
    /// transformation has succeeded.
    pub fn run(&self) -> EtlResult<RunSummary> {
        let config = &self.config;
        config.validate()?;
        let span = info_span!("etl_job", input = %config.input.display());
        let _enter = span.enter();

        let raw = ingest_survey_csv_from_path(&config.input, &config.ingestion)?;
        let extracted_rows = raw.row_count();
        if raw.is_empty() {
            warn!("survey export has no rows, nothing to load");
            return Ok(RunSummary {
                extracted_rows,
                transformed_rows: 0,
                loaded_rows: 0,
                output: config.output.clone(),
                report: TransformReport::default(),
                skipped: true,
            });
        }

        let mut transformer = Transformer::new(config.transform.clone());
        if let Some(observer) = &self.observer {
            transformer = transformer.with_observer(Arc::clone(observer));
        }
        let (cleaned, report) = transformer.transform_with_report(raw);
        if cleaned.is_empty() {
            let step = report.failed_step().unwrap_or("unknown");
            return Err(EtlError::TransformationFailed {
                step: step.to_owned(),
            });
        }

        let mut sink = CsvSink::create(&config.output)?;
        let stats = sink.load(&cleaned)?;
        info!(
            extracted = extracted_rows,
            loaded = stats.rows,
            output = %config.output.display(),
            "etl job finished"
        );

        Ok(RunSummary {
            extracted_rows,
            transformed_rows: cleaned.row_count(),
            loaded_rows: stats.rows,
            output: config.output.clone(),
            report,
            skipped: false,
        })
    }
}
