//! Transformation events, observers and the per-run report.
//!
//! Every [`crate::transform::Transformer`] run records a [`TransformReport`] (returned alongside
//! the cleaned table) and forwards each [`TransformEvent`] to its configured
//! [`TransformObserver`]. Nothing here relies on a global logger registry: observers are handed
//! to the transformer explicitly.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{debug, error, info, warn};

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event.
    Error,
    /// A step failed and the run was aborted.
    Critical,
}

/// Something that happened during a transformation run.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformEvent {
    RunStarted { rows: usize, columns: usize },
    /// The input had no rows; it is returned unchanged.
    EmptyInput,
    /// `rows` rows take part in exact duplication; `removed` of them were collapsed away.
    DuplicatesFound { rows: usize, removed: usize },
    /// Rows with every field null. `dropped` tells whether they were removed.
    NullRowsFound { rows: usize, dropped: bool },
    NoNullRows,
    StepStarted { step: &'static str },
    StepFailed { step: &'static str, error: String },
    RunFinished {
        rows: usize,
        columns: usize,
        elapsed: Duration,
    },
}

impl TransformEvent {
    pub fn severity(&self) -> Severity {
        match self {
            Self::RunStarted { .. }
            | Self::NoNullRows
            | Self::StepStarted { .. }
            | Self::RunFinished { .. } => Severity::Info,
            Self::EmptyInput | Self::DuplicatesFound { .. } | Self::NullRowsFound { .. } => {
                Severity::Warning
            }
            Self::StepFailed { .. } => Severity::Critical,
        }
    }
}

impl fmt::Display for TransformEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunStarted { rows, columns } => {
                write!(f, "run started rows={rows} columns={columns}")
            }
            Self::EmptyInput => f.write_str("empty input received"),
            Self::DuplicatesFound { rows, removed } => {
                write!(f, "duplicates found rows={rows} removed={removed}")
            }
            Self::NullRowsFound { rows, dropped } => {
                write!(f, "completely null rows found rows={rows} dropped={dropped}")
            }
            Self::NoNullRows => f.write_str("no completely null rows"),
            Self::StepStarted { step } => write!(f, "step started step={step}"),
            Self::StepFailed { step, error } => write!(f, "step failed step={step} err={error}"),
            Self::RunFinished {
                rows,
                columns,
                elapsed,
            } => write!(
                f,
                "run finished rows={rows} columns={columns} elapsed_ms={}",
                elapsed.as_millis()
            ),
        }
    }
}

/// Observer interface for transformation events.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait TransformObserver: Send + Sync {
    /// Called for every event, in order.
    fn on_event(&self, event: &TransformEvent);

    /// Called when an event meets the transformer's alert threshold.
    fn on_alert(&self, _event: &TransformEvent) {}
}

/// Ordered record of one transformation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformReport {
    pub events: Vec<TransformEvent>,
}

impl TransformReport {
    pub(crate) fn push(&mut self, event: TransformEvent) {
        self.events.push(event);
    }

    /// The step that aborted the run, if any.
    pub fn failed_step(&self) -> Option<&'static str> {
        self.events.iter().find_map(|e| match e {
            TransformEvent::StepFailed { step, .. } => Some(*step),
            _ => None,
        })
    }

    /// `true` if the run aborted.
    pub fn failed(&self) -> bool {
        self.failed_step().is_some()
    }

    /// Highest severity recorded, if any event was recorded.
    pub fn max_severity(&self) -> Option<Severity> {
        self.events.iter().map(TransformEvent::severity).max()
    }

    /// Names of the steps that started, in order.
    pub fn steps_started(&self) -> Vec<&'static str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TransformEvent::StepStarted { step } => Some(*step),
                _ => None,
            })
            .collect()
    }

    /// Events at or above `severity`.
    pub fn events_at_or_above(&self, severity: Severity) -> impl Iterator<Item = &TransformEvent> {
        self.events.iter().filter(move |e| e.severity() >= severity)
    }
}

/// Emits events through `tracing`, with structured fields.
///
/// This is the default observer of a [`crate::transform::Transformer`].
#[derive(Debug, Default)]
pub struct TracingObserver;

impl TransformObserver for TracingObserver {
    fn on_event(&self, event: &TransformEvent) {
        match event {
            TransformEvent::RunStarted { rows, columns } => {
                info!(rows, columns, "starting transformation");
            }
            TransformEvent::EmptyInput => warn!("empty dataset received for transformation"),
            TransformEvent::DuplicatesFound { rows, removed } => {
                warn!(rows, removed, "duplicate rows found and collapsed");
            }
            TransformEvent::NullRowsFound { rows, dropped } => {
                warn!(rows, dropped, "completely null rows found");
            }
            TransformEvent::NoNullRows => debug!("no completely null rows found"),
            TransformEvent::StepStarted { step } => debug!(step, "starting step"),
            TransformEvent::StepFailed { step, error } => {
                error!(step, error = %error, critical = true, "transformation step failed");
            }
            TransformEvent::RunFinished {
                rows,
                columns,
                elapsed,
            } => {
                info!(
                    rows,
                    columns,
                    elapsed_ms = millis(*elapsed),
                    "transformation completed"
                );
            }
        }
    }

    fn on_alert(&self, event: &TransformEvent) {
        // Already logged by `on_event` at error level with `critical = true`.
        if matches!(event, TransformEvent::StepFailed { .. }) {
            return;
        }
        warn!(alert = true, severity = ?event.severity(), "{event}");
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn TransformObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn TransformObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl TransformObserver for CompositeObserver {
    fn on_event(&self, event: &TransformEvent) {
        for o in &self.observers {
            o.on_event(event);
        }
    }

    fn on_alert(&self, event: &TransformEvent) {
        for o in &self.observers {
            o.on_alert(event);
        }
    }
}

/// Appends transformation events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl TransformObserver for FileObserver {
    fn on_event(&self, event: &TransformEvent) {
        self.append_line(&format!(
            "{} {:?} {}",
            unix_ts(),
            event.severity(),
            event
        ));
    }

    fn on_alert(&self, event: &TransformEvent) {
        self.append_line(&format!("{} ALERT {:?} {}", unix_ts(), event.severity(), event));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
