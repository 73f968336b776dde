//! Observer hooks for pipeline events.
//!
//! Reading, cleaning and exporting report to an optional [`PipelineObserver`]. Failures carry a
//! [`Severity`]; callers pick the threshold at which [`PipelineObserver::on_alert`] fires.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ConversionError;
use crate::export::ConvertedFile;
use crate::processing::CleaningReport;
use crate::types::FileFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (the file was skipped, nothing is broken).
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

impl Severity {
    /// Severity of a pipeline error.
    pub fn of(error: &ConversionError) -> Self {
        match error {
            ConversionError::Io(_) => Severity::Critical,
            ConversionError::UnsupportedFormat { .. } => Severity::Warning,
            ConversionError::ParseFailure { .. }
            | ConversionError::InvalidColumn { .. }
            | ConversionError::SerializationFailure { .. }
            | ConversionError::PlanError(_) => Severity::Error,
        }
    }
}

/// Which file an event is about.
#[derive(Debug, Clone)]
pub struct FileContext {
    /// Display name (or path) of the file.
    pub name: String,
    /// Format, once known.
    pub format: Option<FileFormat>,
}

impl FileContext {
    /// Create a context for `name`.
    pub fn new(name: impl Into<String>, format: Option<FileFormat>) -> Self {
        Self {
            name: name.into(),
            format,
        }
    }

    fn format_label(&self) -> &'static str {
        self.format.map_or("unknown", FileFormat::label)
    }
}

/// Minimal stats reported after a successful read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadStats {
    /// Number of rows read.
    pub rows: usize,
    /// Number of columns read.
    pub columns: usize,
}

/// Observer interface for pipeline outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait PipelineObserver: Send + Sync {
    /// Called when a file has been read into a table.
    fn on_read(&self, _ctx: &FileContext, _stats: ReadStats) {}

    /// Called after cleaning operations ran on a table.
    fn on_cleaned(&self, _ctx: &FileContext, _report: &CleaningReport) {}

    /// Called when a converted file has been produced.
    fn on_exported(&self, _ctx: &FileContext, _file: &ConvertedFile) {}

    /// Called when any step fails for a file.
    fn on_failure(&self, _ctx: &FileContext, _severity: Severity, _error: &ConversionError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &FileContext, severity: Severity, error: &ConversionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Report a failure to `observer`, alerting when `severity >= alert_at_or_above`.
pub(crate) fn report_failure(
    observer: Option<&Arc<dyn PipelineObserver>>,
    alert_at_or_above: Severity,
    ctx: &FileContext,
    error: &ConversionError,
) {
    if let Some(obs) = observer {
        let severity = Severity::of(error);
        obs.on_failure(ctx, severity, error);
        if severity >= alert_at_or_above {
            obs.on_alert(ctx, severity, error);
        }
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
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

impl PipelineObserver for CompositeObserver {
    fn on_read(&self, ctx: &FileContext, stats: ReadStats) {
        for o in &self.observers {
            o.on_read(ctx, stats);
        }
    }

    fn on_cleaned(&self, ctx: &FileContext, report: &CleaningReport) {
        for o in &self.observers {
            o.on_cleaned(ctx, report);
        }
    }

    fn on_exported(&self, ctx: &FileContext, file: &ConvertedFile) {
        for o in &self.observers {
            o.on_exported(ctx, file);
        }
    }

    fn on_failure(&self, ctx: &FileContext, severity: Severity, error: &ConversionError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &FileContext, severity: Severity, error: &ConversionError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs pipeline events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl PipelineObserver for StdErrObserver {
    fn on_read(&self, ctx: &FileContext, stats: ReadStats) {
        eprintln!(
            "[sweep][read] format={} file={} rows={} columns={}",
            ctx.format_label(),
            ctx.name,
            stats.rows,
            stats.columns
        );
    }

    fn on_cleaned(&self, ctx: &FileContext, report: &CleaningReport) {
        eprintln!(
            "[sweep][clean] file={} duplicates_removed={} cells_filled={}",
            ctx.name, report.duplicates_removed, report.cells_filled
        );
    }

    fn on_exported(&self, ctx: &FileContext, file: &ConvertedFile) {
        eprintln!(
            "[sweep][export] file={} output={} mime={} bytes={}",
            ctx.name,
            file.file_name,
            file.mime_type,
            file.bytes.len()
        );
    }

    fn on_failure(&self, ctx: &FileContext, severity: Severity, error: &ConversionError) {
        eprintln!(
            "[sweep][{:?}] format={} file={} err={}",
            severity,
            ctx.format_label(),
            ctx.name,
            error
        );
    }

    fn on_alert(&self, ctx: &FileContext, severity: Severity, error: &ConversionError) {
        eprintln!(
            "[ALERT][sweep][{:?}] format={} file={} err={}",
            severity,
            ctx.format_label(),
            ctx.name,
            error
        );
    }
}

/// Appends pipeline events to a local log file.
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
            let _ = writeln!(f, "{} {line}", unix_ts());
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_read(&self, ctx: &FileContext, stats: ReadStats) {
        self.append_line(&format!(
            "read format={} file={} rows={} columns={}",
            ctx.format_label(),
            ctx.name,
            stats.rows,
            stats.columns
        ));
    }

    fn on_cleaned(&self, ctx: &FileContext, report: &CleaningReport) {
        self.append_line(&format!(
            "clean file={} duplicates_removed={} cells_filled={}",
            ctx.name, report.duplicates_removed, report.cells_filled
        ));
    }

    fn on_exported(&self, ctx: &FileContext, file: &ConvertedFile) {
        self.append_line(&format!(
            "export file={} output={} bytes={}",
            ctx.name,
            file.file_name,
            file.bytes.len()
        ));
    }

    fn on_failure(&self, ctx: &FileContext, severity: Severity, error: &ConversionError) {
        self.append_line(&format!(
            "fail severity={:?} format={} file={} err={}",
            severity,
            ctx.format_label(),
            ctx.name,
            error
        ));
    }

    fn on_alert(&self, ctx: &FileContext, severity: Severity, error: &ConversionError) {
        self.append_line(&format!(
            "ALERT severity={:?} format={} file={} err={}",
            severity,
            ctx.format_label(),
            ctx.name,
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
