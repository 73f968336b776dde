//! Unified reading entrypoints.
//!
//! Most callers should use [`read_source`], which reads an uploaded [`SourceFile`] into an
//! in-memory [`crate::types::DataSet`].
//!
//! - If [`ReadOptions::format`] is `None`, the format is taken from the file extension.
//! - If a [`PipelineObserver`] is provided, success/failure/alerts are reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::ConversionResult;
use crate::observability::{report_failure, FileContext, PipelineObserver, ReadStats, Severity};
use crate::types::{DataSet, FileFormat, SourceFile};

use super::csv;

/// Options controlling how files are read.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ReadOptions {
    /// If `None`, the format is taken from the file extension.
    pub format: Option<FileFormat>,
    /// Extra text values treated as missing (empty fields are always missing).
    pub na_values: Vec<String>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn PipelineObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for ReadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOptions")
            .field("format", &self.format)
            .field("na_values", &self.na_values)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            format: None,
            na_values: Vec::new(),
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Read an uploaded file into a [`DataSet`].
///
/// When an observer is configured, this function reports:
///
/// - `on_read` on success, with row/column counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```
/// use data_sweeper::ingestion::{read_source, ReadOptions};
/// use data_sweeper::types::{SourceFile, Value};
///
/// # fn main() -> Result<(), data_sweeper::ConversionError> {
/// let file = SourceFile::new("people.csv", "name,score\nAda,98.5\n");
/// let ds = read_source(&file, &ReadOptions::default())?;
/// assert_eq!(ds.rows[0][1], Value::Float64(98.5));
/// # Ok(())
/// # }
/// ```
///
/// Unsupported extensions fail without producing a table:
///
/// ```
/// use data_sweeper::ingestion::{read_source, ReadOptions};
/// use data_sweeper::types::SourceFile;
/// use data_sweeper::ConversionError;
///
/// let file = SourceFile::new("report.txt", "hello");
/// let err = read_source(&file, &ReadOptions::default()).unwrap_err();
/// assert!(matches!(err, ConversionError::UnsupportedFormat { .. }));
/// ```
pub fn read_source(source: &SourceFile, options: &ReadOptions) -> ConversionResult<DataSet> {
    let format = match options.format {
        Some(f) => Ok(f),
        None => source.format(),
    };
    let ctx = FileContext::new(source.name(), format.as_ref().ok().copied());
    let result = format.and_then(|f| read_bytes(source.bytes(), f, &options.na_values));
    observe(options, &ctx, &result);
    result
}

/// Read a file from disk.
///
/// The format is inferred from the path extension unless `options.format` is set.
pub fn read_from_path(path: impl AsRef<Path>, options: &ReadOptions) -> ConversionResult<DataSet> {
    let path = path.as_ref();
    match SourceFile::from_path(path) {
        Ok(source) => read_source(&source, options),
        Err(err) => {
            let ctx = FileContext::new(path.display().to_string(), options.format);
            report_failure(options.observer.as_ref(), options.alert_at_or_above, &ctx, &err);
            Err(err)
        }
    }
}

/// Read a buffer of a known format, without observer reporting.
pub fn read_bytes(bytes: &[u8], format: FileFormat, na_values: &[String]) -> ConversionResult<DataSet> {
    match format {
        FileFormat::Csv => csv::read_csv_from_bytes(bytes, na_values),
        FileFormat::Excel => read_excel_dispatch(bytes, na_values),
        FileFormat::Docx => read_docx_dispatch(bytes),
    }
}

fn observe(options: &ReadOptions, ctx: &FileContext, result: &ConversionResult<DataSet>) {
    match result {
        Ok(ds) => {
            if let Some(obs) = options.observer.as_ref() {
                obs.on_read(
                    ctx,
                    ReadStats {
                        rows: ds.row_count(),
                        columns: ds.column_count(),
                    },
                );
            }
        }
        Err(e) => report_failure(options.observer.as_ref(), options.alert_at_or_above, ctx, e),
    }
}

fn read_excel_dispatch(bytes: &[u8], na_values: &[String]) -> ConversionResult<DataSet> {
    #[cfg(feature = "excel")]
    {
        super::excel::read_excel_from_bytes(bytes, na_values)
    }

    #[cfg(not(feature = "excel"))]
    {
        let _ = (bytes, na_values);
        Err(crate::error::ConversionError::parse(
            FileFormat::Excel,
            "excel support not enabled (enable cargo feature 'excel')",
        ))
    }
}

fn read_docx_dispatch(bytes: &[u8]) -> ConversionResult<DataSet> {
    #[cfg(feature = "docx")]
    {
        super::docx::read_docx_from_bytes(bytes)
    }

    #[cfg(not(feature = "docx"))]
    {
        let _ = bytes;
        Err(crate::error::ConversionError::parse(
            FileFormat::Docx,
            "docx support not enabled (enable cargo feature 'docx')",
        ))
    }
}
