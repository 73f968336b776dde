//! Per-file orchestration: read → clean → project → chart → convert.
//!
//! Each uploaded file is processed on its own with an explicit [`FileSettings`]. A
//! [`SessionPlan`] maps file names to settings so a batch can be described up front, for
//! example as JSON:
//!
//! ```
//! use data_sweeper::session::SessionPlan;
//! use data_sweeper::types::FileFormat;
//!
//! # fn main() -> Result<(), data_sweeper::ConversionError> {
//! let plan = SessionPlan::from_json_str(
//!     r#"{
//!         "defaults": { "convert_to": "csv" },
//!         "files": {
//!             "sales.xlsx": {
//!                 "cleaning": { "enabled": true, "remove_duplicates": true },
//!                 "columns": ["region", "total"],
//!                 "convert_to": "docx"
//!             }
//!         }
//!     }"#,
//! )?;
//! assert_eq!(plan.settings_for("sales.xlsx").convert_to, Some(FileFormat::Docx));
//! assert_eq!(plan.settings_for("other.csv").convert_to, Some(FileFormat::Csv));
//! assert_eq!(plan.settings_for("other.csv").preview_rows, 5);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConversionError, ConversionResult};
use crate::export::{convert, ConvertedFile};
use crate::ingestion::{read_source, ReadOptions};
use crate::observability::{report_failure, FileContext};
use crate::processing::{bar_chart_data, clean, select_columns, CleaningOptions, CleaningReport};
use crate::types::{DataSet, FileFormat, SourceFile};

/// Rows shown in a preview unless configured otherwise.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// What to do with one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Cleaning operations to run.
    pub cleaning: CleaningOptions,
    /// Columns to keep, in output order. `None` keeps every column.
    pub columns: Option<Vec<String>>,
    /// Whether to compute chart data.
    pub show_visualization: bool,
    /// Target format. `None` skips conversion.
    pub convert_to: Option<FileFormat>,
    /// Rows in the preview.
    pub preview_rows: usize,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            cleaning: CleaningOptions::default(),
            columns: None,
            show_visualization: false,
            convert_to: None,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

/// Settings for a batch of files: defaults plus per-file overrides keyed by file name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionPlan {
    /// Used for every file without an entry in `files`.
    pub defaults: FileSettings,
    /// Per-file settings. An entry replaces the defaults entirely.
    pub files: BTreeMap<String, FileSettings>,
}

impl SessionPlan {
    /// A plan applying `settings` to every file.
    pub fn uniform(settings: FileSettings) -> Self {
        Self {
            defaults: settings,
            files: BTreeMap::new(),
        }
    }

    /// Parse a plan from JSON.
    pub fn from_json_str(input: &str) -> ConversionResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a JSON plan from disk.
    pub fn from_json_path(path: impl AsRef<Path>) -> ConversionResult<Self> {
        let input = fs::read_to_string(path)?;
        Self::from_json_str(&input)
    }

    /// Settings for the file called `name`.
    pub fn settings_for(&self, name: &str) -> &FileSettings {
        self.files.get(name).unwrap_or(&self.defaults)
    }
}

/// Everything produced for one successfully processed file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    /// Uploaded file name.
    pub name: String,
    /// Upload size in KiB.
    pub size_kb: f64,
    /// Format the file was read as.
    pub format: FileFormat,
    /// First rows of the table as read, before cleaning.
    pub preview: DataSet,
    /// The table after cleaning and projection.
    pub table: DataSet,
    /// What cleaning changed.
    pub cleaning: CleaningReport,
    /// Chart series, when visualization was requested.
    pub chart: Option<DataSet>,
    /// Converted output, when a target format was set.
    pub converted: Option<ConvertedFile>,
}

/// A file that could not be processed.
#[derive(Debug)]
pub struct FileFailure {
    /// Uploaded file name.
    pub name: String,
    /// Why it failed.
    pub error: ConversionError,
}

/// Outcome of processing a batch.
#[derive(Debug, Default)]
pub struct SessionReport {
    /// Successful files, in input order.
    pub processed: Vec<FileReport>,
    /// Failed files, in input order.
    pub failures: Vec<FileFailure>,
}

impl SessionReport {
    /// `true` when no file failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the pipeline for uploaded files.
///
/// The [`ReadOptions`] (format override, missing-value tokens, observer) apply to every file.
#[derive(Debug, Clone, Default)]
pub struct Session {
    options: ReadOptions,
}

impl Session {
    /// Create a session reading files with `options`.
    pub fn new(options: ReadOptions) -> Self {
        Self { options }
    }

    /// Read options used for every file.
    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Process one file.
    ///
    /// Read failures are reported to the observer by the reader; failures in later steps are
    /// reported here.
    pub fn process_file(&self, source: &SourceFile, settings: &FileSettings) -> ConversionResult<FileReport> {
        let table = read_source(source, &self.options)?;
        let format = match self.options.format {
            Some(format) => format,
            None => source.format()?,
        };
        let ctx = FileContext::new(source.name(), Some(format));

        let result = self.transform(source, format, table, settings, &ctx);
        if let Err(err) = &result {
            report_failure(self.options.observer.as_ref(), self.options.alert_at_or_above, &ctx, err);
        }
        result
    }

    /// Process `sources` in order, each with its settings from `plan`.
    ///
    /// A failing file is recorded in [`SessionReport::failures`] and the rest still run.
    pub fn process_files(&self, sources: &[SourceFile], plan: &SessionPlan) -> SessionReport {
        let mut report = SessionReport::default();
        for source in sources {
            match self.process_file(source, plan.settings_for(source.name())) {
                Ok(file) => report.processed.push(file),
                Err(error) => report.failures.push(FileFailure {
                    name: source.name().to_string(),
                    error,
                }),
            }
        }
        report
    }

    fn transform(
        &self,
        source: &SourceFile,
        format: FileFormat,
        table: DataSet,
        settings: &FileSettings,
        ctx: &FileContext,
    ) -> ConversionResult<FileReport> {
        let preview = table.head(settings.preview_rows);

        let (cleaned, cleaning) = clean(&table, &settings.cleaning);
        if settings.cleaning.enabled {
            if let Some(obs) = self.options.observer.as_ref() {
                obs.on_cleaned(ctx, &cleaning);
            }
        }

        let table = match &settings.columns {
            Some(columns) => select_columns(&cleaned, columns)?,
            None => cleaned,
        };

        let chart = settings.show_visualization.then(|| bar_chart_data(&table));

        let converted = match settings.convert_to {
            Some(target) => {
                let file = convert(&table, target, source.base_name())?;
                if let Some(obs) = self.options.observer.as_ref() {
                    obs.on_exported(ctx, &file);
                }
                Some(file)
            }
            None => None,
        };

        Ok(FileReport {
            name: source.name().to_string(),
            size_kb: source.size_kb(),
            format,
            preview,
            table,
            cleaning,
            chart,
            converted,
        })
    }
}
