//! In-memory data transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by reading. Every
//! operation returns a new dataset and leaves its input untouched.
//!
//! Currently implemented:
//!
//! - [`drop_duplicates()`]: remove rows that repeat an earlier row
//! - [`fill_missing_with_mean()`]: mean imputation for numeric columns
//! - [`select_columns()`]: column projection
//! - [`bar_chart_data()`]: the numeric columns plotted by the UI
//! - [`reduce()`]: column reductions (count/sum/mean)
//!
//! ## Example: clean → project
//!
//! ```rust
//! use data_sweeper::processing::{clean, select_columns, CleaningOptions};
//! use data_sweeper::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("a", DataType::Float64),
//!     Field::new("b", DataType::Float64),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Float64(1.0), Value::Float64(2.0)],
//!         vec![Value::Float64(1.0), Value::Float64(2.0)],
//!         vec![Value::Null, Value::Float64(4.0)],
//!     ],
//! );
//!
//! let (cleaned, report) = clean(&ds, &CleaningOptions::all());
//! assert_eq!(report.duplicates_removed, 1);
//! assert_eq!(cleaned.rows[1][0], Value::Float64(1.0));
//!
//! let only_b = select_columns(&cleaned, &["b"]).unwrap();
//! assert_eq!(only_b.column_count(), 1);
//! ```

pub mod chart;
pub mod dedupe;
pub mod impute;
pub mod reduce;
pub mod select;

use serde::{Deserialize, Serialize};

use crate::types::DataSet;

pub use chart::bar_chart_data;
pub use dedupe::drop_duplicates;
pub use impute::fill_missing_with_mean;
pub use reduce::{reduce, ReduceOp};
pub use select::select_columns;

/// Which cleaning operations to run on a file.
///
/// Nothing runs unless `enabled` is set, mirroring the "clean data" toggle that gates the two
/// cleaning buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    /// Master toggle.
    pub enabled: bool,
    /// Remove rows that repeat an earlier row.
    pub remove_duplicates: bool,
    /// Replace missing numeric cells with their column mean.
    pub fill_missing: bool,
}

impl CleaningOptions {
    /// Every cleaning operation enabled.
    pub fn all() -> Self {
        Self {
            enabled: true,
            remove_duplicates: true,
            fill_missing: true,
        }
    }
}

/// What a cleaning pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningReport {
    /// Rows dropped as duplicates.
    pub duplicates_removed: usize,
    /// Missing numeric cells replaced by a mean.
    pub cells_filled: usize,
}

/// Run the enabled cleaning operations: deduplication first, then imputation.
pub fn clean(dataset: &DataSet, options: &CleaningOptions) -> (DataSet, CleaningReport) {
    let mut report = CleaningReport::default();
    if !options.enabled {
        return (dataset.clone(), report);
    }

    let mut out = dataset.clone();
    if options.remove_duplicates {
        let deduped = drop_duplicates(&out);
        report.duplicates_removed = out.row_count() - deduped.row_count();
        out = deduped;
    }
    if options.fill_missing {
        let before = numeric_null_count(&out);
        out = fill_missing_with_mean(&out);
        report.cells_filled = before - numeric_null_count(&out);
    }
    (out, report)
}

fn numeric_null_count(dataset: &DataSet) -> usize {
    dataset
        .schema
        .numeric_indexes()
        .into_iter()
        .map(|idx| dataset.null_count(idx))
        .sum()
}
