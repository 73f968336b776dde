//! Reading entrypoints and implementations.
//!
//! Most callers should use [`read_source`] (from [`unified`]) which:
//!
//! - takes the format from the file extension (or you can override via [`ReadOptions`])
//! - reads into an in-memory [`crate::types::DataSet`] with inferred column types
//! - optionally reports success/failure/alerts to a [`crate::observability::PipelineObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - `excel` (feature `excel`)
//! - `docx` (feature `docx`)

pub mod csv;
#[cfg(feature = "docx")]
pub mod docx;
#[cfg(feature = "excel")]
pub mod excel;
pub mod infer;
pub mod unified;

pub use unified::{read_bytes, read_from_path, read_source, ReadOptions};
