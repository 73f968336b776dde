//! `data-sweeper` reads uploaded CSV, Excel and Word files into an in-memory [`types::DataSet`],
//! cleans it, and writes it back out in another format.
//!
//! The column types are inferred from the data: a column is numeric when every non-missing cell
//! parses as a number, and text otherwise. There is no user-provided schema.
//!
//! ## Formats
//!
//! | format | extension | read | write |
//! |---|---|---|---|
//! | CSV | `.csv` | header row + records | header row + records |
//! | Excel (feature `excel`) | `.xlsx` | first worksheet | one sheet named `Sheet1` |
//! | DOCX (feature `docx`) | `.docx` | one `Content` row per paragraph | one table |
//!
//! Any other extension fails with [`ConversionError::UnsupportedFormat`].
//!
//! ## Pipeline
//!
//! ```rust
//! use data_sweeper::export::convert;
//! use data_sweeper::ingestion::{read_source, ReadOptions};
//! use data_sweeper::processing::{clean, select_columns, CleaningOptions};
//! use data_sweeper::types::{FileFormat, SourceFile, Value};
//!
//! # fn main() -> Result<(), data_sweeper::ConversionError> {
//! let file = SourceFile::new("scores.csv", "name,score\nAda,90\nAda,90\nBob,\n");
//! let ds = read_source(&file, &ReadOptions::default())?;
//!
//! let (cleaned, report) = clean(&ds, &CleaningOptions::all());
//! assert_eq!(report.duplicates_removed, 1);
//! assert_eq!(cleaned.rows[1][1], Value::Float64(90.0));
//!
//! let scores = select_columns(&cleaned, &["score"])?;
//! let out = convert(&scores, FileFormat::Csv, file.base_name())?;
//! assert_eq!(out.file_name, "scores.csv");
//! assert_eq!(out.bytes, b"score\n90\n90\n");
//! # Ok(())
//! # }
//! ```
//!
//! [`session::Session`] runs the same steps for a batch of files, driven by per-file
//! [`session::FileSettings`].
//!
//! ## Modules
//!
//! - [`ingestion`]: readers and type inference
//! - [`processing`]: cleaning, projection, chart data and reductions
//! - [`export`]: writers and download metadata
//! - [`session`]: per-file orchestration
//! - [`observability`]: observer hooks for read/clean/export/failure events
//! - [`types`]: dataset and file types
//! - [`error`]: the error type shared by every step

pub mod error;
pub mod export;
pub mod ingestion;
pub mod observability;
pub mod processing;
pub mod session;
pub mod types;

pub use error::{ConversionError, ConversionResult};
