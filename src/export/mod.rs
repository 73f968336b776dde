//! Serializing a [`DataSet`] into a downloadable file.
//!
//! [`convert`] picks the writer for the target [`FileFormat`] and names the output after the
//! caller's base name:
//!
//! | target | writer | file name | MIME type |
//! |---|---|---|---|
//! | [`FileFormat::Csv`] | [`csv::write_csv`] | `<base>.csv` | `text/csv` |
//! | [`FileFormat::Excel`] | `excel::write_xlsx` | `<base>.xlsx` | Office Open XML spreadsheet |
//! | [`FileFormat::Docx`] | `docx::write_docx` | `<base>.docx` | Office Open XML document |
//!
//! A failed write returns [`crate::ConversionError::SerializationFailure`] and no partial output.

pub mod csv;
#[cfg(feature = "docx")]
pub mod docx;
#[cfg(feature = "excel")]
pub mod excel;

use crate::error::ConversionResult;
use crate::types::{DataSet, FileFormat};

/// A converted file, ready to be offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    /// Serialized content.
    pub bytes: Vec<u8>,
    /// Base name plus the target extension.
    pub file_name: String,
    /// Registered MIME type of the target format.
    pub mime_type: &'static str,
    /// Target format.
    pub format: FileFormat,
}

/// Serialize `dataset` as `target`, naming the result `<base_name>.<extension>`.
///
/// # Examples
///
/// ```
/// use data_sweeper::export::convert;
/// use data_sweeper::types::{DataSet, DataType, Field, FileFormat, Schema, Value};
///
/// # fn main() -> Result<(), data_sweeper::ConversionError> {
/// let schema = Schema::new(vec![Field::new("a", DataType::Float64)]);
/// let ds = DataSet::new(schema, vec![vec![Value::Float64(1.0)], vec![Value::Float64(2.5)]]);
///
/// let out = convert(&ds, FileFormat::Csv, "report")?;
/// assert_eq!(out.file_name, "report.csv");
/// assert_eq!(out.mime_type, "text/csv");
/// assert_eq!(out.bytes, b"a\n1\n2.5\n");
/// # Ok(())
/// # }
/// ```
pub fn convert(dataset: &DataSet, target: FileFormat, base_name: &str) -> ConversionResult<ConvertedFile> {
    let bytes = write_bytes(dataset, target)?;
    Ok(ConvertedFile {
        bytes,
        file_name: file_name_for(base_name, target),
        mime_type: target.mime_type(),
        format: target,
    })
}

/// Serialize `dataset` as `target` without naming it.
pub fn write_bytes(dataset: &DataSet, target: FileFormat) -> ConversionResult<Vec<u8>> {
    match target {
        FileFormat::Csv => csv::write_csv(dataset),
        FileFormat::Excel => write_excel_dispatch(dataset),
        FileFormat::Docx => write_docx_dispatch(dataset),
    }
}

/// `<base_name>.<extension of target>`.
pub fn file_name_for(base_name: &str, target: FileFormat) -> String {
    format!("{base_name}.{}", target.extension())
}

fn write_excel_dispatch(dataset: &DataSet) -> ConversionResult<Vec<u8>> {
    #[cfg(feature = "excel")]
    {
        excel::write_xlsx(dataset)
    }

    #[cfg(not(feature = "excel"))]
    {
        let _ = dataset;
        Err(crate::error::ConversionError::serialize(
            FileFormat::Excel,
            "excel support not enabled (enable cargo feature 'excel')",
        ))
    }
}

fn write_docx_dispatch(dataset: &DataSet) -> ConversionResult<Vec<u8>> {
    #[cfg(feature = "docx")]
    {
        docx::write_docx(dataset)
    }

    #[cfg(not(feature = "docx"))]
    {
        let _ = dataset;
        Err(crate::error::ConversionError::serialize(
            FileFormat::Docx,
            "docx support not enabled (enable cargo feature 'docx')",
        ))
    }
}
