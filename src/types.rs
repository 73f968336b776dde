//! Core data model types.
//!
//! Every reader produces an in-memory [`DataSet`]: a [`Schema`] (ordered, uniquely named
//! [`Field`]s) plus row-major [`Value`] storage. Cleaning, projection and every writer operate on
//! that one representation.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConversionError, ConversionResult};

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Numeric column (every non-missing value is a number).
    Float64,
    /// Text column.
    Utf8,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// The ordered list of fields describing a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Indexes of all numeric fields, in schema order.
    pub fn numeric_indexes(&self) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.data_type == DataType::Float64)
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// A single cell value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value.
    Null,
    /// Number.
    Float64(f64),
    /// Text.
    Utf8(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the number held by a [`Value::Float64`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

/// Text rendering used by every writer: missing values render as an empty string and integral
/// numbers render without a fractional part.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            // -0.0 would otherwise render as "-0".
            Value::Float64(v) if *v == 0.0 => f.write_str("0"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Utf8(s) => f.write_str(s),
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<String> {
        self.schema.field_names().map(str::to_owned).collect()
    }

    /// Iterate the values of one column.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }

    /// Number of missing cells in one column.
    pub fn null_count(&self, idx: usize) -> usize {
        self.column(idx).filter(|v| v.is_null()).count()
    }

    /// The first `n` rows, used for previews.
    pub fn head(&self, n: usize) -> Self {
        Self {
            schema: self.schema.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Create a new dataset by applying `mapper` to every row.
    ///
    /// The returned dataset preserves the original schema.
    ///
    /// # Panics
    ///
    /// Panics if `mapper` returns a row with a different length than the schema field count.
    pub fn map_rows<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(&[Value]) -> Vec<Value>,
    {
        let expected_len = self.schema.fields.len();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let out = mapper(row.as_slice());
                assert!(
                    out.len() == expected_len,
                    "mapped row length {} does not match schema length {}",
                    out.len(),
                    expected_len
                );
                out
            })
            .collect();

        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Reduce (fold) all rows into an accumulator value.
    ///
    /// This is similar to `Iterator::fold`, but provides each row as `&[Value]`.
    pub fn reduce_rows<A, F>(&self, init: A, mut reducer: F) -> A
    where
        F: FnMut(A, &[Value]) -> A,
    {
        self.rows
            .iter()
            .fold(init, |acc, row| reducer(acc, row.as_slice()))
    }
}

/// File formats accepted for upload and offered as conversion targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// Comma-separated values (`.csv`).
    #[serde(alias = "CSV")]
    Csv,
    /// Office Open XML spreadsheet (`.xlsx`).
    #[serde(alias = "Excel", alias = "xlsx")]
    Excel,
    /// Office Open XML word-processing document (`.docx`).
    #[serde(alias = "DOCX")]
    Docx,
}

impl FileFormat {
    /// Parse a format from a file extension (case-insensitive, leading dot optional).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Excel),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// File extension (without the dot) used for converted files.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "xlsx",
            Self::Docx => "docx",
        }
    }

    /// Registered MIME type for downloads of this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        }
    }

    /// Label shown on the conversion selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Excel => "Excel",
            Self::Docx => "DOCX",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses either a selector label (`"Excel"`) or an extension (`"xlsx"`).
impl FromStr for FileFormat {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excel" => Ok(Self::Excel),
            other => Self::from_extension(other).ok_or_else(|| ConversionError::UnsupportedFormat {
                extension: s.to_string(),
            }),
        }
    }
}

/// An uploaded file: display name plus its raw bytes.
///
/// The declared format is derived from the name's extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    bytes: Vec<u8>,
}

impl SourceFile {
    /// Wrap an uploaded buffer.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Load a file from disk, using its file name as the display name.
    pub fn from_path(path: impl AsRef<Path>) -> ConversionResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Size in kilobytes (1 KB = 1024 bytes).
    pub fn size_kb(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0
    }

    /// Lowercased extension including the leading dot (e.g. `".csv"`), or an empty string.
    pub fn extension(&self) -> String {
        Path::new(&self.name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_ascii_lowercase()))
            .unwrap_or_default()
    }

    /// Declared format, or [`ConversionError::UnsupportedFormat`].
    pub fn format(&self) -> ConversionResult<FileFormat> {
        let extension = self.extension();
        FileFormat::from_extension(&extension)
            .ok_or(ConversionError::UnsupportedFormat { extension })
    }

    /// Name with its last extension removed; used as the base name of converted files.
    pub fn base_name(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(base, _)| base)
            .unwrap_or(&self.name)
    }
}
