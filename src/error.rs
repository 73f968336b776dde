use thiserror::Error;

use crate::types::FileFormat;

/// Convenience result type for reading, cleaning and converting data.
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Error type returned across the pipeline.
///
/// Every failure is scoped to a single file: callers processing a batch report the error for that
/// file and move on to the next one.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The file extension is not one of the accepted formats.
    #[error("unsupported file type: '{extension}'")]
    UnsupportedFormat { extension: String },

    /// The content could not be parsed as the declared format.
    #[error("failed to parse {format} input: {message}")]
    ParseFailure { format: FileFormat, message: String },

    /// A column selection named a column the table does not have.
    #[error("unknown column '{column}'. columns={available:?}")]
    InvalidColumn {
        column: String,
        available: Vec<String>,
    },

    /// The target format writer could not serialize the table.
    #[error("failed to write {format} output: {message}")]
    SerializationFailure { format: FileFormat, message: String },

    /// Underlying I/O error (only raised by path-based helpers).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A session plan could not be deserialized.
    #[error("invalid session plan: {0}")]
    PlanError(#[from] serde_json::Error),
}

impl ConversionError {
    pub(crate) fn parse(format: FileFormat, message: impl ToString) -> Self {
        Self::ParseFailure {
            format,
            message: message.to_string(),
        }
    }

    pub(crate) fn serialize(format: FileFormat, message: impl ToString) -> Self {
        Self::SerializationFailure {
            format,
            message: message.to_string(),
        }
    }
}
