//! CSV reading.

use std::path::Path;

use crate::error::{ConversionError, ConversionResult};
use crate::types::{DataSet, FileFormat};

use super::infer::{infer_dataset, normalize_headers, RawCell};

/// Read CSV bytes into an in-memory [`DataSet`].
///
/// Rules:
///
/// - The first row is the header; every later row is a data row.
/// - Rows shorter than the header are padded with missing values; longer rows are rejected.
/// - Empty fields and any of `na_values` are missing.
/// - Column types are inferred (see [`super::infer`]).
pub fn read_csv_from_bytes(bytes: &[u8], na_values: &[String]) -> ConversionResult<DataSet> {
    let mut rdr = csv_reader_builder().from_reader(bytes);
    read_csv_from_reader(&mut rdr, na_values)
}

/// Read a CSV file from disk.
pub fn read_csv_from_path(path: impl AsRef<Path>, na_values: &[String]) -> ConversionResult<DataSet> {
    let bytes = std::fs::read(path)?;
    read_csv_from_bytes(&bytes, na_values)
}

/// Read CSV data from an existing CSV reader.
///
/// The reader must be configured with `has_headers(true)` and `flexible(true)`.
pub fn read_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    na_values: &[String],
) -> ConversionResult<DataSet> {
    let headers = rdr.headers().map_err(csv_parse_error)?.clone();
    if headers.is_empty() {
        return Err(ConversionError::parse(FileFormat::Csv, "no columns to parse from file"));
    }
    let width = headers.len();
    let headers = normalize_headers(headers.iter().map(str::to_owned).collect());

    let mut rows: Vec<Vec<RawCell>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        let record = result.map_err(csv_parse_error)?;
        if record.len() > width {
            // Line where the record starts; blank lines and multi-line quoted fields count.
            // Falls back to the record count (+1 for the header) if no position is tracked.
            let line = record
                .position()
                .map_or(row_idx0 as u64 + 2, |pos| pos.line());
            return Err(ConversionError::parse(
                FileFormat::Csv,
                format!("expected {width} fields in line {line}, saw {}", record.len()),
            ));
        }
        rows.push(record.iter().map(|raw| RawCell::from_field(raw, na_values)).collect());
    }

    Ok(infer_dataset(headers, rows))
}

fn csv_reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}

fn csv_parse_error(err: csv::Error) -> ConversionError {
    ConversionError::parse(FileFormat::Csv, err)
}
