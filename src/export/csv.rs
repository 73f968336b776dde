//! CSV writing.

use std::io::Write;

use crate::error::{ConversionError, ConversionResult};
use crate::types::{DataSet, FileFormat};

/// Serialize `dataset` as CSV: a header row, then one record per row.
///
/// Missing values are empty fields and no index column is written. A zero-column dataset
/// produces an empty buffer.
pub fn write_csv(dataset: &DataSet) -> ConversionResult<Vec<u8>> {
    if dataset.column_count() == 0 {
        return Ok(Vec::new());
    }

    let mut wtr = csv::Writer::from_writer(Vec::new());
    write_csv_to_writer(dataset, &mut wtr)?;
    wtr.into_inner()
        .map_err(|e| ConversionError::serialize(FileFormat::Csv, e.error()))
}

/// Write `dataset` into an existing CSV writer and flush it.
pub fn write_csv_to_writer<W: Write>(dataset: &DataSet, wtr: &mut csv::Writer<W>) -> ConversionResult<()> {
    wtr.write_record(dataset.schema.field_names())
        .map_err(csv_write_error)?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(|v| v.to_string()))
            .map_err(csv_write_error)?;
    }
    wtr.flush()
        .map_err(|e| ConversionError::serialize(FileFormat::Csv, e))
}

fn csv_write_error(err: csv::Error) -> ConversionError {
    ConversionError::serialize(FileFormat::Csv, err)
}
