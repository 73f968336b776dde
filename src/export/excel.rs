#![cfg(feature = "excel")]

//! Spreadsheet (`.xlsx`) writing.

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::error::{ConversionError, ConversionResult};
use crate::types::{DataSet, FileFormat, Value};

/// Name of the only worksheet written.
pub const SHEET_NAME: &str = "Sheet1";

/// Serialize `dataset` as a single-sheet workbook.
///
/// Row 0 holds the column names; numbers become numeric cells, text becomes string cells and
/// missing values stay blank. No index column is written.
pub fn write_xlsx(dataset: &DataSet) -> ConversionResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME).map_err(xlsx_write_error)?;

    for (col_idx, field) in dataset.schema.fields.iter().enumerate() {
        sheet
            .write_string(0, column_number(col_idx)?, field.name.as_str())
            .map_err(xlsx_write_error)?;
    }

    for (row_idx0, row) in dataset.rows.iter().enumerate() {
        // +1 because the header occupies row 0.
        let row_num = u32::try_from(row_idx0 + 1).map_err(|_| {
            ConversionError::serialize(FileFormat::Excel, format!("row {row_idx0} exceeds the sheet limit"))
        })?;
        for (col_idx, value) in row.iter().enumerate() {
            let col_num = column_number(col_idx)?;
            match value {
                Value::Null => {}
                Value::Float64(v) => {
                    sheet.write_number(row_num, col_num, *v).map_err(xlsx_write_error)?;
                }
                Value::Utf8(s) => {
                    sheet.write_string(row_num, col_num, s.as_str()).map_err(xlsx_write_error)?;
                }
            }
        }
    }

    workbook.save_to_buffer().map_err(xlsx_write_error)
}

fn column_number(col_idx: usize) -> ConversionResult<u16> {
    u16::try_from(col_idx).map_err(|_| {
        ConversionError::serialize(FileFormat::Excel, format!("column {col_idx} exceeds the sheet limit"))
    })
}

fn xlsx_write_error(err: XlsxError) -> ConversionError {
    ConversionError::serialize(FileFormat::Excel, err)
}
