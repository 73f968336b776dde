#![cfg(feature = "excel")]

//! Spreadsheet (`.xlsx`) reading.

use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};

use crate::error::{ConversionError, ConversionResult};
use crate::types::{DataSet, FileFormat};

use super::infer::{infer_dataset, normalize_headers, RawCell};

/// Read an `.xlsx` workbook into an in-memory [`DataSet`].
///
/// Behavior:
/// - Uses the first sheet in the workbook only
/// - Detects the first non-empty row as the header row
/// - Numeric cells are numbers; string cells go through the same inference as CSV; booleans,
///   dates and error cells are text
pub fn read_excel_from_bytes(bytes: &[u8], na_values: &[String]) -> ConversionResult<DataSet> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).map_err(excel_parse_error)?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(excel_parse_error)?,
        None => return Err(ConversionError::parse(FileFormat::Excel, "workbook has no sheets")),
    };

    read_sheet_range(&range, na_values)
}

fn read_sheet_range(range: &Range<Data>, na_values: &[String]) -> ConversionResult<DataSet> {
    let header_row_idx = range
        .rows()
        .position(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .ok_or_else(|| {
            ConversionError::parse(
                FileFormat::Excel,
                "sheet has no non-empty rows (no header row found)",
            )
        })?;

    let mut header_cells: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<RawCell>> = Vec::new();
    for (idx0, row) in range.rows().enumerate() {
        if idx0 < header_row_idx {
            continue;
        }
        if idx0 == header_row_idx {
            header_cells = row.iter().map(cell_to_header_string).collect();
            continue;
        }
        rows.push(row.iter().map(|c| convert_cell(c, na_values)).collect());
    }

    // The used range can extend past the last titled column; trailing untitled columns that hold
    // no data are dropped instead of becoming `Unnamed: n` columns.
    let mut width = header_cells.len();
    while width > 0
        && header_cells[width - 1].is_empty()
        && rows.iter().all(|row| matches!(row.get(width - 1), None | Some(RawCell::Missing)))
    {
        width -= 1;
    }
    header_cells.truncate(width);
    for row in &mut rows {
        row.truncate(width);
    }

    Ok(infer_dataset(normalize_headers(header_cells), rows))
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        other => other.to_string(),
    }
}

fn convert_cell(c: &Data, na_values: &[String]) -> RawCell {
    match c {
        Data::Empty => RawCell::Missing,
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Float(f) => RawCell::Number(*f),
        Data::String(s) => RawCell::from_field(s, na_values),
        Data::Bool(b) => RawCell::Text(b.to_string()),
        Data::DateTime(dt) => RawCell::Text(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Error(e) => RawCell::Text(format!("{e:?}")),
    }
}

fn excel_parse_error(err: calamine::XlsxError) -> ConversionError {
    ConversionError::parse(FileFormat::Excel, err)
}
