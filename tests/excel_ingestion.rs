#![cfg(feature = "excel")]

use rust_xlsxwriter::{Workbook, Worksheet};

use data_sweeper::ingestion::excel::read_excel_from_bytes;
use data_sweeper::types::{DataType, Value};
use data_sweeper::ConversionError;

fn workbook_bytes(fill: impl FnOnce(&mut Worksheet)) -> Vec<u8> {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("Sheet1").unwrap();
    fill(ws);
    wb.save_to_buffer().unwrap()
}

fn people_xlsx() -> Vec<u8> {
    workbook_bytes(|ws| {
        ws.write_string(0, 0, "id").unwrap();
        ws.write_string(0, 1, "name").unwrap();
        ws.write_string(0, 2, "score").unwrap();
        ws.write_string(0, 3, "active").unwrap();

        ws.write_number(1, 0, 1).unwrap();
        ws.write_string(1, 1, "Ada").unwrap();
        ws.write_number(1, 2, 98.5).unwrap();
        ws.write_boolean(1, 3, true).unwrap();

        ws.write_number(2, 0, 2).unwrap();
        ws.write_string(2, 1, "Grace").unwrap();
        // score left blank
        ws.write_boolean(2, 3, false).unwrap();
    })
}

#[test]
fn read_excel_happy_path() {
    let ds = read_excel_from_bytes(&people_xlsx(), &[]).unwrap();

    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.column_names(), vec!["id", "name", "score", "active"]);
    let types: Vec<DataType> = ds.schema.fields.iter().map(|f| f.data_type).collect();
    assert_eq!(
        types,
        vec![DataType::Float64, DataType::Utf8, DataType::Float64, DataType::Utf8]
    );
    assert_eq!(ds.rows[0][2], Value::Float64(98.5));
    assert_eq!(ds.rows[1][2], Value::Null);
}

#[test]
fn numeric_strings_make_a_numeric_column() {
    let bytes = workbook_bytes(|ws| {
        ws.write_string(0, 0, "n").unwrap();
        ws.write_string(1, 0, "12").unwrap();
        ws.write_number(2, 0, 3.5).unwrap();
    });
    let ds = read_excel_from_bytes(&bytes, &[]).unwrap();
    assert_eq!(ds.schema.fields[0].data_type, DataType::Float64);
    assert_eq!(ds.rows[0][0], Value::Float64(12.0));
}

#[test]
fn header_is_first_non_empty_row() {
    let bytes = workbook_bytes(|ws| {
        ws.write_string(2, 0, "a").unwrap();
        ws.write_number(3, 0, 1).unwrap();
    });
    let ds = read_excel_from_bytes(&bytes, &[]).unwrap();
    assert_eq!(ds.column_names(), vec!["a"]);
    assert_eq!(ds.rows, vec![vec![Value::Float64(1.0)]]);
}

#[test]
fn empty_sheet_is_a_parse_failure() {
    let bytes = workbook_bytes(|_| {});
    let err = read_excel_from_bytes(&bytes, &[]).unwrap_err();
    assert!(matches!(err, ConversionError::ParseFailure { .. }));
}

#[test]
fn corrupt_workbook_is_a_parse_failure() {
    let err = read_excel_from_bytes(b"not a zip archive", &[]).unwrap_err();
    assert!(matches!(err, ConversionError::ParseFailure { .. }));
}
