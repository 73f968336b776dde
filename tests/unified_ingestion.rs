use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use data_sweeper::ingestion::{read_bytes, read_from_path, read_source, ReadOptions};
use data_sweeper::types::{FileFormat, SourceFile, Value};
use data_sweeper::ConversionError;

fn tmp_file(ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("data-sweeper-unified-{nanos}.{ext}"))
}

#[test]
fn read_from_path_detects_csv_by_extension() {
    let ds = read_from_path("tests/fixtures/people.csv", &ReadOptions::default()).unwrap();
    assert_eq!(ds.row_count(), 3);
    assert_eq!(ds.rows[0][1], Value::Utf8("Ada".to_string()));
}

#[test]
fn extension_match_is_case_insensitive() {
    let file = SourceFile::new("DATA.CSV", "a\n1\n");
    let ds = read_source(&file, &ReadOptions::default()).unwrap();
    assert_eq!(ds.rows, vec![vec![Value::Float64(1.0)]]);
}

#[test]
fn unsupported_extension_is_rejected() {
    let file = SourceFile::new("report.txt", "hello");
    let err = read_source(&file, &ReadOptions::default()).unwrap_err();
    match err {
        ConversionError::UnsupportedFormat { extension } => assert_eq!(extension, ".txt"),
        other => panic!("expected UnsupportedFormat, got: {other}"),
    }
}

#[test]
fn file_without_extension_is_rejected() {
    let file = SourceFile::new("README", "hello");
    let err = read_source(&file, &ReadOptions::default()).unwrap_err();
    assert!(matches!(err, ConversionError::UnsupportedFormat { .. }));
}

#[test]
fn format_override_ignores_extension() {
    let file = SourceFile::new("export.txt", "a,b\n1,2\n");
    let opts = ReadOptions {
        format: Some(FileFormat::Csv),
        ..Default::default()
    };
    let ds = read_source(&file, &opts).unwrap();
    assert_eq!(ds.column_names(), vec!["a", "b"]);
}

#[test]
fn na_values_apply_through_read_options() {
    let file = SourceFile::new("x.csv", "x\n1\n-\n");
    let opts = ReadOptions {
        na_values: vec!["-".to_string()],
        ..Default::default()
    };
    let ds = read_source(&file, &opts).unwrap();
    assert_eq!(ds.rows[1][0], Value::Null);
}

#[test]
fn missing_path_is_an_io_error() {
    let err = read_from_path("tests/fixtures/does_not_exist.csv", &ReadOptions::default()).unwrap_err();
    assert!(matches!(err, ConversionError::Io(_)));
}

#[test]
fn read_from_path_handles_written_file() {
    let path = tmp_file("csv");
    std::fs::write(&path, "name,score\nAda,1\n").unwrap();
    let ds = read_from_path(&path, &ReadOptions::default()).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(ds.rows[0][1], Value::Float64(1.0));
}

#[cfg(feature = "excel")]
#[test]
fn read_bytes_dispatches_to_excel() {
    let mut wb = rust_xlsxwriter::Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "n").unwrap();
    ws.write_number(1, 0, 4).unwrap();
    let bytes = wb.save_to_buffer().unwrap();

    let ds = read_bytes(&bytes, FileFormat::Excel, &[]).unwrap();
    assert_eq!(ds.rows, vec![vec![Value::Float64(4.0)]]);
}

#[test]
fn csv_bytes_declared_as_docx_fail_to_parse() {
    let err = read_bytes(b"a,b\n1,2\n", FileFormat::Docx, &[]).unwrap_err();
    assert!(matches!(
        err,
        ConversionError::ParseFailure {
            format: FileFormat::Docx,
            ..
        }
    ));
}
