#![cfg(feature = "docx")]

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use data_sweeper::ingestion::docx::{read_docx_from_bytes, CONTENT_COLUMN};
use data_sweeper::types::{DataType, Value};
use data_sweeper::ConversionError;

fn docx_bytes(body: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(document.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

fn paragraph(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
}

fn contents(ds: &data_sweeper::types::DataSet) -> Vec<Value> {
    ds.rows.iter().map(|row| row[0].clone()).collect()
}

#[test]
fn one_row_per_non_empty_paragraph() {
    let body = format!("{}<w:p/>{}{}", paragraph("Hello"), paragraph("   "), paragraph("World"));
    let ds = read_docx_from_bytes(&docx_bytes(&body)).unwrap();

    assert_eq!(ds.column_names(), vec![CONTENT_COLUMN]);
    assert_eq!(ds.schema.fields[0].data_type, DataType::Utf8);
    assert_eq!(
        contents(&ds),
        vec![Value::Utf8("Hello".to_string()), Value::Utf8("World".to_string())]
    );
}

#[test]
fn runs_are_joined_and_breaks_kept() {
    let body = r#"<w:p><w:r><w:t>Hel</w:t></w:r><w:r><w:t>lo</w:t><w:tab/><w:t>a</w:t><w:br/><w:t>b</w:t></w:r></w:p>"#;
    let ds = read_docx_from_bytes(&docx_bytes(body)).unwrap();
    assert_eq!(contents(&ds), vec![Value::Utf8("Hello\ta\nb".to_string())]);
}

#[test]
fn entities_are_decoded() {
    let ds = read_docx_from_bytes(&docx_bytes(&paragraph("Fish &amp; Chips &#x263A;"))).unwrap();
    assert_eq!(contents(&ds), vec![Value::Utf8("Fish & Chips \u{263A}".to_string())]);
}

#[test]
fn table_paragraphs_are_skipped() {
    let body = format!(
        "{}<w:tbl><w:tr><w:tc>{}</w:tc></w:tr></w:tbl>{}",
        paragraph("before"),
        paragraph("cell"),
        paragraph("after")
    );
    let ds = read_docx_from_bytes(&docx_bytes(&body)).unwrap();
    assert_eq!(
        contents(&ds),
        vec![Value::Utf8("before".to_string()), Value::Utf8("after".to_string())]
    );
}

#[test]
fn text_box_inside_paragraph_keeps_outer_text() {
    let body = concat!(
        "<w:p><w:r><w:t>Before</w:t></w:r>",
        "<w:r><w:drawing><wps:txbx><w:txbxContent>",
        "<w:p><w:r><w:t>Box</w:t></w:r></w:p>",
        "</w:txbxContent></wps:txbx></w:drawing></w:r>",
        "<w:r><w:t>After</w:t></w:r></w:p>",
    );
    let ds = read_docx_from_bytes(&docx_bytes(body)).unwrap();
    assert_eq!(contents(&ds), vec![Value::Utf8("BeforeAfter".to_string())]);
}

#[test]
fn drawing_paragraphs_inside_a_paragraph_are_ignored() {
    let body = format!(
        "{}{}",
        concat!(
            "<w:p><w:r><w:t>Chart:</w:t></w:r>",
            "<w:r><w:drawing><a:graphic><a:p><a:r><a:t>label</a:t></a:r></a:p><a:p/></a:graphic></w:drawing>",
            "<w:tab/><w:t>done</w:t></w:r></w:p>",
        ),
        paragraph("next")
    );
    let ds = read_docx_from_bytes(&docx_bytes(&body)).unwrap();
    assert_eq!(
        contents(&ds),
        vec![Value::Utf8("Chart:\tdone".to_string()), Value::Utf8("next".to_string())]
    );
}

#[test]
fn text_box_only_document_is_a_parse_failure() {
    let body = "<w:p><w:r><w:txbxContent><w:p><w:r><w:t>Box</w:t></w:r></w:p></w:txbxContent></w:r></w:p>";
    let err = read_docx_from_bytes(&docx_bytes(body)).unwrap_err();
    assert!(matches!(err, ConversionError::ParseFailure { .. }));
}

#[test]
fn whitespace_only_document_is_a_parse_failure() {
    let body = format!("{}<w:p/>", paragraph("  \t "));
    let err = read_docx_from_bytes(&docx_bytes(&body)).unwrap_err();
    assert!(matches!(err, ConversionError::ParseFailure { .. }));
}

#[test]
fn archive_without_document_part_is_a_parse_failure() {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("other.xml", SimpleFileOptions::default()).unwrap();
    zip.write_all(b"<x/>").unwrap();
    let bytes = zip.finish().unwrap().into_inner();

    let err = read_docx_from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, ConversionError::ParseFailure { .. }));
}
