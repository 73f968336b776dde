#![cfg(feature = "docx")]

//! Word-processing document (`.docx`) writing.
//!
//! The package holds the three parts a word processor needs to open it: the content-type map,
//! the package relationships and `word/document.xml`. The document body is one bordered table
//! whose first row holds the column names.

use std::io::{self, Cursor, Write};

use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{ConversionError, ConversionResult};
use crate::types::{DataSet, FileFormat};

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"</Types>"#,
);

const PACKAGE_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#,
);

/// Letter page, 1" margins, in twentieths of a point.
const PAGE_WIDTH: &str = "12240";
const PAGE_HEIGHT: &str = "15840";
const PAGE_MARGIN: &str = "1440";
const TEXT_WIDTH: usize = 9360;

/// Serialize `dataset` as a document holding a single table.
///
/// The table has `row_count + 1` rows and `column_count` columns; every cell carries the
/// value's display text. Fails with [`ConversionError::SerializationFailure`] for a dataset
/// without columns, since a table needs at least one.
pub fn write_docx(dataset: &DataSet) -> ConversionResult<Vec<u8>> {
    if dataset.column_count() == 0 {
        return Err(ConversionError::serialize(
            FileFormat::Docx,
            "cannot write a table with no columns",
        ));
    }

    let document = document_xml(dataset).map_err(docx_write_error)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let parts: [(&str, &[u8]); 3] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes()),
        ("word/document.xml", &document),
    ];
    for (name, content) in parts {
        zip.start_file(name, options).map_err(docx_write_error)?;
        zip.write_all(content).map_err(docx_write_error)?;
    }
    let cursor = zip.finish().map_err(docx_write_error)?;
    Ok(cursor.into_inner())
}

fn document_xml(dataset: &DataSet) -> io::Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let col_width = (TEXT_WIDTH / dataset.column_count()).to_string();
    writer
        .create_element("w:document")
        .with_attribute(("xmlns:w", WORDML_NS))
        .write_inner_content(|w| -> io::Result<()> {
            w.create_element("w:body").write_inner_content(|w| -> io::Result<()> {
                write_table(w, dataset, &col_width)?;
                // A body must not end on a table.
                w.create_element("w:p").write_empty()?;
                write_section(w)
            })?;
            Ok(())
        })?;

    Ok(writer.into_inner())
}

fn write_table(w: &mut Writer<Vec<u8>>, dataset: &DataSet, col_width: &str) -> io::Result<()> {
    w.create_element("w:tbl").write_inner_content(|w| -> io::Result<()> {
        w.create_element("w:tblPr").write_inner_content(|w| -> io::Result<()> {
            w.create_element("w:tblW")
                .with_attributes([("w:w", "0"), ("w:type", "auto")])
                .write_empty()?;
            w.create_element("w:tblBorders").write_inner_content(|w| -> io::Result<()> {
                for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
                    w.create_element(edge)
                        .with_attributes([
                            ("w:val", "single"),
                            ("w:sz", "4"),
                            ("w:space", "0"),
                            ("w:color", "auto"),
                        ])
                        .write_empty()?;
                }
                Ok(())
            })?;
            Ok(())
        })?;

        w.create_element("w:tblGrid").write_inner_content(|w| -> io::Result<()> {
            for _ in 0..dataset.column_count() {
                w.create_element("w:gridCol")
                    .with_attribute(("w:w", col_width))
                    .write_empty()?;
            }
            Ok(())
        })?;

        write_row(w, dataset.schema.field_names(), col_width)?;
        for row in &dataset.rows {
            write_row(w, row.iter().map(|v| v.to_string()), col_width)?;
        }
        Ok(())
    })?;
    Ok(())
}

fn write_row<I, S>(w: &mut Writer<Vec<u8>>, cells: I, col_width: &str) -> io::Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    w.create_element("w:tr").write_inner_content(|w| -> io::Result<()> {
        for cell in cells {
            w.create_element("w:tc").write_inner_content(|w| -> io::Result<()> {
                w.create_element("w:tcPr").write_inner_content(|w| -> io::Result<()> {
                    w.create_element("w:tcW")
                        .with_attributes([("w:w", col_width), ("w:type", "dxa")])
                        .write_empty()?;
                    Ok(())
                })?;
                write_paragraph(w, cell.as_ref())
            })?;
        }
        Ok(())
    })?;
    Ok(())
}

/// One paragraph with one run. Line breaks become `<w:br/>` and tabs `<w:tab/>`.
fn write_paragraph(w: &mut Writer<Vec<u8>>, text: &str) -> io::Result<()> {
    let text = sanitize_text(text);
    if text.is_empty() {
        w.create_element("w:p").write_empty()?;
        return Ok(());
    }

    w.create_element("w:p").write_inner_content(|w| -> io::Result<()> {
        w.create_element("w:r").write_inner_content(|w| -> io::Result<()> {
            for (line_idx, line) in text.split('\n').enumerate() {
                if line_idx > 0 {
                    w.create_element("w:br").write_empty()?;
                }
                for (piece_idx, piece) in line.split('\t').enumerate() {
                    if piece_idx > 0 {
                        w.create_element("w:tab").write_empty()?;
                    }
                    if !piece.is_empty() {
                        w.create_element("w:t")
                            .with_attribute(("xml:space", "preserve"))
                            .write_text_content(BytesText::new(piece))?;
                    }
                }
            }
            Ok(())
        })?;
        Ok(())
    })?;
    Ok(())
}

fn write_section(w: &mut Writer<Vec<u8>>) -> io::Result<()> {
    w.create_element("w:sectPr").write_inner_content(|w| -> io::Result<()> {
        w.create_element("w:pgSz")
            .with_attributes([("w:w", PAGE_WIDTH), ("w:h", PAGE_HEIGHT)])
            .write_empty()?;
        w.create_element("w:pgMar")
            .with_attributes([
                ("w:top", PAGE_MARGIN),
                ("w:right", PAGE_MARGIN),
                ("w:bottom", PAGE_MARGIN),
                ("w:left", PAGE_MARGIN),
                ("w:header", "720"),
                ("w:footer", "720"),
                ("w:gutter", "0"),
            ])
            .write_empty()?;
        Ok(())
    })?;
    Ok(())
}

/// Normalize line endings to `\n` and drop characters XML 1.0 cannot carry.
fn sanitize_text(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter(|&c| is_xml_char(c))
        .collect()
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}

fn docx_write_error(err: impl ToString) -> ConversionError {
    ConversionError::serialize(FileFormat::Docx, err)
}

#[cfg(test)]
mod tests {
    use super::{is_xml_char, sanitize_text};

    #[test]
    fn control_characters_are_dropped() {
        assert_eq!(sanitize_text("a\u{1}b\u{b}c"), "abc");
        assert!(!is_xml_char('\u{FFFE}'));
        assert!(is_xml_char('é'));
    }

    #[test]
    fn line_endings_become_newlines() {
        assert_eq!(sanitize_text("a\r\nb\rc"), "a\nb\nc");
    }
}
