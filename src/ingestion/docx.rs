#![cfg(feature = "docx")]

//! Word-processing document (`.docx`) reading.
//!
//! Only `word/document.xml` is read. Every body-level paragraph with non-blank text becomes one
//! row of a single text column named [`CONTENT_COLUMN`].

use std::io::{BufRead, BufReader, Cursor};

use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesRef, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::{ConversionError, ConversionResult};
use crate::types::{DataSet, DataType, Field, FileFormat, Schema, Value};

/// Name of the single column produced from a document.
pub const CONTENT_COLUMN: &str = "Content";

const DOCUMENT_PART: &str = "word/document.xml";

/// Read a `.docx` document into a one-column [`DataSet`].
///
/// Fails with [`ConversionError::ParseFailure`] when the buffer is not a document or when no
/// paragraph holds any non-whitespace text.
pub fn read_docx_from_bytes(bytes: &[u8]) -> ConversionResult<DataSet> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(docx_parse_error)?;
    let part = archive.by_name(DOCUMENT_PART).map_err(docx_parse_error)?;
    let paragraphs = read_paragraphs(BufReader::new(part))?;

    let rows: Vec<Vec<Value>> = paragraphs
        .into_iter()
        .filter(|text| !text.trim().is_empty())
        .map(|text| vec![Value::Utf8(text)])
        .collect();
    if rows.is_empty() {
        return Err(ConversionError::parse(
            FileFormat::Docx,
            "document contains no non-empty paragraphs",
        ));
    }

    let schema = Schema::new(vec![Field::new(CONTENT_COLUMN, DataType::Utf8)]);
    Ok(DataSet::new(schema, rows))
}

/// Collect the text of every body-level paragraph, in document order.
///
/// Paragraphs nested in tables or text boxes are skipped, and so is text of paragraphs nested
/// inside another paragraph (e.g. DrawingML shapes). Inside runs, `<w:tab/>` becomes `\t` and
/// `<w:br/>`/`<w:cr/>` become `\n`.
fn read_paragraphs<R: BufRead>(source: R) -> ConversionResult<Vec<String>> {
    let mut reader = Reader::from_reader(source);
    reader.config_mut().trim_text(false);

    let mut buffer = Vec::with_capacity(1024);
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    // Open tables and text boxes; nothing inside them is body text.
    let mut hidden_depth = 0usize;
    // Open paragraphs outside hidden content; 1 means inside a body paragraph.
    let mut paragraph_depth = 0usize;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buffer).map_err(docx_parse_error)? {
            Event::Eof => break,
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" | b"txbxContent" => hidden_depth += 1,
                _ if hidden_depth > 0 => {}
                b"p" => {
                    paragraph_depth += 1;
                    if paragraph_depth == 1 {
                        current = Some(String::new());
                    }
                }
                b"r" if paragraph_depth == 1 => in_run = true,
                b"t" if paragraph_depth == 1 => in_text = true,
                _ => {}
            },
            Event::Empty(e) if hidden_depth == 0 && paragraph_depth <= 1 => {
                match (e.local_name().as_ref(), current.as_mut()) {
                    (b"p", None) => paragraphs.push(String::new()),
                    (b"tab", Some(text)) if in_run => text.push('\t'),
                    (b"br" | b"cr", Some(text)) if in_run => text.push('\n'),
                    _ => {}
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"tbl" | b"txbxContent" => hidden_depth = hidden_depth.saturating_sub(1),
                _ if hidden_depth > 0 => {}
                b"p" => {
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                    if paragraph_depth == 0 {
                        paragraphs.extend(current.take());
                    }
                }
                b"r" if paragraph_depth == 1 => in_run = false,
                b"t" if paragraph_depth == 1 => in_text = false,
                _ => {}
            },
            Event::Text(text) if in_text && hidden_depth == 0 && paragraph_depth == 1 => {
                if let Some(current) = current.as_mut() {
                    current.push_str(&text.xml_content().map_err(docx_parse_error)?);
                }
            }
            Event::GeneralRef(reference) if in_text && hidden_depth == 0 && paragraph_depth == 1 => {
                if let Some(current) = current.as_mut() {
                    push_reference(current, &reference)?;
                }
            }
            _ => {}
        }
        buffer.clear();
    }

    Ok(paragraphs)
}

/// Append a character reference (`&#x41;`) or a predefined entity (`&amp;`).
fn push_reference(text: &mut String, reference: &BytesRef<'_>) -> ConversionResult<()> {
    let raw = reference.xml_content().map_err(docx_parse_error)?;
    if let Some(number) = raw.strip_prefix('#') {
        let code = match number.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => number.parse::<u32>(),
        }
        .map_err(docx_parse_error)?;
        text.extend(char::from_u32(code));
    } else if let Some(entity) = resolve_xml_entity(&raw) {
        text.push_str(entity);
    } else {
        return Err(ConversionError::parse(
            FileFormat::Docx,
            format!("unknown entity '&{raw};'"),
        ));
    }
    Ok(())
}

fn docx_parse_error(err: impl ToString) -> ConversionError {
    ConversionError::parse(FileFormat::Docx, err)
}
