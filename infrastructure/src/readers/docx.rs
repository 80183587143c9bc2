//! DOCX paragraph extraction.
//!
//! Reads `word/document.xml` from the package and turns every `w:p` into a
//! [`Paragraph`] and every `w:r` into a [`Run`]. A run is emphasized when
//! its properties carry `w:b` that is not switched off.

use quick_xml::Reader as XmlReader;
use quick_xml::events::{BytesStart, Event};
use quiz_application::ReadError;
use quiz_domain::{Paragraph, Run};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Read the paragraph stream of a DOCX file
pub fn read_docx(path: &Path) -> Result<Vec<Paragraph>, ReadError> {
    let xml = read_zip_entry(path, DOCUMENT_PART)?;
    parse_document_xml(&xml)
}

fn read_zip_entry(path: &Path, name: &str) -> Result<String, ReadError> {
    let file = File::open(path).map_err(|e| ReadError::Io(e.to_string()))?;
    let mut archive = ZipArchive::new(file).map_err(|e| ReadError::Zip(e.to_string()))?;
    let mut entry = archive
        .by_name(name)
        .map_err(|e| ReadError::Zip(format!("{name}: {e}")))?;
    let mut buffer = Vec::new();
    entry
        .read_to_end(&mut buffer)
        .map_err(|e| ReadError::Io(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| ReadError::Utf8(e.to_string()))
}

fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|b| *b == b':') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

fn attr_value<B>(reader: &XmlReader<B>, element: &BytesStart, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .with_checks(false)
        .filter_map(Result::ok)
        .find(|attr| local_name(attr.key.as_ref()) == key)
        .and_then(|attr| {
            attr.decode_and_unescape_value(reader)
                .ok()
                .map(|value| value.into_owned())
        })
}

/// `w:b` toggles bold on unless its value switches it off
fn bold_enabled<B>(reader: &XmlReader<B>, element: &BytesStart) -> bool {
    !matches!(
        attr_value(reader, element, b"val").as_deref(),
        Some("0" | "false" | "off")
    )
}

/// Where the cursor sits relative to the current run
#[derive(Default)]
struct RunCursor {
    in_run: bool,
    in_props: bool,
    in_text: bool,
    text: String,
    bold: bool,
}

impl RunCursor {
    fn start(&mut self) {
        *self = Self {
            in_run: true,
            ..Self::default()
        };
    }

    fn finish(&mut self) -> Option<Run> {
        let run = (!self.text.is_empty()).then(|| Run::new(std::mem::take(&mut self.text), self.bold));
        *self = Self::default();
        run
    }

    /// Element markers (`w:tab`, `w:br`, `w:b`) that sit directly in a run
    fn on_marker<B>(&mut self, reader: &XmlReader<B>, element: &BytesStart) {
        let name = element.name();
        match local_name(name.as_ref()) {
            b"b" if self.in_props => self.bold = bold_enabled(reader, element),
            b"tab" if self.in_run && !self.in_props => self.text.push('\t'),
            b"br" | b"cr" if self.in_run && !self.in_props => self.text.push('\n'),
            _ => {}
        }
    }
}

/// Parse WordprocessingML body XML into paragraphs.
pub fn parse_document_xml(xml: &str) -> Result<Vec<Paragraph>, ReadError> {
    let mut reader = XmlReader::from_str(xml);
    reader.trim_text(false);
    let mut buf = Vec::new();

    let mut paragraphs = Vec::new();
    let mut runs: Vec<Run> = Vec::new();
    let mut in_paragraph = false;
    let mut cursor = RunCursor::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"p" => {
                        in_paragraph = true;
                        runs.clear();
                    }
                    b"r" if in_paragraph => cursor.start(),
                    b"rPr" if cursor.in_run => cursor.in_props = true,
                    b"t" if cursor.in_run => cursor.in_text = true,
                    _ => cursor.on_marker(&reader, e),
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"p" => paragraphs.push(Paragraph::blank()),
                    _ => cursor.on_marker(&reader, e),
                }
            }
            Ok(Event::Text(e)) => {
                if cursor.in_text {
                    let text = e.unescape().map_err(|err| ReadError::Xml(err.to_string()))?;
                    cursor.text.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"t" => cursor.in_text = false,
                    b"rPr" => cursor.in_props = false,
                    b"r" if cursor.in_run => runs.extend(cursor.finish()),
                    b"p" if in_paragraph => {
                        paragraphs.push(Paragraph::new(std::mem::take(&mut runs)));
                        in_paragraph = false;
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(ReadError::Xml(format!(
                    "at byte {}: {}",
                    reader.buffer_position(),
                    err
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}
