//! DOCX export.
//!
//! Builds a minimal WordprocessingML package: content types, package and
//! document relationships, styles, a numbering definition for the question
//! stems, and the document body. `*…*` markers in options become bold runs.
//!
//! Stems are numbered through Word's list numbering rather than a literal
//! `1. ` prefix, so a written quiz reads back as a bank with clean stems.

use super::{ensure_directory, io_error};
use quiz_application::{ExportError, QuizExporter};
use quiz_domain::{OutputFormat, QuestionRecord, QuizView, split_marked};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Sizes in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocxStyle {
    pub title_size: u32,
    pub body_size: u32,
    pub feedback_size: u32,
    pub option_indent: u32,
    pub feedback_indent: u32,
}

impl Default for DocxStyle {
    fn default() -> Self {
        Self {
            title_size: 16,
            body_size: 12,
            feedback_size: 10,
            option_indent: 20,
            feedback_indent: 20,
        }
    }
}

/// Writes quizzes as `.docx` packages
#[derive(Debug, Clone, Default)]
pub struct DocxQuizExporter {
    style: DocxStyle,
}

impl DocxQuizExporter {
    pub fn new(style: DocxStyle) -> Self {
        Self { style }
    }
}

impl QuizExporter for DocxQuizExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Docx
    }

    fn export(&self, quiz: &QuizView, path: &Path) -> Result<(), ExportError> {
        write_docx(path, &build_document_xml(quiz, &self.style), &self.style)
    }

    fn prepare_directory(&self, dir: &Path) -> Result<(), ExportError> {
        ensure_directory(dir)
    }
}

fn xml_escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Run formatting
#[derive(Debug, Clone, Copy, Default)]
struct RunFormat {
    bold: bool,
    italic: bool,
    /// Points; `None` keeps the paragraph default
    size: Option<u32>,
}

fn push_run(body: &mut String, text: &str, format: RunFormat) {
    if text.is_empty() {
        return;
    }
    body.push_str("<w:r>");
    if format.bold || format.italic || format.size.is_some() {
        body.push_str("<w:rPr>");
        if format.bold {
            body.push_str("<w:b/>");
        }
        if format.italic {
            body.push_str("<w:i/>");
        }
        if let Some(size) = format.size {
            // Half-points
            body.push_str(&format!(r#"<w:sz w:val="{}"/>"#, size * 2));
        }
        body.push_str("</w:rPr>");
    }
    body.push_str(r#"<w:t xml:space="preserve">"#);
    body.push_str(&xml_escape_text(text));
    body.push_str("</w:t></w:r>");
}

/// Runs for marked text: `*…*` spans bold, the rest plain
fn push_marked(body: &mut String, text: &str, format: RunFormat) {
    for segment in split_marked(text) {
        push_run(
            body,
            &segment.text,
            RunFormat {
                bold: format.bold || segment.bold,
                ..format
            },
        );
    }
}

fn indent_props(points: u32) -> String {
    // Twentieths of a point
    format!(r#"<w:ind w:left="{}"/>"#, points * 20)
}

fn push_question(body: &mut String, question: &QuestionRecord, style: &DocxStyle) {
    body.push_str(r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr>"#);
    push_marked(body, question.stem(), RunFormat::default());
    body.push_str("</w:p>");

    for option in question.labeled_options() {
        body.push_str("<w:p><w:pPr>");
        body.push_str(&indent_props(style.option_indent));
        body.push_str("</w:pPr>");
        push_marked(body, &option, RunFormat::default());
        body.push_str("</w:p>");
    }

    if let Some(feedback) = question.feedback() {
        body.push_str("<w:p><w:pPr>");
        body.push_str(&indent_props(style.feedback_indent));
        body.push_str("</w:pPr>");
        push_run(
            body,
            feedback,
            RunFormat {
                italic: true,
                size: Some(style.feedback_size),
                ..RunFormat::default()
            },
        );
        body.push_str("</w:p>");
    }
}

/// WordprocessingML body for a quiz
pub fn build_document_xml(quiz: &QuizView, style: &DocxStyle) -> String {
    let mut body = String::new();

    body.push_str(r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr>"#);
    push_run(
        &mut body,
        quiz.title(),
        RunFormat {
            bold: true,
            size: Some(style.title_size),
            ..RunFormat::default()
        },
    );
    body.push_str("</w:p><w:p/>");

    for question in quiz.questions() {
        push_question(&mut body, question, style);
        body.push_str("<w:p/>");
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    )
}

fn content_types_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
</Types>"#
}

fn rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#
}

fn word_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
</Relationships>"#
}

fn styles_xml(style: &DocxStyle) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults><w:rPrDefault><w:rPr><w:sz w:val="{}"/></w:rPr></w:rPrDefault></w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
</w:styles>"#,
        style.body_size * 2
    )
}

/// Decimal list with a bold `N.` label for question stems
fn numbering_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0">
    <w:multiLevelType w:val="singleLevel"/>
    <w:lvl w:ilvl="0">
      <w:start w:val="1"/>
      <w:numFmt w:val="decimal"/>
      <w:lvlText w:val="%1."/>
      <w:lvlJc w:val="left"/>
      <w:pPr><w:ind w:left="360" w:hanging="360"/></w:pPr>
      <w:rPr><w:b/></w:rPr>
    </w:lvl>
  </w:abstractNum>
  <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
</w:numbering>"#
}

fn write_docx(out_path: &Path, document_xml: &str, style: &DocxStyle) -> Result<(), ExportError> {
    let file = File::create(out_path).map_err(|e| io_error(out_path, e))?;
    let mut zip = ZipWriter::new(file);
    let opt = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    let zip_err = |e: zip::result::ZipError| ExportError::Zip(e.to_string());
    let write_err = |e: std::io::Error| io_error(out_path, e);

    zip.start_file("[Content_Types].xml", opt).map_err(zip_err)?;
    zip.write_all(content_types_xml().as_bytes()).map_err(write_err)?;

    zip.start_file("_rels/.rels", opt).map_err(zip_err)?;
    zip.write_all(rels_xml().as_bytes()).map_err(write_err)?;

    zip.start_file("word/document.xml", opt).map_err(zip_err)?;
    zip.write_all(document_xml.as_bytes()).map_err(write_err)?;

    zip.start_file("word/_rels/document.xml.rels", opt).map_err(zip_err)?;
    zip.write_all(word_rels_xml().as_bytes()).map_err(write_err)?;

    zip.start_file("word/styles.xml", opt).map_err(zip_err)?;
    zip.write_all(styles_xml(style).as_bytes()).map_err(write_err)?;

    zip.start_file("word/numbering.xml", opt).map_err(zip_err)?;
    zip.write_all(numbering_xml().as_bytes()).map_err(write_err)?;

    zip.finish().map_err(zip_err)?;
    Ok(())
}
