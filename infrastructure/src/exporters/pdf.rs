//! PDF export.
//!
//! Layout and rendering are separate steps. [`layout_quiz`] places lines
//! on A4 pages (naive word wrapping by estimated character width,
//! pagination at the bottom margin); rendering then writes the placed lines
//! with the built-in PDF fonts, switching between regular and bold inside a
//! text section so bold spans flow inline.

use super::{ensure_directory, io_error};
use printpdf::{BuiltinFont, Color, Greyscale, IndirectFontRef, Mm, PdfDocument};
use quiz_application::{ExportError, QuizExporter};
use quiz_domain::{OutputFormat, QuestionRecord, QuizView, split_marked};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const PT_TO_MM: f32 = 0.3528;
const LINE_SPACING: f32 = 1.4;
const FEEDBACK_GREY: f32 = 0.4;

/// Built-in font families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PdfFontFamily {
    #[default]
    Helvetica,
    Times,
    Courier,
}

impl PdfFontFamily {
    /// Parse a configured font name (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "helvetica" | "arial" => Some(PdfFontFamily::Helvetica),
            "times" | "times-roman" | "times new roman" => Some(PdfFontFamily::Times),
            "courier" | "courier new" => Some(PdfFontFamily::Courier),
            _ => None,
        }
    }

    fn regular(self) -> BuiltinFont {
        match self {
            PdfFontFamily::Helvetica => BuiltinFont::Helvetica,
            PdfFontFamily::Times => BuiltinFont::TimesRoman,
            PdfFontFamily::Courier => BuiltinFont::Courier,
        }
    }

    fn bold(self) -> BuiltinFont {
        match self {
            PdfFontFamily::Helvetica => BuiltinFont::HelveticaBold,
            PdfFontFamily::Times => BuiltinFont::TimesBold,
            PdfFontFamily::Courier => BuiltinFont::CourierBold,
        }
    }

    /// Average glyph advance as a fraction of the font size
    fn char_width_em(self) -> f32 {
        match self {
            PdfFontFamily::Helvetica => 0.5,
            PdfFontFamily::Times => 0.45,
            PdfFontFamily::Courier => 0.6,
        }
    }
}

/// Page margins in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfMargins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for PdfMargins {
    fn default() -> Self {
        Self {
            top: 20.0,
            bottom: 20.0,
            left: 20.0,
            right: 20.0,
        }
    }
}

/// Fonts, sizes (points) and margins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfStyle {
    pub title_font: PdfFontFamily,
    pub title_size: f32,
    pub body_font: PdfFontFamily,
    pub body_size: f32,
    pub feedback_size: f32,
    /// Option and feedback indent in millimetres
    pub indent: f32,
    pub margins: PdfMargins,
}

impl Default for PdfStyle {
    fn default() -> Self {
        Self {
            title_font: PdfFontFamily::Helvetica,
            title_size: 16.0,
            body_font: PdfFontFamily::Helvetica,
            body_size: 12.0,
            feedback_size: 10.0,
            indent: 7.0,
            margins: PdfMargins::default(),
        }
    }
}

impl PdfStyle {
    fn content_width(&self) -> f32 {
        (PAGE_WIDTH_MM - self.margins.left - self.margins.right).max(10.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FontRole {
    Title,
    Body,
    BodyBold,
}

#[derive(Debug, Clone, PartialEq)]
struct Span {
    text: String,
    role: FontRole,
}

/// A line positioned on a page; `y` is the baseline from the bottom edge
#[derive(Debug, Clone, PartialEq)]
struct PlacedLine {
    x: f32,
    y: f32,
    size: f32,
    grey: bool,
    spans: Vec<Span>,
}

impl PlacedLine {
    #[cfg(test)]
    fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

type PageLines = Vec<PlacedLine>;

struct LayoutCursor<'a> {
    style: &'a PdfStyle,
    pages: Vec<PageLines>,
    y: f32,
}

impl<'a> LayoutCursor<'a> {
    fn new(style: &'a PdfStyle) -> Self {
        Self {
            style,
            pages: vec![Vec::new()],
            y: PAGE_HEIGHT_MM - style.margins.top,
        }
    }

    fn place(&mut self, x: f32, size: f32, grey: bool, spans: Vec<Span>) {
        let height = size * PT_TO_MM * LINE_SPACING;
        let page_has_lines = self.pages.last().is_some_and(|p| !p.is_empty());
        if self.y - height < self.style.margins.bottom && page_has_lines {
            self.pages.push(Vec::new());
            self.y = PAGE_HEIGHT_MM - self.style.margins.top;
        }
        self.y -= height;
        if let Some(page) = self.pages.last_mut() {
            page.push(PlacedLine {
                x,
                y: self.y,
                size,
                grey,
                spans,
            });
        }
    }

    fn place_wrapped(&mut self, x: f32, size: f32, grey: bool, words: Vec<(String, FontRole)>) {
        let width = self.style.content_width() - (x - self.style.margins.left);
        let max_chars = max_chars(width, size, self.style.body_font);
        for line in wrap_words(words, max_chars) {
            self.place(x, size, grey, line);
        }
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }
}

fn max_chars(width_mm: f32, size: f32, family: PdfFontFamily) -> usize {
    let glyph = size * PT_TO_MM * family.char_width_em();
    ((width_mm / glyph) as usize).max(10)
}

/// Split marked text into words carrying their font role
fn marked_words(text: &str) -> Vec<(String, FontRole)> {
    split_marked(text)
        .into_iter()
        .flat_map(|segment| {
            let role = if segment.bold {
                FontRole::BodyBold
            } else {
                FontRole::Body
            };
            segment
                .text
                .split_whitespace()
                .map(|w| (w.to_string(), role))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Greedy wrap by character count; a word longer than a line gets its own.
fn wrap_words(words: Vec<(String, FontRole)>, max_chars: usize) -> Vec<Vec<Span>> {
    let mut lines = Vec::new();
    let mut line: Vec<Span> = Vec::new();
    let mut line_len = 0;

    for (word, role) in words {
        let word_len = word.chars().count();
        if line_len > 0 && line_len + 1 + word_len > max_chars {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            if let Some(last) = line.last_mut() {
                last.text.push(' ');
            }
            line_len += 1;
        }
        match line.last_mut() {
            Some(last) if last.role == role => last.text.push_str(&word),
            _ => line.push(Span { text: word, role }),
        }
        line_len += word_len;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn layout_question(cursor: &mut LayoutCursor, number: usize, question: &QuestionRecord) {
    let style = *cursor.style;
    let left = style.margins.left;
    let indented = left + style.indent;

    let mut stem = vec![(format!("{number}."), FontRole::BodyBold)];
    stem.extend(marked_words(question.stem()));
    cursor.place_wrapped(left, style.body_size, false, stem);

    for option in question.labeled_options() {
        cursor.place_wrapped(indented, style.body_size, false, marked_words(&option));
    }

    if let Some(feedback) = question.feedback() {
        let words = feedback
            .split_whitespace()
            .map(|w| (w.to_string(), FontRole::Body))
            .collect();
        cursor.place_wrapped(indented, style.feedback_size, true, words);
    }

    cursor.gap(style.body_size * PT_TO_MM * 0.8);
}

/// Place every line of the quiz on pages
fn layout_quiz(quiz: &QuizView, style: &PdfStyle) -> Vec<PageLines> {
    let mut cursor = LayoutCursor::new(style);

    let title_width =
        quiz.title().chars().count() as f32 * style.title_size * PT_TO_MM * style.title_font.char_width_em();
    let title_x = ((PAGE_WIDTH_MM - title_width) / 2.0).max(style.margins.left);
    cursor.place(
        title_x,
        style.title_size,
        false,
        vec![Span {
            text: quiz.title().to_string(),
            role: FontRole::Title,
        }],
    );
    cursor.gap(style.title_size * PT_TO_MM);

    for (i, question) in quiz.questions().iter().enumerate() {
        layout_question(&mut cursor, i + 1, question);
    }
    cursor.pages
}

fn pdf_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::Pdf(e.to_string())
}

struct Fonts {
    title: IndirectFontRef,
    body: IndirectFontRef,
    body_bold: IndirectFontRef,
}

impl Fonts {
    fn for_role(&self, role: FontRole) -> &IndirectFontRef {
        match role {
            FontRole::Title => &self.title,
            FontRole::Body => &self.body,
            FontRole::BodyBold => &self.body_bold,
        }
    }
}

fn render(quiz: &QuizView, style: &PdfStyle, path: &Path) -> Result<(), ExportError> {
    let pages = layout_quiz(quiz, style);
    let (doc, first_page, first_layer) = PdfDocument::new(
        quiz.title(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let fonts = Fonts {
        title: doc
            .add_builtin_font(style.title_font.bold())
            .map_err(pdf_error)?,
        body: doc
            .add_builtin_font(style.body_font.regular())
            .map_err(pdf_error)?,
        body_bold: doc
            .add_builtin_font(style.body_font.bold())
            .map_err(pdf_error)?,
    };

    for (n, lines) in pages.iter().enumerate() {
        let (page, layer) = if n == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), format!("Page {}", n + 1))
        };
        let layer = doc.get_page(page).get_layer(layer);

        for line in lines {
            let shade = if line.grey { FEEDBACK_GREY } else { 0.0 };
            layer.set_fill_color(Color::Greyscale(Greyscale::new(shade, None)));
            layer.begin_text_section();
            layer.set_text_cursor(Mm(line.x), Mm(line.y));
            for span in &line.spans {
                let font = fonts.for_role(span.role);
                layer.set_font(font, line.size);
                layer.write_text(span.text.clone(), font);
            }
            layer.end_text_section();
        }
    }

    let file = File::create(path).map_err(|e| io_error(path, e))?;
    doc.save(&mut BufWriter::new(file)).map_err(pdf_error)
}

/// Writes quizzes as A4 PDF documents
#[derive(Debug, Clone, Default)]
pub struct PdfQuizExporter {
    style: PdfStyle,
}

impl PdfQuizExporter {
    pub fn new(style: PdfStyle) -> Self {
        Self { style }
    }
}

impl QuizExporter for PdfQuizExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn export(&self, quiz: &QuizView, path: &Path) -> Result<(), ExportError> {
        render(quiz, &self.style, path)
    }

    fn prepare_directory(&self, dir: &Path) -> Result<(), ExportError> {
        ensure_directory(dir)
    }
}
