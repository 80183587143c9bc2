//! Export formatting from TOML (`[formatting.pdf]`, `[formatting.docx]`)

use crate::exporters::{DocxStyle, PdfFontFamily, PdfMargins, PdfStyle};
use quiz_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw formatting configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFormattingConfig {
    pub pdf: FilePdfConfig,
    pub docx: FileDocxConfig,
}

/// Page margins in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMarginsConfig {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for FileMarginsConfig {
    fn default() -> Self {
        let margins = PdfMargins::default();
        Self {
            top: margins.top,
            bottom: margins.bottom,
            left: margins.left,
            right: margins.right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePdfConfig {
    pub title_font: String,
    pub title_size: u32,
    pub body_font: String,
    pub body_size: u32,
    pub feedback_size: u32,
    pub margins: FileMarginsConfig,
}

impl Default for FilePdfConfig {
    fn default() -> Self {
        Self {
            title_font: "Helvetica".to_string(),
            title_size: 16,
            body_font: "Helvetica".to_string(),
            body_size: 12,
            feedback_size: 10,
            margins: FileMarginsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDocxConfig {
    pub title_size: u32,
    pub body_size: u32,
    pub feedback_size: u32,
    /// Points
    pub option_indent: u32,
    /// Points
    pub feedback_indent: u32,
}

impl Default for FileDocxConfig {
    fn default() -> Self {
        let style = DocxStyle::default();
        Self {
            title_size: style.title_size,
            body_size: style.body_size,
            feedback_size: style.feedback_size,
            option_indent: style.option_indent,
            feedback_indent: style.feedback_indent,
        }
    }
}

fn positive_size(field: &str, value: u32, fallback: u32, issues: &mut Vec<ConfigIssue>) -> u32 {
    if value > 0 {
        return value;
    }
    issues.push(ConfigIssue::warning(
        ConfigIssueCode::InvalidNumber {
            field: field.to_string(),
            value: i64::from(value),
        },
        format!("{field}: size must be positive, falling back to {fallback}"),
    ));
    fallback
}

fn font_family(field: &str, value: &str, issues: &mut Vec<ConfigIssue>) -> PdfFontFamily {
    PdfFontFamily::parse(value).unwrap_or_else(|| {
        issues.push(ConfigIssue::warning(
            ConfigIssueCode::InvalidEnumValue {
                field: field.to_string(),
                value: value.to_string(),
                valid_values: vec![
                    "Helvetica".to_string(),
                    "Times".to_string(),
                    "Courier".to_string(),
                ],
            },
            format!("{field}: unknown font '{value}', falling back to 'Helvetica'"),
        ));
        PdfFontFamily::Helvetica
    })
}

impl FilePdfConfig {
    pub fn to_pdf_style(&self) -> (PdfStyle, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let defaults = PdfStyle::default();
        let style = PdfStyle {
            title_font: font_family("formatting.pdf.title_font", &self.title_font, &mut issues),
            title_size: positive_size(
                "formatting.pdf.title_size",
                self.title_size,
                16,
                &mut issues,
            ) as f32,
            body_font: font_family("formatting.pdf.body_font", &self.body_font, &mut issues),
            body_size: positive_size("formatting.pdf.body_size", self.body_size, 12, &mut issues)
                as f32,
            feedback_size: positive_size(
                "formatting.pdf.feedback_size",
                self.feedback_size,
                10,
                &mut issues,
            ) as f32,
            indent: defaults.indent,
            margins: PdfMargins {
                top: self.margins.top.max(0.0),
                bottom: self.margins.bottom.max(0.0),
                left: self.margins.left.max(0.0),
                right: self.margins.right.max(0.0),
            },
        };
        (style, issues)
    }
}

impl FileDocxConfig {
    pub fn to_docx_style(&self) -> (DocxStyle, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let defaults = DocxStyle::default();
        let style = DocxStyle {
            title_size: positive_size(
                "formatting.docx.title_size",
                self.title_size,
                defaults.title_size,
                &mut issues,
            ),
            body_size: positive_size(
                "formatting.docx.body_size",
                self.body_size,
                defaults.body_size,
                &mut issues,
            ),
            feedback_size: positive_size(
                "formatting.docx.feedback_size",
                self.feedback_size,
                defaults.feedback_size,
                &mut issues,
            ),
            option_indent: self.option_indent,
            feedback_indent: self.feedback_indent,
        };
        (style, issues)
    }
}
