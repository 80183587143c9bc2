//! Output format value object

use serde::{Deserialize, Serialize};

/// File format of exported quizzes
///
/// Docx is the default. Styled formats (docx, pdf) fall back to text per
/// quiz when export fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text with `*…*` emphasis markers kept verbatim
    Text,
    /// Word document with native bold
    #[default]
    Docx,
    /// A4 PDF with built-in fonts
    Pdf,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Docx => "docx",
            OutputFormat::Pdf => "pdf",
        }
    }

    /// File extension (without the dot)
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Docx => "docx",
            OutputFormat::Pdf => "pdf",
        }
    }

    /// Whether failures of this format fall back to text
    pub fn is_styled(&self) -> bool {
        !matches!(self, OutputFormat::Text)
    }

    /// Parse a config value, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "docx" => Some(OutputFormat::Docx),
            "pdf" => Some(OutputFormat::Pdf),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
