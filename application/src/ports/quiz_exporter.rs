//! Quiz exporter port
//!
//! Writes one quiz to one file. The generate use case picks an exporter by
//! [`OutputFormat`] and falls back to the text exporter when a styled
//! export fails.

use quiz_domain::{OutputFormat, QuizView};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while exporting a quiz
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("DOCX packaging failed: {0}")]
    Zip(String),

    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

/// Renderer for a single output format
pub trait QuizExporter: Send + Sync {
    /// Format this exporter writes
    fn format(&self) -> OutputFormat;

    /// Write `quiz` to `path`, replacing any existing file
    fn export(&self, quiz: &QuizView, path: &Path) -> Result<(), ExportError>;

    /// Make sure the output directory exists
    fn prepare_directory(&self, dir: &Path) -> Result<(), ExportError>;
}

/// Result of exporting one quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Written in the requested format
    Exported { path: PathBuf },
    /// Styled export failed; written as text instead
    Degraded { path: PathBuf, reason: String },
    /// Neither the requested format nor the text fallback could be written
    Failed { reason: String },
}

impl ExportOutcome {
    /// File written for this quiz, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ExportOutcome::Exported { path } | ExportOutcome::Degraded { path, .. } => Some(path),
            ExportOutcome::Failed { .. } => None,
        }
    }

    pub fn is_exported(&self) -> bool {
        matches!(self, ExportOutcome::Exported { .. })
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ExportOutcome::Degraded { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ExportOutcome::Failed { .. })
    }
}

/// File name of the `index`-th quiz (1-based) in `format`
pub fn quiz_file_name(index: usize, format: OutputFormat) -> String {
    format!("quiz_{}.{}", index, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_file_name() {
        assert_eq!(quiz_file_name(1, OutputFormat::Docx), "quiz_1.docx");
        assert_eq!(quiz_file_name(12, OutputFormat::Text), "quiz_12.txt");
    }

    #[test]
    fn test_outcome_path() {
        let ok = ExportOutcome::Exported {
            path: PathBuf::from("out/quiz_1.pdf"),
        };
        assert_eq!(ok.path(), Some(Path::new("out/quiz_1.pdf")));
        assert!(ok.is_exported());

        let failed = ExportOutcome::Failed {
            reason: "disk full".to_string(),
        };
        assert!(failed.path().is_none());
        assert!(failed.is_failed());
    }
}
