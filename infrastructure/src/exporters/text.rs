//! Plain-text export

use super::{ensure_directory, io_error};
use quiz_application::{ExportError, QuizExporter};
use quiz_domain::{OutputFormat, QuizView};
use std::path::Path;

/// Writes the quiz's text rendering, `*…*` markers included
#[derive(Debug, Clone, Copy, Default)]
pub struct TextQuizExporter;

impl QuizExporter for TextQuizExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Text
    }

    fn export(&self, quiz: &QuizView, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, quiz.to_string()).map_err(|e| io_error(path, e))
    }

    fn prepare_directory(&self, dir: &Path) -> Result<(), ExportError> {
        ensure_directory(dir)
    }
}
