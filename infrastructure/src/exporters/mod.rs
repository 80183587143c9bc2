//! Quiz exporters.
//!
//! One adapter per [`OutputFormat`](quiz_domain::OutputFormat), each
//! implementing the [`QuizExporter`](quiz_application::QuizExporter) port:
//!
//! - [`TextQuizExporter`]: the quiz's text rendering, markers kept
//! - [`DocxQuizExporter`]: WordprocessingML package with native bold
//! - [`PdfQuizExporter`]: A4 pages with built-in fonts

pub mod docx;
pub mod pdf;
pub mod text;

pub use docx::{DocxQuizExporter, DocxStyle};
pub use pdf::{PdfFontFamily, PdfMargins, PdfQuizExporter, PdfStyle};
pub use text::TextQuizExporter;

use quiz_application::ExportError;
use std::path::Path;

/// Create `dir` and its parents if missing
pub(crate) fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    std::fs::create_dir_all(dir).map_err(|e| ExportError::Io(format!("{}: {}", dir.display(), e)))
}

pub(crate) fn io_error(path: &Path, e: std::io::Error) -> ExportError {
    ExportError::Io(format!("{}: {}", path.display(), e))
}
