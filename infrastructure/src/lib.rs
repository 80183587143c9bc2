//! Infrastructure layer for quiz-randomizer
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: bank file readers (plain text, RTF, DOCX),
//! quiz exporters (text, DOCX, PDF), the JSONL run log, and
//! configuration file loading.

pub mod config;
pub mod exporters;
pub mod logging;
pub mod readers;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigSaveError, FileConfig};
pub use exporters::{
    DocxQuizExporter, DocxStyle, PdfFontFamily, PdfMargins, PdfQuizExporter, PdfStyle,
    TextQuizExporter,
};
pub use logging::JsonlGenerationLogger;
pub use readers::{BankFileKind, FileDocumentReader};
