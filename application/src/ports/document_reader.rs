//! Document reader port
//!
//! Turns a bank file into a [`SourceDocument`]: plain text, or a paragraph
//! stream with emphasis for structured formats.

use quiz_domain::SourceDocument;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading a bank file
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Invalid container: {0}")]
    Zip(String),

    #[error("Invalid document XML: {0}")]
    Xml(String),

    #[error("Invalid UTF-8: {0}")]
    Utf8(String),
}

/// Reader for question bank files
///
/// Implementations live in the infrastructure layer and pick a decoding
/// strategy from the file (usually its extension).
pub trait DocumentReader: Send + Sync {
    /// Read and decode the whole file
    fn read(&self, path: &Path) -> Result<SourceDocument, ReadError>;
}
