//! File readers for question banks.
//!
//! [`FileDocumentReader`] implements the
//! [`DocumentReader`](quiz_application::DocumentReader) port by dispatching
//! on the file extension:
//!
//! | Extension | Reader | Result |
//! |-----------|--------|--------|
//! | `.docx` | [`docx`] | paragraph stream with bold runs |
//! | `.rtf` | [`rtf`] | plain text, emphasis dropped |
//! | anything else | [`text`] | plain text |

pub mod docx;
pub mod rtf;
pub mod text;

use quiz_application::{DocumentReader, ReadError};
use quiz_domain::SourceDocument;
use std::path::Path;
use tracing::debug;

/// Kind of bank file, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankFileKind {
    Text,
    RichText,
    WordDocument,
}

impl BankFileKind {
    /// Classify a path by its extension (case-insensitive)
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "docx" => BankFileKind::WordDocument,
            "rtf" => BankFileKind::RichText,
            _ => BankFileKind::Text,
        }
    }
}

/// Reads bank files from the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDocumentReader;

impl FileDocumentReader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentReader for FileDocumentReader {
    fn read(&self, path: &Path) -> Result<SourceDocument, ReadError> {
        if !path.is_file() {
            return Err(ReadError::NotFound(path.to_path_buf()));
        }

        let kind = BankFileKind::from_path(path);
        debug!("Reading {} as {:?}", path.display(), kind);
        match kind {
            BankFileKind::WordDocument => docx::read_docx(path).map(SourceDocument::Structured),
            BankFileKind::RichText => rtf::read_rtf(path).map(SourceDocument::PlainText),
            BankFileKind::Text => text::read_text(path).map(SourceDocument::PlainText),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(BankFileKind::from_path(Path::new("a.DOCX")), BankFileKind::WordDocument);
        assert_eq!(BankFileKind::from_path(Path::new("a.rtf")), BankFileKind::RichText);
        assert_eq!(BankFileKind::from_path(Path::new("a.txt")), BankFileKind::Text);
        assert_eq!(BankFileKind::from_path(Path::new("notes")), BankFileKind::Text);
        assert_eq!(BankFileKind::from_path(Path::new("bank.md")), BankFileKind::Text);
    }

    #[test]
    fn test_missing_file() {
        let reader = FileDocumentReader::new();
        let result = reader.read(Path::new("/definitely/not/here.txt"));
        assert!(matches!(result, Err(ReadError::NotFound(_))));
    }

    #[test]
    fn test_reads_rtf_as_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.rtf");
        std::fs::write(&path, r"{\rtf1 What is 2 + 2?\par a) \b 4\b0\par}").unwrap();

        let source = FileDocumentReader::new().read(&path).unwrap();
        assert_eq!(
            source,
            SourceDocument::PlainText("What is 2 + 2?\na) 4\n".to_string())
        );
    }
}
