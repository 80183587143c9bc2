//! Bank file-type table from TOML (`[[file_types]]` entries)

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One named group of bank file extensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTypeEntry {
    pub name: String,
    /// Extensions with their leading dot, e.g. ".docx"; ".*" means any file
    pub extensions: Vec<String>,
}

impl FileTypeEntry {
    fn new(name: &str, extensions: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Whether a concrete extension (no wildcard) matches, case-insensitively
    fn matches(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .filter(|e| !e.contains('*'))
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }
}

pub fn default_file_types() -> Vec<FileTypeEntry> {
    vec![
        FileTypeEntry::new("Text Files", &[".txt"]),
        FileTypeEntry::new("Word Documents", &[".docx"]),
        FileTypeEntry::new("Rich Text Format", &[".rtf"]),
        FileTypeEntry::new("All Files", &[".*"]),
    ]
}

/// Whether the path's extension is listed in a non-wildcard entry
pub fn is_known_extension(file_types: &[FileTypeEntry], path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| file_types.iter().any(|entry| entry.matches(ext)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_types_know_bank_extensions() {
        let types = default_file_types();
        assert!(is_known_extension(&types, Path::new("bank.txt")));
        assert!(is_known_extension(&types, Path::new("bank.DOCX")));
        assert!(is_known_extension(&types, Path::new("dir/bank.rtf")));
    }

    #[test]
    fn test_wildcard_does_not_make_everything_known() {
        let types = default_file_types();
        assert!(!is_known_extension(&types, Path::new("bank.md")));
        assert!(!is_known_extension(&types, Path::new("bank")));
    }
}
