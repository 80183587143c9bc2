//! Raw TOML configuration data types
//!
//! These structs mirror the config file layout. Enum-like fields stay
//! strings so a bad value degrades to a warning instead of a load failure;
//! the `parse_*` / `to_*` methods turn them into domain and exporter types.

mod file_types;
mod formatting;
mod gui;
mod parsing;
mod quiz_defaults;

pub use file_types::{FileTypeEntry, default_file_types, is_known_extension};
pub use formatting::{FileDocxConfig, FileFormattingConfig, FileMarginsConfig, FilePdfConfig};
pub use gui::FileGuiConfig;
pub use parsing::FileParsingConfig;
pub use quiz_defaults::FileQuizDefaultsConfig;

use quiz_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Most recent bank paths kept in `recent_files`
pub const MAX_RECENT_FILES: usize = 5;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Recently loaded banks, most recent first
    pub recent_files: Vec<String>,
    pub gui: FileGuiConfig,
    pub quiz_defaults: FileQuizDefaultsConfig,
    pub formatting: FileFormattingConfig,
    pub parsing: FileParsingConfig,
    pub file_types: Vec<FileTypeEntry>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            recent_files: Vec::new(),
            gui: FileGuiConfig::default(),
            quiz_defaults: FileQuizDefaultsConfig::default(),
            formatting: FileFormattingConfig::default(),
            parsing: FileParsingConfig::default(),
            file_types: default_file_types(),
        }
    }
}

/// Move `path` to the front of `recent`, dropping older duplicates and
/// keeping at most [`MAX_RECENT_FILES`] entries.
pub fn push_recent_file(recent: &mut Vec<String>, path: &Path) {
    let entry = path.display().to_string();
    recent.retain(|existing| *existing != entry);
    recent.insert(0, entry);
    recent.truncate(MAX_RECENT_FILES);
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.quiz_defaults.parse_output_format().1);
        issues.extend(self.parsing.parse_emphasis().1);
        issues.extend(self.formatting.pdf.to_pdf_style().1);
        issues.extend(self.formatting.docx.to_docx_style().1);

        if self.recent_files.len() > MAX_RECENT_FILES {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::TooManyEntries {
                    field: "recent_files".to_string(),
                    max: MAX_RECENT_FILES,
                    actual: self.recent_files.len(),
                },
                format!(
                    "recent_files: {} entries, only the first {} are kept",
                    self.recent_files.len(),
                    MAX_RECENT_FILES
                ),
            ));
        }

        issues
    }

    /// Move `path` to the front of the recent list, dropping older duplicates.
    pub fn add_recent_file(&mut self, path: &Path) {
        push_recent_file(&mut self.recent_files, path);
    }

    /// Whether the bank path has an extension listed in `file_types`
    pub fn is_known_extension(&self, path: &Path) -> bool {
        is_known_extension(&self.file_types, path)
    }
}
