//! Configuration file loading for quiz-randomizer
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./quiz-randomizer.toml` or `./.quiz-randomizer.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/quiz-randomizer/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileDocxConfig, FileFormattingConfig, FileGuiConfig, FileMarginsConfig,
    FileParsingConfig, FilePdfConfig, FileQuizDefaultsConfig, FileTypeEntry, MAX_RECENT_FILES,
    default_file_types, push_recent_file,
};
pub use loader::{ConfigLoader, ConfigSaveError};
