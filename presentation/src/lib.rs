//! Presentation layer for quiz-randomizer
//!
//! This crate contains CLI definitions, console output formatting,
//! and export progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, EmphasisArg, FormatArg};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
