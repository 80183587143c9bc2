//! Progress notification port
//!
//! Defines the interface for reporting progress while quizzes are exported.

use super::quiz_exporter::ExportOutcome;

/// Callback for progress updates during quiz export
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bar, plain log lines, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called once before the first quiz is exported
    fn on_export_start(&self, total_quizzes: usize);

    /// Called after each quiz, whatever the outcome
    fn on_quiz_exported(&self, index: usize, title: &str, outcome: &ExportOutcome);

    /// Called after the last quiz
    fn on_export_complete(&self);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_export_start(&self, _total_quizzes: usize) {}
    fn on_quiz_exported(&self, _index: usize, _title: &str, _outcome: &ExportOutcome) {}
    fn on_export_complete(&self) {}
}
