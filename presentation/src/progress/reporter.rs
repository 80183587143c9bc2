//! Progress reporting for quiz export

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use quiz_application::{ExportOutcome, ProgressNotifier};
use std::sync::Mutex;

/// Reports export progress with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn status(title: &str, outcome: &ExportOutcome) -> String {
        match outcome {
            ExportOutcome::Exported { .. } => format!("{} {}", "v".green(), title),
            ExportOutcome::Degraded { .. } => format!("{} {} (text)", "!".yellow(), title),
            ExportOutcome::Failed { .. } => format!("{} {}", "x".red(), title),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_export_start(&self, total_quizzes: usize) {
        let pb = ProgressBar::new(total_quizzes as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Exporting");
        pb.set_message("Starting...");

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_quiz_exported(&self, _index: usize, title: &str, outcome: &ExportOutcome) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(Self::status(title, outcome));
            pb.inc(1);
        }
    }

    fn on_export_complete(&self) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(format!("{}", "Export complete!".green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_export_start(&self, total_quizzes: usize) {
        println!("{} {} ({} quizzes)", "->".cyan(), "Exporting".bold(), total_quizzes);
    }

    fn on_quiz_exported(&self, _index: usize, title: &str, outcome: &ExportOutcome) {
        println!("  {}", ProgressReporter::status(title, outcome));
    }

    fn on_export_complete(&self) {
        println!();
    }
}
