//! Console output formatter for loaded banks and generation results

use colored::Colorize;
use quiz_application::{ExportOutcome, GenerateQuizzesOutput, GenerationParams, LoadBankOutput};
use quiz_domain::{ConfigIssue, QuestionRecord, QuestionType};
use std::path::Path;
use std::sync::Arc;

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Summary of a loaded bank
    pub fn bank_summary(path: &Path, output: &LoadBankOutput) -> String {
        let mut out = String::new();
        out.push_str(&Self::header("Question Bank"));
        out.push('\n');
        out.push_str(&format!("{} {}\n", "File:".cyan().bold(), path.display()));
        out.push_str(&format!("{} {}\n", "Source:".cyan().bold(), output.source_kind));
        out.push_str(&format!(
            "{} {} ({} multiple-choice, {} true/false, {} free-response)\n",
            "Questions:".cyan().bold(),
            output.len(),
            output.count_of(QuestionType::MultipleChoice),
            output.count_of(QuestionType::TrueFalse),
            output.count_of(QuestionType::FreeResponse),
        ));
        out
    }

    /// Every question of the bank, numbered, with options and feedback
    pub fn question_list(bank: &[Arc<QuestionRecord>]) -> String {
        let mut out = String::new();
        for (i, question) in bank.iter().enumerate() {
            out.push_str(&format!(
                "\n{} {} {}\n",
                format!("{}.", i + 1).bold(),
                question.stem(),
                format!("[{}]", question.question_type().as_str()).dimmed()
            ));
            for option in question.labeled_options() {
                out.push_str(&format!("    {}\n", option));
            }
            if let Some(feedback) = question.feedback() {
                out.push_str(&format!("    {}\n", feedback.italic().dimmed()));
            }
        }
        out
    }

    /// Bank as pretty JSON
    pub fn question_list_json(bank: &[Arc<QuestionRecord>]) -> String {
        let records: Vec<&QuestionRecord> = bank.iter().map(Arc::as_ref).collect();
        serde_json::to_string_pretty(&records).unwrap_or_else(|_| "[]".to_string())
    }

    /// Outcome of a generation run
    pub fn generation_summary(params: &GenerationParams, output: &GenerateQuizzesOutput) -> String {
        let mut out = String::new();
        out.push_str(&Self::section_header("Generated Quizzes"));
        out.push('\n');

        for report in &output.reports {
            let line = match &report.outcome {
                ExportOutcome::Exported { path } => format!(
                    "  {} {} ({} questions) -> {}",
                    "v".green(),
                    report.title,
                    report.question_count,
                    path.display()
                ),
                ExportOutcome::Degraded { path, reason } => format!(
                    "  {} {} -> {} {}",
                    "!".yellow(),
                    report.title,
                    path.display(),
                    format!("(text fallback: {reason})").yellow()
                ),
                ExportOutcome::Failed { reason } => format!(
                    "  {} {} {}",
                    "x".red(),
                    report.title,
                    format!("(failed: {reason})").red()
                ),
            };
            out.push_str(&line);
            out.push('\n');
        }

        let metadata = &output.metadata;
        out.push_str(&format!(
            "\n{} {} of {} quizzes written to {} as {}\n",
            "Done:".green().bold(),
            output.exported_count(),
            metadata.num_quizzes,
            params.output_dir.display(),
            params.output_format
        ));
        out.push_str(&format!(
            "{} {} questions used, {} per quiz\n",
            "Bank:".cyan().bold(),
            metadata.total_questions_used,
            metadata.questions_per_quiz
        ));

        if metadata.has_duplicates() {
            out.push_str(&format!("\n{}\n", "Repeated Questions:".yellow().bold()));
            for (id, count) in &metadata.duplicate_stats {
                out.push_str(&format!("  * {} ({}x)\n", Self::truncate(id.as_str(), 60), count));
            }
        }

        out
    }

    /// Recently used banks, most recent first
    pub fn recent_files(files: &[String]) -> String {
        if files.is_empty() {
            return "No recent files.\n".dimmed().to_string();
        }
        let mut out = format!("{}\n", "Recent files:".cyan().bold());
        for (i, file) in files.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, file));
        }
        out
    }

    pub fn config_issue(issue: &ConfigIssue) -> String {
        let label = if issue.is_error() {
            "error:".red().bold()
        } else {
            "warning:".yellow().bold()
        };
        format!("{} {}", label, issue.message)
    }

    pub fn header(title: &str) -> String {
        let line = "=".repeat(50);
        format!(
            "{}\n{}\n{}",
            line.cyan(),
            format!("{:^50}", title).cyan().bold(),
            line.cyan()
        )
    }

    fn section_header(title: &str) -> String {
        format!("\n{}", format!("--- {} ---", title).yellow().bold())
    }

    fn truncate(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            return text.to_string();
        }
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
