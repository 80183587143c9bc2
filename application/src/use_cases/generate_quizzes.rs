//! Generate Quizzes use case
//!
//! Assembles quizzes from a loaded bank and exports each one. A failing
//! styled export degrades that single quiz to plain text; the rest of the
//! batch carries on.

use crate::config::GenerationParams;
use crate::ports::generation_logger::{GenerationEvent, GenerationLogger, NoGenerationLogger};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::quiz_exporter::{ExportError, ExportOutcome, QuizExporter, quiz_file_name};
use quiz_domain::{AssemblyMetadata, DomainError, OutputFormat, QuestionRecord, QuizView, assemble};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that stop a batch before any quiz is written
#[derive(Error, Debug)]
pub enum GenerateQuizzesError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("No exporter available for {0} output")]
    UnsupportedFormat(OutputFormat),

    #[error("Cannot create output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: ExportError,
    },
}

/// Input for the GenerateQuizzes use case
#[derive(Debug, Clone)]
pub struct GenerateQuizzesInput {
    pub bank: Vec<Arc<QuestionRecord>>,
    pub params: GenerationParams,
}

impl GenerateQuizzesInput {
    pub fn new(bank: Vec<Arc<QuestionRecord>>, params: GenerationParams) -> Self {
        Self { bank, params }
    }
}

/// What happened to one quiz
#[derive(Debug, Clone)]
pub struct QuizExportReport {
    /// 1-based position in the batch
    pub index: usize,
    pub title: String,
    pub question_count: usize,
    pub outcome: ExportOutcome,
}

/// Result of a batch
#[derive(Debug, Clone)]
pub struct GenerateQuizzesOutput {
    pub metadata: AssemblyMetadata,
    pub reports: Vec<QuizExportReport>,
}

impl GenerateQuizzesOutput {
    pub fn exported_count(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_exported()).count()
    }

    pub fn degraded(&self) -> impl Iterator<Item = &QuizExportReport> {
        self.reports.iter().filter(|r| r.outcome.is_degraded())
    }

    pub fn failed(&self) -> impl Iterator<Item = &QuizExportReport> {
        self.reports.iter().filter(|r| r.outcome.is_failed())
    }
}

/// Use case for generating and exporting a batch of quizzes
pub struct GenerateQuizzesUseCase {
    exporters: Vec<Arc<dyn QuizExporter>>,
    logger: Arc<dyn GenerationLogger>,
}

impl Default for GenerateQuizzesUseCase {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerateQuizzesUseCase {
    pub fn new() -> Self {
        Self {
            exporters: Vec::new(),
            logger: Arc::new(NoGenerationLogger),
        }
    }

    /// Register an exporter; a later registration for the same format wins
    pub fn with_exporter(mut self, exporter: Arc<dyn QuizExporter>) -> Self {
        self.exporters.retain(|e| e.format() != exporter.format());
        self.exporters.push(exporter);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn GenerationLogger>) -> Self {
        self.logger = logger;
        self
    }

    fn exporter_for(&self, format: OutputFormat) -> Option<&Arc<dyn QuizExporter>> {
        self.exporters.iter().find(|e| e.format() == format)
    }

    /// Execute the use case with default (no-op) progress
    pub fn execute(
        &self,
        input: GenerateQuizzesInput,
    ) -> Result<GenerateQuizzesOutput, GenerateQuizzesError> {
        self.execute_with_progress(input, &NoProgress)
    }

    /// Execute the use case with progress callbacks, seeding from the params
    pub fn execute_with_progress(
        &self,
        input: GenerateQuizzesInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<GenerateQuizzesOutput, GenerateQuizzesError> {
        let mut rng = match input.params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.execute_with_rng(input, progress, &mut rng)
    }

    /// Execute the use case with an explicit random source
    pub fn execute_with_rng<R: Rng + ?Sized>(
        &self,
        input: GenerateQuizzesInput,
        progress: &dyn ProgressNotifier,
        rng: &mut R,
    ) -> Result<GenerateQuizzesOutput, GenerateQuizzesError> {
        let params = &input.params;
        let primary = self
            .exporter_for(params.output_format)
            .ok_or(GenerateQuizzesError::UnsupportedFormat(params.output_format))?;

        let assembly = assemble(&input.bank, params.assembly_request(), rng)?;
        info!(
            "Assembled {} quizzes of {} questions",
            assembly.metadata.num_quizzes, params.questions_per_quiz
        );
        self.logger.log(GenerationEvent::new(
            "quizzes_assembled",
            serde_json::to_value(&assembly.metadata).unwrap_or_default(),
        ));

        primary
            .prepare_directory(&params.output_dir)
            .map_err(|source| GenerateQuizzesError::OutputDirectory {
                path: params.output_dir.clone(),
                source,
            })?;

        progress.on_export_start(assembly.quizzes.len());
        let mut reports = Vec::with_capacity(assembly.quizzes.len());
        for (i, quiz) in assembly.quizzes.iter().enumerate() {
            let index = i + 1;
            let outcome = self.export_one(primary.as_ref(), quiz, index, params);
            progress.on_quiz_exported(index, quiz.title(), &outcome);
            reports.push(QuizExportReport {
                index,
                title: quiz.title().to_string(),
                question_count: quiz.len(),
                outcome,
            });
        }
        progress.on_export_complete();

        Ok(GenerateQuizzesOutput {
            metadata: assembly.metadata,
            reports,
        })
    }

    fn export_one(
        &self,
        primary: &dyn QuizExporter,
        quiz: &QuizView,
        index: usize,
        params: &GenerationParams,
    ) -> ExportOutcome {
        let path = params
            .output_dir
            .join(quiz_file_name(index, params.output_format));

        let error = match primary.export(quiz, &path) {
            Ok(()) => {
                debug!("Wrote {}", path.display());
                self.logger.log(GenerationEvent::new(
                    "quiz_exported",
                    json!({
                        "index": index,
                        "title": quiz.title(),
                        "questions": quiz.len(),
                        "format": params.output_format.as_str(),
                        "path": path.display().to_string(),
                    }),
                ));
                return ExportOutcome::Exported { path };
            }
            Err(e) => e,
        };

        warn!(
            "Failed to export {} as {}: {}",
            quiz.title(),
            params.output_format,
            error
        );

        let fallback = self
            .exporter_for(OutputFormat::Text)
            .filter(|_| params.output_format.is_styled());
        let Some(fallback) = fallback else {
            return self.failed(quiz, index, error.to_string());
        };

        let fallback_path = params
            .output_dir
            .join(quiz_file_name(index, OutputFormat::Text));
        match fallback.export(quiz, &fallback_path) {
            Ok(()) => {
                warn!(
                    "Saved {} as text instead: {}",
                    quiz.title(),
                    fallback_path.display()
                );
                let reason = error.to_string();
                self.logger.log(GenerationEvent::new(
                    "export_degraded",
                    json!({
                        "index": index,
                        "title": quiz.title(),
                        "format": params.output_format.as_str(),
                        "reason": reason,
                        "path": fallback_path.display().to_string(),
                    }),
                ));
                ExportOutcome::Degraded {
                    path: fallback_path,
                    reason,
                }
            }
            Err(fallback_error) => self.failed(
                quiz,
                index,
                format!("{error}; text fallback failed: {fallback_error}"),
            ),
        }
    }

    fn failed(&self, quiz: &QuizView, index: usize, reason: String) -> ExportOutcome {
        warn!("Could not write {}: {}", quiz.title(), reason);
        self.logger.log(GenerationEvent::new(
            "export_failed",
            json!({ "index": index, "title": quiz.title(), "reason": reason }),
        ));
        ExportOutcome::Failed { reason }
    }
}
