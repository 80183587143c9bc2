//! Generation parameters.
//!
//! [`GenerationParams`] groups what the generate use case needs to know
//! about a batch: how many quizzes, how large, the duplication policy, and
//! where and how to write them. Defaults mirror the `[quiz_defaults]`
//! config section.

use quiz_domain::{AssemblyRequest, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Batch generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Number of quizzes to generate.
    pub quiz_count: usize,
    /// Questions in each quiz.
    pub questions_per_quiz: usize,
    /// Sample with replacement instead of partitioning the bank.
    pub allow_duplicates: bool,
    /// Format of the written files.
    pub output_format: OutputFormat,
    /// Directory receiving `quiz_{i}.{ext}` files.
    pub output_dir: PathBuf,
    /// Seed for a reproducible batch; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            quiz_count: 5,
            questions_per_quiz: 10,
            allow_duplicates: false,
            output_format: OutputFormat::Docx,
            output_dir: PathBuf::from("quizzes"),
            seed: None,
        }
    }
}

impl GenerationParams {
    // ==================== Builder Methods ====================

    pub fn with_quiz_count(mut self, count: usize) -> Self {
        self.quiz_count = count;
        self
    }

    pub fn with_questions_per_quiz(mut self, count: usize) -> Self {
        self.questions_per_quiz = count;
        self
    }

    pub fn with_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Assembly request derived from these parameters
    pub fn assembly_request(&self) -> AssemblyRequest {
        AssemblyRequest::new(self.quiz_count, self.questions_per_quiz)
            .with_duplicates(self.allow_duplicates)
    }
}
