//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(
        "Not enough unique questions: requested {requested} but the bank has {available}. \
         Reduce the number of quizzes or questions per quiz, or allow duplicates"
    )]
    InsufficientQuestions { requested: usize, available: usize },

    #[error("Multiple-choice question has no options: {stem}")]
    NoOptions { stem: String },
}
