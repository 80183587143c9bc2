//! Application layer for quiz-randomizer
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::GenerationParams;
pub use ports::{
    document_reader::{DocumentReader, ReadError},
    generation_logger::{GenerationEvent, GenerationLogger, NoGenerationLogger},
    progress::{NoProgress, ProgressNotifier},
    quiz_exporter::{ExportError, ExportOutcome, QuizExporter, quiz_file_name},
};
pub use use_cases::generate_quizzes::{
    GenerateQuizzesError, GenerateQuizzesInput, GenerateQuizzesOutput, GenerateQuizzesUseCase,
    QuizExportReport,
};
pub use use_cases::load_bank::{LoadBankError, LoadBankInput, LoadBankOutput, LoadBankUseCase};
