//! Quizzes and their assembly from a question bank.

pub mod assembler;
pub mod entities;

pub use assembler::{Assembly, AssemblyRequest, assemble};
pub use entities::{AssemblyMetadata, QuizView};
