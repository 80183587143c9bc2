//! Domain layer for quiz-randomizer
//!
//! This crate contains the question model, the document parsers and quiz
//! assembly. It has no dependencies on infrastructure or presentation
//! concerns: no file access, no randomness of its own (callers pass an RNG).
//!
//! # Core Concepts
//!
//! ## Parsing
//!
//! Question banks arrive either as plain text (split into blocks on blank
//! lines) or as a stream of paragraphs with bold runs. The paragraph path is
//! a heuristic state machine that rebuilds stems, options and feedback from
//! layout alone, carrying bold text through as `*…*` markers.
//!
//! ## Assembly
//!
//! A bank is drawn into quizzes either without repetition (shuffle and
//! partition) or with replacement per quiz.

pub mod config;
pub mod core;
pub mod document;
pub mod parsing;
pub mod question;
pub mod quiz;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::error::DomainError;
pub use document::{Paragraph, Run, SourceDocument};
pub use parsing::{
    DocumentParser, EmphasisMode, MarkedSegment, ParseOptions, parse_plain_text, parse_source,
    split_marked,
};
pub use question::{QuestionId, QuestionRecord, QuestionType, option_label};
pub use quiz::{Assembly, AssemblyMetadata, AssemblyRequest, QuizView, assemble};
