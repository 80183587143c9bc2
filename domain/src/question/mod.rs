//! Normalized question model.
//!
//! - [`entities::QuestionRecord`]: the parser's output unit
//! - [`label`]: positional option labels

pub mod entities;
pub mod label;

pub use entities::{QuestionId, QuestionRecord, QuestionType, TRUE_FALSE_OPTIONS};
pub use label::{labeled_option, option_label};
