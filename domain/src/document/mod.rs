//! Source document model.
//!
//! A structured document is a flat stream of [`Paragraph`]s, each made of
//! [`Run`]s that carry an emphasis flag. Plain-text sources skip this model
//! and go straight to the block parser.

pub mod paragraph;

pub use paragraph::{Paragraph, Run};

/// Content handed over by a document reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDocument {
    /// Unstructured text (plain text, or rich text with emphasis dropped)
    PlainText(String),
    /// Paragraph stream with run-level emphasis
    Structured(Vec<Paragraph>),
}

impl SourceDocument {
    /// Human-readable kind, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            SourceDocument::PlainText(_) => "plain-text",
            SourceDocument::Structured(_) => "structured",
        }
    }
}
