//! Question bank parsing.
//!
//! Two paths lead to a bank of [`QuestionRecord`]s:
//!
//! - [`plain_text`]: block-oriented parser for text sources
//! - [`document_parser`]: state machine over a paragraph stream
//!
//! Both are pure and deterministic. [`parse_source`] picks the path from
//! the kind of [`SourceDocument`].

pub mod boundary;
pub mod classifier;
pub mod document_parser;
pub mod emphasis;
pub mod plain_text;

pub use boundary::{MIN_QUESTION_CHARS, QUESTION_WORDS, looks_like_question};
pub use classifier::{OptionLine, OptionStyle, classify, classify_any_case, is_option_line};
pub use document_parser::{DocumentParser, FEEDBACK_PREFIX, ParseOptions, ParseState, Step};
pub use emphasis::{EmphasisMode, MarkedSegment, has_marker, mark_emphasis, split_marked};
pub use plain_text::parse_plain_text;

use crate::document::SourceDocument;
use crate::question::QuestionRecord;

/// Parse any source document into question records
pub fn parse_source(source: &SourceDocument, options: ParseOptions) -> Vec<QuestionRecord> {
    match source {
        SourceDocument::PlainText(text) => parse_plain_text(text),
        SourceDocument::Structured(paragraphs) => DocumentParser::new(options).parse(paragraphs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Paragraph;

    #[test]
    fn test_parse_source_dispatches_on_kind() {
        let text = SourceDocument::PlainText("Explain ownership".to_string());
        assert_eq!(parse_source(&text, ParseOptions::default()).len(), 1);

        // Structured path drops the option-less stem unless asked not to
        let doc = SourceDocument::Structured(vec![Paragraph::plain("Explain ownership")]);
        assert!(parse_source(&doc, ParseOptions::default()).is_empty());
        let keep = ParseOptions::default().with_keep_unanswered_stems(true);
        assert_eq!(parse_source(&doc, keep).len(), 1);
    }
}
