//! Structured-document parser.
//!
//! Rebuilds question/option/feedback structure from a flat paragraph stream
//! with no schema. The parser is a finite-state machine: [`ParseState`]
//! holds the open question, and [`DocumentParser::step`] consumes one
//! paragraph, returning the next state plus any records completed by that
//! paragraph. [`DocumentParser::parse`] folds `step` over a document.
//!
//! # Transitions
//!
//! For each paragraph, first match wins:
//!
//! | # | Paragraph | Effect |
//! |---|-----------|--------|
//! | 1 | blank | emit open question if it has options |
//! | 2 | `Answer Feedback:` prefix | attach; emit if the question has options |
//! | 3 | looks like a question, not an option | emit answered question, open new stem |
//! | 4 | letter option (`a) …` or `A) …`) | append, or recover a missed stem on style switch |
//! | 5 | number option (`1. …`) | same as 4 with styles swapped |
//! | 6 | other, question open, no feedback yet | unlabeled option |
//! | 7 | other, nothing open | fallback stem |
//!
//! Emitted records are never revisited. Malformed input degrades record
//! quality; the parser never fails.

use super::boundary::{MIN_QUESTION_CHARS, looks_like_question};
use super::classifier::{OptionStyle, classify_any_case};
use super::emphasis::{EmphasisMode, mark_emphasis};
use crate::document::Paragraph;
use crate::question::{QuestionRecord, labeled_option};
use tracing::{debug, trace};

/// Literal prefix of a feedback line
pub const FEEDBACK_PREFIX: &str = "Answer Feedback:";

/// Marker that turns a stem into a true/false question
pub const TRUE_FALSE_MARKER: &str = "true/false";

/// Parser behavior switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Which emphasized runs become `*…*` markers
    pub emphasis: EmphasisMode,
    /// Emit stems that never received options as free-response records
    /// instead of dropping them
    pub keep_unanswered_stems: bool,
}

impl ParseOptions {
    pub fn with_emphasis(mut self, emphasis: EmphasisMode) -> Self {
        self.emphasis = emphasis;
        self
    }

    pub fn with_keep_unanswered_stems(mut self, keep: bool) -> Self {
        self.keep_unanswered_stems = keep;
        self
    }
}

/// The question currently being collected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
    pending_stem: Option<String>,
    pending_options: Vec<String>,
    pending_feedback: Option<String>,
    expected_style: Option<OptionStyle>,
}

impl ParseState {
    /// No question is open
    pub fn is_idle(&self) -> bool {
        self.pending_stem.is_none()
    }

    pub fn pending_stem(&self) -> Option<&str> {
        self.pending_stem.as_deref()
    }

    pub fn pending_options(&self) -> &[String] {
        &self.pending_options
    }

    pub fn pending_feedback(&self) -> Option<&str> {
        self.pending_feedback.as_deref()
    }

    pub fn expected_style(&self) -> Option<OptionStyle> {
        self.expected_style
    }

    fn has_options(&self) -> bool {
        !self.pending_options.is_empty()
    }
}

/// Result of feeding one paragraph to the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: ParseState,
    /// Records completed by this paragraph, in document order
    pub emitted: Vec<QuestionRecord>,
}

/// Heuristic parser for paragraph streams
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentParser {
    options: ParseOptions,
}

impl DocumentParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parse a whole document
    pub fn parse(&self, paragraphs: &[Paragraph]) -> Vec<QuestionRecord> {
        let (state, mut records) =
            paragraphs
                .iter()
                .fold((ParseState::default(), Vec::new()), |(state, mut out), para| {
                    let step = self.step(state, para);
                    out.extend(step.emitted);
                    (step.state, out)
                });
        records.extend(self.finish(state));
        debug!("Parsed {} questions from {} paragraphs", records.len(), paragraphs.len());
        records
    }

    /// Consume one paragraph
    pub fn step(&self, mut state: ParseState, paragraph: &Paragraph) -> Step {
        let mut emitted = Vec::new();
        let full = paragraph.text();
        let text = full.trim();

        // 1. Blank separator
        if text.is_empty() {
            if state.has_options() {
                emitted.extend(self.finalize(&mut state, false));
            }
            return Step { state, emitted };
        }

        // 2. Feedback
        if text.starts_with(FEEDBACK_PREFIX) {
            if state.is_idle() {
                debug!("Dropping feedback with no open question: {}", text);
            } else {
                state.pending_feedback = Some(text.to_string());
                if state.has_options() {
                    emitted.extend(self.finalize(&mut state, false));
                }
            }
            return Step { state, emitted };
        }

        let option = classify_any_case(text);

        // 3. New question stem
        if option.is_none() && looks_like_question(text) {
            trace!("Question stem: {}", text);
            emitted.extend(self.replace_stem(&mut state, text));
            return Step { state, emitted };
        }

        // 4 / 5. Labeled option
        if let Some(option) = option {
            if state.is_idle() {
                debug!("Skipping {} option with no open question: {}", option.style.as_str(), text);
                return Step { state, emitted };
            }

            match state.expected_style {
                Some(expected) if expected != option.style => {
                    debug!(
                        "{} option while expecting {} options, treating as new stem: {}",
                        option.style.as_str(),
                        expected.as_str(),
                        text
                    );
                    emitted.extend(self.replace_stem(&mut state, text));
                    return Step { state, emitted };
                }
                Some(_) => {}
                None => state.expected_style = Some(option.style),
            }

            let leading = full.len() - full.trim_start().len();
            let content = leading + option.content_start..leading + text.len();
            let marked = mark_emphasis(
                &full,
                content,
                &paragraph.emphasized_ranges(),
                self.options.emphasis,
            );
            let position = state.pending_options.len() + 1;
            state.pending_options.push(labeled_option(position, &marked));
            return Step { state, emitted };
        }

        // 6. Unlabeled option
        if !state.is_idle() && state.pending_feedback.is_none() {
            let leading = full.len() - full.trim_start().len();
            let marked = mark_emphasis(
                &full,
                leading..leading + text.len(),
                &paragraph.emphasized_ranges(),
                self.options.emphasis,
            );
            let position = state.pending_options.len() + 1;
            trace!("Unlabeled option #{}: {}", position, text);
            state.pending_options.push(labeled_option(position, &marked));
            return Step { state, emitted };
        }

        // Question closed by feedback: only a substantial line can start a new one
        if !state.is_idle() {
            if text.chars().count() > MIN_QUESTION_CHARS {
                debug!("Reconsidering line after feedback as new stem: {}", text);
                emitted.extend(self.replace_stem(&mut state, text));
            } else {
                debug!("Skipping unrecognized paragraph: {}", text);
            }
            return Step { state, emitted };
        }

        // 7. Fallback stem
        trace!("Fallback stem: {}", text);
        emitted.extend(self.open_stem(&mut state, text));
        Step { state, emitted }
    }

    /// Flush the open question at end of input
    pub fn finish(&self, mut state: ParseState) -> Option<QuestionRecord> {
        self.finalize(&mut state, self.options.keep_unanswered_stems)
    }

    /// Close the open question (emitting it when allowed) and open `stem`
    fn replace_stem(&self, state: &mut ParseState, stem: &str) -> Vec<QuestionRecord> {
        let mut emitted: Vec<_> = self
            .finalize(state, self.options.keep_unanswered_stems)
            .into_iter()
            .collect();
        emitted.extend(self.open_stem(state, stem));
        emitted
    }

    /// Open a stem on an idle state; true/false stems complete at once
    fn open_stem(&self, state: &mut ParseState, stem: &str) -> Option<QuestionRecord> {
        *state = ParseState {
            pending_stem: Some(stem.to_string()),
            ..ParseState::default()
        };
        if is_true_false(stem) {
            debug!("True/false question: {}", stem);
            return self.finalize(state, true);
        }
        None
    }

    /// Turn the open question into a record and reset to idle.
    ///
    /// Questions without options are emitted only when `allow_unanswered`
    /// is set (or they are true/false, which supplies its own options).
    fn finalize(&self, state: &mut ParseState, allow_unanswered: bool) -> Option<QuestionRecord> {
        let ParseState {
            pending_stem,
            pending_options,
            pending_feedback,
            ..
        } = std::mem::take(state);
        let stem = pending_stem?;

        if is_true_false(&stem) && (allow_unanswered || !pending_options.is_empty()) {
            return Some(QuestionRecord::true_false(stem, pending_feedback));
        }
        if !pending_options.is_empty() {
            return match QuestionRecord::multiple_choice(
                stem,
                pending_options,
                pending_feedback,
            ) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!("{}", e);
                    None
                }
            };
        }
        if allow_unanswered {
            return Some(QuestionRecord::free_response(stem, pending_feedback));
        }

        debug!("Dropping stem without options: {}", stem);
        None
    }
}

fn is_true_false(stem: &str) -> bool {
    stem.to_lowercase().contains(TRUE_FALSE_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Run;
    use crate::question::QuestionType;

    fn paras(lines: &[&str]) -> Vec<Paragraph> {
        lines
            .iter()
            .map(|l| if l.is_empty() { Paragraph::blank() } else { Paragraph::plain(*l) })
            .collect()
    }

    fn italy_document() -> Vec<Paragraph> {
        vec![
            Paragraph::plain("What is the capital of Italy?"),
            Paragraph::plain("a) Madrid"),
            Paragraph::plain("b) Berlin"),
            Paragraph::new(vec![Run::plain("c) "), Run::bold("Rome")]),
            Paragraph::plain("d) Athens"),
            Paragraph::plain("Answer Feedback: Rome is correct"),
        ]
    }

    // ==================== Whole-document Tests ====================

    #[test]
    fn test_italy_example() {
        let records = DocumentParser::default().parse(&italy_document());
        assert_eq!(records.len(), 1);
        let q = &records[0];
        assert_eq!(q.stem(), "What is the capital of Italy?");
        assert_eq!(q.question_type(), QuestionType::MultipleChoice);
        assert_eq!(q.options(), &["a) Madrid", "b) Berlin", "c) *Rome*", "d) Athens"]);
        assert_eq!(q.feedback(), Some("Answer Feedback: Rome is correct"));
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let parser = DocumentParser::default();
        let doc = italy_document();
        assert_eq!(parser.parse(&doc), parser.parse(&doc));
    }

    #[test]
    fn test_numbered_options_relabel_by_position() {
        let doc = paras(&[
            "Which planet is closest to the sun?",
            "3. Mercury",
            "7. Venus",
            "",
        ]);
        let records = DocumentParser::default().parse(&doc);
        assert_eq!(records[0].options(), &["a) Mercury", "b) Venus"]);
    }

    #[test]
    fn test_true_false_stem_completes_immediately() {
        let doc = paras(&["True/False: Which is right, the earth is flat?", ""]);
        let records = DocumentParser::default().parse(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question_type(), QuestionType::TrueFalse);
        assert_eq!(records[0].options(), &["True", "False"]);
    }

    #[test]
    fn test_fallback_true_false_stem() {
        let doc = paras(&["True/False: Rust has GC."]);
        let records = DocumentParser::default().parse(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question_type(), QuestionType::TrueFalse);
    }

    #[test]
    fn test_consecutive_questions_without_blank_lines() {
        let doc = paras(&[
            "What is the largest ocean on Earth?",
            "a) Atlantic",
            "b) Pacific",
            "Which gas do plants absorb from the air?",
            "a) Oxygen",
            "b) Carbon dioxide",
        ]);
        let records = DocumentParser::default().parse(&doc);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].stem(), "Which gas do plants absorb from the air?");
        assert_eq!(records[1].options(), &["a) Oxygen", "b) Carbon dioxide"]);
    }

    #[test]
    fn test_unlabeled_options() {
        let doc = paras(&["Which of these are prime numbers?", "Two", "Four", ""]);
        let records = DocumentParser::default().parse(&doc);
        assert_eq!(records[0].options(), &["a) Two", "b) Four"]);
    }

    #[test]
    fn test_style_switch_recovers_missed_stem() {
        let doc = paras(&[
            "Which language has a borrow checker?",
            "a) Rust",
            "b) Python",
            "1. Short stem",
            "2. First",
            "3. Second",
            "",
        ]);
        let records = DocumentParser::default().parse(&doc);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].options().len(), 2);
        assert_eq!(records[1].stem(), "1. Short stem");
        assert_eq!(records[1].options(), &["a) First", "b) Second"]);
    }

    #[test]
    fn test_uppercase_letter_labels_are_relabeled() {
        let doc = vec![
            Paragraph::plain("Which city is the capital of Italy?"),
            Paragraph::plain("A) Madrid"),
            Paragraph::new(vec![Run::plain("B) "), Run::bold("Rome")]),
            Paragraph::blank(),
        ];
        let records = DocumentParser::default().parse(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].options(), &["a) Madrid", "b) *Rome*"]);
    }

    #[test]
    fn test_letter_after_numbered_options_recovers_missed_stem() {
        let doc = paras(&[
            "Which number is the smallest prime?",
            "1. Two",
            "2. Three",
            "a) stray",
            "b) second",
            "",
        ]);
        let records = DocumentParser::default().parse(&doc);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].options(), &["a) Two", "b) Three"]);
        assert_eq!(records[1].stem(), "a) stray");
        assert_eq!(records[1].options(), &["a) second"]);
    }

    #[test]
    fn test_stem_without_options_is_dropped_by_default() {
        let doc = paras(&["Explain the ownership model in Rust", "", ""]);
        assert!(DocumentParser::default().parse(&doc).is_empty());
    }

    #[test]
    fn test_keep_unanswered_stems_emits_free_response() {
        let doc = paras(&[
            "Explain the ownership model in Rust",
            "",
            "Describe how lifetimes relate to borrows",
        ]);
        let parser = DocumentParser::new(ParseOptions::default().with_keep_unanswered_stems(true));
        let records = parser.parse(&doc);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.question_type() == QuestionType::FreeResponse));
        assert!(records.iter().all(|r| r.options().is_empty()));
    }

    #[test]
    fn test_blank_line_before_options_keeps_stem_open() {
        let doc = paras(&["What colour is the sky?!", "", "a) Blue", "b) Green"]);
        let records = DocumentParser::default().parse(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].options().len(), 2);
    }

    #[test]
    fn test_orphan_options_and_feedback_are_skipped() {
        let doc = paras(&[
            "Answer Feedback: nothing to attach to",
            "a) Orphan",
            "What is the boiling point of water?",
            "a) 100 C",
            "",
        ]);
        let records = DocumentParser::default().parse(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].options(), &["a) 100 C"]);
        assert_eq!(records[0].feedback(), None);
    }

    #[test]
    fn test_more_than_26_options_get_distinct_labels() {
        let mut lines = vec!["Which letter comes last in this list?".to_string()];
        lines.extend((1..=28).map(|i| format!("{i}. Choice {i}")));
        let doc: Vec<Paragraph> = lines.iter().map(|l| Paragraph::plain(l.as_str())).collect();
        let records = DocumentParser::default().parse(&doc);
        let options = records[0].options();
        assert_eq!(options.len(), 28);
        assert_eq!(options[25], "z) Choice 26");
        assert_eq!(options[26], "aa) Choice 27");
        assert_eq!(options[27], "ab) Choice 28");
    }

    // ==================== Transition Tests ====================

    #[test]
    fn test_step_feedback_closes_answered_question() {
        let parser = DocumentParser::default();
        let mut state = ParseState::default();
        for line in ["What is the capital of France?", "a) Paris"] {
            let step = parser.step(state, &Paragraph::plain(line));
            assert!(step.emitted.is_empty());
            state = step.state;
        }
        assert_eq!(state.expected_style(), Some(OptionStyle::Letter));

        let step = parser.step(state, &Paragraph::plain("Answer Feedback: Paris"));
        assert_eq!(step.emitted.len(), 1);
        assert!(step.state.is_idle());
    }

    #[test]
    fn test_step_feedback_on_unanswered_question_blocks_unlabeled_options() {
        let parser = DocumentParser::default();
        let state = parser
            .step(ParseState::default(), &Paragraph::plain("What is the capital of Spain?"))
            .state;
        let state = parser.step(state, &Paragraph::plain("Answer Feedback: Madrid")).state;
        assert_eq!(state.pending_feedback(), Some("Answer Feedback: Madrid"));

        let step = parser.step(state, &Paragraph::plain("Madrid"));
        assert!(step.emitted.is_empty());
        assert!(step.state.pending_options().is_empty());
        assert_eq!(step.state.pending_stem(), Some("What is the capital of Spain?"));
    }

    #[test]
    fn test_step_blank_without_options_is_separator() {
        let parser = DocumentParser::default();
        let state = parser
            .step(ParseState::default(), &Paragraph::plain("Short stem"))
            .state;
        let step = parser.step(state, &Paragraph::blank());
        assert!(step.emitted.is_empty());
        assert_eq!(step.state.pending_stem(), Some("Short stem"));
    }

    #[test]
    fn test_all_runs_emphasis_mode() {
        let doc = vec![
            Paragraph::plain("Which cities are in Italy?"),
            Paragraph::new(vec![
                Run::plain("a) "),
                Run::bold("Rome"),
                Run::plain(" and "),
                Run::bold("Milan"),
            ]),
        ];
        let first = DocumentParser::default().parse(&doc);
        assert_eq!(first[0].options(), &["a) *Rome* and Milan"]);

        let all = DocumentParser::new(ParseOptions::default().with_emphasis(EmphasisMode::AllRuns))
            .parse(&doc);
        assert_eq!(all[0].options(), &["a) *Rome* and *Milan*"]);
    }

    #[test]
    fn test_bold_label_is_not_marked() {
        let doc = vec![
            Paragraph::plain("Which is the largest planet?"),
            Paragraph::new(vec![Run::bold("b) "), Run::plain("Jupiter")]),
        ];
        let records = DocumentParser::default().parse(&doc);
        assert_eq!(records[0].options(), &["a) Jupiter"]);
    }
}
