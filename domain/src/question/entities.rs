//! Question record entity

use super::label::option_label;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static LABEL_PREFIX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[a-z]+\)\s+").expect("valid label regex"));

/// Canonical options of a true/false question
pub const TRUE_FALSE_OPTIONS: [&str; 2] = ["True", "False"];

/// Kind of question, inferred while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    FreeResponse,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::TrueFalse => "true-false",
            QuestionType::FreeResponse => "free-response",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity of a question, derived from its stem.
///
/// Only used to count how often a question was drawn; two records with the
/// same stem share an identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A normalized question (Entity)
///
/// Fully built before it leaves the parser and immutable afterwards; quizzes
/// share records instead of copying them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    stem: String,
    #[serde(rename = "type")]
    question_type: QuestionType,
    options: Vec<String>,
    feedback: Option<String>,
}

impl QuestionRecord {
    /// Multiple-choice record; at least one option must carry text.
    pub fn multiple_choice(
        stem: impl Into<String>,
        options: Vec<String>,
        feedback: Option<String>,
    ) -> Result<Self, DomainError> {
        let stem = stem.into();
        if !options.iter().any(|o| !o.trim().is_empty()) {
            return Err(DomainError::NoOptions {
                stem: stem.trim().to_string(),
            });
        }
        Ok(Self::build(stem, QuestionType::MultipleChoice, options, feedback))
    }

    /// True/false record with the canonical option pair
    pub fn true_false(stem: impl Into<String>, feedback: Option<String>) -> Self {
        let options = TRUE_FALSE_OPTIONS.iter().map(|s| s.to_string()).collect();
        Self::build(stem.into(), QuestionType::TrueFalse, options, feedback)
    }

    /// Free-response record (no options)
    pub fn free_response(stem: impl Into<String>, feedback: Option<String>) -> Self {
        Self::build(stem.into(), QuestionType::FreeResponse, Vec::new(), feedback)
    }

    fn build(
        stem: String,
        question_type: QuestionType,
        options: Vec<String>,
        feedback: Option<String>,
    ) -> Self {
        Self {
            stem: stem.trim().to_string(),
            question_type,
            options,
            feedback: feedback.map(|f| f.trim().to_string()),
        }
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn identity(&self) -> QuestionId {
        QuestionId(self.stem.clone())
    }

    /// Options with a label prefix guaranteed.
    ///
    /// Parsed options already start with a label; true/false options do
    /// not, so they get one from their position.
    pub fn labeled_options(&self) -> Vec<String> {
        self.options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                if LABEL_PREFIX.is_match(option) {
                    option.clone()
                } else {
                    format!("{}) {}", option_label(i + 1), option)
                }
            })
            .collect()
    }
}

impl std::fmt::Display for QuestionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.stem)?;
        for option in self.labeled_options() {
            write!(f, "\n{}", option)?;
        }
        if let Some(feedback) = &self.feedback {
            write!(f, "\n{}", feedback)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_choice_trims_stem_and_feedback() {
        let q = QuestionRecord::multiple_choice(
            "  What is 2 + 2?  ",
            vec!["a) 3".into(), "b) 4".into()],
            Some(" Answer Feedback: four ".into()),
        )
        .unwrap();
        assert_eq!(q.stem(), "What is 2 + 2?");
        assert_eq!(q.feedback(), Some("Answer Feedback: four"));
        assert_eq!(q.question_type(), QuestionType::MultipleChoice);
    }

    #[test]
    fn test_multiple_choice_requires_option() {
        let blank = QuestionRecord::multiple_choice(" Empty? ", vec!["  ".into()], None);
        assert_eq!(
            blank,
            Err(DomainError::NoOptions {
                stem: "Empty?".to_string()
            })
        );
        assert!(QuestionRecord::multiple_choice("None?", Vec::new(), None).is_err());
    }

    #[test]
    fn test_true_false_has_canonical_options() {
        let q = QuestionRecord::true_false("True/False: the sky is blue", None);
        assert_eq!(q.options(), &["True".to_string(), "False".to_string()]);
        assert_eq!(q.labeled_options(), vec!["a) True", "b) False"]);
    }

    #[test]
    fn test_identity_follows_stem() {
        let a = QuestionRecord::free_response("Explain ownership.", None);
        let b = QuestionRecord::free_response("Explain ownership.  ", Some("x".into()));
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn test_display_lists_options_and_feedback() {
        let q = QuestionRecord::multiple_choice(
            "Pick one",
            vec!["a) *Yes*".into(), "b) No".into()],
            Some("Answer Feedback: yes".into()),
        )
        .unwrap();
        assert_eq!(q.to_string(), "Pick one\na) *Yes*\nb) No\nAnswer Feedback: yes");
    }

    #[test]
    fn test_question_type_serializes_kebab_case() {
        let json = serde_json::to_string(&QuestionType::MultipleChoice).unwrap();
        assert_eq!(json, "\"multiple-choice\"");
    }
}
