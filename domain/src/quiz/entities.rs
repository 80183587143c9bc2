//! Quiz entities

use crate::question::{QuestionId, QuestionRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A generated quiz.
///
/// Questions are shared with the bank; the same record may appear in
/// several quizzes (or twice in one) when duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView {
    title: String,
    questions: Vec<Arc<QuestionRecord>>,
}

impl QuizView {
    pub fn new(title: impl Into<String>, questions: Vec<Arc<QuestionRecord>>) -> Self {
        Self {
            title: title.into(),
            questions,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn questions(&self) -> &[Arc<QuestionRecord>] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Text rendering: title, blank line, then numbered questions separated by
/// blank lines.
impl std::fmt::Display for QuizView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n\n", self.title)?;
        for (i, question) in self.questions.iter().enumerate() {
            write!(f, "{}. {}\n\n", i + 1, question)?;
        }
        Ok(())
    }
}

/// Summary of an assembly run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssemblyMetadata {
    /// Quizzes actually produced
    pub num_quizzes: usize,
    pub questions_per_quiz: usize,
    /// Distinct questions drawn across all quizzes
    pub total_questions_used: usize,
    /// Questions drawn more than once, with their total draw count
    pub duplicate_stats: BTreeMap<QuestionId, usize>,
}

impl AssemblyMetadata {
    pub fn has_duplicates(&self) -> bool {
        !self.duplicate_stats.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_text_rendering() {
        let q = Arc::new(QuestionRecord::multiple_choice(
            "What is 2 + 2?",
            vec!["a) 3".into(), "b) *4*".into()],
            Some("Answer Feedback: four".into()),
        ).unwrap());
        let tf = Arc::new(QuestionRecord::true_false("True/False: water is wet", None));
        let quiz = QuizView::new("Quiz 1", vec![q, tf]);

        assert_eq!(
            quiz.to_string(),
            "Quiz 1\n\n\
             1. What is 2 + 2?\na) 3\nb) *4*\nAnswer Feedback: four\n\n\
             2. True/False: water is wet\na) True\nb) False\n\n"
        );
    }

    #[test]
    fn test_metadata_serializes_duplicate_stats_by_stem() {
        let record = QuestionRecord::free_response("Explain traits", None);
        let mut meta = AssemblyMetadata {
            num_quizzes: 2,
            questions_per_quiz: 1,
            total_questions_used: 1,
            ..Default::default()
        };
        meta.duplicate_stats.insert(record.identity(), 2);

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["duplicate_stats"]["Explain traits"], 2);
        assert!(meta.has_duplicates());
    }
}
