//! Quiz assembly.
//!
//! Draws records from the bank into quizzes under one of two policies:
//!
//! - **No duplicates**: the bank is shuffled once and partitioned
//!   contiguously, so no record appears twice across the batch.
//! - **Duplicates allowed**: every quiz samples uniformly with replacement
//!   from the whole bank.
//!
//! The random source is a parameter, so a seeded RNG reproduces a batch.

use super::entities::{AssemblyMetadata, QuizView};
use crate::core::error::DomainError;
use crate::question::{QuestionId, QuestionRecord};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// How many quizzes of which size to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyRequest {
    pub quiz_count: usize,
    pub per_quiz: usize,
    pub allow_duplicates: bool,
}

impl AssemblyRequest {
    pub fn new(quiz_count: usize, per_quiz: usize) -> Self {
        Self {
            quiz_count,
            per_quiz,
            allow_duplicates: false,
        }
    }

    pub fn with_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    /// Total draws across the batch
    pub fn total(&self) -> usize {
        self.quiz_count.saturating_mul(self.per_quiz)
    }
}

/// Assembled quizzes plus a summary
#[derive(Debug, Clone)]
pub struct Assembly {
    pub quizzes: Vec<QuizView>,
    pub metadata: AssemblyMetadata,
}

/// Build quizzes from `bank`.
///
/// Fails with [`DomainError::InsufficientQuestions`] without producing any
/// quiz when the request cannot be met: more distinct draws than the bank
/// holds, or any draw at all from an empty bank.
pub fn assemble<R: Rng + ?Sized>(
    bank: &[Arc<QuestionRecord>],
    request: AssemblyRequest,
    rng: &mut R,
) -> Result<Assembly, DomainError> {
    let requested = request.total();
    let available = bank.len();

    let insufficient = if request.allow_duplicates {
        available == 0 && requested > 0
    } else {
        requested > available
    };
    if insufficient {
        return Err(DomainError::InsufficientQuestions {
            requested,
            available,
        });
    }

    let quizzes = if request.allow_duplicates {
        sample_with_replacement(bank, request, rng)
    } else {
        partition_shuffled(bank, request, rng)
    };

    let metadata = summarize(&quizzes, request.per_quiz);
    debug!(
        "Assembled {} quizzes ({} distinct questions, {} repeated)",
        metadata.num_quizzes,
        metadata.total_questions_used,
        metadata.duplicate_stats.len()
    );
    Ok(Assembly { quizzes, metadata })
}

fn quiz_title(index: usize) -> String {
    format!("Quiz {}", index + 1)
}

fn sample_with_replacement<R: Rng + ?Sized>(
    bank: &[Arc<QuestionRecord>],
    request: AssemblyRequest,
    rng: &mut R,
) -> Vec<QuizView> {
    (0..request.quiz_count)
        .map(|i| {
            let questions = (0..request.per_quiz)
                .filter_map(|_| bank.choose(rng).cloned())
                .collect();
            QuizView::new(quiz_title(i), questions)
        })
        .collect()
}

fn partition_shuffled<R: Rng + ?Sized>(
    bank: &[Arc<QuestionRecord>],
    request: AssemblyRequest,
    rng: &mut R,
) -> Vec<QuizView> {
    let mut pool = bank.to_vec();
    pool.shuffle(rng);
    pool.truncate(request.total());

    let mut quizzes = Vec::with_capacity(request.quiz_count);
    for i in 0..request.quiz_count {
        let start = i * request.per_quiz;
        if request.per_quiz > 0 && start >= pool.len() {
            break;
        }
        let end = (start + request.per_quiz).min(pool.len());
        quizzes.push(QuizView::new(quiz_title(i), pool[start..end].to_vec()));
    }
    quizzes
}

fn summarize(quizzes: &[QuizView], per_quiz: usize) -> AssemblyMetadata {
    let mut usage: BTreeMap<QuestionId, usize> = BTreeMap::new();
    for question in quizzes.iter().flat_map(|q| q.questions()) {
        *usage.entry(question.identity()).or_default() += 1;
    }

    let total_questions_used = usage.len();
    let duplicate_stats = usage.into_iter().filter(|(_, count)| *count > 1).collect();

    AssemblyMetadata {
        num_quizzes: quizzes.len(),
        questions_per_quiz: per_quiz,
        total_questions_used,
        duplicate_stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn bank(size: usize) -> Vec<Arc<QuestionRecord>> {
        (0..size)
            .map(|i| Arc::new(QuestionRecord::free_response(format!("Question {i}"), None)))
            .collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    // ==================== No-duplicates Tests ====================

    #[test]
    fn test_no_duplicates_never_repeats() {
        let bank = bank(10);
        let result = assemble(&bank, AssemblyRequest::new(3, 3), &mut rng()).unwrap();

        assert_eq!(result.quizzes.len(), 3);
        let ids: Vec<_> = result
            .quizzes
            .iter()
            .flat_map(|q| q.questions())
            .map(|q| q.identity())
            .collect();
        assert_eq!(ids.len(), 9);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 9);
        assert_eq!(result.metadata.total_questions_used, 9);
        assert!(!result.metadata.has_duplicates());
    }

    #[test]
    fn test_no_duplicates_uses_whole_bank_when_exact() {
        let bank = bank(4);
        let result = assemble(&bank, AssemblyRequest::new(2, 2), &mut rng()).unwrap();
        assert!(result.quizzes.iter().all(|q| q.len() == 2));
        assert_eq!(result.metadata.total_questions_used, 4);
    }

    #[test]
    fn test_insufficient_questions() {
        let bank = bank(5);
        let err = assemble(&bank, AssemblyRequest::new(2, 3), &mut rng()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InsufficientQuestions {
                requested: 6,
                available: 5
            }
        ));
    }

    #[test]
    fn test_titles_are_one_based() {
        let bank = bank(4);
        let result = assemble(&bank, AssemblyRequest::new(2, 1), &mut rng()).unwrap();
        let titles: Vec<_> = result.quizzes.iter().map(|q| q.title()).collect();
        assert_eq!(titles, vec!["Quiz 1", "Quiz 2"]);
    }

    // ==================== Duplicates Tests ====================

    #[test]
    fn test_duplicates_with_single_record() {
        let bank = bank(1);
        let request = AssemblyRequest::new(3, 2).with_duplicates(true);
        let result = assemble(&bank, request, &mut rng()).unwrap();

        assert_eq!(result.quizzes.len(), 3);
        for quiz in &result.quizzes {
            assert_eq!(quiz.len(), 2);
            assert!(Arc::ptr_eq(&quiz.questions()[0], &bank[0]));
            assert!(Arc::ptr_eq(&quiz.questions()[1], &bank[0]));
        }
        assert_eq!(result.metadata.total_questions_used, 1);
        assert_eq!(result.metadata.duplicate_stats.get(&bank[0].identity()), Some(&6));
    }

    #[test]
    fn test_duplicates_from_empty_bank_fails() {
        let request = AssemblyRequest::new(1, 1).with_duplicates(true);
        assert!(assemble(&[], request, &mut rng()).is_err());

        let nothing = AssemblyRequest::new(0, 5).with_duplicates(true);
        assert!(assemble(&[], nothing, &mut rng()).unwrap().quizzes.is_empty());
    }

    #[test]
    fn test_duplicates_may_exceed_bank() {
        let bank = bank(2);
        let request = AssemblyRequest::new(4, 5).with_duplicates(true);
        let result = assemble(&bank, request, &mut rng()).unwrap();
        assert_eq!(result.quizzes.iter().map(|q| q.len()).sum::<usize>(), 20);
        assert!(result.metadata.has_duplicates());
    }

    // ==================== Determinism Tests ====================

    #[test]
    fn test_same_seed_same_batch() {
        let bank = bank(20);
        let request = AssemblyRequest::new(4, 5);
        let a = assemble(&bank, request, &mut rng()).unwrap();
        let b = assemble(&bank, request, &mut rng()).unwrap();
        assert_eq!(a.quizzes, b.quizzes);
    }
}
