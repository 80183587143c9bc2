//! Question boundary heuristics.
//!
//! Decides whether a line reads like a question stem. This is a best-effort
//! heuristic: adversarial input gives false positives and negatives, never
//! a panic.

use regex::Regex;
use std::sync::LazyLock;

/// Lines shorter than this (in characters) are never stems
pub const MIN_QUESTION_CHARS: usize = 20;

/// Interrogative and instructional words that mark a stem
pub const QUESTION_WORDS: [&str; 10] = [
    "what", "which", "who", "where", "when", "why", "how", "describe", "explain", "discuss",
];

static OPTION_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-z0-9][.)]|\d+\.)\s+").expect("valid option prefix regex")
});

/// Whether a trimmed line looks like a question stem.
pub fn looks_like_question(text: &str) -> bool {
    if text.chars().count() < MIN_QUESTION_CHARS {
        return false;
    }

    if OPTION_PREFIX.is_match(text) {
        return false;
    }

    if text.ends_with('?') {
        return true;
    }

    let lower = text.to_lowercase();
    if QUESTION_WORDS.iter().any(|word| lower.starts_with(word)) {
        return true;
    }

    QUESTION_WORDS
        .iter()
        .any(|word| lower.contains(&format!(" {word} ")))
}
