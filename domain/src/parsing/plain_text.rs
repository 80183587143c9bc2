//! Plain-text question banks.
//!
//! Questions are blocks separated by blank lines. The first line of a block
//! is the stem; `a) …` / `1. …` lines are options; an `Answer Feedback:`
//! line is feedback. A `true/false` marker anywhere in the block makes it a
//! true/false question and discards parsed options. Other lines are ignored.

use super::classifier::classify;
use crate::question::{QuestionRecord, labeled_option};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static BLOCK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid block separator regex"));
static FEEDBACK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Answer\s+Feedback:\s+\S").expect("valid feedback regex"));
static TRUE_FALSE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)true\s*/\s*false").expect("valid true/false regex"));

/// Parse a plain-text bank into records, one per non-empty block.
pub fn parse_plain_text(content: &str) -> Vec<QuestionRecord> {
    let normalized = content.replace("\r\n", "\n");
    let records: Vec<_> = BLOCK_SEPARATOR
        .split(&normalized)
        .filter_map(parse_block)
        .collect();
    debug!("Parsed {} questions from plain text", records.len());
    records
}

fn parse_block(block: &str) -> Option<QuestionRecord> {
    let mut lines = block
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty());
    let stem = lines.next()?;

    let mut feedback = None;
    let mut options = Vec::new();
    let mut true_false = TRUE_FALSE_LINE.is_match(stem);

    for line in lines {
        if FEEDBACK_LINE.is_match(line) {
            feedback.get_or_insert_with(|| line.to_string());
            continue;
        }
        true_false |= TRUE_FALSE_LINE.is_match(line);
        if let Some(option) = classify(line) {
            options.push(labeled_option(options.len() + 1, option.content.trim()));
        }
    }

    if true_false {
        return Some(QuestionRecord::true_false(stem, feedback));
    }
    match QuestionRecord::multiple_choice(stem, options, feedback.clone()) {
        Ok(record) => Some(record),
        Err(_) => Some(QuestionRecord::free_response(stem, feedback)),
    }
}
