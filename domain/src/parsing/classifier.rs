//! Option-line classification.
//!
//! Recognizes the two labeled option styles found in question banks:
//!
//! | Style | Pattern | Example |
//! |-------|---------|---------|
//! | [`OptionStyle::Letter`] | lowercase letter, `)`, whitespace, content | `c) Rome` |
//! | [`OptionStyle::Number`] | digits, `.`, whitespace, content | `3. Rome` |
//!
//! [`classify_any_case`] also accepts uppercase letter labels (`C) Rome`),
//! which word-processor banks use; plain-text banks stay lowercase-only.
//!
//! The source label is reported but callers discard it: options are
//! relabeled by position (see [`crate::question::label`]).

use regex::Regex;
use std::sync::LazyLock;

static LETTER_OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z])\)\s+").expect("valid letter option regex"));
static LETTER_OPTION_ANY_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z])\)\s+").expect("valid any-case letter option regex"));
static NUMBER_OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s+").expect("valid number option regex"));

/// Labeling scheme of an option line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionStyle {
    /// `a)`, `b)`, …
    Letter,
    /// `1.`, `2.`, …
    Number,
}

impl OptionStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionStyle::Letter => "letter",
            OptionStyle::Number => "number",
        }
    }
}

/// A line recognized as a labeled option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionLine<'a> {
    pub style: OptionStyle,
    /// Label as written in the source, without its punctuation
    pub label: &'a str,
    /// Text after the label and its whitespace
    pub content: &'a str,
    /// Byte offset of `content` within the classified line
    pub content_start: usize,
}

/// Classify a trimmed line as a letter option, number option, or neither.
pub fn classify(line: &str) -> Option<OptionLine<'_>> {
    classify_with(line, &LETTER_OPTION)
}

/// Like [`classify`], with letter labels matched case-insensitively.
pub fn classify_any_case(line: &str) -> Option<OptionLine<'_>> {
    classify_with(line, &LETTER_OPTION_ANY_CASE)
}

fn classify_with<'a>(line: &'a str, letter: &Regex) -> Option<OptionLine<'a>> {
    for (style, pattern) in [
        (OptionStyle::Letter, letter),
        (OptionStyle::Number, &*NUMBER_OPTION),
    ] {
        if let Some(caps) = pattern.captures(line) {
            let whole = caps.get(0)?;
            let content = &line[whole.end()..];
            if content.trim().is_empty() {
                continue;
            }
            return Some(OptionLine {
                style,
                label: caps.get(1).map_or("", |m| m.as_str()),
                content,
                content_start: whole.end(),
            });
        }
    }
    None
}

/// Whether the line is any kind of labeled option
pub fn is_option_line(line: &str) -> bool {
    classify(line).is_some()
}
