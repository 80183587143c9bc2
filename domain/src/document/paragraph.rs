//! Paragraph and run value objects

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A contiguous piece of paragraph text sharing one emphasis flag (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    text: String,
    emphasized: bool,
}

impl Run {
    pub fn new(text: impl Into<String>, emphasized: bool) -> Self {
        Self {
            text: text.into(),
            emphasized,
        }
    }

    /// A run without emphasis
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    /// An emphasized (bold) run
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_emphasized(&self) -> bool {
        self.emphasized
    }
}

/// An ordered sequence of runs, as read from a structured document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    /// Single plain run paragraph
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![Run::plain(text)])
    }

    /// Paragraph with no runs (a blank line in the source)
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Concatenated run text with original spacing
    pub fn text(&self) -> String {
        self.runs.iter().map(Run::text).collect()
    }

    /// Whether the paragraph holds only whitespace
    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }

    /// Byte ranges (within [`Paragraph::text`]) of runs carrying emphasis
    /// and at least one non-whitespace character, in document order.
    pub fn emphasized_ranges(&self) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut offset = 0;
        for run in &self.runs {
            let end = offset + run.text.len();
            if run.emphasized && !run.text.trim().is_empty() {
                ranges.push(offset..end);
            }
            offset = end;
        }
        ranges
    }
}

impl From<&str> for Paragraph {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}
