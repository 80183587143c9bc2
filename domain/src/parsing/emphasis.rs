//! Emphasis markers.
//!
//! Bold text in a structured source usually flags the correct answer. The
//! parser carries that signal through format-agnostic processing by
//! wrapping emphasized text in `*…*`; exporters split marked text back into
//! plain and bold segments.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static MARKED_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("valid marker regex"));

/// Which emphasized runs of an option become markers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmphasisMode {
    /// Only the first emphasized run overlapping the option content
    #[default]
    FirstRun,
    /// Every emphasized run overlapping the option content
    AllRuns,
}

/// Piece of marked text with its emphasis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedSegment {
    pub text: String,
    pub bold: bool,
}

impl MarkedSegment {
    fn new(text: &str, bold: bool) -> Self {
        Self {
            text: text.to_string(),
            bold,
        }
    }
}

/// Return `text[content]` with emphasized ranges wrapped in `*…*`.
///
/// `emphasized` holds byte ranges within `text` (run boundaries) in
/// document order. Each range is clipped to `content` and stripped of
/// surrounding whitespace before marking; contiguous spans merge into one.
pub fn mark_emphasis(
    text: &str,
    content: Range<usize>,
    emphasized: &[Range<usize>],
    mode: EmphasisMode,
) -> String {
    let mut spans: Vec<Range<usize>> = Vec::new();

    for range in emphasized {
        let start = range.start.max(content.start);
        let end = range.end.min(content.end);
        if start >= end {
            continue;
        }
        let Some(span) = trim_span(text, start..end) else {
            continue;
        };
        match spans.last_mut() {
            Some(last) if last.end == span.start => last.end = span.end,
            _ => spans.push(span),
        }
        if mode == EmphasisMode::FirstRun {
            break;
        }
    }

    let mut marked = String::with_capacity(content.len() + spans.len() * 2);
    let mut cursor = content.start;
    for span in spans {
        marked.push_str(&text[cursor..span.start]);
        marked.push('*');
        marked.push_str(&text[span.clone()]);
        marked.push('*');
        cursor = span.end;
    }
    marked.push_str(&text[cursor..content.end]);
    marked
}

fn trim_span(text: &str, range: Range<usize>) -> Option<Range<usize>> {
    let slice = &text[range.clone()];
    let lead = slice.len() - slice.trim_start().len();
    let trail = slice.len() - slice.trim_end().len();
    let span = range.start + lead..range.end - trail;
    (span.start < span.end).then_some(span)
}

/// Split marked text into plain and bold segments, dropping the markers.
pub fn split_marked(text: &str) -> Vec<MarkedSegment> {
    let mut segments = Vec::new();
    let mut pos = 0;
    for caps in MARKED_SPAN.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > pos {
            segments.push(MarkedSegment::new(&text[pos..whole.start()], false));
        }
        segments.push(MarkedSegment::new(inner.as_str(), true));
        pos = whole.end();
    }
    if pos < text.len() {
        segments.push(MarkedSegment::new(&text[pos..], false));
    }
    segments
}

/// Whether the text contains at least one marked span
pub fn has_marker(text: &str) -> bool {
    MARKED_SPAN.is_match(text)
}
