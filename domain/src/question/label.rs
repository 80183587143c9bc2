//! Positional option labels
//!
//! Options are labeled by their position among a question's detected
//! options, never by the label printed in the source. Positions past 26
//! continue spreadsheet-column style (`z`, `aa`, `ab`, …) so every option of
//! a question keeps a distinct label.

/// Label for a 1-based option position (`1 → "a"`, `26 → "z"`, `27 → "aa"`)
///
/// Position 0 is treated as 1.
pub fn option_label(position: usize) -> String {
    let mut n = position.max(1);
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'a' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Full option text: `"<label>) <content>"`
pub fn labeled_option(position: usize, content: &str) -> String {
    format!("{}) {}", option_label(position), content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letter_labels() {
        assert_eq!(option_label(1), "a");
        assert_eq!(option_label(3), "c");
        assert_eq!(option_label(26), "z");
    }

    #[test]
    fn test_labels_past_z_use_two_letters() {
        assert_eq!(option_label(27), "aa");
        assert_eq!(option_label(28), "ab");
        assert_eq!(option_label(52), "az");
        assert_eq!(option_label(53), "ba");
        assert_eq!(option_label(702), "zz");
        assert_eq!(option_label(703), "aaa");
    }

    #[test]
    fn test_labels_are_distinct_within_a_question() {
        let labels: std::collections::HashSet<_> = (1..=80).map(option_label).collect();
        assert_eq!(labels.len(), 80);
    }

    #[test]
    fn test_labeled_option() {
        assert_eq!(labeled_option(2, "Berlin"), "b) Berlin");
        assert_eq!(option_label(0), "a");
    }
}
