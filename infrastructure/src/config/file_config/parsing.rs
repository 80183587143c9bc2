//! Parser settings from TOML (`[parsing]` section)

use quiz_domain::{ConfigIssue, ConfigIssueCode, EmphasisMode, ParseOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileParsingConfig {
    /// "first-run" or "all-runs"
    pub emphasis: String,
    pub keep_unanswered_stems: bool,
}

impl Default for FileParsingConfig {
    fn default() -> Self {
        Self {
            emphasis: "first-run".to_string(),
            keep_unanswered_stems: false,
        }
    }
}

impl FileParsingConfig {
    /// Parse the emphasis mode string
    ///
    /// Accepts: "first-run", "first", "all-runs", "all"
    pub fn parse_emphasis(&self) -> (EmphasisMode, Vec<ConfigIssue>) {
        match self.emphasis.trim().to_lowercase().replace('_', "-").as_str() {
            "first-run" | "first" => (EmphasisMode::FirstRun, vec![]),
            "all-runs" | "all" => (EmphasisMode::AllRuns, vec![]),
            _ => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "parsing.emphasis".to_string(),
                        value: self.emphasis.clone(),
                        valid_values: vec!["first-run".to_string(), "all-runs".to_string()],
                    },
                    format!(
                        "parsing.emphasis: unknown value '{}', falling back to 'first-run'",
                        self.emphasis
                    ),
                );
                (EmphasisMode::FirstRun, vec![issue])
            }
        }
    }

    pub fn to_parse_options(&self) -> (ParseOptions, Vec<ConfigIssue>) {
        let (emphasis, issues) = self.parse_emphasis();
        let options = ParseOptions::default()
            .with_emphasis(emphasis)
            .with_keep_unanswered_stems(self.keep_unanswered_stems);
        (options, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_emphasis_aliases() {
        for (value, expected) in [
            ("first-run", EmphasisMode::FirstRun),
            ("ALL_RUNS", EmphasisMode::AllRuns),
            ("all", EmphasisMode::AllRuns),
        ] {
            let config = FileParsingConfig {
                emphasis: value.to_string(),
                ..Default::default()
            };
            assert_eq!(config.parse_emphasis(), (expected, vec![]));
        }
    }

    #[test]
    fn test_unknown_emphasis_warns() {
        let config = FileParsingConfig {
            emphasis: "every".to_string(),
            keep_unanswered_stems: true,
        };
        let (options, issues) = config.to_parse_options();
        assert_eq!(options.emphasis, EmphasisMode::FirstRun);
        assert!(options.keep_unanswered_stems);
        assert_eq!(issues.len(), 1);
    }
}
