//! Generation defaults from TOML (`[quiz_defaults]` section)

use quiz_application::GenerationParams;
use quiz_domain::{ConfigIssue, ConfigIssueCode, OutputFormat};
use serde::{Deserialize, Serialize};

/// Raw generation defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQuizDefaultsConfig {
    pub num_quizzes: usize,
    pub questions_per_quiz: usize,
    pub allow_duplicates: bool,
    /// "text", "docx" or "pdf"
    pub output_format: String,
    pub output_directory: String,
}

impl Default for FileQuizDefaultsConfig {
    fn default() -> Self {
        Self {
            num_quizzes: 5,
            questions_per_quiz: 10,
            allow_duplicates: false,
            output_format: OutputFormat::Docx.as_str().to_string(),
            output_directory: "quizzes".to_string(),
        }
    }
}

impl FileQuizDefaultsConfig {
    /// Parse output_format, falling back to docx
    pub fn parse_output_format(&self) -> (OutputFormat, Vec<ConfigIssue>) {
        match OutputFormat::parse(&self.output_format) {
            Some(format) => (format, vec![]),
            None => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "quiz_defaults.output_format".to_string(),
                        value: self.output_format.clone(),
                        valid_values: vec![
                            "text".to_string(),
                            "docx".to_string(),
                            "pdf".to_string(),
                        ],
                    },
                    format!(
                        "quiz_defaults.output_format: unknown value '{}', falling back to 'docx'",
                        self.output_format
                    ),
                );
                (OutputFormat::default(), vec![issue])
            }
        }
    }

    /// Generation parameters seeded from these defaults
    pub fn to_generation_params(&self) -> (GenerationParams, Vec<ConfigIssue>) {
        let (format, issues) = self.parse_output_format();
        let params = GenerationParams::default()
            .with_quiz_count(self.num_quizzes)
            .with_questions_per_quiz(self.questions_per_quiz)
            .with_duplicates(self.allow_duplicates)
            .with_output_format(format)
            .with_output_dir(&self.output_directory);
        (params, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format_accepts_txt_alias() {
        let config = FileQuizDefaultsConfig {
            output_format: "TXT".to_string(),
            ..Default::default()
        };
        let (format, issues) = config.parse_output_format();
        assert_eq!(format, OutputFormat::Text);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_unknown_output_format_falls_back() {
        let config = FileQuizDefaultsConfig {
            output_format: "html".to_string(),
            ..Default::default()
        };
        let (params, issues) = config.to_generation_params();
        assert_eq!(params.output_format, OutputFormat::Docx);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("html"));
    }

    #[test]
    fn test_to_generation_params() {
        let config = FileQuizDefaultsConfig {
            num_quizzes: 2,
            questions_per_quiz: 3,
            allow_duplicates: true,
            output_format: "pdf".to_string(),
            output_directory: "out".to_string(),
        };
        let (params, _) = config.to_generation_params();
        assert_eq!(params.quiz_count, 2);
        assert_eq!(params.questions_per_quiz, 3);
        assert!(params.allow_duplicates);
        assert_eq!(params.output_format, OutputFormat::Pdf);
        assert_eq!(params.output_dir, std::path::PathBuf::from("out"));
        assert_eq!(params.seed, None);
    }
}
