//! Configuration validation issues.
//!
//! Config loaders report problems as [`ConfigIssue`] values instead of
//! failing, so a partly wrong config file still yields a working setup with
//! defaults in place of the bad values.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: a default is used instead of the configured value.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A string field holds a value outside its accepted set.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A numeric field is out of range (e.g. a zero font size).
    InvalidNumber { field: String, value: i64 },
    /// A list holds more entries than allowed.
    TooManyEntries {
        field: String,
        max: usize,
        actual: usize,
    },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_constructor() {
        let issue = ConfigIssue::warning(
            ConfigIssueCode::InvalidNumber {
                field: "formatting.pdf.body_size".to_string(),
                value: 0,
            },
            "body_size must be positive",
        );
        assert_eq!(issue.severity, Severity::Warning);
        assert!(!issue.is_error());
        assert_eq!(issue.message, "body_size must be positive");
    }
}
