//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; conversion to application types happens
//! through methods such as [`FilePollConfig::to_behavior`].

mod logging;
mod output;
mod poll;

pub use logging::{FileLoggingConfig, LOG_LEVELS};
pub use output::FileOutputConfig;
pub use poll::FilePollConfig;

use ballot_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when validation finds at least one error-severity issue
#[derive(Error, Debug)]
#[error("invalid configuration: {}", summarize(.issues))]
pub struct ConfigValidationError {
    pub issues: Vec<ConfigIssue>,
}

fn summarize(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Poll settings
    pub poll: FilePollConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Logging settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.poll.validate();
        issues.extend(self.logging.validate());
        issues
    }

    /// Fail on error-severity issues; return the remaining warnings.
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(|i| i.is_error());
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError { issues: errors })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[poll]
window_seconds = 45
default_channel = "lunch"

[output]
color = false
show_progress = false

[logging]
level = "debug"
file = "/tmp/ballot.log"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.poll.window_seconds, 45);
        assert_eq!(config.poll.default_channel, "lunch");
        assert!(!config.output.color);
        assert!(!config.output.show_progress);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file.as_deref(), Some("/tmp/ballot.log"));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[poll]
window_seconds = 5
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.poll.window_seconds, 5);
        // Defaults should apply
        assert_eq!(config.poll.default_channel, "general");
        assert!(config.output.color);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert!(config.check().unwrap().is_empty());
    }

    #[test]
    fn test_check_splits_errors_and_warnings() {
        let mut config = FileConfig::default();
        config.logging.level = "chatty".to_string();
        let warnings = config.check().unwrap();
        assert_eq!(warnings.len(), 1);

        config.poll.window_seconds = 0;
        let err = config.check().unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert!(err.to_string().contains("poll.window_seconds"));
    }
}
