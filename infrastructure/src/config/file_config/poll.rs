//! Poll configuration from TOML (`[poll]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [poll]
//! window_seconds = 30
//! default_channel = "general"
//! ```

use ballot_application::PollBehavior;
use ballot_application::config::DEFAULT_WINDOW;
use ballot_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw poll configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePollConfig {
    /// Collection window per round, in seconds
    pub window_seconds: u64,
    /// Channel the console starts in
    pub default_channel: String,
}

impl Default for FilePollConfig {
    fn default() -> Self {
        Self {
            window_seconds: DEFAULT_WINDOW.as_secs(),
            default_channel: "general".to_string(),
        }
    }
}

impl FilePollConfig {
    pub fn to_behavior(&self) -> PollBehavior {
        PollBehavior::with_window_seconds(self.window_seconds)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.window_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroDuration {
                    field: "poll.window_seconds".to_string(),
                },
                "poll.window_seconds must be greater than 0",
            ));
        }

        if self.default_channel.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "poll.default_channel".to_string(),
                },
                "poll.default_channel cannot be empty",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = FilePollConfig::default();
        assert_eq!(config.window_seconds, 20);
        assert_eq!(config.default_channel, "general");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_to_behavior() {
        let config = FilePollConfig {
            window_seconds: 45,
            ..Default::default()
        };
        assert_eq!(config.to_behavior().window, Duration::from_secs(45));
    }

    #[test]
    fn test_zero_window_and_blank_channel() {
        let config = FilePollConfig {
            window_seconds: 0,
            default_channel: "  ".to_string(),
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.is_error()));
    }
}
