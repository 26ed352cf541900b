//! Logging configuration from TOML (`[logging]` section)

use ballot_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Level names accepted by `logging.level`
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Raw logging configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Filter used when neither `-v` nor `RUST_LOG` is given
    pub level: String,
    /// Optional log file; `~` expands to the home directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl FileLoggingConfig {
    /// Configured level, or `info` if it is not a known level name
    pub fn effective_level(&self) -> &str {
        let level = self.level.trim();
        if LOG_LEVELS.iter().any(|l| l.eq_ignore_ascii_case(level)) {
            level
        } else {
            "info"
        }
    }

    /// Log file path with `~` expanded
    pub fn resolved_file(&self) -> Option<PathBuf> {
        let file = self.file.as_deref()?.trim();
        if file.is_empty() {
            return None;
        }
        match file.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
            None => Some(PathBuf::from(file)),
        }
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let level = self.level.trim();
        if !LOG_LEVELS.iter().any(|l| l.eq_ignore_ascii_case(level)) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidEnumValue {
                    field: "logging.level".to_string(),
                    value: self.level.clone(),
                    valid_values: LOG_LEVELS.iter().map(|l| l.to_string()).collect(),
                },
                format!(
                    "logging.level: unknown value '{}', falling back to 'info'",
                    self.level
                ),
            ));
        }

        if matches!(self.file.as_deref(), Some(f) if f.trim().is_empty()) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "logging.file".to_string(),
                },
                "logging.file is empty; file logging is disabled",
            ));
        }

        issues
    }
}
