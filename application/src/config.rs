//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as the reaction collection window.

use std::time::Duration;

/// Default collection window for every round.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(20);

/// Poll behavior configuration.
///
/// The same window applies to the initial round and every tie-break round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollBehavior {
    /// How long each round collects reactions.
    pub window: Duration,
}

impl Default for PollBehavior {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}

impl PollBehavior {
    /// Creates a PollBehavior with a window specified in seconds.
    pub fn with_window_seconds(seconds: u64) -> Self {
        Self {
            window: Duration::from_secs(seconds),
        }
    }

    /// Creates a PollBehavior from an arbitrary window.
    pub fn with_window(window: Duration) -> Self {
        Self { window }
    }
}
