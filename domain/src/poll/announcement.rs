//! Texts the bot publishes to a channel
//!
//! [`PollMessage`] is the round announcement that participants react to;
//! [`Announcement`] holds every reply and follow-up line.

use super::marker::Marker;
use super::session::{PollSession, RoundKind};
use serde::{Deserialize, Serialize};

/// Accent colour of a round announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    /// Initial rounds
    Blue,
    /// Tie-break rounds
    Orange,
}

impl Accent {
    /// RGB value as used by embed-style messages
    pub fn rgb(&self) -> u32 {
        match self {
            Accent::Blue => 0x3498db,
            Accent::Orange => 0xe67e22,
        }
    }
}

impl From<RoundKind> for Accent {
    fn from(kind: RoundKind) -> Self {
        match kind {
            RoundKind::Initial => Accent::Blue,
            RoundKind::TieBreak => Accent::Orange,
        }
    }
}

/// One `<marker>: <option>` line of a round announcement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionLine {
    pub marker: Marker,
    pub label: String,
}

/// Round announcement rendered for the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollMessage {
    pub title: String,
    pub lines: Vec<OptionLine>,
    pub accent: Accent,
}

impl PollMessage {
    /// Render the announcement for an open session
    pub fn for_session(session: &PollSession) -> Self {
        let title = match session.kind() {
            RoundKind::Initial => format!("Vote: {}", session.question()),
            RoundKind::TieBreak => format!("Tie-breaking Vote: {}", session.question()),
        };
        let lines = session
            .markers()
            .markers()
            .iter()
            .zip(session.options().iter())
            .map(|(marker, label)| OptionLine {
                marker: *marker,
                label: label.to_string(),
            })
            .collect();

        Self {
            title,
            lines,
            accent: session.kind().into(),
        }
    }

    /// Markers in announcement order
    pub fn markers(&self) -> Vec<Marker> {
        self.lines.iter().map(|l| l.marker).collect()
    }

    /// Body text: one `<marker>: <option>` per line
    pub fn body(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("{}: {}", l.marker, l.label))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Reply and follow-up texts
pub struct Announcement;

impl Announcement {
    pub fn insufficient_options() -> &'static str {
        "Please provide at least two options separated by commas."
    }

    pub fn too_many_options() -> &'static str {
        "Please provide no more than ten options separated by commas."
    }

    pub fn missing_question() -> &'static str {
        "Please provide a question for the vote."
    }

    pub fn poll_in_progress() -> &'static str {
        "A vote is already in progress in this channel. Please wait until it finishes."
    }

    pub fn no_votes(kind: RoundKind) -> &'static str {
        match kind {
            RoundKind::Initial => "No votes were cast.",
            RoundKind::TieBreak => "No votes were cast in the tie-breaker.",
        }
    }

    pub fn winner(kind: RoundKind, option: &str, count: usize) -> String {
        match kind {
            RoundKind::Initial => {
                format!("The winning option is: {option} with vote count of {count}.")
            }
            RoundKind::TieBreak => format!("The winning option after tie-breaker is: {option}."),
        }
    }

    pub fn still_tied<S: AsRef<str>>(options: &[S]) -> String {
        let joined = options
            .iter()
            .map(|o| o.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
        format!("It's still a tie! Winning options: {joined}.")
    }
}
