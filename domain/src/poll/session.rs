//! Poll Session
//!
//! One round of a poll: the question, the option set, the markers issued
//! for it, and the votes collected while the window is open.
//!
//! ```text
//!   open ──record_vote*──▶ OPEN ──close()──▶ CLOSED (frozen)
//! ```
//!
//! Publishing the round and waiting out the window are the application
//! layer's job; this type only enforces the vote-recording rules.

use super::marker::MarkerAssignment;
use super::options::OptionSet;
use super::tally::{RoundResult, VoteRecord};
use crate::core::error::DomainError;
use crate::core::ids::VoterId;
use crate::core::question::Question;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Whether a round is the first one or a tie-breaker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundKind {
    #[default]
    Initial,
    TieBreak,
}

impl RoundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundKind::Initial => "initial",
            RoundKind::TieBreak => "tiebreak",
        }
    }

    pub fn is_tie_break(&self) -> bool {
        matches!(self, RoundKind::TieBreak)
    }
}

impl std::fmt::Display for RoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a [`PollSession`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Open,
    Closed,
}

/// A reaction delivered by the platform while a round is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    /// Glyph the participant reacted with
    pub marker: String,
    /// Who reacted
    pub voter: VoterId,
    /// Set for bots and other automated participants
    pub is_automated: bool,
}

impl ReactionEvent {
    pub fn human(voter: impl Into<VoterId>, marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            voter: voter.into(),
            is_automated: false,
        }
    }

    pub fn automated(voter: impl Into<VoterId>, marker: impl Into<String>) -> Self {
        Self {
            is_automated: true,
            ..Self::human(voter, marker)
        }
    }
}

/// What [`PollSession::record_vote`] did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteEffect {
    /// First vote from this voter in the round
    Recorded { index: usize },
    /// Voter replaced an earlier choice
    Changed { from: usize, to: usize },
    /// Automated participant
    IgnoredAutomated,
    /// Marker is not one of this round's markers
    IgnoredMarker,
    /// The round has already closed
    IgnoredClosed,
}

impl VoteEffect {
    pub fn is_counted(&self) -> bool {
        matches!(self, VoteEffect::Recorded { .. } | VoteEffect::Changed { .. })
    }
}

/// Frozen snapshot returned by [`PollSession::close`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedRound {
    pub kind: RoundKind,
    pub options: OptionSet,
    pub votes: VoteRecord,
}

impl ClosedRound {
    pub fn result(&self) -> RoundResult {
        RoundResult::from_record(&self.votes, self.options.len())
    }
}

/// One open-collect-close cycle for an option set
#[derive(Debug, Clone)]
pub struct PollSession {
    question: Question,
    options: OptionSet,
    markers: MarkerAssignment,
    window: Duration,
    kind: RoundKind,
    votes: VoteRecord,
    closed: Option<ClosedRound>,
}

impl PollSession {
    /// Open a round. Fails if the option set cannot be given markers.
    pub fn open(
        question: Question,
        options: OptionSet,
        window: Duration,
        kind: RoundKind,
    ) -> Result<Self, DomainError> {
        let markers = MarkerAssignment::for_options(options.len())?;
        Ok(Self {
            question,
            options,
            markers,
            window,
            kind,
            votes: VoteRecord::new(),
            closed: None,
        })
    }

    /// Apply a reaction. Never fails; ignored events leave the record as is.
    pub fn record_vote(&mut self, event: &ReactionEvent) -> VoteEffect {
        if self.closed.is_some() {
            return VoteEffect::IgnoredClosed;
        }
        if event.is_automated {
            return VoteEffect::IgnoredAutomated;
        }
        let Some(index) = self.markers.index_for_marker(&event.marker) else {
            return VoteEffect::IgnoredMarker;
        };
        match self.votes.insert(event.voter.clone(), index) {
            Some(from) => VoteEffect::Changed { from, to: index },
            None => VoteEffect::Recorded { index },
        }
    }

    /// Close the round and freeze its votes. Later calls return the same snapshot.
    pub fn close(&mut self) -> ClosedRound {
        if let Some(closed) = &self.closed {
            return closed.clone();
        }
        let closed = ClosedRound {
            kind: self.kind,
            options: self.options.clone(),
            votes: std::mem::take(&mut self.votes),
        };
        self.closed = Some(closed.clone());
        closed
    }

    pub fn state(&self) -> SessionState {
        if self.closed.is_some() {
            SessionState::Closed
        } else {
            SessionState::Open
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn markers(&self) -> &MarkerAssignment {
        &self.markers
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn kind(&self) -> RoundKind {
        self.kind
    }

    /// Votes collected so far (empty once closed; use the snapshot instead)
    pub fn votes(&self) -> &VoteRecord {
        &self.votes
    }
}
