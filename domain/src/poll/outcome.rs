//! Terminal result of a whole poll (all rounds)

use super::session::RoundKind;
use serde::{Deserialize, Serialize};

/// How a poll ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PollOutcome {
    /// A round produced a single winner
    Winner {
        option: String,
        count: usize,
        rounds: usize,
    },
    /// A round received no votes
    NoVotes { kind: RoundKind, rounds: usize },
    /// The platform failed and the poll was abandoned
    Aborted { reason: String, rounds: usize },
}

impl PollOutcome {
    /// Number of rounds that were opened (the initial round counts as 1)
    pub fn rounds(&self) -> usize {
        match self {
            PollOutcome::Winner { rounds, .. }
            | PollOutcome::NoVotes { rounds, .. }
            | PollOutcome::Aborted { rounds, .. } => *rounds,
        }
    }

    pub fn winner(&self) -> Option<&str> {
        match self {
            PollOutcome::Winner { option, .. } => Some(option),
            _ => None,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, PollOutcome::Aborted { .. })
    }
}

impl std::fmt::Display for PollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollOutcome::Winner {
                option,
                count,
                rounds,
            } => write!(f, "{option} won with {count} vote(s) after {rounds} round(s)"),
            PollOutcome::NoVotes { kind, rounds } => {
                write!(f, "no votes in {kind} round (round {rounds})")
            }
            PollOutcome::Aborted { reason, rounds } => {
                write!(f, "aborted in round {rounds}: {reason}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let outcome = PollOutcome::Winner {
            option: "Pizza".to_string(),
            count: 2,
            rounds: 1,
        };
        assert_eq!(outcome.winner(), Some("Pizza"));
        assert_eq!(outcome.rounds(), 1);
        assert!(!outcome.is_aborted());
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = PollOutcome::NoVotes {
            kind: RoundKind::TieBreak,
            rounds: 2,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "no_votes");
        assert_eq!(json["kind"], "tie_break");
    }
}
