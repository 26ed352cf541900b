//! Vote Tally
//!
//! Counting and winner resolution for a closed round. Everything here is
//! pure: the same record always yields the same result.

use crate::core::ids::VoterId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Voter → chosen option index for one round.
///
/// One entry per voter; inserting again for the same voter replaces the
/// earlier choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    choices: BTreeMap<VoterId, usize>,
}

impl VoteRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `voter`'s choice, returning the choice it replaced (if any).
    pub fn insert(&mut self, voter: VoterId, index: usize) -> Option<usize> {
        self.choices.insert(voter, index)
    }

    pub fn choice_of(&self, voter: &VoterId) -> Option<usize> {
        self.choices.get(voter).copied()
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VoterId, usize)> {
        self.choices.iter().map(|(v, i)| (v, *i))
    }
}

impl FromIterator<(VoterId, usize)> for VoteRecord {
    fn from_iter<T: IntoIterator<Item = (VoterId, usize)>>(iter: T) -> Self {
        let mut record = VoteRecord::new();
        for (voter, index) in iter {
            record.insert(voter, index);
        }
        record
    }
}

/// Per-option counts of length `option_count`.
///
/// Choices outside `0..option_count` are not counted; a [`PollSession`]
/// never records them.
///
/// [`PollSession`]: super::session::PollSession
pub fn tally(record: &VoteRecord, option_count: usize) -> Vec<usize> {
    let mut counts = vec![0; option_count];
    for (_, index) in record.iter() {
        if let Some(count) = counts.get_mut(index) {
            *count += 1;
        }
    }
    counts
}

/// Highest count and every index reaching it, ascending.
///
/// All-zero counts give `max_count == 0` with every index "winning";
/// [`RoundResult::outcome`] turns that into [`RoundOutcome::NoVotes`].
pub fn resolve(counts: &[usize]) -> (usize, Vec<usize>) {
    let max_count = counts.iter().copied().max().unwrap_or(0);
    let winning_indices = counts
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == max_count)
        .map(|(i, _)| i)
        .collect();
    (max_count, winning_indices)
}

/// Classification of a tallied round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Nobody voted
    NoVotes,
    /// A single option has the most votes
    Winner { index: usize, count: usize },
    /// Several options share the most votes
    Tie { indices: Vec<usize> },
}

impl RoundOutcome {
    pub fn is_tie(&self) -> bool {
        matches!(self, RoundOutcome::Tie { .. })
    }
}

/// Derived result of a closed round
///
/// # Example
///
/// ```
/// use ballot_domain::VoterId;
/// use ballot_domain::poll::{RoundOutcome, RoundResult, VoteRecord};
///
/// let mut record = VoteRecord::new();
/// record.insert(VoterId::new("ann"), 0);
/// record.insert(VoterId::new("bo"), 1);
/// record.insert(VoterId::new("cy"), 0);
/// let result = RoundResult::from_record(&record, 2);
/// assert_eq!(result.counts, vec![2, 1]);
/// assert_eq!(result.outcome(), RoundOutcome::Winner { index: 0, count: 2 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Count per option, in option order
    pub counts: Vec<usize>,
    /// Highest count
    pub max_count: usize,
    /// Indices whose count equals `max_count`, ascending
    pub winning_indices: Vec<usize>,
}

impl RoundResult {
    pub fn from_counts(counts: Vec<usize>) -> Self {
        let (max_count, winning_indices) = resolve(&counts);
        Self {
            counts,
            max_count,
            winning_indices,
        }
    }

    pub fn from_record(record: &VoteRecord, option_count: usize) -> Self {
        Self::from_counts(tally(record, option_count))
    }

    pub fn total_votes(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn outcome(&self) -> RoundOutcome {
        match self.winning_indices.as_slice() {
            _ if self.max_count == 0 => RoundOutcome::NoVotes,
            [index] => RoundOutcome::Winner {
                index: *index,
                count: self.max_count,
            },
            indices => RoundOutcome::Tie {
                indices: indices.to_vec(),
            },
        }
    }
}
