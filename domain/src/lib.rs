//! Domain layer for ballot-bot
//!
//! This crate contains the core poll logic: option sets, reaction markers,
//! poll sessions and vote tallying. It has no dependencies on async runtimes,
//! platforms or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Round**: one open-collect-close-tally cycle for an option set
//! - **Tie-break round**: a round restricted to the previous round's tied winners
//! - **Marker**: a reaction glyph standing in for one option index
//! - **Voter**: a channel-scoped participant; automated participants never count

pub mod config;
pub mod core;
pub mod poll;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{
    error::DomainError,
    ids::{ChannelId, MessageHandle, VoterId},
    question::Question,
};
pub use poll::{
    Accent, Announcement, ClosedRound, Marker, MarkerAssignment, OptionSet, PollMessage,
    PollOutcome, PollSession, ReactionEvent, RoundKind, RoundOutcome, RoundResult, VoteEffect,
    VoteRecord,
};
