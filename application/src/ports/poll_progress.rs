//! Progress notification port
//!
//! Defines the interface for reporting progress while a poll runs.

use ballot_domain::{
    ChannelId, MessageHandle, PollMessage, PollOutcome, RoundKind, RoundResult, VoteEffect,
    VoterId,
};
use std::time::Duration;

/// Callback for progress updates during a poll
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console spinners, logs, etc.)
pub trait PollProgressNotifier: Send + Sync {
    /// Called once a round's announcement is published and collection starts
    fn on_round_open(
        &self,
        channel: &ChannelId,
        round: usize,
        kind: RoundKind,
        message: &PollMessage,
        handle: &MessageHandle,
        window: Duration,
    );

    /// Called for every reaction event seen while a round is open
    fn on_vote(&self, _channel: &ChannelId, _round: usize, _voter: &VoterId, _effect: VoteEffect) {
    }

    /// Called when a round's window has elapsed and its votes are counted
    fn on_round_tallied(
        &self,
        channel: &ChannelId,
        round: usize,
        kind: RoundKind,
        result: &RoundResult,
    );

    /// Called once per poll, after the final result is published
    fn on_poll_finished(&self, channel: &ChannelId, outcome: &PollOutcome);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoPollProgress;

impl PollProgressNotifier for NoPollProgress {
    fn on_round_open(
        &self,
        _channel: &ChannelId,
        _round: usize,
        _kind: RoundKind,
        _message: &PollMessage,
        _handle: &MessageHandle,
        _window: Duration,
    ) {
    }
    fn on_round_tallied(
        &self,
        _channel: &ChannelId,
        _round: usize,
        _kind: RoundKind,
        _result: &RoundResult,
    ) {
    }
    fn on_poll_finished(&self, _channel: &ChannelId, _outcome: &PollOutcome) {}
}
