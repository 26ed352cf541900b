//! Progress reporting for running polls

use ballot_application::PollProgressNotifier;
use ballot_domain::{
    ChannelId, MessageHandle, PollMessage, PollOutcome, RoundKind, RoundResult, VoteEffect,
    VoterId,
};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::output::console::ConsoleFormatter;

/// Live spinner for one open round
struct RoundBar {
    bar: ProgressBar,
    votes: usize,
    window: Duration,
}

/// Reports progress with one spinner per open round
pub struct ProgressReporter {
    multi: MultiProgress,
    rounds: Mutex<HashMap<ChannelId, RoundBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            rounds: Mutex::new(HashMap::new()),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} [{elapsed}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn round_label(channel: &ChannelId, round: usize, kind: RoundKind) -> String {
        match kind {
            RoundKind::Initial => format!("#{channel} round {round}"),
            RoundKind::TieBreak => format!("#{channel} round {round} (tie-break)"),
        }
    }

    fn status_message(votes: usize, window: Duration) -> String {
        format!("{votes} vote(s), closes after {}s", window.as_secs())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PollProgressNotifier for ProgressReporter {
    fn on_round_open(
        &self,
        channel: &ChannelId,
        round: usize,
        kind: RoundKind,
        _message: &PollMessage,
        _handle: &MessageHandle,
        window: Duration,
    ) {
        let bar = self.multi.add(ProgressBar::new_spinner());
        bar.set_style(Self::round_style());
        bar.set_prefix(Self::round_label(channel, round, kind));
        bar.set_message(Self::status_message(0, window));
        bar.enable_steady_tick(Duration::from_millis(120));

        let mut rounds = self.rounds.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = rounds.insert(
            channel.clone(),
            RoundBar {
                bar,
                votes: 0,
                window,
            },
        ) {
            previous.bar.finish_and_clear();
        }
    }

    fn on_vote(&self, channel: &ChannelId, _round: usize, _voter: &VoterId, effect: VoteEffect) {
        let mut rounds = self.rounds.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(round) = rounds.get_mut(channel)
            && matches!(effect, VoteEffect::Recorded { .. })
        {
            round.votes += 1;
            round
                .bar
                .set_message(Self::status_message(round.votes, round.window));
        }
    }

    fn on_round_tallied(
        &self,
        channel: &ChannelId,
        _round: usize,
        _kind: RoundKind,
        result: &RoundResult,
    ) {
        let mut rounds = self.rounds.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(round) = rounds.remove(channel) {
            round.bar.finish_with_message(format!(
                "{} {} vote(s) {:?}",
                "closed".green(),
                result.total_votes(),
                result.counts
            ));
        }
    }

    fn on_poll_finished(&self, channel: &ChannelId, outcome: &PollOutcome) {
        let mut rounds = self.rounds.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(round) = rounds.remove(channel) {
            round.bar.abandon_with_message("round abandoned".red().to_string());
        }
        drop(rounds);
        let _ = self
            .multi
            .println(ConsoleFormatter::format_outcome(channel, outcome));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl PollProgressNotifier for SimpleProgress {
    fn on_round_open(
        &self,
        channel: &ChannelId,
        round: usize,
        _kind: RoundKind,
        message: &PollMessage,
        handle: &MessageHandle,
        window: Duration,
    ) {
        println!(
            "{} {} {} ({}s, {})",
            "->".cyan(),
            format!("#{channel} round {round}").bold(),
            message.title,
            window.as_secs(),
            handle
        );
    }

    fn on_round_tallied(
        &self,
        channel: &ChannelId,
        round: usize,
        kind: RoundKind,
        result: &RoundResult,
    ) {
        println!(
            "  {} #{channel} round {round} ({kind}) closed: {:?}",
            "v".green(),
            result.counts
        );
    }

    fn on_poll_finished(&self, channel: &ChannelId, outcome: &PollOutcome) {
        println!("{}", ConsoleFormatter::format_outcome(channel, outcome));
    }
}
