//! Run Poll use case
//!
//! Orchestrates a poll from command to result: validation, the per-channel
//! lock, the initial round, and as many tie-break rounds as it takes.

use crate::config::PollBehavior;
use crate::ports::messaging_platform::{MessagingPlatform, PlatformError};
use crate::ports::poll_progress::{NoPollProgress, PollProgressNotifier};
use crate::session_registry::{ChannelLease, ChannelSessionRegistry};
use ballot_domain::{
    Announcement, ChannelId, ClosedRound, DomainError, OptionSet, PollMessage, PollOutcome,
    PollSession, Question, RoundKind, RoundOutcome,
};
use futures::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

/// Reasons a poll request is refused before anything is published
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestPollError {
    #[error("At least two options are required, got {0}")]
    InsufficientOptions(usize),

    #[error("At most ten options are allowed, got {0}")]
    TooManyOptions(usize),

    #[error("Question is missing")]
    MissingQuestion,

    #[error("A poll is already running in channel {0}")]
    PollInProgress(ChannelId),
}

impl RequestPollError {
    /// Reply text for the user who issued the command
    pub fn user_message(&self) -> &'static str {
        match self {
            RequestPollError::InsufficientOptions(_) => Announcement::insufficient_options(),
            RequestPollError::TooManyOptions(_) => Announcement::too_many_options(),
            RequestPollError::MissingQuestion => Announcement::missing_question(),
            RequestPollError::PollInProgress(_) => Announcement::poll_in_progress(),
        }
    }
}

impl From<DomainError> for RequestPollError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InsufficientOptions(n) => RequestPollError::InsufficientOptions(n),
            DomainError::InvalidOptionCount(n) => RequestPollError::TooManyOptions(n),
            DomainError::EmptyQuestion => RequestPollError::MissingQuestion,
        }
    }
}

/// Failure inside a single round
#[derive(Error, Debug)]
enum RoundError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Input for the RunPoll use case, as received from the `vote` command
#[derive(Debug, Clone)]
pub struct RunPollInput {
    /// Channel the command was issued in
    pub channel: ChannelId,
    /// Question text, untrimmed
    pub question: String,
    /// Comma-separated option labels
    pub options: String,
}

impl RunPollInput {
    pub fn new(
        channel: impl Into<ChannelId>,
        question: impl Into<String>,
        options: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            question: question.into(),
            options: options.into(),
        }
    }
}

/// Use case for running a poll with automatic tie-breaking
pub struct RunPollUseCase<P: MessagingPlatform + 'static> {
    platform: Arc<P>,
    registry: ChannelSessionRegistry,
    behavior: PollBehavior,
    progress: Arc<dyn PollProgressNotifier>,
}

impl<P: MessagingPlatform + 'static> Clone for RunPollUseCase<P> {
    fn clone(&self) -> Self {
        Self {
            platform: Arc::clone(&self.platform),
            registry: self.registry.clone(),
            behavior: self.behavior.clone(),
            progress: Arc::clone(&self.progress),
        }
    }
}

impl<P: MessagingPlatform + 'static> RunPollUseCase<P> {
    pub fn new(platform: Arc<P>, behavior: PollBehavior) -> Self {
        Self {
            platform,
            registry: ChannelSessionRegistry::new(),
            behavior,
            progress: Arc::new(NoPollProgress),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn PollProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Share an existing registry (e.g. one per bot process)
    pub fn with_registry(mut self, registry: ChannelSessionRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &ChannelSessionRegistry {
        &self.registry
    }

    pub fn behavior(&self) -> &PollBehavior {
        &self.behavior
    }

    /// Validate and lock, then run the poll in a background task.
    ///
    /// The channel is locked before this returns, so a second request for
    /// the same channel is refused even if the task has not started yet.
    pub fn request_poll(
        &self,
        input: RunPollInput,
    ) -> Result<JoinHandle<PollOutcome>, RequestPollError> {
        let (lease, question, options) = self.accept(&input)?;
        let this = self.clone();
        Ok(tokio::spawn(async move {
            this.drive(input.channel, lease, question, options).await
        }))
    }

    /// Validate and lock, then run the poll to completion on the current task
    pub async fn run_poll(&self, input: RunPollInput) -> Result<PollOutcome, RequestPollError> {
        let (lease, question, options) = self.accept(&input)?;
        Ok(self.drive(input.channel, lease, question, options).await)
    }

    /// Options first, then the question, then the channel lock
    fn accept(
        &self,
        input: &RunPollInput,
    ) -> Result<(ChannelLease, Question, OptionSet), RequestPollError> {
        let options = OptionSet::parse_delimited(&input.options)?;
        let question = Question::try_new(input.question.as_str())?;
        let lease = self
            .registry
            .try_acquire(&input.channel)
            .ok_or_else(|| RequestPollError::PollInProgress(input.channel.clone()))?;

        info!(
            "Accepted poll in {} with {} options",
            input.channel,
            options.len()
        );
        Ok((lease, question, options))
    }

    async fn drive(
        &self,
        channel: ChannelId,
        lease: ChannelLease,
        question: Question,
        options: OptionSet,
    ) -> PollOutcome {
        let outcome = self.run_rounds(&channel, &question, options).await;
        drop(lease);

        info!("Poll in {} finished: {}", channel, outcome);
        self.progress.on_poll_finished(&channel, &outcome);
        outcome
    }

    async fn run_rounds(
        &self,
        channel: &ChannelId,
        question: &Question,
        mut options: OptionSet,
    ) -> PollOutcome {
        let mut kind = RoundKind::Initial;
        let mut round = 0;

        loop {
            round += 1;
            let closed = match self
                .run_round(channel, question, options, kind, round)
                .await
            {
                Ok(closed) => closed,
                Err(e) => {
                    warn!("Round {} in {} failed: {}", round, channel, e);
                    return PollOutcome::Aborted {
                        reason: e.to_string(),
                        rounds: round,
                    };
                }
            };

            let result = closed.result();
            self.progress
                .on_round_tallied(channel, round, kind, &result);

            match result.outcome() {
                RoundOutcome::NoVotes => {
                    self.follow_up(channel, Announcement::no_votes(kind)).await;
                    return PollOutcome::NoVotes {
                        kind,
                        rounds: round,
                    };
                }
                RoundOutcome::Winner { index, count } => {
                    let Some(option) = closed.options.get(index).map(str::to_string) else {
                        return PollOutcome::Aborted {
                            reason: format!("winning index {index} is outside the option set"),
                            rounds: round,
                        };
                    };
                    self.follow_up(channel, &Announcement::winner(kind, &option, count))
                        .await;
                    return PollOutcome::Winner {
                        option,
                        count,
                        rounds: round,
                    };
                }
                RoundOutcome::Tie { indices } => {
                    options = match closed.options.restrict_to(&indices) {
                        Ok(tied) => tied,
                        Err(e) => {
                            return PollOutcome::Aborted {
                                reason: e.to_string(),
                                rounds: round,
                            };
                        }
                    };
                    debug!(
                        "Round {} in {} tied between {:?}",
                        round,
                        channel,
                        options.labels()
                    );
                    if kind.is_tie_break() {
                        self.follow_up(channel, &Announcement::still_tied(options.labels()))
                            .await;
                    }
                    kind = RoundKind::TieBreak;
                }
            }
        }
    }

    /// Publish, collect for the window, then close
    async fn run_round(
        &self,
        channel: &ChannelId,
        question: &Question,
        options: OptionSet,
        kind: RoundKind,
        round: usize,
    ) -> Result<ClosedRound, RoundError> {
        let window = self.behavior.window;
        let mut session = PollSession::open(question.clone(), options, window, kind)?;
        let message = PollMessage::for_session(&session);

        let handle = self.platform.send_message(channel, &message).await?;
        // Subscribe before adding markers so no early reaction is missed
        let mut reactions = self.platform.subscribe_reactions(&handle, window).await?;
        self.platform
            .add_reaction_markers(&handle, session.markers().markers())
            .await?;

        info!(
            "Round {} ({}) open in {} as {} for {:?}",
            round, kind, channel, handle, window
        );
        self.progress
            .on_round_open(channel, round, kind, &message, &handle, window);

        let deadline = Instant::now() + window;
        while let Ok(Some(event)) = timeout_at(deadline, reactions.next()).await {
            let effect = session.record_vote(&event);
            debug!("Reaction {} by {}: {:?}", event.marker, event.voter, effect);
            self.progress.on_vote(channel, round, &event.voter, effect);
        }

        Ok(session.close())
    }

    async fn follow_up(&self, channel: &ChannelId, content: &str) {
        if let Err(e) = self.platform.publish_follow_up(channel, content).await {
            warn!("Failed to publish result in {}: {}", channel, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::messaging_platform::ReactionStream;
    use async_trait::async_trait;
    use ballot_domain::{
        Marker, MessageHandle, ReactionEvent, RoundResult, VoteEffect, VoterId,
    };
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::mpsc;

    // ==================== Test Mocks ====================

    /// Platform that hands out one pre-built reaction stream per round
    #[derive(Default)]
    struct ScriptedPlatform {
        rounds: Mutex<VecDeque<ReactionStream>>,
        sent: Mutex<Vec<(ChannelId, PollMessage)>>,
        markers: Mutex<Vec<Vec<Marker>>>,
        follow_ups: Mutex<Vec<String>>,
        fail_send: bool,
        fail_subscribe: bool,
        fail_markers: bool,
    }

    impl ScriptedPlatform {
        fn new(rounds: Vec<Vec<ReactionEvent>>) -> Self {
            Self::with_streams(rounds.into_iter().map(ReactionStream::from_events).collect())
        }

        fn with_streams(streams: Vec<ReactionStream>) -> Self {
            Self {
                rounds: Mutex::new(VecDeque::from(streams)),
                ..Default::default()
            }
        }

        fn failing() -> Self {
            Self {
                fail_send: true,
                ..Default::default()
            }
        }

        fn sent(&self) -> Vec<(ChannelId, PollMessage)> {
            self.sent.lock().unwrap().clone()
        }

        fn follow_ups(&self) -> Vec<String> {
            self.follow_ups.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MessagingPlatform for ScriptedPlatform {
        async fn send_message(
            &self,
            channel: &ChannelId,
            message: &PollMessage,
        ) -> Result<MessageHandle, PlatformError> {
            if self.fail_send {
                return Err(PlatformError::SendFailed("channel unavailable".to_string()));
            }
            let mut sent = self.sent.lock().unwrap();
            sent.push((channel.clone(), message.clone()));
            Ok(MessageHandle::new(format!("msg-{}", sent.len())))
        }

        async fn add_reaction_markers(
            &self,
            _message: &MessageHandle,
            markers: &[Marker],
        ) -> Result<(), PlatformError> {
            if self.fail_markers {
                return Err(PlatformError::ReactionFailed("missing add-reactions".to_string()));
            }
            self.markers.lock().unwrap().push(markers.to_vec());
            Ok(())
        }

        async fn subscribe_reactions(
            &self,
            _message: &MessageHandle,
            _window: Duration,
        ) -> Result<ReactionStream, PlatformError> {
            if self.fail_subscribe {
                return Err(PlatformError::SubscribeFailed("gateway closed".to_string()));
            }
            Ok(self
                .rounds
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| ReactionStream::from_events(vec![])))
        }

        async fn publish_follow_up(
            &self,
            _channel: &ChannelId,
            content: &str,
        ) -> Result<(), PlatformError> {
            self.follow_ups.lock().unwrap().push(content.to_string());
            Ok(())
        }

        async fn reply(&self, _channel: &ChannelId, _content: &str) -> Result<(), PlatformError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        votes: Mutex<Vec<VoteEffect>>,
        tallies: Mutex<Vec<(usize, RoundKind, Vec<usize>)>>,
        finished: Mutex<Vec<PollOutcome>>,
    }

    impl PollProgressNotifier for RecordingProgress {
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

        fn on_vote(&self, _channel: &ChannelId, _round: usize, _voter: &VoterId, effect: VoteEffect) {
            self.votes.lock().unwrap().push(effect);
        }

        fn on_round_tallied(
            &self,
            _channel: &ChannelId,
            round: usize,
            kind: RoundKind,
            result: &RoundResult,
        ) {
            self.tallies
                .lock()
                .unwrap()
                .push((round, kind, result.counts.clone()));
        }

        fn on_poll_finished(&self, _channel: &ChannelId, outcome: &PollOutcome) {
            self.finished.lock().unwrap().push(outcome.clone());
        }
    }

    fn use_case(platform: &Arc<ScriptedPlatform>) -> RunPollUseCase<ScriptedPlatform> {
        RunPollUseCase::new(Arc::clone(platform), PollBehavior::default())
    }

    fn labels(message: &PollMessage) -> Vec<String> {
        message.lines.iter().map(|l| l.label.clone()).collect()
    }

    // ==================== Single round ====================

    #[tokio::test]
    async fn test_single_winner() {
        let platform = Arc::new(ScriptedPlatform::new(vec![vec![
            ReactionEvent::human("ann", "2️⃣"),
        ]]));
        let outcome = use_case(&platform)
            .run_poll(RunPollInput::new("general", "Lunch?", "Pizza, Tacos, Sushi"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            PollOutcome::Winner {
                option: "Tacos".to_string(),
                count: 1,
                rounds: 1,
            }
        );
        let sent = platform.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1.title, "Vote: Lunch?");
        assert_eq!(
            sent[0].1.body(),
            "1️⃣: Pizza\n2️⃣: Tacos\n3️⃣: Sushi"
        );
        assert_eq!(
            platform.follow_ups(),
            vec!["The winning option is: Tacos with vote count of 1.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_pizza_beats_tacos() {
        let platform = Arc::new(ScriptedPlatform::new(vec![vec![
            ReactionEvent::human("ann", "1️⃣"),
            ReactionEvent::human("bo", "2️⃣"),
            ReactionEvent::human("cy", "1️⃣"),
        ]]));
        let outcome = use_case(&platform)
            .run_poll(RunPollInput::new("general", "Dinner?", "Pizza,Tacos"))
            .await
            .unwrap();

        assert_eq!(outcome.winner(), Some("Pizza"));
        assert_eq!(
            platform.follow_ups(),
            vec!["The winning option is: Pizza with vote count of 2.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_markers_issued_in_order() {
        let platform = Arc::new(ScriptedPlatform::new(vec![vec![
            ReactionEvent::human("ann", "1️⃣"),
        ]]));
        use_case(&platform)
            .run_poll(RunPollInput::new("general", "Q", "a,b,c"))
            .await
            .unwrap();

        let markers = platform.markers.lock().unwrap().clone();
        let glyphs: Vec<_> = markers[0].iter().map(|m| m.as_str()).collect();
        assert_eq!(glyphs, vec!["1️⃣", "2️⃣", "3️⃣"]);
    }

    #[tokio::test]
    async fn test_no_votes() {
        let platform = Arc::new(ScriptedPlatform::new(vec![vec![]]));
        let outcome = use_case(&platform)
            .run_poll(RunPollInput::new("general", "Q", "a,b"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            PollOutcome::NoVotes {
                kind: RoundKind::Initial,
                rounds: 1,
            }
        );
        assert_eq!(platform.follow_ups(), vec!["No votes were cast.".to_string()]);
    }

    #[tokio::test]
    async fn test_automated_and_unknown_reactions_ignored() {
        let platform = Arc::new(ScriptedPlatform::new(vec![vec![
            ReactionEvent::automated("bot", "1️⃣"),
            ReactionEvent::automated("bot", "2️⃣"),
            ReactionEvent::human("ann", "👍"),
            ReactionEvent::human("ann", "3️⃣"),
        ]]));
        let progress = Arc::new(RecordingProgress::default());
        let outcome = use_case(&platform)
            .with_progress(progress.clone())
            .run_poll(RunPollInput::new("general", "Q", "a,b"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            PollOutcome::NoVotes {
                kind: RoundKind::Initial,
                rounds: 1,
            }
        );
        assert_eq!(
            *progress.votes.lock().unwrap(),
            vec![
                VoteEffect::IgnoredAutomated,
                VoteEffect::IgnoredAutomated,
                VoteEffect::IgnoredMarker,
                VoteEffect::IgnoredMarker,
            ]
        );
    }

    #[tokio::test]
    async fn test_changed_vote_counts_once() {
        let platform = Arc::new(ScriptedPlatform::new(vec![vec![
            ReactionEvent::human("ann", "1️⃣"),
            ReactionEvent::human("bo", "1️⃣"),
            ReactionEvent::human("ann", "2️⃣"),
            ReactionEvent::human("cy", "2️⃣"),
        ]]));
        let outcome = use_case(&platform)
            .run_poll(RunPollInput::new("general", "Q", "a,b"))
            .await
            .unwrap();

        assert_eq!(outcome.winner(), Some("b"));
        assert_eq!(
            platform.follow_ups(),
            vec!["The winning option is: b with vote count of 2.".to_string()]
        );
    }

    // ==================== Tie-breaking ====================

    #[tokio::test]
    async fn test_tie_runs_restricted_round() {
        let platform = Arc::new(ScriptedPlatform::new(vec![
            vec![
                ReactionEvent::human("ann", "1️⃣"),
                ReactionEvent::human("bo", "2️⃣"),
            ],
            vec![ReactionEvent::human("ann", "2️⃣")],
        ]));
        let progress = Arc::new(RecordingProgress::default());
        let outcome = use_case(&platform)
            .with_progress(progress.clone())
            .run_poll(RunPollInput::new("general", "Best?", "A, B, C"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            PollOutcome::Winner {
                option: "B".to_string(),
                count: 1,
                rounds: 2,
            }
        );

        let sent = platform.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].1.title, "Tie-breaking Vote: Best?");
        assert_eq!(labels(&sent[1].1), vec!["A", "B"]);
        assert_eq!(sent[1].1.accent, ballot_domain::Accent::Orange);
        assert_eq!(platform.markers.lock().unwrap()[1].len(), 2);

        assert_eq!(
            platform.follow_ups(),
            vec!["The winning option after tie-breaker is: B.".to_string()]
        );
        assert_eq!(
            *progress.tallies.lock().unwrap(),
            vec![
                (1, RoundKind::Initial, vec![1, 1, 0]),
                (2, RoundKind::TieBreak, vec![0, 1]),
            ]
        );
    }

    #[tokio::test]
    async fn test_tie_keeps_original_order() {
        let platform = Arc::new(ScriptedPlatform::new(vec![
            vec![
                ReactionEvent::human("ann", "3️⃣"),
                ReactionEvent::human("bo", "1️⃣"),
            ],
            vec![ReactionEvent::human("ann", "2️⃣")],
        ]));
        use_case(&platform)
            .run_poll(RunPollInput::new("general", "Q", "x, y, z"))
            .await
            .unwrap();

        assert_eq!(labels(&platform.sent()[1].1), vec!["x", "z"]);
    }

    #[tokio::test]
    async fn test_tie_break_without_votes() {
        let platform = Arc::new(ScriptedPlatform::new(vec![
            vec![
                ReactionEvent::human("ann", "1️⃣"),
                ReactionEvent::human("bo", "2️⃣"),
            ],
            vec![],
        ]));
        let outcome = use_case(&platform)
            .run_poll(RunPollInput::new("general", "Q", "a,b"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            PollOutcome::NoVotes {
                kind: RoundKind::TieBreak,
                rounds: 2,
            }
        );
        assert_eq!(
            platform.follow_ups(),
            vec!["No votes were cast in the tie-breaker.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_repeated_tie_announces_and_continues() {
        let platform = Arc::new(ScriptedPlatform::new(vec![
            vec![
                ReactionEvent::human("ann", "1️⃣"),
                ReactionEvent::human("bo", "2️⃣"),
            ],
            vec![
                ReactionEvent::human("ann", "1️⃣"),
                ReactionEvent::human("bo", "2️⃣"),
            ],
            vec![ReactionEvent::human("bo", "1️⃣")],
        ]));
        let outcome = use_case(&platform)
            .run_poll(RunPollInput::new("general", "Q", "a,b,c"))
            .await
            .unwrap();

        assert_eq!(outcome.winner(), Some("a"));
        assert_eq!(outcome.rounds(), 3);
        assert_eq!(
            platform.follow_ups(),
            vec![
                "It's still a tie! Winning options: a, b.".to_string(),
                "The winning option after tie-breaker is: a.".to_string(),
            ]
        );
    }

    // ==================== Validation and locking ====================

    #[tokio::test]
    async fn test_validation_errors() {
        let platform = Arc::new(ScriptedPlatform::new(vec![]));
        let use_case = use_case(&platform);

        let err = use_case
            .run_poll(RunPollInput::new("general", "Q", "only"))
            .await
            .unwrap_err();
        assert_eq!(err, RequestPollError::InsufficientOptions(1));
        assert_eq!(
            err.user_message(),
            "Please provide at least two options separated by commas."
        );

        let err = use_case
            .run_poll(RunPollInput::new("general", "Q", "1,2,3,4,5,6,7,8,9,10,11"))
            .await
            .unwrap_err();
        assert_eq!(err, RequestPollError::TooManyOptions(11));

        let err = use_case
            .run_poll(RunPollInput::new("general", "   ", "a,b"))
            .await
            .unwrap_err();
        assert_eq!(err, RequestPollError::MissingQuestion);

        assert!(platform.sent().is_empty());
        assert_eq!(use_case.registry().active_count(), 0);
    }

    #[tokio::test]
    async fn test_second_poll_in_channel_refused() {
        let (tx, rx) = mpsc::channel(8);
        let platform = Arc::new(ScriptedPlatform::with_streams(vec![ReactionStream::new(rx)]));
        let use_case = use_case(&platform);

        let running = use_case
            .request_poll(RunPollInput::new("general", "First", "a,b"))
            .unwrap();
        assert!(use_case.registry().is_active(&ChannelId::new("general")));

        let err = use_case
            .run_poll(RunPollInput::new("general", "Second", "c,d"))
            .await
            .unwrap_err();
        assert_eq!(err, RequestPollError::PollInProgress(ChannelId::new("general")));
        assert_eq!(err.user_message(), Announcement::poll_in_progress());

        tx.send(ReactionEvent::human("ann", "1️⃣")).await.unwrap();
        drop(tx);
        let outcome = running.await.unwrap();

        assert_eq!(outcome.winner(), Some("a"));
        let sent = platform.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1.title, "Vote: First");
        assert!(!use_case.registry().is_active(&ChannelId::new("general")));
    }

    #[tokio::test]
    async fn test_other_channel_not_blocked() {
        let platform = Arc::new(ScriptedPlatform::new(vec![vec![ReactionEvent::human(
            "ann", "2️⃣",
        )]]));
        let use_case = use_case(&platform);
        let _general = use_case
            .registry()
            .try_acquire(&ChannelId::new("general"))
            .unwrap();

        let outcome = use_case
            .run_poll(RunPollInput::new("random", "Second", "c,d"))
            .await
            .unwrap();
        assert_eq!(outcome.winner(), Some("d"));
        assert!(use_case.registry().is_active(&ChannelId::new("general")));
    }

    #[tokio::test]
    async fn test_lock_released_after_poll() {
        let platform = Arc::new(ScriptedPlatform::new(vec![vec![], vec![]]));
        let use_case = use_case(&platform);

        use_case
            .run_poll(RunPollInput::new("general", "Q", "a,b"))
            .await
            .unwrap();
        assert_eq!(use_case.registry().active_count(), 0);
        assert!(
            use_case
                .run_poll(RunPollInput::new("general", "Q", "a,b"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_send_failure_aborts_and_releases() {
        let platform = Arc::new(ScriptedPlatform::failing());
        let progress = Arc::new(RecordingProgress::default());
        let use_case = use_case(&platform).with_progress(progress.clone());

        let outcome = use_case
            .run_poll(RunPollInput::new("general", "Q", "a,b"))
            .await
            .unwrap();

        assert!(outcome.is_aborted());
        assert_eq!(outcome.rounds(), 1);
        assert!(platform.follow_ups().is_empty());
        assert_eq!(use_case.registry().active_count(), 0);
        assert_eq!(progress.finished.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_subscribe_failure_after_announcement_releases() {
        let platform = Arc::new(ScriptedPlatform {
            fail_subscribe: true,
            ..Default::default()
        });
        let use_case = use_case(&platform);

        let outcome = use_case
            .run_poll(RunPollInput::new("general", "Q", "a,b"))
            .await
            .unwrap();

        assert!(matches!(outcome, PollOutcome::Aborted { rounds: 1, .. }));
        assert_eq!(platform.sent().len(), 1);
        assert!(platform.follow_ups().is_empty());
        assert_eq!(use_case.registry().active_count(), 0);
    }

    #[tokio::test]
    async fn test_marker_failure_after_announcement_releases() {
        let platform = Arc::new(ScriptedPlatform {
            fail_markers: true,
            ..Default::default()
        });
        let use_case = use_case(&platform);

        let outcome = use_case
            .run_poll(RunPollInput::new("general", "Q", "a,b"))
            .await
            .unwrap();

        assert!(matches!(outcome, PollOutcome::Aborted { rounds: 1, .. }));
        assert_eq!(platform.sent().len(), 1);
        assert!(platform.markers.lock().unwrap().is_empty());
        assert!(platform.follow_ups().is_empty());
        assert_eq!(use_case.registry().active_count(), 0);
        assert!(
            use_case
                .run_poll(RunPollInput::new("general", "Again", "a,b"))
                .await
                .is_ok()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_closes_open_stream() {
        let (tx, rx) = mpsc::channel(8);
        let platform = Arc::new(ScriptedPlatform::with_streams(vec![ReactionStream::new(rx)]));
        let use_case = RunPollUseCase::new(
            Arc::clone(&platform),
            PollBehavior::with_window_seconds(5),
        );

        tx.send(ReactionEvent::human("ann", "2️⃣")).await.unwrap();
        // Sender stays alive; only the window ends the round
        let outcome = use_case
            .run_poll(RunPollInput::new("general", "Q", "a,b"))
            .await
            .unwrap();

        assert_eq!(outcome.winner(), Some("b"));
        drop(tx);
    }
}
