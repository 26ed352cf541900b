//! Console implementation of the messaging platform port.
//!
//! Published messages go to an unbounded output channel that the
//! presentation layer drains and prints. Reactions are injected through
//! [`ConsolePlatform::react`] and routed to the round that owns the message.

use super::router::ReactionRouter;
use async_trait::async_trait;
use ballot_application::{MessagingPlatform, PlatformError, ReactionStream};
use ballot_domain::{ChannelId, Marker, MessageHandle, PollMessage, ReactionEvent, VoterId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Voter id the console bot reacts as
pub const BOT_VOTER: &str = "ballot-bot";

/// Everything the console platform publishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleOutput {
    /// A round announcement
    Poll {
        channel: ChannelId,
        handle: MessageHandle,
        message: PollMessage,
    },
    /// The bot's own markers on a message
    Markers {
        handle: MessageHandle,
        markers: Vec<Marker>,
    },
    /// A result line
    FollowUp { channel: ChannelId, content: String },
    /// A direct answer to a command
    Reply { channel: ChannelId, content: String },
}

/// In-process platform for running the bot from a terminal
#[derive(Debug)]
pub struct ConsolePlatform {
    router: ReactionRouter,
    output: mpsc::UnboundedSender<ConsoleOutput>,
    next_id: AtomicU64,
    bot: VoterId,
}

impl ConsolePlatform {
    /// Create the platform and the receiver its output is delivered to
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ConsoleOutput>) {
        let (output, rx) = mpsc::unbounded_channel();
        let platform = Self {
            router: ReactionRouter::new(),
            output,
            next_id: AtomicU64::new(1),
            bot: VoterId::new(BOT_VOTER),
        };
        (platform, rx)
    }

    /// Inject a reaction on `handle`. Returns false if no round is collecting it.
    pub fn react(
        &self,
        handle: &MessageHandle,
        voter: impl Into<VoterId>,
        marker: impl Into<String>,
        automated: bool,
    ) -> bool {
        let event = if automated {
            ReactionEvent::automated(voter, marker)
        } else {
            ReactionEvent::human(voter, marker)
        };
        self.router.dispatch(handle, event)
    }

    /// Whether reactions on `handle` are still being collected
    pub fn is_collecting(&self, handle: &MessageHandle) -> bool {
        self.router.is_routed(handle)
    }

    fn emit(&self, output: ConsoleOutput) -> Result<(), PlatformError> {
        self.output
            .send(output)
            .map_err(|_| PlatformError::Disconnected)
    }
}

#[async_trait]
impl MessagingPlatform for ConsolePlatform {
    async fn send_message(
        &self,
        channel: &ChannelId,
        message: &PollMessage,
    ) -> Result<MessageHandle, PlatformError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let handle = MessageHandle::new(format!("msg-{id}"));
        debug!("Console: sending {} to {}", handle, channel);

        self.emit(ConsoleOutput::Poll {
            channel: channel.clone(),
            handle: handle.clone(),
            message: message.clone(),
        })?;
        Ok(handle)
    }

    async fn add_reaction_markers(
        &self,
        message: &MessageHandle,
        markers: &[Marker],
    ) -> Result<(), PlatformError> {
        self.emit(ConsoleOutput::Markers {
            handle: message.clone(),
            markers: markers.to_vec(),
        })?;
        // The platform echoes the bot's own reactions back to subscribers
        for marker in markers {
            self.router.dispatch(
                message,
                ReactionEvent::automated(self.bot.clone(), marker.as_str()),
            );
        }
        Ok(())
    }

    async fn subscribe_reactions(
        &self,
        message: &MessageHandle,
        window: Duration,
    ) -> Result<ReactionStream, PlatformError> {
        Ok(self.router.register(message, window))
    }

    async fn publish_follow_up(
        &self,
        channel: &ChannelId,
        content: &str,
    ) -> Result<(), PlatformError> {
        self.emit(ConsoleOutput::FollowUp {
            channel: channel.clone(),
            content: content.to_string(),
        })
    }

    async fn reply(&self, channel: &ChannelId, content: &str) -> Result<(), PlatformError> {
        self.emit(ConsoleOutput::Reply {
            channel: channel.clone(),
            content: content.to_string(),
        })
    }
}
