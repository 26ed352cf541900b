//! Messaging Platform port
//!
//! Defines the interface the poll orchestrator uses to talk to a chat
//! platform: publishing round announcements, issuing reaction markers,
//! collecting reactions for a fixed window, and posting results.

use async_trait::async_trait;
use ballot_domain::{ChannelId, Marker, MessageHandle, PollMessage, ReactionEvent};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during platform operations
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Message send failed: {0}")]
    SendFailed(String),

    #[error("Adding reaction failed: {0}")]
    ReactionFailed(String),

    #[error("Subscription failed: {0}")]
    SubscribeFailed(String),

    #[error("Missing permission: {0}")]
    PermissionDenied(String),

    #[error("Unknown channel: {0}")]
    UnknownChannel(ChannelId),

    #[error("Platform connection closed")]
    Disconnected,
}

/// Gateway to the chat platform
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait MessagingPlatform: Send + Sync {
    /// Publish a round announcement and return its handle
    async fn send_message(
        &self,
        channel: &ChannelId,
        message: &PollMessage,
    ) -> Result<MessageHandle, PlatformError>;

    /// Add one reaction per marker to `message`, in order
    async fn add_reaction_markers(
        &self,
        message: &MessageHandle,
        markers: &[Marker],
    ) -> Result<(), PlatformError>;

    /// Stream reactions on `message` for `window`; the stream ends when the window elapses
    async fn subscribe_reactions(
        &self,
        message: &MessageHandle,
        window: Duration,
    ) -> Result<ReactionStream, PlatformError>;

    /// Post a result line to the channel
    async fn publish_follow_up(&self, channel: &ChannelId, content: &str)
    -> Result<(), PlatformError>;

    /// Answer the user who invoked a command in `channel`
    async fn reply(&self, channel: &ChannelId, content: &str) -> Result<(), PlatformError>;
}

/// Bounded-time stream of reaction events for one message.
///
/// Wraps an `mpsc::Receiver<ReactionEvent>`; the stream ends once every
/// sender is dropped, which adapters do when the collection window elapses.
#[derive(Debug)]
pub struct ReactionStream {
    receiver: mpsc::Receiver<ReactionEvent>,
}

impl ReactionStream {
    pub fn new(receiver: mpsc::Receiver<ReactionEvent>) -> Self {
        Self { receiver }
    }

    /// A stream that yields `events` and then ends.
    ///
    /// Useful for platforms that deliver reactions in a batch at window close.
    pub fn from_events(events: Vec<ReactionEvent>) -> Self {
        let (tx, rx) = mpsc::channel(events.len().max(1));
        for event in events {
            // Capacity covers every event and `rx` is alive, so this cannot fail
            let queued = tx.try_send(event);
            debug_assert!(queued.is_ok(), "reaction stream buffer sized below event count");
        }
        Self::new(rx)
    }
}

impl Stream for ReactionStream {
    type Item = ReactionEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
