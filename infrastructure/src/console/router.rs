//! Reaction routing for the console platform.
//!
//! Every open round subscribes to reactions on its own message. The router
//! keeps one bounded sender per message handle and forwards injected
//! reactions to it. When the round's window elapses the route is removed,
//! which drops the sender and ends the subscriber's [`ReactionStream`].

use ballot_application::ReactionStream;
use ballot_domain::{MessageHandle, ReactionEvent};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

/// Buffered reactions per open message before new ones are dropped
const ROUTE_CAPACITY: usize = 256;

/// Routes reactions to the round that owns the message
#[derive(Debug, Clone, Default)]
pub struct ReactionRouter {
    /// Message-specific senders (message handle -> sender).
    ///
    /// `std::sync::RwLock` so routes can be touched from synchronous code;
    /// it is only held for HashMap lookups and insert/remove.
    routes: Arc<RwLock<HashMap<MessageHandle, mpsc::Sender<ReactionEvent>>>>,
}

impl ReactionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a route for `handle` that closes itself after `window`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn register(&self, handle: &MessageHandle, window: Duration) -> ReactionStream {
        let (tx, rx) = mpsc::channel(ROUTE_CAPACITY);
        {
            let mut routes = self.routes.write().unwrap_or_else(|e| e.into_inner());
            if routes.insert(handle.clone(), tx).is_some() {
                warn!("Router: replaced existing route for {}", handle);
            }
        }
        debug!("Router: registered {} for {:?}", handle, window);

        let router = self.clone();
        let handle = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            router.deregister(&handle);
        });

        ReactionStream::new(rx)
    }

    /// Forward a reaction. Returns false if nothing is listening on `handle`.
    pub fn dispatch(&self, handle: &MessageHandle, event: ReactionEvent) -> bool {
        let routes = self.routes.read().unwrap_or_else(|e| e.into_inner());
        let Some(tx) = routes.get(handle) else {
            debug!("Router: dropping reaction for unknown message {}", handle);
            return false;
        };
        match tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(
                    "Router: buffer full for {}, dropping reaction by {}",
                    handle, event.voter
                );
                false
            }
            Err(TrySendError::Closed(_)) => {
                debug!("Router: subscriber for {} has gone away", handle);
                false
            }
        }
    }

    /// Remove the route for `handle`, ending its stream
    pub fn deregister(&self, handle: &MessageHandle) -> bool {
        let mut routes = self.routes.write().unwrap_or_else(|e| e.into_inner());
        let removed = routes.remove(handle).is_some();
        if removed {
            debug!("Router: deregistered {}", handle);
        }
        removed
    }

    pub fn is_routed(&self, handle: &MessageHandle) -> bool {
        let routes = self.routes.read().unwrap_or_else(|e| e.into_inner());
        routes.contains_key(handle)
    }

    pub fn route_count(&self) -> usize {
        let routes = self.routes.read().unwrap_or_else(|e| e.into_inner());
        routes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_reaches_subscriber_until_window_ends() {
        let router = ReactionRouter::new();
        let handle = MessageHandle::new("msg-1");
        let mut stream = router.register(&handle, Duration::from_secs(5));

        assert!(router.dispatch(&handle, ReactionEvent::human("ann", "1️⃣")));
        assert_eq!(stream.next().await.unwrap().voter.as_str(), "ann");

        // Paused clock auto-advances to the window deadline
        assert!(stream.next().await.is_none());
        assert!(!router.is_routed(&handle));
        assert!(!router.dispatch(&handle, ReactionEvent::human("bo", "2️⃣")));
    }

    #[tokio::test]
    async fn test_unknown_message_dropped() {
        let router = ReactionRouter::new();
        assert!(!router.dispatch(
            &MessageHandle::new("msg-404"),
            ReactionEvent::human("ann", "1️⃣")
        ));
    }

    #[tokio::test]
    async fn test_routes_are_independent() {
        let router = ReactionRouter::new();
        let first = MessageHandle::new("msg-1");
        let second = MessageHandle::new("msg-2");
        let mut first_stream = router.register(&first, Duration::from_secs(60));
        let _second_stream = router.register(&second, Duration::from_secs(60));
        assert_eq!(router.route_count(), 2);

        router.dispatch(&second, ReactionEvent::human("bo", "2️⃣"));
        router.dispatch(&first, ReactionEvent::human("ann", "1️⃣"));
        assert_eq!(first_stream.next().await.unwrap().voter.as_str(), "ann");

        assert!(router.deregister(&first));
        assert!(first_stream.next().await.is_none());
        assert_eq!(router.route_count(), 1);
    }
}
