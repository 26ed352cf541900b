//! Channel Session Registry
//!
//! Tracks which channels have a poll in progress. A channel stays locked
//! from the moment a poll is accepted until its last round is resolved,
//! across every tie-break round in between.
//!
//! [`ChannelSessionRegistry::try_acquire`] hands out a [`ChannelLease`];
//! dropping the lease frees the channel, so early returns, platform failures
//! and panics in a poll task all unlock it.

use ballot_domain::ChannelId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Registry of channels with a poll in progress
///
/// Cheap to clone; clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct ChannelSessionRegistry {
    inner: Arc<RegistryInner>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    /// channel -> generation of the lease holding it
    active: Mutex<HashMap<ChannelId, u64>>,
    next_generation: AtomicU64,
}

impl ChannelSessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock `channel` if it is free. Never blocks.
    pub fn try_acquire(&self, channel: &ChannelId) -> Option<ChannelLease> {
        let mut active = self.inner.active.lock().unwrap_or_else(|e| e.into_inner());
        if active.contains_key(channel) {
            debug!("Registry: channel {} already has a poll", channel);
            return None;
        }
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);
        active.insert(channel.clone(), generation);
        debug!("Registry: locked channel {}", channel);

        Some(ChannelLease {
            registry: self.clone(),
            channel: channel.clone(),
            generation,
        })
    }

    /// Unlock `channel`. Returns whether it was locked; safe to call when it is not.
    pub fn release(&self, channel: &ChannelId) -> bool {
        let mut active = self.inner.active.lock().unwrap_or_else(|e| e.into_inner());
        let removed = active.remove(channel).is_some();
        if removed {
            debug!("Registry: released channel {}", channel);
        }
        removed
    }

    pub fn is_active(&self, channel: &ChannelId) -> bool {
        let active = self.inner.active.lock().unwrap_or_else(|e| e.into_inner());
        active.contains_key(channel)
    }

    pub fn active_count(&self) -> usize {
        let active = self.inner.active.lock().unwrap_or_else(|e| e.into_inner());
        active.len()
    }

    /// Locked channels, sorted
    pub fn active_channels(&self) -> Vec<ChannelId> {
        let active = self.inner.active.lock().unwrap_or_else(|e| e.into_inner());
        let mut channels: Vec<_> = active.keys().cloned().collect();
        channels.sort();
        channels
    }

    /// Release only if `channel` is still held by `generation`.
    ///
    /// A lease outliving a forced [`release`](Self::release) must not unlock
    /// a poll that acquired the channel afterwards.
    fn release_generation(&self, channel: &ChannelId, generation: u64) {
        let mut active = self.inner.active.lock().unwrap_or_else(|e| e.into_inner());
        if active.get(channel) == Some(&generation) {
            active.remove(channel);
            debug!("Registry: lease for channel {} dropped", channel);
        }
    }
}

/// Proof that a channel is locked for one poll. Unlocks on drop.
#[derive(Debug)]
pub struct ChannelLease {
    registry: ChannelSessionRegistry,
    channel: ChannelId,
    generation: u64,
}

impl ChannelLease {
    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }
}

impl Drop for ChannelLease {
    fn drop(&mut self) {
        self.registry
            .release_generation(&self.channel, self.generation);
    }
}
