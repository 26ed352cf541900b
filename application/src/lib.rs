//! Application layer for ballot-bot
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod session_registry;
pub mod use_cases;

// Re-export commonly used types
pub use config::PollBehavior;
pub use ports::{
    messaging_platform::{MessagingPlatform, PlatformError, ReactionStream},
    poll_progress::{NoPollProgress, PollProgressNotifier},
};
pub use session_registry::{ChannelLease, ChannelSessionRegistry};
pub use use_cases::run_poll::{RequestPollError, RunPollInput, RunPollUseCase};
