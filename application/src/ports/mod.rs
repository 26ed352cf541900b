//! Port definitions (interfaces for external systems)

pub mod messaging_platform;
pub mod poll_progress;
