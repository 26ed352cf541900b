//! Infrastructure layer for ballot-bot
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod console;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig,
    FilePollConfig,
};
pub use console::{ConsoleOutput, ConsolePlatform, ReactionRouter};
