//! Presentation layer for ballot-bot
//!
//! This crate contains the CLI definition, the console command parser and
//! loop, output formatters and progress reporters.

pub mod cli;
pub mod console;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use console::{ConsoleBot, ConsoleCommand, VOTE_COMMAND, parse_command};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
