//! Console platform adapter
//!
//! Runs the bot in a terminal: a [`ConsolePlatform`] implements the
//! messaging port and a [`ReactionRouter`] delivers injected reactions to
//! the round collecting them.

pub mod platform;
pub mod router;

pub use platform::{BOT_VOTER, ConsoleOutput, ConsolePlatform};
pub use router::ReactionRouter;
