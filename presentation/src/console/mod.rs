//! Interactive console front end

pub mod bot;
pub mod command;

pub use bot::ConsoleBot;
pub use command::{
    CommandOption, CommandParseError, CommandSpec, ConsoleCommand, VOTE_COMMAND, parse_command,
};
