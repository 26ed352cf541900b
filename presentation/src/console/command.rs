//! Console command parsing
//!
//! One command per line:
//!
//! ```text
//! vote question="Lunch?" options="Pizza, Tacos"
//! react msg-1 ann 2
//! channel random
//! ```

use ballot_domain::{Marker, MessageHandle, VoterId};
use thiserror::Error;

/// One option of a registered command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOption {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// Registration metadata for a platform slash command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub options: &'static [CommandOption],
}

/// The `vote` command as registered with the platform
pub const VOTE_COMMAND: CommandSpec = CommandSpec {
    name: "vote",
    description: "Create a vote with a question and options",
    options: &[
        CommandOption {
            name: "question",
            description: "The question for voting",
            required: true,
        },
        CommandOption {
            name: "options",
            description: "Comma-separated list of options",
            required: true,
        },
    ],
};

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Start a poll in the current channel
    Vote { question: String, options: String },
    /// React to a message as `voter`
    React {
        message: MessageHandle,
        voter: VoterId,
        marker: String,
        automated: bool,
    },
    /// Switch the current channel
    Channel(String),
    /// List channels with a poll in progress
    Status,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("Unknown command: {0} (type 'help' for available commands)")]
    Unknown(String),

    #[error("Missing required option: {0}")]
    MissingOption(&'static str),

    #[error("Unknown option for vote: {0}")]
    UnexpectedOption(String),

    #[error("Unterminated quote in option '{0}'")]
    UnterminatedQuote(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Marker number must be between 1 and 10, got {0}")]
    MarkerOutOfRange(usize),
}

const REACT_USAGE: &str = "react <message-id> <voter> <marker|1-10> [bot]";
const CHANNEL_USAGE: &str = "channel <id>";

/// Parse one line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, CommandParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let line = line.strip_prefix('/').unwrap_or(line);
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "vote" => parse_vote(rest)?,
        "react" => parse_react(rest)?,
        "channel" => {
            let mut words = rest.split_whitespace();
            match (words.next(), words.next()) {
                (Some(id), None) => ConsoleCommand::Channel(id.to_string()),
                _ => return Err(CommandParseError::Usage(CHANNEL_USAGE)),
            }
        }
        "status" => ConsoleCommand::Status,
        "help" | "h" | "?" => ConsoleCommand::Help,
        "quit" | "exit" | "q" => ConsoleCommand::Quit,
        other => return Err(CommandParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_vote(input: &str) -> Result<ConsoleCommand, CommandParseError> {
    let mut question = None;
    let mut options = None;

    for (key, value) in parse_key_values(input)? {
        match key.as_str() {
            "question" => question = Some(value),
            "options" => options = Some(value),
            _ => return Err(CommandParseError::UnexpectedOption(key)),
        }
    }

    Ok(ConsoleCommand::Vote {
        question: question.ok_or(CommandParseError::MissingOption("question"))?,
        options: options.ok_or(CommandParseError::MissingOption("options"))?,
    })
}

/// Split `key="quoted value" key=bare` pairs. `\"` escapes a quote.
fn parse_key_values(input: &str) -> Result<Vec<(String, String)>, CommandParseError> {
    let mut pairs = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            return Ok(pairs);
        }

        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| *c != '=' && !c.is_whitespace()) {
            key.push(c);
        }
        if chars.next_if_eq(&'=').is_none() {
            return Err(CommandParseError::Usage(
                "vote question=\"<text>\" options=\"<comma-separated list>\"",
            ));
        }
        let key = key.to_ascii_lowercase();

        let mut value = String::new();
        if chars.next_if_eq(&'"').is_some() {
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '\\' if chars.peek() == Some(&'"') => {
                        value.push('"');
                        chars.next();
                    }
                    '"' => {
                        closed = true;
                        break;
                    }
                    c => value.push(c),
                }
            }
            if !closed {
                return Err(CommandParseError::UnterminatedQuote(key));
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                value.push(c);
            }
        }
        pairs.push((key, value));
    }
}

fn parse_react(input: &str) -> Result<ConsoleCommand, CommandParseError> {
    let words: Vec<&str> = input.split_whitespace().collect();
    let (message, voter, marker, automated) = match words.as_slice() {
        [message, voter, marker] => (message, voter, marker, false),
        [message, voter, marker, flag] if flag.eq_ignore_ascii_case("bot") => {
            (message, voter, marker, true)
        }
        _ => return Err(CommandParseError::Usage(REACT_USAGE)),
    };

    Ok(ConsoleCommand::React {
        message: MessageHandle::new(*message),
        voter: VoterId::new(*voter),
        marker: parse_marker(marker)?,
        automated,
    })
}

/// `1`..`10` map to their markers; anything else is taken as a raw glyph
fn parse_marker(input: &str) -> Result<String, CommandParseError> {
    match input.parse::<usize>() {
        Ok(position) => Marker::from_position(position)
            .map(|m| m.as_str().to_string())
            .ok_or(CommandParseError::MarkerOutOfRange(position)),
        Err(_) => Ok(input.to_string()),
    }
}
