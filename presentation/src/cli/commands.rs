//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for ballot-bot
#[derive(Parser, Debug)]
#[command(name = "ballot-bot")]
#[command(author, version, about = "Reaction polls with automatic tie-breaking")]
#[command(long_about = r#"
Ballot Bot runs timed, reaction-based polls in chat channels.

Each poll collects reactions for a fixed window. A single most-voted option
wins; a tie opens a new round with only the tied options, repeated until one
option wins or a round gets no votes.

This binary runs the bot against an interactive console platform: type
commands to start polls and to react as any user.

Configuration files are loaded from (in priority order):
1. --config <path>       Explicit config file
2. ./ballot.toml         Project-level config
3. ~/.config/ballot-bot/config.toml   Global config
4. BALLOT_* environment variables

Example:
  ballot-bot --window 30
  > vote question="Lunch?" options="Pizza, Tacos, Sushi"
  > react msg-1 ann 2
"#)]
pub struct Cli {
    /// Collection window per round in seconds (overrides config)
    #[arg(short, long, value_name = "SECONDS")]
    pub window: Option<u64>,

    /// Channel the console starts in (overrides config)
    #[arg(long, value_name = "ID")]
    pub channel: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}
