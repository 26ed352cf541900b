//! Configuration file loading for ballot-bot
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./ballot.toml` or `./.ballot.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/ballot-bot/config.toml`
//! 4. `BALLOT_` environment variables
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig, FilePollConfig,
    LOG_LEVELS,
};
pub use loader::ConfigLoader;
