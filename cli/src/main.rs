//! CLI entrypoint for Ballot Bot
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use ballot_application::{NoPollProgress, PollProgressNotifier, RunPollUseCase};
use ballot_infrastructure::{ConfigLoader, ConsolePlatform, FileConfig, FileLoggingConfig};
use ballot_presentation::{Cli, ConsoleBot, ConsoleFormatter, ProgressReporter, SimpleProgress};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        return show_config(&cli);
    }

    let mut config = load_config(&cli)?;
    apply_overrides(&mut config, &cli);

    let _log_guard = init_logging(cli.verbose, &config.logging)?;
    info!("Starting Ballot Bot");

    for issue in config.check()? {
        warn!("{}", issue.message);
    }

    if !config.output.color {
        ConsoleFormatter::disable_color();
    }

    // === Dependency Injection ===
    // Create infrastructure adapter (console platform)
    let (platform, output) = ConsolePlatform::new();
    let platform = Arc::new(platform);

    let progress: Arc<dyn PollProgressNotifier> = if cli.quiet {
        Arc::new(NoPollProgress)
    } else if config.output.show_progress {
        Arc::new(ProgressReporter::new())
    } else {
        Arc::new(SimpleProgress)
    };

    // Create use case with injected platform
    let use_case = RunPollUseCase::new(Arc::clone(&platform), config.poll.to_behavior())
        .with_progress(progress);

    let bot = ConsoleBot::new(platform, use_case, config.poll.default_channel.as_str());
    bot.run(output).await.context("console input failed")?;

    Ok(())
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    ConfigLoader::load(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))
}

/// Command-line flags win over every configuration source
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(window) = cli.window {
        config.poll.window_seconds = window;
    }
    if let Some(channel) = &cli.channel {
        config.poll.default_channel = channel.clone();
    }
    if cli.no_color {
        config.output.color = false;
    }
}

fn show_config(cli: &Cli) -> Result<()> {
    for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
        println!("{line}");
    }

    let mut config = load_config(cli)?;
    apply_overrides(&mut config, cli);
    println!();
    println!("Effective configuration:");
    println!("{}", toml::to_string_pretty(&config)?);

    for issue in config.validate() {
        println!("[{:?}] {}", issue.severity, issue.message);
    }
    Ok(())
}

/// Initialize logging based on verbosity level, `RUST_LOG` and `[logging]`
///
/// The returned guard flushes the log file on drop.
fn init_logging(verbose: u8, logging: &FileLoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(logging.effective_level())),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match logging.resolved_file() {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| ".".into());
            let name = path
                .file_name()
                .context("logging.file has no file name")?
                .to_owned();
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("cannot create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}
