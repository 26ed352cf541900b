//! Interactive console loop
//!
//! Reads commands from stdin, starts polls through the orchestrator and
//! injects reactions into the console platform. Platform output is printed
//! by a separate task as it arrives.

use super::command::{CommandParseError, ConsoleCommand, VOTE_COMMAND, parse_command};
use crate::output::console::ConsoleFormatter;
use ballot_application::{MessagingPlatform, RunPollInput, RunPollUseCase};
use ballot_domain::{ChannelId, PollOutcome};
use ballot_infrastructure::{ConsoleOutput, ConsolePlatform};
use colored::Colorize;
use std::io::Write;
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Interactive bot session bound to the console platform
pub struct ConsoleBot {
    platform: Arc<ConsolePlatform>,
    use_case: RunPollUseCase<ConsolePlatform>,
    channel: ChannelId,
    polls: Vec<JoinHandle<PollOutcome>>,
}

impl ConsoleBot {
    pub fn new(
        platform: Arc<ConsolePlatform>,
        use_case: RunPollUseCase<ConsolePlatform>,
        channel: impl Into<ChannelId>,
    ) -> Self {
        Self {
            platform,
            use_case,
            channel: channel.into(),
            polls: Vec::new(),
        }
    }

    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }

    /// Run until `quit`, end of input or Ctrl-C
    pub async fn run(
        mut self,
        mut output: mpsc::UnboundedReceiver<ConsoleOutput>,
    ) -> std::io::Result<()> {
        let printer = tokio::spawn(async move {
            while let Some(item) = output.recv().await {
                println!("{}", ConsoleFormatter::format_output(&item));
            }
        });

        self.print_welcome();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            Self::prompt(&self.channel)?;
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => {
                    println!("^C");
                    None
                }
            };
            let Some(line) = line else {
                println!("Bye!");
                break;
            };

            match self.handle_line(&line).await {
                ControlFlow::Continue(Some(notice)) => println!("{notice}"),
                ControlFlow::Continue(None) => {}
                ControlFlow::Break(()) => {
                    println!("Bye!");
                    break;
                }
            }
        }

        self.shutdown();
        printer.abort();
        Ok(())
    }

    /// Parse and execute one line; `Continue` carries an optional local notice
    pub async fn handle_line(&mut self, line: &str) -> ControlFlow<(), Option<String>> {
        match parse_command(line) {
            Ok(Some(command)) => self.execute(command).await,
            Ok(None) => ControlFlow::Continue(None),
            Err(e) => ControlFlow::Continue(Some(Self::parse_error(&e))),
        }
    }

    pub async fn execute(&mut self, command: ConsoleCommand) -> ControlFlow<(), Option<String>> {
        self.polls.retain(|handle| !handle.is_finished());

        let notice = match command {
            ConsoleCommand::Vote { question, options } => {
                self.start_poll(question, options).await
            }
            ConsoleCommand::React {
                message,
                voter,
                marker,
                automated,
            } => {
                if self.platform.react(&message, voter, marker, automated) {
                    None
                } else {
                    Some(format!("No poll is collecting reactions on {message}"))
                }
            }
            ConsoleCommand::Channel(id) => {
                self.channel = ChannelId::new(id);
                Some(format!("Switched to #{}", self.channel))
            }
            ConsoleCommand::Status => Some(ConsoleFormatter::format_status(
                &self.use_case.registry().active_channels(),
                &self.channel,
            )),
            ConsoleCommand::Help => Some(Self::help_text()),
            ConsoleCommand::Quit => return ControlFlow::Break(()),
        };
        ControlFlow::Continue(notice)
    }

    async fn start_poll(&mut self, question: String, options: String) -> Option<String> {
        let input = RunPollInput::new(self.channel.clone(), question, options);
        match self.use_case.request_poll(input) {
            Ok(handle) => {
                self.polls.push(handle);
                debug!("Poll started in {}", self.channel);
                None
            }
            Err(e) => {
                debug!("Poll request refused: {}", e);
                if let Err(e) = self.platform.reply(&self.channel, e.user_message()).await {
                    warn!("Failed to reply in {}: {}", self.channel, e);
                }
                None
            }
        }
    }

    /// Cancel polls still running; their channel locks are released on drop
    fn shutdown(&mut self) {
        for handle in self.polls.drain(..) {
            if !handle.is_finished() {
                handle.abort();
            }
        }
    }

    fn parse_error(error: &CommandParseError) -> String {
        format!("{} {}", "Error:".red().bold(), error)
    }

    fn prompt(channel: &ChannelId) -> std::io::Result<()> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{} ", format!("#{channel}>").cyan().bold())?;
        stdout.flush()
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│           Ballot Bot - Console Mode         │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Window: {}s per round, channel: #{}",
            self.use_case.behavior().window.as_secs(),
            self.channel
        );
        println!();
        println!("{}", Self::help_text());
        println!();
    }

    fn help_text() -> String {
        let mut text = String::from("Commands:\n");
        text.push_str(&format!(
            "  {} question=\"...\" options=\"a, b, c\"\n      {}\n",
            VOTE_COMMAND.name, VOTE_COMMAND.description
        ));
        for option in VOTE_COMMAND.options {
            text.push_str(&format!("        {:<9} {}\n", option.name, option.description));
        }
        text.push_str("  react <message-id> <voter> <marker|1-10> [bot]\n");
        text.push_str("      React to a poll message as a user (or as a bot)\n");
        text.push_str("  channel <id>   Switch the current channel\n");
        text.push_str("  status         List channels with a poll in progress\n");
        text.push_str("  help           Show this help\n");
        text.push_str("  quit           Exit");
        text
    }
}
