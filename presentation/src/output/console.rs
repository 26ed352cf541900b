//! Console output formatter for poll traffic

use ballot_domain::{Accent, ChannelId, MessageHandle, PollMessage, PollOutcome};
use ballot_infrastructure::ConsoleOutput;
use colored::{ColoredString, Colorize};

/// Formats platform output and poll results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn off ANSI colors for all later output
    pub fn disable_color() {
        colored::control::set_override(false);
    }

    /// Format anything the console platform published
    pub fn format_output(output: &ConsoleOutput) -> String {
        match output {
            ConsoleOutput::Poll {
                channel,
                handle,
                message,
            } => Self::format_poll(channel, handle, message),
            ConsoleOutput::Markers { handle, markers } => format!(
                "{} {} {}",
                Self::timestamp(),
                format!("[{handle}]").dimmed(),
                markers
                    .iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            ),
            ConsoleOutput::FollowUp { channel, content } => format!(
                "{} {} {}",
                Self::timestamp(),
                Self::channel_tag(channel),
                content.bold()
            ),
            ConsoleOutput::Reply { channel, content } => format!(
                "{} {} {} {}",
                Self::timestamp(),
                Self::channel_tag(channel),
                "->".yellow(),
                content
            ),
        }
    }

    /// Format a round announcement as a framed block
    pub fn format_poll(channel: &ChannelId, handle: &MessageHandle, message: &PollMessage) -> String {
        let mut output = String::new();
        let rule = Self::accented(&"─".repeat(48), message.accent);

        output.push_str(&format!(
            "{} {} {}\n",
            Self::timestamp(),
            Self::channel_tag(channel),
            format!("[{handle}]").dimmed()
        ));
        output.push_str(&format!("{rule}\n"));
        output.push_str(&format!(
            "{}\n",
            Self::accented(&message.title, message.accent).bold()
        ));
        output.push_str(&Self::indent(&message.body(), "  "));
        output.push('\n');
        output.push_str(&format!("{rule}\n"));
        output.push_str(&format!(
            "{}",
            format!(
                "react with: react {handle} <voter> <1-{}>",
                message.lines.len()
            )
            .dimmed()
        ));
        output
    }

    /// Format the final result of a poll
    pub fn format_outcome(channel: &ChannelId, outcome: &PollOutcome) -> String {
        let status = match outcome {
            PollOutcome::Winner { .. } => "done".green(),
            PollOutcome::NoVotes { .. } => "no votes".yellow(),
            PollOutcome::Aborted { .. } => "aborted".red(),
        };
        format!(
            "{} {} {} {}",
            Self::timestamp(),
            Self::channel_tag(channel),
            status.bold(),
            outcome
        )
    }

    /// Format the channels that have a poll in progress
    pub fn format_status(active: &[ChannelId], current: &ChannelId) -> String {
        let mut output = format!("{} {}\n", "Current channel:".cyan().bold(), current);
        if active.is_empty() {
            output.push_str(&format!("{}", "No polls in progress".dimmed()));
        } else {
            output.push_str(&format!("{}", "Polls in progress:".cyan().bold()));
            for channel in active {
                output.push_str(&format!("\n  * {channel}"));
            }
        }
        output
    }

    fn accented(text: &str, accent: Accent) -> ColoredString {
        let rgb = accent.rgb();
        text.truecolor((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    fn channel_tag(channel: &ChannelId) -> ColoredString {
        format!("#{channel}").cyan()
    }

    fn timestamp() -> ColoredString {
        chrono::Local::now().format("%H:%M:%S").to_string().dimmed()
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
