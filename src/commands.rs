use std::str::FromStr;

use crate::events::Theme;

use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Commands that can be invoked by starting a line with a leading slash.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum SlashCommand {
    /// Show the chat window
    Open,
    /// Minimize the chat window
    Close,
    /// Switch the colour palette
    Theme,
    /// Print the conversation so far
    History,
    /// Show help
    Help,
    /// Exit the application
    Bye,
}

impl SlashCommand {
    pub fn command(&self) -> &'static str {
        self.into()
    }

    pub fn description(&self) -> &'static str {
        match self {
            SlashCommand::Open => "open the assistant window",
            SlashCommand::Close => "minimize the assistant window",
            SlashCommand::Theme => "switch palette (amber, pink, green, purple)",
            SlashCommand::History => "print the conversation so far",
            SlashCommand::Help => "show this help",
            SlashCommand::Bye => "exit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub command: SlashCommand,
    pub argument: Option<String>,
}

impl ParsedCommand {
    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref()
    }

    pub fn theme_target(&self) -> Option<Theme> {
        if self.command != SlashCommand::Theme {
            return None;
        }
        Theme::from_str(self.argument()?.trim()).ok()
    }
}

/// What a line of terminal input turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    Command(ParsedCommand),
    UnknownCommand(String),
    Query(String),
}

/// Split a raw input line into a slash command or a query
pub fn parse_line(line: &str) -> InputLine {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return InputLine::Query(line.to_string());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let keyword = parts.next().unwrap_or_default().to_lowercase();
    let argument = parts
        .next()
        .map(|arg| arg.trim().to_string())
        .filter(|arg| !arg.is_empty());

    match SlashCommand::from_str(&keyword) {
        Ok(command) => InputLine::Command(ParsedCommand { command, argument }),
        Err(_) => InputLine::UnknownCommand(keyword),
    }
}

pub fn get_help_text() -> String {
    let mut help = String::from("Type a question and press enter. Commands:\n");
    for command in SlashCommand::iter() {
        help.push_str(&format!("  /{:<8} {}\n", command.command(), command.description()));
    }
    help
}
