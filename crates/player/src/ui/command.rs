//! Line commands understood by the terminal runner.

use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NewGame,
    Load,
    Info,
    /// Zero-based choice index
    Choose(usize),
    Reset,
    Login(String),
    Logout,
    Dismiss,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Enter a command, or 'help'")]
    Empty,

    #[error("Unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("Choices are numbered from 1, got '{0}'")]
    InvalidChoice(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(CommandError::Empty);
        };
        let arg = parts.next();

        match head.to_ascii_lowercase().as_str() {
            "new" => Ok(Self::NewGame),
            "load" => Ok(Self::Load),
            "info" => Ok(Self::Info),
            "reset" => Ok(Self::Reset),
            "logout" => Ok(Self::Logout),
            "dismiss" | "ok" => Ok(Self::Dismiss),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            "login" => arg
                .map(|token| Self::Login(token.to_string()))
                .ok_or(CommandError::MissingArgument("login")),
            "choose" | "c" => arg
                .ok_or(CommandError::MissingArgument("choose"))
                .and_then(parse_choice),
            other if other.chars().all(|c| c.is_ascii_digit()) => parse_choice(other),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Player-facing numbering starts at 1.
fn parse_choice(raw: &str) -> Result<Command, CommandError> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(Command::Choose(n - 1)),
        _ => Err(CommandError::InvalidChoice(raw.to_string())),
    }
}

pub const HELP: &str = "\
Commands:
  new              start a new game
  load             load your saved game
  info             refresh game info
  <n> | choose <n> pick choice n
  reset            clear the local game state
  login <token>    set the access token
  logout           forget the access token
  dismiss          close the notification
  help             show this help
  quit             exit";
