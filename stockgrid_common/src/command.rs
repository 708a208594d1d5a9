//! Keyboard command vocabulary of the viewer.
//!
//! A `Command` is recognised either from a single key (`a`, `r`, `u`, `q`) or from
//! its full name, case-insensitively. `Add` and `Remove` need a symbol, which the
//! viewer asks for on the prompt line.
use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString};

use crate::error::ViewerError;

/// Commands line shown in the status area.
pub const COMMANDS_HELP: &str = "Commands: (a)dd stock, (r)emove stock, (u)pdate, (q)uit";
/// Status shown after an unrecognised key.
pub const KEY_HELP: &str =
    "Press a key to update or use commands: (a)dd, (r)emove, (u)pdate, (q)uit";

/// User command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Command {
    /// Start tracking a symbol.
    #[strum(to_string = "add", serialize = "a")]
    Add,
    /// Stop tracking a symbol.
    #[strum(to_string = "remove", serialize = "r")]
    Remove,
    /// Refresh quotes now.
    #[strum(to_string = "update", serialize = "u")]
    Update,
    /// Leave the viewer.
    #[strum(to_string = "quit", serialize = "q")]
    Quit,
}

impl Command {
    /// Maps a pressed key to a command.
    pub fn from_key(key: char) -> Result<Self, ViewerError> {
        Self::parse(&key.to_string())
    }

    /// Parses a command name or key, reporting unknown input as an error.
    pub fn parse(input: &str) -> Result<Self, ViewerError> {
        let trimmed = input.trim();
        Command::from_str(trimmed).map_err(|_| ViewerError::UnknownCommand(trimmed.to_string()))
    }

    /// Whether the command prompts for a symbol before it can run.
    pub fn needs_symbol(&self) -> bool {
        matches!(self, Command::Add | Command::Remove)
    }

    /// Prompt shown while reading the symbol for this command.
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            Command::Add => Some("Enter ticker symbol: "),
            Command::Remove => Some("Enter ticker to remove: "),
            Command::Update | Command::Quit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn keys_map_case_insensitively() {
        assert_eq!(Command::from_key('a').unwrap(), Command::Add);
        assert_eq!(Command::from_key('R').unwrap(), Command::Remove);
        assert_eq!(Command::from_key('u').unwrap(), Command::Update);
        assert_eq!(Command::from_key('Q').unwrap(), Command::Quit);
    }

    #[test]
    fn full_names_parse() {
        assert_eq!(Command::parse(" Update ").unwrap(), Command::Update);
        assert_eq!(Command::parse("ADD").unwrap(), Command::Add);
    }

    #[test]
    fn unknown_input_is_reported() {
        match Command::from_key('x') {
            Err(ViewerError::UnknownCommand(key)) => assert_eq!(key, "x"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn only_list_edits_prompt() {
        for command in Command::iter() {
            assert_eq!(command.needs_symbol(), command.prompt().is_some());
        }
    }

    #[test]
    fn displays_full_name() {
        assert_eq!(Command::Remove.to_string(), "remove");
    }
}
