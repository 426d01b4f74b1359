//! Command parsing for player input.
//!
//! Every raw line goes through [`Command::parse`] once. Each prompt then
//! matches on the tagged result to decide whether the input is acceptable.

use qaf_core::Difficulty;

use crate::error::{GameError, GameResult};

/// A raw input line, tagged by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The line was a non-negative integer.
    Numeric(u32),
    /// Anything else, lowercased.
    Text(String),
}

impl Command {
    /// Tag a raw input line.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        // `parse` alone would also accept a leading `+`.
        let digits_only = !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit());
        match trimmed.parse() {
            Ok(n) if digits_only => Self::Numeric(n),
            _ => Self::Text(trimmed.to_lowercase()),
        }
    }
}

/// A main menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Begin a new game.
    Start,
    /// Resume a saved game.
    Load,
    /// Leave the program.
    Quit,
}

impl MenuChoice {
    /// Accept `1`/`start`, `2`/`load`, or `3`/`quit`.
    pub fn from_command(command: &Command) -> GameResult<Self> {
        match command {
            Command::Numeric(1) => Ok(Self::Start),
            Command::Numeric(2) => Ok(Self::Load),
            Command::Numeric(3) => Ok(Self::Quit),
            Command::Text(t) => match t.as_str() {
                "start" => Ok(Self::Start),
                "load" => Ok(Self::Load),
                "quit" => Ok(Self::Quit),
                _ => Err(GameError::unknown_input()),
            },
            Command::Numeric(_) => Err(GameError::unknown_input()),
        }
    }
}

/// Accept `1`/`easy`, `2`/`medium`, or `3`/`hard`.
pub fn difficulty_from_command(command: &Command) -> GameResult<Difficulty> {
    match command {
        Command::Numeric(n) => (*n as usize)
            .checked_sub(1)
            .and_then(|i| Difficulty::ALL.get(i).copied())
            .ok_or_else(GameError::unknown_input),
        Command::Text(t) => Difficulty::parse(t).ok_or_else(GameError::unknown_input),
    }
}

/// An in-scene command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    /// `/i`: list carried items.
    Inventory,
    /// `/c`: show character traits and lives.
    Character,
    /// `/q`: stop playing immediately.
    Quit,
    /// `/h`: list commands.
    Help,
    /// `/s`: save progress.
    Save,
    /// Take the option with this 1-based index.
    Choose(usize),
}

impl SceneCommand {
    /// Commands and their help text, in help page order.
    pub const HELP: [(&'static str, &'static str); 5] = [
        ("/i", "Shows inventory."),
        ("/q", "Exits the game."),
        ("/c", "Shows the character traits."),
        ("/h", "Shows help."),
        ("/s", "Save the game"),
    ];

    /// Accept a slash command or an option index in `1..=option_count`.
    pub fn from_command(command: &Command, option_count: usize) -> GameResult<Self> {
        match command {
            Command::Numeric(n) => {
                let index = *n as usize;
                if (1..=option_count).contains(&index) {
                    Ok(Self::Choose(index))
                } else {
                    Err(GameError::unknown_input())
                }
            }
            Command::Text(t) => match t.as_str() {
                "/i" => Ok(Self::Inventory),
                "/c" => Ok(Self::Character),
                "/q" => Ok(Self::Quit),
                "/h" => Ok(Self::Help),
                "/s" => Ok(Self::Save),
                _ => Err(GameError::unknown_input()),
            },
        }
    }
}
