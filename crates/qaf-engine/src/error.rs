//! Error types for the narrative engine.

use thiserror::Error;

use qaf_core::StoryError;

/// Message shown when player input is outside the accepted set.
pub const UNKNOWN_INPUT: &str = "Unknown input! Please enter a valid one.";

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors that can occur while playing.
#[derive(Debug, Error)]
pub enum GameError {
    /// Input outside the accepted command, difficulty, or option set.
    /// The player is re-prompted and no state changes.
    #[error("{0}")]
    Validation(String),

    /// No save exists for the requested identifier.
    #[error("no saved game for '{0}'")]
    NotFound(String),

    /// A save exists but cannot be turned back into a session.
    #[error("save '{id}' is corrupt: {reason}")]
    CorruptSave {
        /// Save identifier.
        id: String,
        /// What was wrong with it.
        reason: String,
    },

    /// An option index that the current scene does not have.
    #[error("{level}/{scene} has no option {index}")]
    OptionOutOfRange {
        /// Level id.
        level: String,
        /// Scene id.
        scene: String,
        /// Requested 1-based index.
        index: usize,
    },

    /// A position that does not exist in the story graph.
    #[error("{level} has no scene '{scene}'")]
    SceneOutOfRange {
        /// Level id.
        level: String,
        /// Scene id.
        scene: String,
    },

    /// Reading or writing save data failed.
    #[error("save storage error: {0}")]
    Io(#[from] std::io::Error),

    /// The story could not be loaded.
    #[error(transparent)]
    Story(#[from] StoryError),
}

impl GameError {
    /// The generic "unknown input" validation error.
    pub fn unknown_input() -> Self {
        Self::Validation(UNKNOWN_INPUT.to_string())
    }

    /// Whether the player can simply try again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
