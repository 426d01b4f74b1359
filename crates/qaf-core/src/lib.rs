//! Core types for Qaf: the story graph, the player's game state, and errors.
//!
//! The story graph is loaded once from declarative JSON and validated for
//! referential integrity before a session starts. [`GameState`] is the only
//! mutable record of a session; behaviour that changes it lives in the
//! `qaf-engine` crate.

/// Error types for story data.
pub mod error;
/// Mutable session state: character, inventory, lives, and position.
pub mod state;
/// The immutable story graph of levels, scenes, and options.
pub mod story;

/// Re-export error types.
pub use error::{StoryError, StoryResult};
/// Re-export state types.
pub use state::{BaseInventory, CharacterAttributes, Difficulty, GameState, Position};
/// Re-export story types.
pub use story::{Choice, END_SCENE, FIRST_SCENE, Level, Scene, StoryGraph};
