//! Turn-based narrative engine for Qaf.
//!
//! Walks the player through a [`StoryGraph`](qaf_core::StoryGraph) one
//! choice at a time. Action tokens attached to options change lives and
//! inventory, reaching a level's `end` scene advances to the next level,
//! and running out of lives sends the player back to the start. Progress
//! can be saved to and restored from a directory of JSON records.

pub mod actions;
pub mod command;
pub mod config;
pub mod error;
pub mod game;
pub mod navigator;
pub mod persist;

pub use actions::{Action, ActionReport, Notice, apply_actions};
pub use command::{Command, MenuChoice, SceneCommand};
pub use config::EngineConfig;
pub use error::{GameError, GameResult};
pub use game::Game;
pub use navigator::{Navigator, Outcome, Transition};
pub use persist::{SaveDir, SaveRecord};
