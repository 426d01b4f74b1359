//! Story navigation: the level and scene state machine.
//!
//! A choice resolves its target scene, applies its actions, and then moves
//! the player. Death sends the player back to `level1/scene1`; reaching a
//! level's `end` scene enters the next level at `scene1`, and leaving the
//! last playable level completes the game.

use qaf_core::{FIRST_SCENE, GameState, Position, Scene, StoryGraph};

use crate::actions::{Notice, apply_actions};
use crate::config::EngineConfig;
use crate::error::{GameError, GameResult};

/// Where a choice left the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Moved to another scene in the same level.
    Continue,
    /// Entered the first scene of a new level.
    LevelAdvanced {
        /// The level just entered.
        level: String,
    },
    /// Died and restarted at the first scene of the first level.
    Died,
    /// Left the last playable level. No further scene exists.
    Completed,
}

/// The result of taking an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The option's result text, with placeholders substituted.
    pub result_text: String,
    /// Effect notifications from the option's actions.
    pub notices: Vec<Notice>,
    /// Where the player ended up.
    pub outcome: Outcome,
}

/// Drives a [`GameState`] through a [`StoryGraph`].
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    reset_lives_on_death: bool,
}

impl Navigator {
    /// Create a navigator using the death policy from `config`.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            reset_lives_on_death: config.reset_lives_on_death,
        }
    }

    /// The scene the player is standing in.
    pub fn current_scene<'s>(
        &self,
        story: &'s StoryGraph,
        state: &GameState,
    ) -> GameResult<&'s Scene> {
        let Position { level, scene } = &state.position;
        story
            .scene(level, scene)
            .ok_or_else(|| GameError::SceneOutOfRange {
                level: level.clone(),
                scene: scene.clone(),
            })
    }

    /// Whether the player has left the last playable level.
    pub fn is_complete(&self, story: &StoryGraph, state: &GameState) -> bool {
        story.is_complete(&state.position.level)
    }

    /// Take option `index` (1-based) in the current scene.
    ///
    /// Fails without touching the state when the current position or the
    /// option's target are not in the story graph.
    pub fn choose(
        &self,
        story: &StoryGraph,
        state: &mut GameState,
        index: usize,
    ) -> GameResult<Transition> {
        let scene = self.current_scene(story, state)?;
        let choice = scene
            .option(index)
            .ok_or_else(|| GameError::OptionOutOfRange {
                level: state.position.level.clone(),
                scene: state.position.scene.clone(),
                index,
            })?;

        let next = if choice.ends_level() {
            let level = story.successor(&state.position.level).ok_or_else(|| {
                GameError::SceneOutOfRange {
                    level: state.position.level.clone(),
                    scene: state.position.scene.clone(),
                }
            })?;
            Position::new(level, FIRST_SCENE)
        } else {
            if story.scene(&state.position.level, &choice.next).is_none() {
                return Err(GameError::SceneOutOfRange {
                    level: state.position.level.clone(),
                    scene: choice.next.clone(),
                });
            }
            Position::new(state.position.level.clone(), choice.next.clone())
        };

        let result_text = state.base_inventory.substitute(&choice.result_text);
        let report = apply_actions(state, &choice.actions);
        let mut notices = report.notices;

        let outcome = if report.died {
            tracing::info!(at = %state.position, "player died, restarting");
            state.position = Position::start();
            if self.reset_lives_on_death {
                state.lives = state.difficulty.starting_lives();
                notices.push(Notice::LivesChanged(state.lives));
            }
            Outcome::Died
        } else if choice.ends_level() {
            state.position = next;
            if story.is_complete(&state.position.level) {
                tracing::info!("story completed");
                Outcome::Completed
            } else {
                tracing::info!(level = %state.position.level, "level advanced");
                Outcome::LevelAdvanced {
                    level: state.position.level.clone(),
                }
            }
        } else {
            state.position = next;
            Outcome::Continue
        };

        Ok(Transition {
            result_text,
            notices,
            outcome,
        })
    }
}
