//! The action interpreter.
//!
//! Options in the story carry short symbolic tokens that change the
//! player's lives and carried items:
//!
//! | token   | effect                                         |
//! |---------|------------------------------------------------|
//! | `hit`   | lose a life, or die when on the last one       |
//! | `heal`  | gain a life                                    |
//! | `+item` | pick up `item`                                 |
//! | `-item` | drop one `item`, if carried                    |
//!
//! Anything else is ignored so newer story files still play.

use std::fmt;

use qaf_core::GameState;

/// A parsed action token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Lose a life.
    Hit,
    /// Gain a life.
    Heal,
    /// Add an item to the carried inventory.
    Gain(String),
    /// Remove one matching item from the carried inventory.
    Lose(String),
    /// Unrecognised token.
    Other(String),
}

impl Action {
    /// Parse a token. Placeholders must already be substituted.
    pub fn parse(token: &str) -> Self {
        if token == "hit" {
            Self::Hit
        } else if token == "heal" {
            Self::Heal
        } else if let Some(item) = token.strip_prefix('+') {
            Self::Gain(item.to_string())
        } else if let Some(item) = token.strip_prefix('-') {
            Self::Lose(item.to_string())
        } else {
            Self::Other(token.to_string())
        }
    }
}

/// A user-facing effect notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Lives changed to this value.
    LivesChanged(u32),
    /// An item was picked up.
    ItemAdded(String),
    /// An item was dropped.
    ItemRemoved(String),
    /// The player died.
    Died,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LivesChanged(lives) => write!(f, "Lives remaining: {lives}"),
            Self::ItemAdded(item) => write!(f, "Item added: {item}"),
            Self::ItemRemoved(item) => write!(f, "Item removed: {item}"),
            Self::Died => f.write_str("You died"),
        }
    }
}

/// What applying a list of tokens did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionReport {
    /// Notifications in the order their effects happened.
    pub notices: Vec<Notice>,
    /// Whether a `hit` landed on the last life.
    pub died: bool,
}

/// Apply action tokens to the game state, in order.
///
/// Each token has the base inventory placeholders substituted before it is
/// parsed. Processing stops at the first death; effects already applied
/// stand. A death never takes lives below their current value and still
/// reports the lives left.
pub fn apply_actions(state: &mut GameState, tokens: &[String]) -> ActionReport {
    let mut report = ActionReport::default();

    for token in tokens {
        let token = state.base_inventory.substitute(token);
        match Action::parse(&token) {
            Action::Hit => {
                if state.lives <= 1 {
                    report.died = true;
                    report.notices.push(Notice::Died);
                    report.notices.push(Notice::LivesChanged(state.lives));
                    break;
                }
                state.lives -= 1;
                report.notices.push(Notice::LivesChanged(state.lives));
            }
            Action::Heal => {
                state.lives = state.lives.saturating_add(1);
                report.notices.push(Notice::LivesChanged(state.lives));
            }
            Action::Gain(item) => {
                state.add_item(item.clone());
                report.notices.push(Notice::ItemAdded(item));
            }
            Action::Lose(item) => {
                if state.remove_item(&item) {
                    report.notices.push(Notice::ItemRemoved(item));
                }
            }
            Action::Other(token) => {
                tracing::debug!(%token, "ignoring unrecognised action token");
            }
        }
    }

    report
}
