use std::fmt;

use serde::{Deserialize, Serialize};

use crate::story::FIRST_SCENE;

/// Difficulty chosen at character creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Five lives.
    Easy,
    /// Three lives.
    Medium,
    /// One life.
    Hard,
}

impl Difficulty {
    /// All difficulties in menu order.
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Lives granted when a session is created at this difficulty.
    pub fn starting_lives(self) -> u32 {
        match self {
            Self::Easy => 5,
            Self::Medium => 3,
            Self::Hard => 1,
        }
    }

    /// Parse a difficulty name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    /// Lowercase name, as stored in save files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The character's fixed traits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterAttributes {
    /// Character name.
    pub name: String,
    /// Character species.
    pub species: String,
    /// Character gender.
    pub gender: String,
}

/// The three items packed at the start of the journey.
///
/// These never change after creation; they exist to fill the `{snack}`,
/// `{weapon}`, and `{tool}` placeholders in story text. The items the
/// player actually carries live in [`GameState::inventory`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseInventory {
    /// Snack slot.
    pub snack: String,
    /// Weapon slot.
    pub weapon: String,
    /// Tool slot.
    pub tool: String,
}

impl BaseInventory {
    /// Create a base inventory.
    pub fn new(
        snack: impl Into<String>,
        weapon: impl Into<String>,
        tool: impl Into<String>,
    ) -> Self {
        Self {
            snack: snack.into(),
            weapon: weapon.into(),
            tool: tool.into(),
        }
    }

    /// The items in slot order: snack, weapon, tool.
    pub fn items(&self) -> [&str; 3] {
        [&self.snack, &self.weapon, &self.tool]
    }

    /// Replace `{tool}`, `{snack}`, and `{weapon}` with the packed items.
    ///
    /// Empty slots leave their marker in place.
    pub fn substitute(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (marker, value) in [
            ("{tool}", &self.tool),
            ("{snack}", &self.snack),
            ("{weapon}", &self.weapon),
        ] {
            if !value.is_empty() {
                out = out.replace(marker, value);
            }
        }
        out
    }
}

/// Where the player is in the story.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Level id, e.g. `level2`.
    pub level: String,
    /// Scene id within the level.
    pub scene: String,
}

impl Position {
    /// Create a position.
    pub fn new(level: impl Into<String>, scene: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            scene: scene.into(),
        }
    }

    /// The first scene of the first level.
    pub fn start() -> Self {
        Self::new("level1", FIRST_SCENE)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.level, self.scene)
    }
}

/// Everything about a session that changes or must survive a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Character traits.
    pub attributes: CharacterAttributes,
    /// Starting items, used for text substitution.
    pub base_inventory: BaseInventory,
    /// Items currently carried, in pickup order. May contain duplicates.
    pub inventory: Vec<String>,
    /// Remaining lives.
    pub lives: u32,
    /// Difficulty chosen at creation.
    pub difficulty: Difficulty,
    /// Current level and scene.
    pub position: Position,
}

impl GameState {
    /// Start a fresh session at `level1/scene1`.
    ///
    /// Lives come from the difficulty table and the carried inventory
    /// starts as the three base items.
    pub fn new(
        attributes: CharacterAttributes,
        base_inventory: BaseInventory,
        difficulty: Difficulty,
    ) -> Self {
        let inventory = base_inventory
            .items()
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self {
            attributes,
            base_inventory,
            inventory,
            lives: difficulty.starting_lives(),
            difficulty,
            position: Position::start(),
        }
    }

    /// Whether the player carries at least one `item`.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Append an item to the carried inventory.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.inventory.push(item.into());
    }

    /// Remove the first carried `item`. Returns false if none was carried.
    pub fn remove_item(&mut self, item: &str) -> bool {
        if let Some(pos) = self.inventory.iter().position(|i| i == item) {
            self.inventory.remove(pos);
            true
        } else {
            false
        }
    }
}
