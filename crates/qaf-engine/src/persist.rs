//! Save and load of game progress.
//!
//! A [`SaveRecord`] is the on-disk shape of a [`GameState`]; its field
//! names and nesting are a compatibility contract with existing save files.
//! [`SaveDir`] keeps one pretty-printed `<identifier>.json` per player.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use qaf_core::{BaseInventory, CharacterAttributes, Difficulty, GameState, Position};

use crate::error::{GameError, GameResult};

const SAVE_EXTENSION: &str = "json";

/// Character section of a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCharacter {
    /// Character name.
    pub name: String,
    /// Character species.
    pub species: String,
    /// Character gender.
    pub gender: String,
}

/// Inventory section of a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedInventory {
    /// Starting snack.
    pub snack_name: String,
    /// Starting weapon.
    pub weapon_name: String,
    /// Starting tool.
    pub tool_name: String,
    /// Items carried at save time, in order.
    pub content: Vec<String>,
}

/// Position section of a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProgress {
    /// Level id.
    pub level: String,
    /// Scene id.
    pub scene: String,
}

/// A flattened snapshot of a [`GameState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecord {
    /// Character traits.
    pub character: SavedCharacter,
    /// Base items and carried items.
    pub inventory: SavedInventory,
    /// Level and scene.
    pub progress: SavedProgress,
    /// Remaining lives.
    pub lives: u32,
    /// Difficulty chosen at creation.
    pub difficulty: Difficulty,
}

impl SaveRecord {
    /// Snapshot a game state.
    pub fn from_state(state: &GameState) -> Self {
        Self {
            character: SavedCharacter {
                name: state.attributes.name.clone(),
                species: state.attributes.species.clone(),
                gender: state.attributes.gender.clone(),
            },
            inventory: SavedInventory {
                snack_name: state.base_inventory.snack.clone(),
                weapon_name: state.base_inventory.weapon.clone(),
                tool_name: state.base_inventory.tool.clone(),
                content: state.inventory.clone(),
            },
            progress: SavedProgress {
                level: state.position.level.clone(),
                scene: state.position.scene.clone(),
            },
            lives: state.lives,
            difficulty: state.difficulty,
        }
    }

    /// Rebuild the game state. Lives are restored as saved, not from the
    /// difficulty table.
    pub fn into_state(self) -> GameState {
        GameState {
            attributes: CharacterAttributes {
                name: self.character.name,
                species: self.character.species,
                gender: self.character.gender,
            },
            base_inventory: BaseInventory::new(
                self.inventory.snack_name,
                self.inventory.weapon_name,
                self.inventory.tool_name,
            ),
            inventory: self.inventory.content,
            lives: self.lives,
            difficulty: self.difficulty,
            position: Position::new(self.progress.level, self.progress.scene),
        }
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> GameResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GameError::Io(io::Error::other(e)))
    }

    /// Parse from JSON, reporting shape problems against `id`.
    pub fn from_json(id: &str, json: &str) -> GameResult<Self> {
        serde_json::from_str(json).map_err(|e| GameError::CorruptSave {
            id: id.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Whether `id` can name a save file.
///
/// Identifiers become file names, so they must be non-empty, must not
/// start with a dot or carry surrounding whitespace, and must not contain
/// path separators.
pub fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty()
        && id.trim() == id
        && !id.starts_with('.')
        && !id.contains(['/', '\\', '\0'])
}

/// A directory of save records, one file per identifier.
#[derive(Debug, Clone)]
pub struct SaveDir {
    root: PathBuf,
}

impl SaveDir {
    /// Use `root` as the save directory. It is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file a given identifier is stored in.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.{SAVE_EXTENSION}"))
    }

    /// Identifiers with a save record, sorted.
    ///
    /// A missing directory simply has no saves.
    pub fn list(&self) -> GameResult<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .filter(|p| p.extension().is_some_and(|ext| ext == SAVE_EXTENSION))
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Write a record, fully replacing any previous save for `id`.
    ///
    /// The record is written to a temporary file in the same directory and
    /// renamed into place, so readers never observe a half-written save.
    pub fn write(&self, id: &str, record: &SaveRecord) -> GameResult<()> {
        if !is_valid_identifier(id) {
            return Err(GameError::Validation(format!("invalid save name '{id}'")));
        }
        fs::create_dir_all(&self.root)?;

        let json = record.to_json()?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(id)).map_err(|e| e.error)?;
        Ok(())
    }

    /// Read the record for `id`.
    pub fn read(&self, id: &str) -> GameResult<SaveRecord> {
        if !is_valid_identifier(id) {
            return Err(GameError::NotFound(id.to_string()));
        }
        let content = match fs::read_to_string(self.path_for(id)) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(GameError::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        SaveRecord::from_json(id, &content)
    }

    /// Snapshot `state` under `id`.
    pub fn save(&self, id: &str, state: &GameState) -> GameResult<()> {
        self.write(id, &SaveRecord::from_state(state))?;
        tracing::info!(id, position = %state.position, lives = state.lives, "progress saved");
        Ok(())
    }

    /// Restore the state saved under `id`.
    pub fn load(&self, id: &str) -> GameResult<GameState> {
        let state = self.read(id)?.into_state();
        tracing::info!(id, position = %state.position, "progress loaded");
        Ok(state)
    }
}
