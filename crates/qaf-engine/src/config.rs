//! Configuration for a game engine instance.

use std::path::PathBuf;

/// Configuration for a [`Game`](crate::Game).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Story JSON file.
    pub story_path: PathBuf,
    /// Directory holding one JSON record per save identifier.
    pub saves_dir: PathBuf,
    /// Snack packed when the player leaves the slot blank.
    pub default_snack: String,
    /// Restore the difficulty's starting lives after a death.
    pub reset_lives_on_death: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            story_path: PathBuf::from("data/story.json"),
            saves_dir: PathBuf::from("data/saves"),
            default_snack: "cookie".to_string(),
            reset_lives_on_death: false,
        }
    }
}

impl EngineConfig {
    /// Set the story file.
    pub fn with_story_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.story_path = path.into();
        self
    }

    /// Set the saves directory.
    pub fn with_saves_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.saves_dir = dir.into();
        self
    }

    /// Set the fallback snack. A blank value keeps the current one.
    pub fn with_default_snack(mut self, snack: impl Into<String>) -> Self {
        let snack = snack.into();
        if !snack.trim().is_empty() {
            self.default_snack = snack;
        }
        self
    }

    /// Choose whether death restores starting lives.
    pub fn with_reset_lives_on_death(mut self, reset: bool) -> Self {
        self.reset_lives_on_death = reset;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.story_path, PathBuf::from("data/story.json"));
        assert_eq!(cfg.saves_dir, PathBuf::from("data/saves"));
        assert_eq!(cfg.default_snack, "cookie");
        assert!(!cfg.reset_lives_on_death);
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default()
            .with_story_path("/tmp/story.json")
            .with_saves_dir("/tmp/saves")
            .with_default_snack("dates")
            .with_reset_lives_on_death(true);
        assert_eq!(cfg.story_path, PathBuf::from("/tmp/story.json"));
        assert_eq!(cfg.saves_dir, PathBuf::from("/tmp/saves"));
        assert_eq!(cfg.default_snack, "dates");
        assert!(cfg.reset_lives_on_death);
    }

    #[test]
    fn blank_default_snack_ignored() {
        let cfg = EngineConfig::default().with_default_snack("  ");
        assert_eq!(cfg.default_snack, "cookie");
    }
}
