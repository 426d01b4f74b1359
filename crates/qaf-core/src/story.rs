//! The story graph: levels, scenes, and the options connecting them.
//!
//! Story data is a JSON object keyed by level id (`level1`, `level2`, ...).
//! Each level holds a `scenes` map; each scene has `text` and an ordered
//! list of `options`. An option's `next` names a scene in the same level,
//! or the sentinel [`END_SCENE`] which closes the level.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::error::{StoryError, StoryResult};

/// Scene id that closes the current level.
pub const END_SCENE: &str = "end";

/// Scene every level is entered at.
pub const FIRST_SCENE: &str = "scene1";

const LEVEL_PREFIX: &str = "level";

/// A player-selectable option attached to a scene.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Choice {
    /// Text shown in the option list.
    pub option_text: String,
    /// Narrative shown once the option is taken.
    pub result_text: String,
    /// Target scene id, or [`END_SCENE`].
    pub next: String,
    /// Action tokens applied when the option is taken.
    pub actions: Vec<String>,
}

impl Choice {
    /// Whether taking this option finishes the level.
    pub fn ends_level(&self) -> bool {
        self.next == END_SCENE
    }
}

/// A single narrative beat.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Scene {
    /// Descriptive text.
    pub text: String,
    /// Options in display order.
    pub options: Vec<Choice>,
}

impl Scene {
    /// Get an option by its 1-based display index.
    pub fn option(&self, index: usize) -> Option<&Choice> {
        index.checked_sub(1).and_then(|i| self.options.get(i))
    }
}

/// A story segment made of scenes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Level {
    /// Scenes keyed by scene id.
    pub scenes: HashMap<String, Scene>,
}

impl Level {
    /// Look up a scene by id.
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }
}

/// The validated, read-only story.
///
/// Levels are stored in play order. Construction guarantees that the
/// sequence is `level1..=levelN` without gaps, that every level has a
/// [`FIRST_SCENE`], that no scene is a dead end, and that every `next`
/// other than [`END_SCENE`] resolves within its level.
#[derive(Debug, Clone)]
pub struct StoryGraph {
    levels: Vec<Level>,
}

impl StoryGraph {
    /// Read and validate a story file.
    pub fn load(path: impl AsRef<Path>) -> StoryResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate story JSON.
    pub fn from_json(json: &str) -> StoryResult<Self> {
        let raw: HashMap<String, Level> = serde_json::from_str(json)?;
        Self::from_levels(raw)
    }

    /// Validate a map of level id to level.
    pub fn from_levels(raw: HashMap<String, Level>) -> StoryResult<Self> {
        let mut numbered = BTreeMap::new();
        for (id, level) in raw {
            let number = level_number(&id).ok_or_else(|| StoryError::InvalidLevelId(id.clone()))?;
            // `level01` and `level1` would otherwise collapse silently.
            if id != level_id(number) {
                return Err(StoryError::InvalidLevelId(id));
            }
            numbered.insert(number, level);
        }

        let mut levels = Vec::with_capacity(numbered.len());
        for (expected, (number, level)) in (1u32..).zip(numbered) {
            if number != expected {
                return Err(StoryError::MissingLevel(level_id(expected)));
            }
            validate_level(&level_id(number), &level)?;
            levels.push(level);
        }
        if levels.is_empty() {
            return Err(StoryError::MissingLevel(level_id(1)));
        }

        let graph = Self { levels };
        tracing::debug!(
            levels = graph.level_count(),
            scenes = graph.scene_count(),
            "story graph validated"
        );
        Ok(graph)
    }

    /// Number of playable levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Total number of scenes across all levels.
    pub fn scene_count(&self) -> usize {
        self.levels.iter().map(|l| l.scenes.len()).sum()
    }

    /// Look up a level by id.
    pub fn level(&self, id: &str) -> Option<&Level> {
        let index = level_number(id)?.checked_sub(1)?;
        self.levels.get(index as usize)
    }

    /// Look up a scene by level and scene id.
    pub fn scene(&self, level: &str, scene: &str) -> Option<&Scene> {
        self.level(level).and_then(|l| l.scene(scene))
    }

    /// The level entered after `level` ends, playable or not.
    pub fn successor(&self, level: &str) -> Option<String> {
        level_number(level)
            .and_then(|n| n.checked_add(1))
            .map(level_id)
    }

    /// Whether `level` lies past the last playable level, i.e. the game is won.
    pub fn is_complete(&self, level: &str) -> bool {
        level_number(level).is_some_and(|n| n as usize > self.levels.len())
    }
}

/// Parse the number out of a `level<N>` id. `N` must be at least 1.
pub fn level_number(id: &str) -> Option<u32> {
    id.strip_prefix(LEVEL_PREFIX)
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse().ok())
        .filter(|n| *n > 0)
}

/// Build the id of level `number`.
pub fn level_id(number: u32) -> String {
    format!("{LEVEL_PREFIX}{number}")
}

fn validate_level(id: &str, level: &Level) -> StoryResult<()> {
    if level.scene(FIRST_SCENE).is_none() {
        return Err(StoryError::MissingScene {
            level: id.to_string(),
            scene: FIRST_SCENE.to_string(),
        });
    }

    // Sorted so the first reported fault is stable across runs.
    let mut scene_ids: Vec<&String> = level.scenes.keys().collect();
    scene_ids.sort();

    for scene_id in scene_ids {
        let scene = &level.scenes[scene_id];
        if scene.options.is_empty() {
            return Err(StoryError::EmptyScene {
                level: id.to_string(),
                scene: scene_id.clone(),
            });
        }
        for (i, choice) in scene.options.iter().enumerate() {
            if !choice.ends_level() && level.scene(&choice.next).is_none() {
                return Err(StoryError::DanglingTarget {
                    level: id.to_string(),
                    scene: scene_id.clone(),
                    option: i + 1,
                    target: choice.next.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORY: &str = r#"{
        "level1": {
            "scenes": {
                "scene1": {
                    "text": "A fork in the road.",
                    "options": [
                        {"option_text": "Go left", "result_text": "You go left.", "next": "scene2", "actions": []},
                        {"option_text": "Go right", "result_text": "You go right.", "next": "end", "actions": ["hit"]}
                    ]
                },
                "scene2": {
                    "text": "A quiet glade.",
                    "options": [
                        {"option_text": "Rest", "result_text": "You rest.", "next": "scene2", "actions": ["heal"]},
                        {"option_text": "Move on", "result_text": "Onward.", "next": "end", "actions": []}
                    ]
                }
            }
        },
        "level2": {
            "scenes": {
                "scene1": {
                    "text": "The mountain gate.",
                    "options": [
                        {"option_text": "Enter", "result_text": "You enter.", "next": "end", "actions": ["+key"]}
                    ]
                }
            }
        }
    }"#;

    fn story_with(level1_scene1_next: &str) -> String {
        format!(
            r#"{{"level1": {{"scenes": {{"scene1": {{"text": "t", "options": [
                {{"option_text": "o", "result_text": "r", "next": "{level1_scene1_next}", "actions": []}}
            ]}}}}}}}}"#
        )
    }

    #[test]
    fn load_valid_story() {
        let story = StoryGraph::from_json(STORY).unwrap();
        assert_eq!(story.level_count(), 2);
        assert_eq!(story.scene_count(), 3);

        let scene = story.scene("level1", "scene1").unwrap();
        assert_eq!(scene.text, "A fork in the road.");
        assert_eq!(scene.options.len(), 2);
        assert_eq!(scene.option(2).unwrap().actions, vec!["hit".to_string()]);
        assert!(scene.option(2).unwrap().ends_level());
    }

    #[test]
    fn option_index_is_one_based() {
        let story = StoryGraph::from_json(STORY).unwrap();
        let scene = story.scene("level1", "scene1").unwrap();
        assert!(scene.option(0).is_none());
        assert_eq!(scene.option(1).unwrap().option_text, "Go left");
        assert!(scene.option(3).is_none());
    }

    #[test]
    fn level_sequence() {
        let story = StoryGraph::from_json(STORY).unwrap();
        assert_eq!(story.successor("level1").as_deref(), Some("level2"));
        assert_eq!(story.successor("level2").as_deref(), Some("level3"));
        assert!(!story.is_complete("level2"));
        assert!(story.is_complete("level3"));
        assert!(!story.is_complete("bogus"));
        assert!(story.level("level3").is_none());
    }

    #[test]
    fn level_number_parsing() {
        assert_eq!(level_number("level1"), Some(1));
        assert_eq!(level_number("level12"), Some(12));
        assert_eq!(level_number("level0"), None);
        assert_eq!(level_number("level"), None);
        assert_eq!(level_number("level-1"), None);
        assert_eq!(level_number("stage1"), None);
        assert_eq!(level_id(4), "level4");
    }

    #[test]
    fn self_loop_is_allowed() {
        let story = StoryGraph::from_json(&story_with("scene1")).unwrap();
        assert_eq!(story.level_count(), 1);
    }

    #[test]
    fn dangling_target_rejected() {
        let err = StoryGraph::from_json(&story_with("scene9")).unwrap_err();
        match err {
            StoryError::DanglingTarget {
                level,
                scene,
                option,
                target,
            } => {
                assert_eq!(level, "level1");
                assert_eq!(scene, "scene1");
                assert_eq!(option, 1);
                assert_eq!(target, "scene9");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_field_is_parse_error() {
        let json = r#"{"level1": {"scenes": {"scene1": {"text": "t", "options": [
            {"option_text": "o", "next": "end", "actions": []}
        ]}}}}"#;
        assert!(matches!(
            StoryGraph::from_json(json),
            Err(StoryError::Parse(_))
        ));
    }

    #[test]
    fn gap_in_levels_rejected() {
        let json = r#"{
            "level1": {"scenes": {"scene1": {"text": "t", "options": [
                {"option_text": "o", "result_text": "r", "next": "end", "actions": []}]}}},
            "level3": {"scenes": {"scene1": {"text": "t", "options": [
                {"option_text": "o", "result_text": "r", "next": "end", "actions": []}]}}}
        }"#;
        match StoryGraph::from_json(json) {
            Err(StoryError::MissingLevel(id)) => assert_eq!(id, "level2"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_story_rejected() {
        assert!(matches!(
            StoryGraph::from_json("{}"),
            Err(StoryError::MissingLevel(_))
        ));
    }

    #[test]
    fn bad_level_id_rejected() {
        let json = r#"{"chapter1": {"scenes": {}}}"#;
        assert!(matches!(
            StoryGraph::from_json(json),
            Err(StoryError::InvalidLevelId(_))
        ));
        let json = r#"{"level01": {"scenes": {}}}"#;
        assert!(matches!(
            StoryGraph::from_json(json),
            Err(StoryError::InvalidLevelId(_))
        ));
    }

    #[test]
    fn missing_first_scene_rejected() {
        let json = r#"{"level1": {"scenes": {"scene2": {"text": "t", "options": [
            {"option_text": "o", "result_text": "r", "next": "end", "actions": []}]}}}}"#;
        assert!(matches!(
            StoryGraph::from_json(json),
            Err(StoryError::MissingScene { .. })
        ));
    }

    #[test]
    fn dead_end_scene_rejected() {
        let json = r#"{"level1": {"scenes": {"scene1": {"text": "t", "options": []}}}}"#;
        assert!(matches!(
            StoryGraph::from_json(json),
            Err(StoryError::EmptyScene { .. })
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("story.json");
        std::fs::write(&path, STORY).unwrap();
        let story = StoryGraph::load(&path).unwrap();
        assert_eq!(story.level_count(), 2);

        let missing = StoryGraph::load(dir.path().join("nope.json"));
        assert!(matches!(missing, Err(StoryError::Io(_))));
    }
}
