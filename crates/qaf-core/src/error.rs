use thiserror::Error;

/// Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors raised while reading or validating story data.
///
/// Every variant means the story cannot be played; none of them are
/// recoverable by re-prompting the player.
#[derive(Debug, Error)]
pub enum StoryError {
    /// The story file could not be read.
    #[error("cannot read story: {0}")]
    Io(#[from] std::io::Error),

    /// The story file is not valid JSON or is missing required fields.
    #[error("malformed story data: {0}")]
    Parse(#[from] serde_json::Error),

    /// A top-level key is not of the form `level<N>`.
    #[error("invalid level id '{0}', expected level<N>")]
    InvalidLevelId(String),

    /// A level in the `level1..levelN` sequence is absent.
    #[error("story has no {0}")]
    MissingLevel(String),

    /// A level lacks a scene the engine must be able to enter.
    #[error("{level} has no scene '{scene}'")]
    MissingScene {
        /// Level id.
        level: String,
        /// Missing scene id.
        scene: String,
    },

    /// A scene offers the player nothing to choose.
    #[error("{level}/{scene} has no options")]
    EmptyScene {
        /// Level id.
        level: String,
        /// Scene id.
        scene: String,
    },

    /// An option points at a scene that does not exist in its level.
    #[error("{level}/{scene} option {option} points to unknown scene '{target}'")]
    DanglingTarget {
        /// Level id.
        level: String,
        /// Scene id holding the option.
        scene: String,
        /// 1-based option index.
        option: usize,
        /// The unresolved `next` value.
        target: String,
    },
}
