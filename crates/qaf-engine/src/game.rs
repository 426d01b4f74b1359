//! The prompt-driven game flow.
//!
//! [`Game`] is fed one line of player input at a time and answers with the
//! text to show next. Each prompt (main menu, username, character
//! creation, difficulty, save selection, scene) is an explicit phase, so
//! dying, finishing the story, or returning to the menu is a phase change
//! rather than a nested call. Input that a prompt does not accept returns
//! a [`GameError::Validation`] and leaves the phase untouched.

use qaf_core::story::level_number;
use qaf_core::{BaseInventory, CharacterAttributes, GameState, StoryGraph};

use crate::command::{Command, MenuChoice, SceneCommand, difficulty_from_command};
use crate::config::EngineConfig;
use crate::error::{GameError, GameResult};
use crate::navigator::{Navigator, Outcome};
use crate::persist::{SaveDir, is_valid_identifier};

const MENU: &str = "\
***Welcome to the Journey to Mount Qaf***

1. Start a new game (START)
2. Load your progress (LOAD)
3. Quit the game (QUIT)";

const USERNAME_PROMPT: &str = "Enter a username ('/b' to go back):";

const DIFFICULTY_PROMPT: &str = "\
Choose your difficulty:
1. Easy
2. Medium
3. Hard";

const VICTORY: &str = "You have reached the summit of Mount Qaf. Your journey is complete!";

const BACK: &str = "/b";

/// An interactive game, from main menu to the summit.
pub struct Game {
    engine: Engine,
    phase: Phase,
}

/// The parts of a game that do not change between prompts.
struct Engine {
    story: StoryGraph,
    config: EngineConfig,
    saves: SaveDir,
    navigator: Navigator,
}

/// A session in progress.
struct Session {
    username: String,
    state: GameState,
}

/// Answers collected during character creation.
#[derive(Default)]
struct Draft {
    username: String,
    attributes: CharacterAttributes,
    inventory: BaseInventory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CreationStep {
    Name,
    Species,
    Gender,
    Snack,
    Weapon,
    Tool,
}

impl CreationStep {
    /// The following question, or `None` once the bag is packed.
    fn next(self) -> Option<Self> {
        match self {
            Self::Name => Some(Self::Species),
            Self::Species => Some(Self::Gender),
            Self::Gender => Some(Self::Snack),
            Self::Snack => Some(Self::Weapon),
            Self::Weapon => Some(Self::Tool),
            Self::Tool => None,
        }
    }

    fn prompt(self) -> &'static str {
        match self {
            Self::Name => "Create your character:\nName:",
            Self::Species => "Species:",
            Self::Gender => "Gender:",
            Self::Snack => "Pack your bag for the journey:\nSnack:",
            Self::Weapon => "Weapon:",
            Self::Tool => "Tool:",
        }
    }
}

enum Phase {
    Menu,
    Username,
    Creating { draft: Draft, step: CreationStep },
    ChoosingDifficulty(Draft),
    Loading { saves: Vec<String> },
    Playing(Session),
    Finished,
}

/// A handler's answer: an optional phase change and the text to show.
type Step = (Option<Phase>, String);

impl Game {
    /// Create a game over an already validated story.
    pub fn new(story: StoryGraph, config: EngineConfig) -> Self {
        let saves = SaveDir::new(config.saves_dir.clone());
        let navigator = Navigator::new(&config);
        Self {
            engine: Engine {
                story,
                config,
                saves,
                navigator,
            },
            phase: Phase::Menu,
        }
    }

    /// Load the story named in `config` and create a game over it.
    pub fn open(config: EngineConfig) -> GameResult<Self> {
        let story = StoryGraph::load(&config.story_path)?;
        tracing::info!(
            path = %config.story_path.display(),
            levels = story.level_count(),
            scenes = story.scene_count(),
            "story loaded"
        );
        Ok(Self::new(story, config))
    }

    /// Text shown before the first input: the main menu.
    pub fn greeting(&self) -> String {
        MENU.to_string()
    }

    /// Whether the player has quit.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    /// The running session's state, if a session is being played.
    pub fn state(&self) -> Option<&GameState> {
        match &self.phase {
            Phase::Playing(session) => Some(&session.state),
            _ => None,
        }
    }

    /// The running session's save identifier.
    pub fn username(&self) -> Option<&str> {
        match &self.phase {
            Phase::Playing(session) => Some(&session.username),
            _ => None,
        }
    }

    /// The story being played.
    pub fn story(&self) -> &StoryGraph {
        &self.engine.story
    }

    /// Process one line of player input and return the text to show.
    pub fn process(&mut self, input: &str) -> GameResult<String> {
        let engine = &self.engine;
        let (next, output) = match &mut self.phase {
            Phase::Menu => engine.on_menu(input)?,
            Phase::Username => engine.on_username(input)?,
            Phase::Creating { draft, step } => engine.on_creating(draft, step, input)?,
            Phase::ChoosingDifficulty(draft) => engine.finish_creation(draft, input)?,
            Phase::Loading { saves } => engine.on_loading(saves, input)?,
            Phase::Playing(session) => engine.on_playing(session, input)?,
            Phase::Finished => (None, String::new()),
        };
        if let Some(phase) = next {
            self.phase = phase;
        }
        Ok(output)
    }
}

impl Engine {
    fn on_menu(&self, input: &str) -> GameResult<Step> {
        match MenuChoice::from_command(&Command::parse(input))? {
            MenuChoice::Start => Ok((
                Some(Phase::Username),
                format!("Starting a new game...\n{USERNAME_PROMPT}"),
            )),
            MenuChoice::Load => {
                let saves = self.saves.list()?;
                if saves.is_empty() {
                    return Ok((None, format!("No saved data found!\n\n{MENU}")));
                }
                let output = format!("Choose username (/b - back):\n{}", saves.join("\n"));
                Ok((Some(Phase::Loading { saves }), output))
            }
            MenuChoice::Quit => Ok((Some(Phase::Finished), "Goodbye!".to_string())),
        }
    }

    fn on_username(&self, input: &str) -> GameResult<Step> {
        let username = input.trim();
        if username.eq_ignore_ascii_case(BACK) {
            return Ok((Some(Phase::Menu), MENU.to_string()));
        }
        if !is_valid_identifier(username) {
            return Err(GameError::Validation(
                "Usernames must not be empty, start with a dot, or contain slashes.".to_string(),
            ));
        }
        let draft = Draft {
            username: username.to_string(),
            ..Draft::default()
        };
        let step = CreationStep::Name;
        Ok((Some(Phase::Creating { draft, step }), step.prompt().to_string()))
    }

    fn on_creating(
        &self,
        draft: &mut Draft,
        step: &mut CreationStep,
        input: &str,
    ) -> GameResult<Step> {
        let value = input.trim().to_string();
        match *step {
            CreationStep::Name => draft.attributes.name = value,
            CreationStep::Species => draft.attributes.species = value,
            CreationStep::Gender => draft.attributes.gender = value,
            CreationStep::Snack if value.is_empty() => {
                draft.inventory.snack = self.config.default_snack.clone();
            }
            CreationStep::Snack => draft.inventory.snack = value,
            CreationStep::Weapon => draft.inventory.weapon = value,
            CreationStep::Tool => draft.inventory.tool = value,
        }

        match step.next() {
            Some(next) => {
                *step = next;
                Ok((None, next.prompt().to_string()))
            }
            None => Ok((
                Some(Phase::ChoosingDifficulty(std::mem::take(draft))),
                DIFFICULTY_PROMPT.to_string(),
            )),
        }
    }

    fn finish_creation(&self, draft: &Draft, input: &str) -> GameResult<Step> {
        let difficulty = difficulty_from_command(&Command::parse(input))?;
        let state = GameState::new(
            draft.attributes.clone(),
            draft.inventory.clone(),
            difficulty,
        );
        let session = Session {
            username: draft.username.clone(),
            state,
        };
        let output = format!(
            "{}\n\n{}",
            stats_text(&session),
            self.scene_text(&session.state)?
        );
        tracing::info!(username = %session.username, %difficulty, "new game started");
        Ok((Some(Phase::Playing(session)), output))
    }

    fn on_loading(&self, saves: &[String], input: &str) -> GameResult<Step> {
        let choice = input.trim();
        if choice.eq_ignore_ascii_case(BACK) {
            return Ok((Some(Phase::Menu), MENU.to_string()));
        }
        let id = match_save(saves, choice)?;

        match self.resume(id) {
            Ok(step) => Ok(step),
            Err(e) => {
                tracing::warn!(%id, error = %e, "load failed");
                Ok((Some(Phase::Menu), format!("{e}\n\n{MENU}")))
            }
        }
    }

    fn resume(&self, id: &str) -> GameResult<Step> {
        let state = self.saves.load(id)?;

        if self.navigator.is_complete(&self.story, &state) {
            let output = format!("Loading your progress...\n{VICTORY}\n\n{MENU}");
            return Ok((Some(Phase::Menu), output));
        }

        let scene = self
            .scene_text(&state)
            .map_err(|e| GameError::CorruptSave {
                id: id.to_string(),
                reason: e.to_string(),
            })?;
        let output = format!(
            "Loading your progress...\n{}\n\n{scene}",
            level_banner(&state.position.level)
        );
        let session = Session {
            username: id.to_string(),
            state,
        };
        Ok((Some(Phase::Playing(session)), output))
    }

    fn on_playing(&self, session: &mut Session, input: &str) -> GameResult<Step> {
        let scene = self.navigator.current_scene(&self.story, &session.state)?;
        let command = SceneCommand::from_command(&Command::parse(input), scene.options.len())?;

        let output = match command {
            SceneCommand::Inventory => {
                format!("Inventory: {}", session.state.inventory.join(", "))
            }
            SceneCommand::Character => character_text(&session.state),
            SceneCommand::Help => help_text(),
            SceneCommand::Save => {
                self.saves.save(&session.username, &session.state)?;
                format!("Game saved!\n{}", session.state.position.scene)
            }
            SceneCommand::Quit => {
                return Ok((Some(Phase::Finished), "Thanks for playing!".to_string()));
            }
            SceneCommand::Choose(index) => return self.take_option(session, index),
        };
        Ok((None, output))
    }

    fn take_option(&self, session: &mut Session, index: usize) -> GameResult<Step> {
        let transition = self
            .navigator
            .choose(&self.story, &mut session.state, index)?;

        let mut lines = vec![transition.result_text];
        lines.extend(transition.notices.iter().map(ToString::to_string));

        match transition.outcome {
            Outcome::Continue | Outcome::Died => {}
            Outcome::LevelAdvanced { level } => lines.push(level_banner(&level)),
            Outcome::Completed => {
                lines.push(VICTORY.to_string());
                lines.push(String::new());
                lines.push(MENU.to_string());
                return Ok((Some(Phase::Menu), lines.join("\n")));
            }
        }

        lines.push(self.scene_text(&session.state)?);
        Ok((None, lines.join("\n")))
    }

    fn scene_text(&self, state: &GameState) -> GameResult<String> {
        let scene = self.navigator.current_scene(&self.story, state)?;
        let base = &state.base_inventory;

        let mut out = format!("{}\n{}", state.position.scene, base.substitute(&scene.text));
        for (i, choice) in scene.options.iter().enumerate() {
            out.push_str(&format!("\n{}. {}", i + 1, base.substitute(&choice.option_text)));
        }
        Ok(out)
    }
}

/// Pick the save the player typed. An exact name wins; otherwise the name
/// may differ in case only if that leaves a single candidate.
fn match_save<'a>(saves: &'a [String], choice: &str) -> GameResult<&'a str> {
    if let Some(id) = saves.iter().find(|id| *id == choice) {
        return Ok(id);
    }
    let mut candidates = saves.iter().filter(|id| id.eq_ignore_ascii_case(choice));
    match (candidates.next(), candidates.next()) {
        (Some(id), None) => Ok(id),
        (Some(_), Some(_)) => Err(GameError::Validation(format!(
            "Several saves match '{choice}'. Please type the name exactly as listed."
        ))),
        (None, _) => Err(GameError::unknown_input()),
    }
}

fn level_banner(level: &str) -> String {
    match level_number(level) {
        Some(n) => format!("Level {n}"),
        None => level.to_string(),
    }
}

fn stats_text(session: &Session) -> String {
    let state = &session.state;
    let a = &state.attributes;
    let b = &state.base_inventory;
    format!(
        "Good luck on your journey, {}!\n\
         Your character: {}, {}, {}\n\
         Your inventory: {}, {}, {}\n\
         Difficulty: {}\n\
         Number of lives: {}",
        session.username,
        a.name,
        a.species,
        a.gender,
        b.snack,
        b.weapon,
        b.tool,
        state.difficulty,
        state.lives
    )
}

fn character_text(state: &GameState) -> String {
    let a = &state.attributes;
    format!(
        "Your character: {}, {}, {}\nLives remaining: {}",
        a.name, a.species, a.gender, state.lives
    )
}

fn help_text() -> String {
    let mut out = "Type the number of option you want to choose.\nCommands you can use:".to_string();
    for (command, text) in SceneCommand::HELP {
        out.push_str(&format!("\n{command} => {text}"));
    }
    out
}
