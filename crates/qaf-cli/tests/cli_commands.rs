//! Integration tests for the `qaf` CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STORY: &str = r#"{
    "level1": {"scenes": {
        "scene1": {"text": "The foothills. Your {snack} is packed.", "options": [
            {"option_text": "Climb with your {tool}", "result_text": "You climb.", "next": "end", "actions": ["+pebble"]},
            {"option_text": "Fight the bandit", "result_text": "The bandit strikes back.", "next": "scene1", "actions": ["hit"]}
        ]}
    }},
    "level2": {"scenes": {
        "scene1": {"text": "The summit ridge.", "options": [
            {"option_text": "Step onto the peak", "result_text": "The wind falls silent.", "next": "end", "actions": []}
        ]}
    }}
}"#;

/// Create a temp directory holding a two-level story.
fn test_story() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("story.json"), STORY).unwrap();
    dir
}

fn qaf(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("qaf").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--story")
        .arg(dir.join("story.json"))
        .arg("--saves")
        .arg(dir.join("saves"));
    cmd
}

const NEW_GAME: &str = "1\nrostam\nRostam\nHuman\nMale\n\nsword\nrope\n2\n";

fn shipped_story() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/story.json")
}

#[test]
fn menu_quit() {
    let dir = test_story();
    qaf(dir.path())
        .write_stdin("3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("***Welcome to the Journey to Mount Qaf***"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn eof_exits_cleanly() {
    let dir = test_story();
    qaf(dir.path()).write_stdin("").assert().success();
}

#[test]
fn unknown_input_reprompts() {
    let dir = test_story();
    qaf(dir.path())
        .write_stdin("dance\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown input! Please enter a valid one."))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn new_game_shows_stats_and_first_scene() {
    let dir = test_story();
    qaf(dir.path())
        .write_stdin(format!("{NEW_GAME}/i\n/q\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Good luck on your journey, rostam!"))
        .stdout(predicate::str::contains("Your inventory: cookie, sword, rope"))
        .stdout(predicate::str::contains("Number of lives: 3"))
        .stdout(predicate::str::contains("The foothills. Your cookie is packed."))
        .stdout(predicate::str::contains("1. Climb with your rope"))
        .stdout(predicate::str::contains("Inventory: cookie, sword, rope"))
        .stdout(predicate::str::contains("Thanks for playing!"));
}

#[test]
fn full_playthrough() {
    let dir = test_story();
    qaf(dir.path())
        .write_stdin(format!("{NEW_GAME}2\n1\n1\n3\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Lives remaining: 2"))
        .stdout(predicate::str::contains("Item added: pebble"))
        .stdout(predicate::str::contains("Level 2"))
        .stdout(predicate::str::contains("Your journey is complete!"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn save_then_load() {
    let dir = test_story();
    qaf(dir.path())
        .write_stdin(format!("{NEW_GAME}1\n/s\n/q\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Game saved!"));

    assert!(dir.path().join("saves").join("rostam.json").exists());

    qaf(dir.path())
        .write_stdin("2\nrostam\n/c\n/q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Choose username (/b - back):"))
        .stdout(predicate::str::contains("Loading your progress..."))
        .stdout(predicate::str::contains("Level 2"))
        .stdout(predicate::str::contains("The summit ridge."))
        .stdout(predicate::str::contains(
            "Your character: Rostam, Human, Male\nLives remaining: 3",
        ));
}

#[test]
fn load_without_saves() {
    let dir = test_story();
    qaf(dir.path())
        .write_stdin("2\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved data found!"));
}

#[test]
fn missing_story_fails() {
    let dir = TempDir::new().unwrap();
    qaf(dir.path())
        .write_stdin("3\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: failed to start game"));
}

#[test]
fn invalid_story_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("story.json"),
        r#"{"level1": {"scenes": {"scene1": {"text": "x", "options": [
            {"option_text": "a", "result_text": "b", "next": "scene9", "actions": []}
        ]}}}}"#,
    )
    .unwrap();
    qaf(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("scene9"));
}

#[test]
fn shipped_story_loads() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("qaf")
        .unwrap()
        .env("NO_COLOR", "1")
        .arg("--story")
        .arg(shipped_story())
        .arg("--saves")
        .arg(dir.path())
        .write_stdin(format!("{NEW_GAME}/h\n/q\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("scene1"))
        .stdout(predicate::str::contains("/s => Save the game"));
}
