use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn rep_coach(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rep-coach").unwrap();
    cmd.env("REP_COACH_CONFIG", config_dir.join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("rep-coach").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Real-time exercise repetition tracking"))
        .stdout(predicate::str::contains("track"))
        .stdout(predicate::str::contains("exercises"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("rep-coach").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let mut cmd = Command::cargo_bin("rep-coach").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_rep-coach"));
}

#[test]
fn test_exercises_lists_catalogue() {
    let dir = TempDir::new().unwrap();
    rep_coach(dir.path())
        .arg("exercises")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dumbbell"))
        .stdout(predicate::str::contains("goblet_squat"))
        .stdout(predicate::str::contains("Plank Hold"));
}

#[test]
fn test_exercises_category_filter() {
    let dir = TempDir::new().unwrap();
    rep_coach(dir.path())
        .args(["exercises", "--category", "bar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pullup"))
        .stdout(predicate::str::contains("squat").not());
}

#[test]
fn test_config_init_show_and_path() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("config.toml");

    rep_coach(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    rep_coach(dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration initialized"));
    assert!(file.exists());

    rep_coach(dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    rep_coach(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("min_rep_interval_ms = 400"));
}

#[test]
fn test_invalid_config_file_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[tracker]\nconfidence_threshold = 3.0\n",
    )
    .unwrap();

    rep_coach(dir.path())
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid tracker configuration"));
}
