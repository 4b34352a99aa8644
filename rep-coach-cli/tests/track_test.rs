mod common;

use assert_cmd::Command;
use common::{command, pushup_frame, write_stream};
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

fn rep_coach(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rep-coach").unwrap();
    cmd.env("REP_COACH_CONFIG", dir.path().join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn two_reps() -> Vec<String> {
    vec![
        pushup_frame(0, true),
        pushup_frame(100, false),
        pushup_frame(200, true),
        pushup_frame(800, false),
    ]
}

#[test]
fn test_track_json_output() {
    let dir = TempDir::new().unwrap();
    let input = write_stream(dir.path(), "pushups.jsonl", &two_reps());

    let output = rep_coach(&dir)
        .args(["track", "--exercise", "pushup", "--format", "json", "--input"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 5);

    let completed: Vec<bool> = records[..4]
        .iter()
        .map(|r| r["rep_completed"].as_bool().unwrap())
        .collect();
    assert_eq!(completed, vec![false, true, false, true]);

    let summary = &records[4];
    assert_eq!(summary["type"], "summary");
    assert_eq!(summary["exercise"], "pushup");
    assert_eq!(summary["total_rep_count"], 2);
    assert_eq!(summary["frames_processed"], 4);
    assert!((summary["average_rep_duration"].as_f64().unwrap() - 0.6).abs() < 1e-9);
}

#[test]
fn test_track_text_output_with_commands() {
    let dir = TempDir::new().unwrap();
    let mut lines = two_reps();
    lines.push(command(json!("complete_set")));
    lines.push("this is not json".to_string());
    lines.push(pushup_frame(2_000, true));
    lines.push(pushup_frame(2_200, false));
    let input = write_stream(dir.path(), "sets.jsonl", &lines);

    rep_coach(&dir)
        .args(["track", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("State: DOWN"))
        .stdout(predicate::str::contains("Rep 2!"))
        .stdout(predicate::str::contains("Session Summary"))
        .stdout(predicate::str::contains("Sets:          2"))
        .stdout(predicate::str::contains("Reps (set):    1"))
        .stdout(predicate::str::contains("Reps (total):  3"))
        .stderr(predicate::str::contains("Malformed input line 6"));
}

#[test]
fn test_track_reads_stdin() {
    let dir = TempDir::new().unwrap();

    rep_coach(&dir)
        .args(["track", "--format", "json"])
        .write_stdin(two_reps().join("\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_rep_count\":2"));
}

#[test]
fn test_track_switches_exercise_mid_stream() {
    let dir = TempDir::new().unwrap();
    let lines = vec![
        pushup_frame(0, true),
        command(json!({ "select_exercise": "plank" })),
        command(json!({ "select_exercise": "burpee" })),
    ];
    let input = write_stream(dir.path(), "switch.jsonl", &lines);

    rep_coach(&dir)
        .args(["track", "--format", "json", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"exercise\":\"plank\""))
        .stderr(predicate::str::contains("Command rejected"));
}

#[test]
fn test_track_unknown_exercise_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_stream(dir.path(), "empty.jsonl", &[]);

    rep_coach(&dir)
        .args(["track", "--exercise", "burpee", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("burpee"));
}

#[test]
fn test_track_missing_input_file_fails() {
    let dir = TempDir::new().unwrap();

    rep_coach(&dir)
        .args(["track", "--input"])
        .arg(dir.path().join("missing.jsonl"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open"));
}

#[test]
fn test_track_skips_undecodable_line() {
    let dir = TempDir::new().unwrap();
    let reps = two_reps();
    let mut stream = Vec::new();
    stream.extend_from_slice(format!("{}\n{}\n", reps[0], reps[1]).as_bytes());
    stream.extend_from_slice(b"\xff\xfe garbage\n");
    stream.extend_from_slice(format!("{}\n{}\n", reps[2], reps[3]).as_bytes());

    rep_coach(&dir)
        .args(["track", "--format", "json"])
        .write_stdin(stream)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_rep_count\":2"))
        .stderr(predicate::str::contains("line 3 is not valid UTF-8"));
}
