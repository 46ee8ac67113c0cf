//! Integration tests for the fitforge binary.
//!
//! Each run seeds fresh in-memory stores, so tests only observe what a single
//! invocation prints.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// CLI with config lookups pointed at an empty directory
fn cli(config_home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fitforge"));
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG");
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.arg("--json").assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout should be JSON")
}

#[test]
fn test_cli_help() {
    let home = setup_test_dir();
    cli(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Workout generator and progress tracker",
        ));
}

#[test]
fn test_default_command_is_dashboard() {
    let home = setup_test_dir();
    cli(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello, Jordan!"))
        .stdout(predicate::str::contains("Streak"));
}

#[test]
fn test_generate_for_seeded_profile() {
    let home = setup_test_dir();
    let workout = json_output(cli(&home).arg("generate").arg("--seed").arg("42"));

    assert_eq!(workout["type"], "strength");
    assert_eq!(workout["difficulty"], "intermediate");
    assert_eq!(workout["completed"], false);

    let exercises = workout["exercises"].as_array().unwrap();
    // Intermediate cap of six, filled from five usable strength exercises
    assert_eq!(exercises.len(), 6);
    for exercise in exercises {
        assert_eq!(exercise["sets"], 4);
        assert_eq!(exercise["rest_time_seconds"], 180);
        let reps = exercise["reps"].as_u64().unwrap();
        assert!((10..=13).contains(&reps));
        assert_ne!(exercise["name"], "Pull-ups");
    }
}

#[test]
fn test_generate_is_reproducible_with_seed() {
    let home = setup_test_dir();
    let reps = |w: &Value| -> Vec<u64> {
        w["exercises"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["reps"].as_u64().unwrap())
            .collect()
    };

    let a = json_output(cli(&home).args(["generate", "--seed", "7"]));
    let b = json_output(cli(&home).args(["generate", "--seed", "7"]));
    assert_eq!(reps(&a), reps(&b));
}

#[test]
fn test_fixture_override_changes_profile() {
    let home = setup_test_dir();
    let fixtures = setup_test_dir();
    fs::write(
        fixtures.path().join("user_profile.json"),
        r#"{ "name": "Casey", "goals": ["cardio"], "equipment": [], "experience": "beginner" }"#,
    )
    .unwrap();

    let workout = json_output(
        cli(&home)
            .arg("generate")
            .arg("--fixtures")
            .arg(fixtures.path()),
    );

    let exercises = workout["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 4);
    for exercise in exercises {
        assert_eq!(exercise["weight"], 0.0);
        assert_eq!(exercise["rest_time_seconds"], 60);
        assert_eq!(exercise["sets"], 3);
    }
}

#[test]
fn test_records_from_fixtures() {
    let home = setup_test_dir();
    let records = json_output(cli(&home).arg("records"));

    assert_eq!(records["Squats"]["max_weight"], 70.0);
    assert_eq!(records["Squats"]["max_reps"], 10);
    assert_eq!(records["Squats"]["max_volume"], 600.0);
    // The 55 lb bench set was never completed
    assert_eq!(records["Bench Press"]["max_weight"], 45.0);
    assert_eq!(records["Push-ups"]["max_reps"], 15);
}

#[test]
fn test_progress_chart_sorted_by_date() {
    let home = setup_test_dir();
    let points = json_output(cli(&home).args([
        "progress",
        "--exercise",
        "Squats",
        "--days",
        "100000",
    ]));

    let points = points.as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["date"], "2024-01-12");
    assert_eq!(points[0]["volume"], 550.0);
    assert_eq!(points[1]["date"], "2024-01-15");
    assert_eq!(points[1]["weight"], 60.0);
    assert_eq!(points[1]["reps"], 10);
}

#[test]
fn test_progress_with_oversized_window() {
    let home = setup_test_dir();
    let points = json_output(cli(&home).args([
        "progress",
        "--exercise",
        "Squats",
        "--days",
        "200000000",
    ]));
    assert_eq!(points.as_array().unwrap().len(), 2);
}

#[test]
fn test_session_auto_complete() {
    let home = setup_test_dir();
    cli(&home)
        .args(["session", "workout_2", "--auto-complete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session logged"));
}

#[test]
fn test_session_auto_complete_logs_every_set() {
    let home = setup_test_dir();
    let log = json_output(cli(&home).args(["session", "workout_2", "--auto-complete"]));

    assert_eq!(log["workout_id"], "workout_2");
    let exercises = log["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 3);
    for exercise in exercises {
        let sets = exercise["sets"].as_array().unwrap();
        assert_eq!(sets.len(), 4);
        assert!(sets.iter().all(|s| s["completed"] == true));
    }
    // Four sets of three exercises, 180s rest each
    assert_eq!(log["duration_seconds"], 4 * 3 * 180);
}

#[test]
fn test_session_unknown_workout_fails() {
    let home = setup_test_dir();
    cli(&home)
        .args(["session", "workout_999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("workout not found: workout_999"));
}

#[test]
fn test_exercise_search() {
    let home = setup_test_dir();
    cli(&home)
        .args(["exercises", "--search", "press"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bench Press"))
        .stdout(predicate::str::contains("Overhead Press"))
        .stdout(predicate::str::contains("Squats").not());
}

#[test]
fn test_invalid_config_reported() {
    let home = setup_test_dir();
    let config_dir = home.path().join("fitforge");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[progress]\nchart_window_days = -1\n",
    )
    .unwrap();

    cli(&home)
        .arg("records")
        .assert()
        .failure()
        .stderr(predicate::str::contains("chart_window_days"));
}
