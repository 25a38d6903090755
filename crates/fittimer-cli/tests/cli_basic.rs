//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each test gets
//! its own HOME so the config file never touches the real one.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "fittimer-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env_remove("FITTIMER_ENV")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter(|l| l.starts_with('{'))
        .map(|l| serde_json::from_str(l).expect("invalid JSON line"))
        .collect()
}

#[test]
fn test_plan_resolves_cycles() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["plan", "--total-secs", "90", "--work", "20", "--rest", "10"],
    );
    assert_eq!(code, 0, "plan failed");
    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(plan["total_cycles"], 3);
    assert_eq!(plan["cycle_duration_secs"], 30);
    assert_eq!(plan["initial_state"]["phase"], "work");
    assert_eq!(plan["remainder_secs"], 0);
}

#[test]
fn test_plan_rejects_zero_duration() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["plan", "--work", "0"]);
    assert_ne!(code, 0, "zero work duration unexpectedly accepted");
    assert!(stderr.contains("work_duration_secs"));
}

#[test]
fn test_simulate_json_timeline() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["simulate", "--total-secs", "90", "--work", "20", "--rest", "10", "--json"],
    );
    assert_eq!(code, 0, "simulate failed");
    let events = json_lines(&stdout);
    let count = |kind: &str| events.iter().filter(|e| e["type"] == kind).count();
    assert_eq!(count("phase_changed"), 5);
    assert_eq!(count("session_completed"), 1);
    assert_eq!(count("cue_requested"), 24);
}

#[test]
fn test_simulate_summary() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["simulate", "--total-secs", "5", "--work", "20", "--rest", "10"],
    );
    assert_eq!(code, 0, "simulate failed");
    assert!(stdout.contains("0 rounds"));
    assert!(stdout.contains("ticks:            1"));
}

#[test]
fn test_run_completes_with_fast_clock() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &[
            "run", "--total-secs", "12", "--work", "3", "--rest", "2", "--tick-ms", "1",
            "--mute", "--json",
        ],
    );
    assert_eq!(code, 0, "run failed");
    let events = json_lines(&stdout);
    assert!(events.iter().any(|e| e["type"] == "timer_started"));
    let last_snapshot = events
        .iter()
        .rev()
        .find(|e| e["type"] == "state_snapshot")
        .expect("no snapshot");
    assert_eq!(last_snapshot["snapshot"]["status"], "completed");
    assert_eq!(last_snapshot["snapshot"]["total_remaining_secs"], 0);
    assert_eq!(
        events.iter().filter(|e| e["type"] == "session_completed").count(),
        1
    );
}

#[test]
fn test_config_get_and_set() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "session.work_secs"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "60");

    let (code, _, _) = run_cli(home.path(), &["config", "set", "session.work_secs", "45"]);
    assert_eq!(code, 0, "config set failed");
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "session.work_secs"]);
    assert_eq!(stdout.trim(), "45");
}

#[test]
fn test_config_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(home.path(), &["config", "get", "session.nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_setup_steps_and_persists() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["setup", "rest", "down"]);
    assert_eq!(code, 0, "setup failed");
    assert!(stdout.contains("20s rest"));

    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "session.rest_secs"]);
    assert_eq!(stdout.trim(), "20");
}
