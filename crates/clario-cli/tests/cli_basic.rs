//! End-to-end tests for the `clario` binary.
//!
//! Each test points `CLARIO_DATA_DIR` at its own temp directory so runs never
//! touch the user's real data.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

fn run_cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_clario"))
        .args(args)
        .env("CLARIO_DATA_DIR", dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run clario")
}

fn run_ok(dir: &Path, args: &[&str]) -> String {
    let out = run_cli(dir, args);
    assert!(
        out.status.success(),
        "clario {args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8(out.stdout).expect("stdout is utf-8")
}

/// Commands may print several pretty-printed JSON documents back to back.
fn json_docs(stdout: &str) -> Vec<Value> {
    serde_json::Deserializer::from_str(stdout)
        .into_iter::<Value>()
        .collect::<Result<_, _>>()
        .expect("stdout is a JSON stream")
}

fn single_json(stdout: &str) -> Value {
    let mut docs = json_docs(stdout);
    assert_eq!(docs.len(), 1, "expected one document in {stdout}");
    docs.remove(0)
}

#[test]
fn fresh_status_is_idle_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let status = single_json(&run_ok(dir.path(), &["timer", "status"]));

    assert_eq!(status["type"], "state_snapshot");
    assert_eq!(status["mode"], "idle");
    assert_eq!(status["time_left"], 1500);
    assert_eq!(status["sessions_completed"], 0);
}

#[test]
fn start_then_pause_leaves_incomplete_session() {
    let dir = tempfile::tempdir().unwrap();

    let started = single_json(&run_ok(dir.path(), &["timer", "start"]));
    assert_eq!(started["type"], "timer_started");
    let session_id = started["session_id"].as_str().unwrap().to_string();

    let status = single_json(&run_ok(dir.path(), &["timer", "status"]));
    assert_eq!(status["mode"], "focus");
    assert_eq!(status["current_session_id"], session_id.as_str());

    let paused = single_json(&run_ok(dir.path(), &["timer", "pause"]));
    assert_eq!(paused["type"], "timer_paused");
    assert_eq!(paused["from"], "focus");

    let sessions = single_json(&run_ok(dir.path(), &["sessions", "list"]));
    let sessions = sessions.as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["id"], session_id.as_str());
    assert_eq!(sessions[0]["is_completed"], false);
    assert_eq!(sessions[0]["type"], "focus");
}

#[test]
fn starting_twice_creates_one_session() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["timer", "start"]);

    let second = run_ok(dir.path(), &["timer", "start"]);
    assert!(json_docs(&second).is_empty());

    let stats = single_json(&run_ok(dir.path(), &["sessions", "stats"]));
    assert_eq!(stats["total_sessions"], 1);
    assert_eq!(stats["completed_sessions"], 0);
}

#[test]
fn reset_returns_to_idle() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["timer", "start"]);

    let reset = single_json(&run_ok(dir.path(), &["timer", "reset"]));
    assert_eq!(reset["type"], "timer_reset");

    let status = single_json(&run_ok(dir.path(), &["timer", "status"]));
    assert_eq!(status["mode"], "idle");
    assert!(status["current_session_id"].is_null());
}

#[test]
fn configure_updates_durations_and_config() {
    let dir = tempfile::tempdir().unwrap();

    let configured = single_json(&run_ok(
        dir.path(),
        &["timer", "configure", "--focus", "50", "--break", "10"],
    ));
    assert_eq!(configured["type"], "timer_configured");
    assert_eq!(configured["focus_minutes"], 50);

    let status = single_json(&run_ok(dir.path(), &["timer", "status"]));
    assert_eq!(status["time_left"], 3000);
    assert_eq!(status["break_minutes"], 10);

    let focus = run_ok(dir.path(), &["config", "get", "timer.focus_minutes"]);
    assert_eq!(focus.trim(), "50");
}

#[test]
fn configure_rejects_out_of_range_values() {
    let dir = tempfile::tempdir().unwrap();

    let out = run_cli(dir.path(), &["timer", "configure", "--focus", "0"]);
    assert!(!out.status.success());
    let out = run_cli(dir.path(), &["timer", "configure", "--break", "61"]);
    assert!(!out.status.success());

    let status = single_json(&run_ok(dir.path(), &["timer", "status"]));
    assert_eq!(status["focus_minutes"], 25);
    assert_eq!(status["break_minutes"], 5);
}

#[test]
fn configure_refused_while_running() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["timer", "start"]);

    let out = run_cli(dir.path(), &["timer", "configure", "--focus", "30"]);
    assert!(!out.status.success());
}

#[test]
fn config_set_validates() {
    let dir = tempfile::tempdir().unwrap();

    assert_eq!(
        run_ok(dir.path(), &["config", "set", "timer.break_minutes", "15"]).trim(),
        "ok"
    );
    assert_eq!(
        run_ok(dir.path(), &["config", "get", "timer.break_minutes"]).trim(),
        "15"
    );

    assert!(!run_cli(dir.path(), &["config", "set", "timer.focus_minutes", "500"])
        .status
        .success());
    assert!(!run_cli(dir.path(), &["config", "set", "timer.nope", "1"])
        .status
        .success());
    assert!(!run_cli(dir.path(), &["config", "get", "timer.nope"])
        .status
        .success());
}

#[test]
fn mindfulness_log_credits_points_without_streak() {
    let dir = tempfile::tempdir().unwrap();

    let logged = single_json(&run_ok(
        dir.path(),
        &["mindfulness", "log", "--minutes", "3", "--kind", "meditation"],
    ));
    assert_eq!(logged["session"]["duration"], 180);
    assert_eq!(logged["session"]["type"], "meditation");
    assert_eq!(logged["points"], 5);

    let progress = single_json(&run_ok(dir.path(), &["progress"]));
    assert_eq!(progress["points"], 5);
    assert_eq!(progress["level"], 1);
    assert_eq!(progress["current_streak"], 0);
    assert_eq!(progress["points_to_next_level"], 495);

    let listed = single_json(&run_ok(dir.path(), &["mindfulness", "list"]));
    assert_eq!(listed["total_secs"], 180);
}

#[test]
fn progress_lists_badge_catalog_unearned() {
    let dir = tempfile::tempdir().unwrap();
    let progress = single_json(&run_ok(dir.path(), &["progress"]));

    let badges = progress["badges"].as_array().unwrap();
    assert!(badges.iter().any(|b| b["id"] == "first-session"));
    assert!(badges.iter().all(|b| b["earned"] == false));
}

#[test]
fn quote_respects_context() {
    let dir = tempfile::tempdir().unwrap();
    let quote = single_json(&run_ok(dir.path(), &["quote", "--context", "break"]));

    assert_eq!(quote["context"], "break");
    assert!(!quote["quote"].as_str().unwrap().is_empty());

    assert!(!run_cli(dir.path(), &["quote", "--context", "sleepy"])
        .status
        .success());
}

#[test]
fn config_set_applies_to_next_start() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["timer", "status"]);

    run_ok(dir.path(), &["config", "set", "timer.focus_minutes", "50"]);
    let started = single_json(&run_ok(dir.path(), &["timer", "start"]));
    assert_eq!(started["focus_secs"], 3000);
}

#[test]
fn invalid_config_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[timer]\nfocus_minutes = 0\nbreak_minutes = 5\n",
    )
    .unwrap();

    let status = single_json(&run_ok(dir.path(), &["timer", "status"]));
    assert_eq!(status["focus_minutes"], 25);
    assert_eq!(status["time_left"], 1500);

    let reset = single_json(&run_ok(dir.path(), &["timer", "reset"]));
    assert_eq!(reset["type"], "timer_reset");
}
