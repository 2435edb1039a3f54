//! Integration tests for the action log and configuration commands.

mod common;

use common::TestEnv;
use std::fs;

fn read_log_lines(env: &TestEnv) -> Vec<serde_json::Value> {
    let path = env.data_path().join("action.log");
    let content = fs::read_to_string(path).unwrap_or_default();
    content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// === Action log ===

#[test]
fn test_commands_append_log_entries() {
    let env = TestEnv::init();
    env.gw_json(&["doc", "create", "Search"]);

    let lines = read_log_lines(&env);
    assert!(lines.len() >= 2);
    let create = lines.last().unwrap();
    assert_eq!(create["command"], "doc create");
    assert_eq!(create["success"], true);
    assert_eq!(create["args"]["name"], "Search");
    assert!(create["duration_ms"].is_u64());
}

#[test]
fn test_failed_commands_log_error() {
    let env = TestEnv::init();
    env.gw().args(["doc", "show", "gw-ffff"]).assert().failure();

    let lines = read_log_lines(&env);
    let entry = lines.last().unwrap();
    assert_eq!(entry["success"], false);
    assert!(entry["error"].as_str().unwrap().contains("not found"));
}

#[test]
fn test_long_arguments_are_truncated() {
    let env = TestEnv::init();
    env.gw_json(&["doc", "create", &"a".repeat(150)]);

    let lines = read_log_lines(&env);
    let entry = lines.last().unwrap();
    let name = entry["args"]["name"].as_str().unwrap();
    assert!(name.contains("... (150 chars)"));
}

#[test]
fn test_action_log_can_be_disabled() {
    let env = TestEnv::init();
    env.gw_json(&["config", "set", "action_log", "false"]);
    let before = read_log_lines(&env).len();

    env.gw_json(&["doc", "create", "Quiet"]);
    assert_eq!(read_log_lines(&env).len(), before);
}

// === Config ===

#[test]
fn test_config_set_and_get() {
    let env = TestEnv::init();
    env.gw_json(&["config", "set", "phase", "V1"]);
    let got = env.gw_json(&["config", "get", "phase"]);
    assert_eq!(got["value"], "V1");
}

#[test]
fn test_config_get_unset_key() {
    let env = TestEnv::init();
    let got = env.gw_json(&["config", "get", "language"]);
    assert!(got.get("value").is_none());
}

#[test]
fn test_config_rejects_unknown_key() {
    let env = TestEnv::init();
    env.gw()
        .args(["config", "set", "bogus", "x"])
        .assert()
        .failure();
}

#[test]
fn test_config_phase_default_applies_to_new_docs() {
    let env = TestEnv::init();
    env.gw_json(&["config", "set", "phase", "V2"]);
    env.gw_json(&["doc", "create", "Inherits"]);

    let shown = env.gw_json(&["doc", "show"]);
    assert_eq!(shown["document"]["phase"], "v2");
}

#[test]
fn test_config_output_human_default() {
    let env = TestEnv::init();
    env.gw_json(&["config", "set", "output", "human"]);

    let output = env.gw().args(["doc", "create", "Pretty"]).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("Created document"));
}

#[test]
fn test_config_list_shows_defaults() {
    let env = TestEnv::init();
    let output = env.gw().args(["config", "list", "-H"]).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("output = (default)"));
}
