//! Integration tests for document CRUD operations via CLI.
//!
//! These tests verify that document commands work correctly through the CLI:
//! - `gw system init` creates storage
//! - `gw doc create/list/show/open/update/delete` all work
//! - `gw set` writes scalar fields by dotted key
//! - JSON and human-readable output formats are correct

mod common;

use common::TestEnv;
use predicates::prelude::*;

// === Init Tests ===

#[test]
fn test_init_creates_storage() {
    let env = TestEnv::new();
    let result = env.gw_json(&["system", "init"]);
    assert_eq!(result["status"], "initialized");
}

#[test]
fn test_init_is_idempotent() {
    let env = TestEnv::init();
    let result = env.gw_json(&["system", "init"]);
    assert_eq!(result["status"], "already_initialized");
}

#[test]
fn test_init_human_readable() {
    let env = TestEnv::new();
    env.gw()
        .args(["system", "init", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized Groundwork"));
}

#[test]
fn test_commands_fail_before_init() {
    let env = TestEnv::new();
    env.gw()
        .args(["doc", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not initialized"));
}

// === Create / List / Show ===

#[test]
fn test_doc_create_becomes_active() {
    let env = TestEnv::init();
    let created = env.gw_json(&["doc", "create", "Dark Mode"]);
    let id = created["id"].as_str().unwrap();
    assert!(id.starts_with("gw-"));
    assert_eq!(created["active"], true);

    let list = env.gw_json(&["doc", "list"]);
    assert_eq!(list["count"], 1);
    assert_eq!(list["documents"][0]["id"], id);
    assert_eq!(list["documents"][0]["active"], true);
}

#[test]
fn test_doc_create_with_metadata() {
    let env = TestEnv::init();
    let created = env.gw_json(&[
        "doc", "create", "Search", "--phase", "V1", "--ticket", "PROJ-42",
    ]);
    let id = created["id"].as_str().unwrap().to_string();

    let shown = env.gw_json(&["doc", "show", &id]);
    assert_eq!(shown["document"]["phase"], "v1");
    assert_eq!(shown["document"]["jira_ticket"], "PROJ-42");
}

#[test]
fn test_doc_create_rejects_bad_phase() {
    let env = TestEnv::init();
    env.gw()
        .args(["doc", "create", "X", "--phase", "Someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid phase"));
}

#[test]
fn test_doc_create_rejects_empty_name() {
    let env = TestEnv::init();
    env.gw()
        .args(["doc", "create", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("name cannot be empty"));
}

#[test]
fn test_doc_show_without_active_fails() {
    let env = TestEnv::init();
    env.gw()
        .args(["doc", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No active document"));
}

#[test]
fn test_doc_show_unknown_id_fails() {
    let env = TestEnv::init();
    env.gw()
        .args(["doc", "show", "gw-ffff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// === Open / Update / Delete ===

#[test]
fn test_doc_open_switches_active() {
    let env = TestEnv::init();
    let first = env.gw_json(&["doc", "create", "First"]);
    let second = env.gw_json(&["doc", "create", "Second"]);
    let first_id = first["id"].as_str().unwrap().to_string();
    assert_ne!(first_id, second["id"].as_str().unwrap());

    env.gw_json(&["doc", "open", &first_id]);
    let shown = env.gw_json(&["doc", "show"]);
    assert_eq!(shown["document"]["name"], "First");
}

#[test]
fn test_doc_update_metadata() {
    let env = TestEnv::init();
    env.gw_json(&["doc", "create", "Old Name"]);
    env.gw_json(&["doc", "update", "--name", "New Name", "--phase", "MVP"]);

    let shown = env.gw_json(&["doc", "show"]);
    assert_eq!(shown["document"]["name"], "New Name");
    assert_eq!(shown["document"]["phase"], "mvp");
}

#[test]
fn test_doc_update_secure_flag() {
    let env = TestEnv::init();
    env.gw_json(&["doc", "create", "Payments"]);
    env.gw_json(&["doc", "update", "--secure"]);
    let shown = env.gw_json(&["doc", "show"]);
    assert_eq!(shown["document"]["secure"], true);

    env.gw_json(&["doc", "update", "--no-secure"]);
    let shown = env.gw_json(&["doc", "show"]);
    assert_eq!(shown["document"]["secure"], false);
}

#[test]
fn test_doc_delete_clears_active() {
    let env = TestEnv::init();
    let created = env.gw_json(&["doc", "create", "Ephemeral"]);
    let id = created["id"].as_str().unwrap().to_string();

    let deleted = env.gw_json(&["doc", "delete", &id]);
    assert_eq!(deleted["deleted"], true);

    let list = env.gw_json(&["doc", "list"]);
    assert_eq!(list["count"], 0);

    env.gw()
        .args(["doc", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No active document"));
}

// === Set ===

#[test]
fn test_set_writes_scalar_field() {
    let env = TestEnv::init();
    env.gw_json(&["doc", "create", "Search"]);
    env.gw_json(&["set", "problem.statement", "Users cannot find things"]);

    let shown = env.gw_json(&["doc", "show"]);
    assert_eq!(
        shown["document"]["problem"]["statement"],
        "Users cannot find things"
    );
}

#[test]
fn test_set_append_concatenates() {
    let env = TestEnv::init();
    env.gw_json(&["doc", "create", "Search"]);
    env.gw_json(&["set", "notes", "first"]);
    env.gw_json(&["set", "notes", "second", "--append"]);

    let shown = env.gw_json(&["doc", "show"]);
    assert_eq!(shown["document"]["notes"], "first\n\nsecond");
}

#[test]
fn test_set_edge_notes_by_dotted_key() {
    let env = TestEnv::init();
    env.gw_json(&["doc", "create", "Search"]);
    env.gw_json(&["set", "edge.empty", "Show an empty illustration"]);

    let shown = env.gw_json(&["doc", "show"]);
    assert_eq!(
        shown["document"]["edge_cases"]["empty"]["notes"],
        "Show an empty illustration"
    );
}

#[test]
fn test_set_unknown_field_fails() {
    let env = TestEnv::init();
    env.gw_json(&["doc", "create", "Search"]);
    env.gw()
        .args(["set", "bogus.field", "value"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown field"));
}

#[test]
fn test_set_phase_validates() {
    let env = TestEnv::init();
    env.gw_json(&["doc", "create", "Search"]);
    env.gw_json(&["set", "phase", "V2"]);
    let shown = env.gw_json(&["doc", "show"]);
    assert_eq!(shown["document"]["phase"], "v2");

    env.gw()
        .args(["set", "phase", "Eventually"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid phase"));
}

// === Status ===

#[test]
fn test_status_reports_score_and_missing() {
    let env = TestEnv::init();
    env.gw_json(&["doc", "create", "Search"]);
    let status = env.gw_json(&["status"]);
    assert_eq!(status["score"], 0);
    assert_eq!(status["total"], 28);
    assert_eq!(status["missing"].as_array().unwrap().len(), 28);

    env.gw_json(&["set", "overview.feature", "Search"]);
    let status = env.gw_json(&["status"]);
    assert_eq!(status["filled"], 1);
    assert!(status["score"].as_u64().unwrap() > 0);
}

// === Default command ===

#[test]
fn test_default_command_lists_documents() {
    let env = TestEnv::init();
    env.gw_json(&["doc", "create", "Search"]);
    let result = env.gw_json(&[]);
    assert_eq!(result["count"], 1);
}

#[test]
fn test_default_command_uninitialized_hint() {
    let env = TestEnv::new();
    let result = env.gw_json(&[]);
    assert_eq!(result["initialized"], false);
}
