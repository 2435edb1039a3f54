//! Integration tests for assumption, question, and action item commands.

mod common;

use common::TestEnv;
use predicates::prelude::*;

fn env_with_doc() -> TestEnv {
    let env = TestEnv::init();
    env.gw_json(&["doc", "create", "Search"]);
    env
}

// === Assumptions ===

#[test]
fn test_assumption_add_and_list() {
    let env = env_with_doc();
    let added = env.gw_json(&["assumption", "add", "Users have modern browsers"]);
    let id = added["assumption"]["id"].as_str().unwrap();
    assert!(id.starts_with("gwa-"));
    assert_eq!(added["assumption"]["status"], "unvalidated");

    let list = env.gw_json(&["assumption", "list"]);
    assert_eq!(list["count"], 1);
    assert_eq!(list["assumptions"][0]["text"], "Users have modern browsers");
}

#[test]
fn test_assumption_add_with_status_and_tags() {
    let env = env_with_doc();
    let added = env.gw_json(&[
        "assumption",
        "add",
        "Latency under 100ms",
        "--status",
        "Needs Research",
        "--tag",
        "perf",
        "--tag",
        "perf",
    ]);
    assert_eq!(added["assumption"]["status"], "needs_research");
    // Tags deduplicate
    assert_eq!(added["assumption"]["tags"].as_array().unwrap().len(), 1);
}

#[test]
fn test_assumption_update_status() {
    let env = env_with_doc();
    let added = env.gw_json(&["assumption", "add", "Works offline"]);
    let id = added["assumption"]["id"].as_str().unwrap().to_string();

    let updated = env.gw_json(&["assumption", "update", &id, "--status", "Disproven"]);
    assert_eq!(updated["assumption"]["status"], "disproven");
}

#[test]
fn test_assumption_remove() {
    let env = env_with_doc();
    let added = env.gw_json(&["assumption", "add", "Temporary"]);
    let id = added["assumption"]["id"].as_str().unwrap().to_string();

    env.gw_json(&["assumption", "remove", &id]);
    let list = env.gw_json(&["assumption", "list"]);
    assert_eq!(list["count"], 0);
}

#[test]
fn test_assumption_rejects_bad_status() {
    let env = env_with_doc();
    env.gw()
        .args(["assumption", "add", "X", "--status", "Maybe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid status"));
}

// === Questions ===

#[test]
fn test_question_add_and_answer() {
    let env = env_with_doc();
    let added = env.gw_json(&[
        "question",
        "add",
        "Should images be dimmed?",
        "--kind",
        "Design",
    ]);
    let id = added["question"]["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("gwq-"));
    assert_eq!(added["question"]["kind"], "design");
    assert_eq!(added["question"]["status"], "open");

    let answered = env.gw_json(&["question", "answer", &id, "Yes, by 20%"]);
    assert_eq!(answered["question"]["status"], "answered");
    assert_eq!(answered["question"]["answer"], "Yes, by 20%");
}

#[test]
fn test_question_list_counts_open() {
    let env = env_with_doc();
    let first = env.gw_json(&["question", "add", "One?"]);
    env.gw_json(&["question", "add", "Two?"]);
    let id = first["question"]["id"].as_str().unwrap().to_string();
    env.gw_json(&["question", "answer", &id, "done"]);

    let list = env.gw_json(&["question", "list"]);
    assert_eq!(list["count"], 2);
    assert_eq!(list["open"], 1);
}

#[test]
fn test_question_reopen_clears_answer() {
    let env = env_with_doc();
    let added = env.gw_json(&["question", "add", "Why?"]);
    let id = added["question"]["id"].as_str().unwrap().to_string();
    env.gw_json(&["question", "answer", &id, "because"]);

    let updated = env.gw_json(&["question", "update", &id, "--reopen"]);
    assert_eq!(updated["question"]["status"], "open");
    assert_eq!(updated["question"]["answer"], "");
}

#[test]
fn test_question_dependency_flag() {
    let env = env_with_doc();
    let added = env.gw_json(&["question", "add", "Blocking?", "--dependency"]);
    assert_eq!(added["question"]["dependency"], true);
}

#[test]
fn test_question_remove_unknown_fails() {
    let env = env_with_doc();
    env.gw()
        .args(["question", "remove", "gwq-ffff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// === Actions ===

#[test]
fn test_action_add_check_uncheck() {
    let env = env_with_doc();
    let added = env.gw_json(&["action", "add", "Ship the prototype"]);
    let id = added["action"]["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("gwx-"));
    assert_eq!(added["action"]["completed"], false);

    let checked = env.gw_json(&["action", "check", &id, "--note", "done early"]);
    assert_eq!(checked["action"]["completed"], true);
    assert_eq!(checked["action"]["note"], "done early");

    let unchecked = env.gw_json(&["action", "uncheck", &id]);
    assert_eq!(unchecked["action"]["completed"], false);
}

#[test]
fn test_action_list_counts_completed() {
    let env = env_with_doc();
    let first = env.gw_json(&["action", "add", "one"]);
    env.gw_json(&["action", "add", "two"]);
    let id = first["action"]["id"].as_str().unwrap().to_string();
    env.gw_json(&["action", "check", &id]);

    let list = env.gw_json(&["action", "list"]);
    assert_eq!(list["count"], 2);
    assert_eq!(list["completed"], 1);
}

#[test]
fn test_action_remove() {
    let env = env_with_doc();
    let added = env.gw_json(&["action", "add", "temp"]);
    let id = added["action"]["id"].as_str().unwrap().to_string();
    env.gw_json(&["action", "remove", &id]);

    let list = env.gw_json(&["action", "list"]);
    assert_eq!(list["count"], 0);
}

// === Targeting by --doc ===

#[test]
fn test_collection_commands_target_explicit_doc() {
    let env = TestEnv::init();
    let first = env.gw_json(&["doc", "create", "First"]);
    env.gw_json(&["doc", "create", "Second"]);
    let first_id = first["id"].as_str().unwrap().to_string();

    // Active is "Second", but target "First" explicitly.
    env.gw_json(&["assumption", "add", "targeted", "--doc", &first_id]);

    let list = env.gw_json(&["assumption", "list", "--doc", &first_id]);
    assert_eq!(list["count"], 1);
    let active_list = env.gw_json(&["assumption", "list"]);
    assert_eq!(active_list["count"], 0);
}
