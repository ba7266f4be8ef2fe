//! Integration tests for `evalbox history` and `evalbox theme`.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};

/// Writes a state file holding `entries` as (code, response) pairs.
fn write_history(dir: &TempDir, entries: &[(&str, &str)]) {
    let history: Vec<Value> = entries
        .iter()
        .map(|(code, response)| json!({"code": code, "response": response}))
        .collect();
    let state = json!({ "history": serde_json::to_string(&history).unwrap() });
    fs::write(
        dir.path().join("state.json"),
        serde_json::to_string_pretty(&state).unwrap(),
    )
    .unwrap();
}

fn read_history(home: &Path) -> Vec<(String, String)> {
    let state: Value =
        serde_json::from_str(&fs::read_to_string(home.join("state.json")).unwrap()).unwrap();
    let history: Vec<Value> = serde_json::from_str(state["history"].as_str().unwrap()).unwrap();
    history
        .into_iter()
        .map(|e| {
            (
                e["code"].as_str().unwrap().to_string(),
                e["response"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

#[test]
fn test_history_list_empty() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("evalbox")
        .env("EVALBOX_HOME", dir.path())
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No history entries."));
}

#[test]
fn test_history_list_and_show() {
    let dir = tempdir().unwrap();
    write_history(&dir, &[("a", "first"), ("b c", "Heslo je 42\nmore")]);

    cargo_bin_cmd!("evalbox")
        .env("EVALBOX_HOME", dir.path())
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1  first"))
        .stdout(predicate::str::contains("2  Heslo je 42"))
        .stdout(predicate::str::contains("more").not());

    cargo_bin_cmd!("evalbox")
        .env("EVALBOX_HOME", dir.path())
        .args(["history", "show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("b c"))
        .stdout(predicate::str::contains("Heslo je 42\nmore"));
}

#[test]
fn test_history_delete_keeps_order() {
    let dir = tempdir().unwrap();
    write_history(&dir, &[("a", "1"), ("b", "2"), ("c", "3")]);

    cargo_bin_cmd!("evalbox")
        .env("EVALBOX_HOME", dir.path())
        .args(["history", "delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted entry 2"));

    assert_eq!(
        read_history(dir.path()),
        vec![
            ("a".to_string(), "1".to_string()),
            ("c".to_string(), "3".to_string())
        ]
    );
}

#[test]
fn test_history_out_of_range_fails() {
    let dir = tempdir().unwrap();
    write_history(&dir, &[("a", "1")]);

    for index in ["0", "2"] {
        cargo_bin_cmd!("evalbox")
            .env("EVALBOX_HOME", dir.path())
            .args(["history", "show", index])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No history entry"));
    }
}

#[test]
fn test_history_clear_is_idempotent() {
    let dir = tempdir().unwrap();
    write_history(&dir, &[("a", "1"), ("b", "2")]);

    for expected in ["Cleared 2 history entries", "Cleared 0 history entries"] {
        cargo_bin_cmd!("evalbox")
            .env("EVALBOX_HOME", dir.path())
            .args(["history", "clear"])
            .assert()
            .success()
            .stdout(predicate::str::contains(expected));
    }
    assert!(read_history(dir.path()).is_empty());
}

#[test]
fn test_corrupt_state_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("state.json"), "{not json").unwrap();

    cargo_bin_cmd!("evalbox")
        .env("EVALBOX_HOME", dir.path())
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No history entries."));
}

#[test]
fn test_theme_toggle_persists() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("evalbox")
        .env("EVALBOX_HOME", dir.path())
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("light"));

    cargo_bin_cmd!("evalbox")
        .env("EVALBOX_HOME", dir.path())
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to dark mode"));

    cargo_bin_cmd!("evalbox")
        .env("EVALBOX_HOME", dir.path())
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));
}

#[test]
fn test_ephemeral_does_not_touch_state_file() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("evalbox")
        .env("EVALBOX_HOME", dir.path())
        .args(["--ephemeral", "theme", "toggle"])
        .assert()
        .success();

    assert!(!dir.path().join("state.json").exists());
}
