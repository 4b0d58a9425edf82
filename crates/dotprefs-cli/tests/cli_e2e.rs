#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

const DEFAULTS: &str = r#"{"window":{"width":600,"height":300}}"#;

fn prefs_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("dotprefs"));
    cmd.env("DOTPREFS_DIR", dir.path().as_os_str())
        .env_remove("LOG_LEVEL")
        .args(["--file-name", "config.js", "--defaults", DEFAULTS]);
    cmd
}

/// Same backing file, no defaults.
fn bare_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("dotprefs"));
    cmd.env("DOTPREFS_DIR", dir.path().as_os_str())
        .env_remove("LOG_LEVEL")
        .args(["--file-name", "config.js"]);
    cmd
}

fn on_disk(dir: &TempDir) -> Value {
    serde_json::from_str(&fs::read_to_string(dir.path().join("config.js")).unwrap()).unwrap()
}

#[test]
fn test_full_workflow() {
    let temp = TempDir::new().unwrap();

    // 1. Defaults are visible through prefix lookups
    prefs_cmd(&temp)
        .args(["get", "window"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"width\": 600"))
        .stdout(predicate::str::contains("\"height\": 300"));

    // 2. Nothing is written by reads
    assert!(!temp.path().join("config.js").exists());

    // 3. Set values
    prefs_cmd(&temp)
        .args(["set", "window.width", "700"])
        .assert()
        .success()
        .stdout("");
    prefs_cmd(&temp)
        .args(["set", "foo", "bar"])
        .assert()
        .success();

    assert_eq!(
        on_disk(&temp),
        json!({ "window.width": 700, "window.height": 300, "foo": "bar" })
    );

    // 4. Read back
    prefs_cmd(&temp)
        .args(["get", "window.width"])
        .assert()
        .success()
        .stdout("700\n");
    prefs_cmd(&temp)
        .args(["size"])
        .assert()
        .success()
        .stdout("3\n");

    // 5. Delete
    prefs_cmd(&temp)
        .args(["rm", "foo"])
        .assert()
        .success();
    prefs_cmd(&temp)
        .args(["has", "foo"])
        .assert()
        .success()
        .stdout("false\n");

    // 6. Clear
    prefs_cmd(&temp).args(["clear"]).assert().success();
    assert_eq!(on_disk(&temp), json!({}));
    // The file is empty, so a store opened with defaults starts from them again.
    prefs_cmd(&temp)
        .args(["size"])
        .assert()
        .success()
        .stdout("2\n");
    bare_cmd(&temp)
        .args(["size"])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_get_missing_key_fails() {
    let temp = TempDir::new().unwrap();
    prefs_cmd(&temp)
        .args(["get", "window."])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: No value stored at 'window.'"));
}

#[test]
fn test_list_json_keeps_insertion_order() {
    let temp = TempDir::new().unwrap();
    prefs_cmd(&temp).args(["set", "foo", "bar"]).assert().success();

    prefs_cmd(&temp)
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout("{\n  \"window.width\": 600,\n  \"window.height\": 300,\n  \"foo\": \"bar\"\n}\n");
}

#[test]
fn test_list_lines() {
    let temp = TempDir::new().unwrap();
    prefs_cmd(&temp)
        .args(["ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("window.width = 600"))
        .stdout(predicate::str::contains("window.height = 300"));
}

#[test]
fn test_path_command() {
    let temp = TempDir::new().unwrap();
    let expected = temp.path().join("config.js");
    prefs_cmd(&temp)
        .args(["path"])
        .assert()
        .success()
        .stdout(format!("{}\n", expected.display()));
}

#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("config.js"), "garbage").unwrap();

    prefs_cmd(&temp)
        .args(["get", "window.height"])
        .assert()
        .success()
        .stdout("300\n")
        .stderr(predicate::str::contains("Ignoring unreadable preferences"));
}

#[test]
fn test_invalid_defaults_rejected() {
    let temp = TempDir::new().unwrap();
    Command::new(cargo_bin("dotprefs"))
        .env("DOTPREFS_DIR", temp.path().as_os_str())
        .args(["--defaults", "[1,2]", "size"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("defaults must be a JSON object"));
}
