#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn rolodex_cmd(data_dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("rolodex"));
    cmd.arg("--data-dir")
        .arg(data_dir)
        .env_remove("RUST_LOG")
        .env_remove("ROLODEX_DATA_FILE")
        .env_remove("ROLODEX_MAX_TYPOS")
        .env_remove("ROLODEX_TOKEN_ENV")
        .env_remove("ROLODEX_LOG");
    cmd
}

fn seed(dir: &Path) {
    fs::write(
        dir.join("records.json"),
        r#"[
  {"id": 1, "first_name": "John", "last_name": "Smith", "email": "john@example.com"},
  {"id": 2, "first_name": "Ann", "last_name": "Lee", "phone": "555-0100"},
  {"id": 3, "first_name": "Jane", "last_name": "Doe"}
]"#,
    )
    .unwrap();
}

#[test]
fn test_list_on_empty_data_dir() {
    let temp = TempDir::new().unwrap();
    rolodex_cmd(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No contacts found."));
}

#[test]
fn test_naked_invocation_lists() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());
    rolodex_cmd(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("John Smith"))
        .stdout(predicate::str::contains("Ann Lee"));
}

#[test]
fn test_search_with_typos() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());
    rolodex_cmd(temp.path())
        .args(["search", "smiht", "jhon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("John Smith"))
        .stdout(predicate::str::contains("Ann Lee").not());

    rolodex_cmd(temp.path())
        .args(["list", "--search", "xavier"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No records match \"xavier\""));
}

#[test]
fn test_add_show_edit_delete_workflow() {
    let temp = TempDir::new().unwrap();

    rolodex_cmd(temp.path())
        .args(["add", "--set", "first_name=Grace", "--set", "last_name=Hopper"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record created: Grace Hopper"));

    let content = fs::read_to_string(temp.path().join("records.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&content).unwrap();
    let id = stored[0]["id"].as_str().unwrap().to_string();
    assert_eq!(stored[0]["first_name"], "Grace");

    rolodex_cmd(temp.path())
        .args(["edit", &id, "--set", "email=grace@navy.mil"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record updated: Grace Hopper"));

    rolodex_cmd(temp.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("grace@navy.mil"));

    rolodex_cmd(temp.path())
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record deleted: Grace Hopper"));

    rolodex_cmd(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No contacts found."));
}

#[test]
fn test_rejected_add_exits_with_failure() {
    let temp = TempDir::new().unwrap();
    rolodex_cmd(temp.path())
        .args(["add", "--set", "last_name=Nobody"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("first_name can't be blank"));

    assert!(!temp.path().join("records.json").exists());
}

#[test]
fn test_show_unknown_id() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());
    rolodex_cmd(temp.path())
        .args(["show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record 42 not found locally"));
}

#[test]
fn test_edit_unset_field() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());
    rolodex_cmd(temp.path())
        .args(["edit", "2", "--unset", "phone"])
        .assert()
        .success();

    let content = fs::read_to_string(temp.path().join("records.json")).unwrap();
    assert!(!content.contains("555-0100"));
}

#[test]
fn test_id_cannot_be_unset_or_set() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());

    rolodex_cmd(temp.path())
        .args(["edit", "2", "--unset", "id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be changed"));

    rolodex_cmd(temp.path())
        .args(["edit", "2", "--set", "id=7"])
        .assert()
        .failure();

    let content = fs::read_to_string(temp.path().join("records.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(stored[1]["id"], 2);

    rolodex_cmd(temp.path())
        .args(["delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record deleted: Ann Lee"));
}

#[test]
fn test_corrupt_data_file_is_reported() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("records.json"), "{not json").unwrap();
    rolodex_cmd(temp.path())
        .arg("list")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Corrupt data file"));
}

#[test]
fn test_config_file_changes_search_fields() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());
    fs::write(
        temp.path().join("rolodex.toml"),
        "name_fields = [\"email\"]\n",
    )
    .unwrap();

    rolodex_cmd(temp.path())
        .args(["search", "john@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("John Smith"));

    rolodex_cmd(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"email\""));
}
