//! End-to-end checks for commands that need no network or models.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bizcard() -> Command {
    let mut cmd = Command::cargo_bin("bizcard").unwrap();
    cmd.env_remove("BIZCARD_API_TOKEN")
        .env_remove("BIZCARD_COLLECTION_ID");
    cmd
}

fn init_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.json");
    bizcard()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();
    path
}

#[test]
fn test_help_lists_commands() {
    bizcard()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("scan")
                .and(predicate::str::contains("save"))
                .and(predicate::str::contains("list"))
                .and(predicate::str::contains("verify"))
                .and(predicate::str::contains("config")),
        );
}

#[test]
fn test_config_init_writes_defaults() {
    let dir = TempDir::new().unwrap();
    let path = init_config(dir.path());

    let content = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["store"]["api_version"], "2022-06-28");
    assert_eq!(json["properties"]["name"], "名前");
}

#[test]
fn test_config_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = init_config(dir.path());

    bizcard()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    bizcard()
        .args(["config", "init", "--force", "--output"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn test_config_path_honors_flag() {
    let dir = TempDir::new().unwrap();
    let path = init_config(dir.path());

    bizcard()
        .arg("-c")
        .arg(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(path.display().to_string()))
        .stdout(predicate::str::contains("exists"));
}

#[test]
fn test_config_show_masks_token() {
    let dir = TempDir::new().unwrap();
    let path = init_config(dir.path());

    bizcard()
        .env("BIZCARD_API_TOKEN", "secret-token-value")
        .arg("-c")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("secret-token-value").not());
}

#[test]
fn test_save_requires_token() {
    let dir = TempDir::new().unwrap();
    let path = init_config(dir.path());

    bizcard()
        .arg("-c")
        .arg(&path)
        .args(["save", "--name", "Taro Yamada"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("BIZCARD_API_TOKEN"));
}

#[test]
fn test_save_requires_fields() {
    let dir = TempDir::new().unwrap();
    let path = init_config(dir.path());

    bizcard()
        .arg("-c")
        .arg(&path)
        .arg("save")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to save"));
}

#[test]
fn test_verify_requires_collection_id() {
    let dir = TempDir::new().unwrap();
    let path = init_config(dir.path());

    bizcard()
        .env("BIZCARD_API_TOKEN", "secret")
        .arg("-c")
        .arg(&path)
        .arg("verify")
        .assert()
        .failure()
        .stderr(predicate::str::contains("BIZCARD_COLLECTION_ID"));
}

#[test]
fn test_scan_missing_image() {
    let dir = TempDir::new().unwrap();
    let path = init_config(dir.path());

    bizcard()
        .arg("-c")
        .arg(&path)
        .arg("scan")
        .arg(dir.path().join("missing.jpg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();

    bizcard()
        .arg("-c")
        .arg(dir.path().join("nope.json"))
        .arg("verify")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}
