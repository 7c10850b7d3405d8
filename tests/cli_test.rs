//! Integration tests for the tiercache binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Temp workspace with an empty config file and a JSON source.
struct Workspace {
    temp: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.yml"), "").unwrap();
        fs::write(
            temp.path().join("widgets.json"),
            r#"[{"id": 1, "name": "sprocket"}, {"id": 2, "name": "flange"}]"#,
        )
        .unwrap();
        Self { temp }
    }

    fn root(&self) -> std::path::PathBuf {
        self.temp.path().join("cache")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("tiercache"));
        cmd.env_remove("TIERCACHE_ROOT")
            .env_remove("TIERCACHE_IGNORE_CORRUPTION")
            .arg("--config")
            .arg(self.temp.path().join("config.yml"))
            .arg("--root")
            .arg(self.root());
        cmd
    }
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("tiercache"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Two-tier"));
    Ok(())
}

#[test]
fn cli_load_cold_then_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::new();

    ws.cmd()
        .args(["load", "widgets", "--from"])
        .arg(ws.temp.path().join("widgets.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 2 items for 'widgets' from source"));

    assert!(ws.root().join("widgets").exists());

    ws.cmd()
        .args(["load", "widgets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from file"));
    Ok(())
}

#[test]
fn cli_load_cold_without_source_fails() -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::new();

    ws.cmd()
        .args(["load", "widgets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no --from source"));
    Ok(())
}

#[test]
fn cli_invalidate_removes_file() -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::new();

    ws.cmd()
        .args(["load", "widgets", "--from"])
        .arg(ws.temp.path().join("widgets.json"))
        .assert()
        .success();

    ws.cmd()
        .args(["invalidate", "widgets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalidated 'widgets'"));

    assert!(!ws.root().join("widgets").exists());
    Ok(())
}

#[test]
fn cli_list_and_show() -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::new();

    ws.cmd()
        .args(["load", "widgets", "--from"])
        .arg(ws.temp.path().join("widgets.json"))
        .assert()
        .success();

    ws.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 cached files"))
        .stdout(predicate::str::contains("widgets"));

    ws.cmd()
        .args(["show", "widgets"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("---"))
        .stdout(predicate::str::contains("name: sprocket"));
    Ok(())
}

#[test]
fn cli_clear_removes_every_file() -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::new();

    ws.cmd()
        .args(["load", "widgets", "--from"])
        .arg(ws.temp.path().join("widgets.json"))
        .assert()
        .success();

    ws.cmd()
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 cached files"));

    assert!(!ws.root().join("widgets").exists());
    Ok(())
}

#[test]
fn cli_show_missing_exits_nonzero() -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::new();

    ws.cmd()
        .args(["show", "nothing"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("No cached file"));
    Ok(())
}

#[test]
fn cli_strict_load_rejects_corrupt_file() -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::new();
    fs::create_dir_all(ws.root())?;
    fs::write(ws.root().join("widgets"), "- [broken")?;

    ws.cmd()
        .args(["load", "widgets", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Corrupted cache file"));

    assert_eq!(fs::read_to_string(ws.root().join("widgets"))?, "- [broken");
    Ok(())
}

#[test]
fn cli_rejects_path_like_name() -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::new();

    ws.cmd()
        .args(["invalidate", "../config.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid cache name"));

    assert!(ws.temp.path().join("config.yml").exists());
    Ok(())
}
