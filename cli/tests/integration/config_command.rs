//! Integration tests for `skinetic-bootstrap config`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn bootstrap_with_config(path: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("skinetic-bootstrap"));
    cmd.env("NO_COLOR", "1");
    cmd.env("SKINETIC_BOOTSTRAP_CONFIG", path);
    cmd
}

#[test]
fn test_config_path_honours_env_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.yaml");
    bootstrap_with_config(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.yaml"));
}

#[test]
fn test_config_show_defaults_without_file() {
    let dir = tempfile::tempdir().unwrap();
    bootstrap_with_config(&dir.path().join("missing.yaml"))
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("manager: apt-get"))
        .stdout(predicate::str::contains("rules_dir: /etc/udev/rules.d"));
}

#[test]
fn test_config_get_reads_file_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "packages:\n  manager: dnf\n").unwrap();
    bootstrap_with_config(&path)
        .args(["config", "get", "packages.manager"])
        .assert()
        .success()
        .stdout("dnf\n");
}

#[test]
fn test_config_get_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    bootstrap_with_config(&dir.path().join("missing.yaml"))
        .args(["config", "get", "sdk.mirror"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown setting: sdk.mirror"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "packages:\n  manager: pacman\n").unwrap();
    bootstrap_with_config(&path)
        .args(["config", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("pacman"));
}
