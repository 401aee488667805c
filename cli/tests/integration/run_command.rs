//! Integration tests for the provisioning targets, exercised as dry runs.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn dry_run(config: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("skinetic-bootstrap"));
    cmd.env("NO_COLOR", "1");
    cmd.env("SKINETIC_BOOTSTRAP_CONFIG", config);
    cmd.arg("--dry-run");
    cmd
}

#[test]
fn test_default_dry_run_walks_every_step() {
    let dir = tempfile::tempdir().unwrap();
    let out = dry_run(&dir.path().join("config.yaml")).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("[1/3] update"), "got:\n{stdout}");
    assert!(stdout.contains("[2/3] install_dev_tools"));
    assert!(stdout.contains("[3/3] install_skinetic_sdk"));
    assert!(stdout.contains("would run: fetch https://"));
}

#[test]
fn test_named_target_runs_only_that_step() {
    let dir = tempfile::tempdir().unwrap();
    dry_run(&dir.path().join("config.yaml"))
        .arg("install-dev-tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/1] install_dev_tools"))
        .stdout(predicate::str::contains("update").not());
}

#[test]
fn test_snake_case_alias_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    dry_run(&dir.path().join("config.yaml"))
        .arg("install_skinetic_sdk")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/1] install_skinetic_sdk"));
}

#[test]
fn test_dry_run_uses_configured_package_manager() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "packages:\n  manager: dnf\n  dev_tools: [git]\nprivilege:\n  escalation: none\n",
    )
    .unwrap();
    dry_run(&path)
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("would run: dnf makecache"))
        .stdout(predicate::str::contains("would run: dnf upgrade -y"));
}

#[test]
fn test_dry_run_json_reports_completed_steps() {
    let dir = tempfile::tempdir().unwrap();
    let out = dry_run(&dir.path().join("config.yaml"))
        .arg("--json")
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid JSON");
    assert_eq!(value["dry_run"], true);
    assert_eq!(value["completed"].as_array().unwrap().len(), 3);
}

#[test]
fn test_empty_dev_tools_list_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "packages:\n  dev_tools: []\n").unwrap();
    dry_run(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("empty command group"));
}

#[test]
fn test_json_run_keeps_child_output_off_stdout() {
    use std::os::unix::fs::PermissionsExt as _;

    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("bin");
    std::fs::create_dir(&bin).unwrap();
    let apt_get = bin.join("apt-get");
    std::fs::write(&apt_get, "#!/bin/sh\necho 'Reading package lists... Done'\n").unwrap();
    std::fs::set_permissions(&apt_get, std::fs::Permissions::from_mode(0o755)).unwrap();

    let config = dir.path().join("config.yaml");
    std::fs::write(&config, "privilege:\n  escalation: none\n").unwrap();
    let path = format!(
        "{}:{}",
        bin.display(),
        std::env::var("PATH").unwrap_or_default()
    );

    let out = Command::new(assert_cmd::cargo::cargo_bin!("skinetic-bootstrap"))
        .env("NO_COLOR", "1")
        .env("SKINETIC_BOOTSTRAP_CONFIG", &config)
        .env("PATH", path)
        .args(["--json", "update"])
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("stdout is JSON");
    assert_eq!(value["completed"], serde_json::json!(["update"]));
    assert_eq!(value["dry_run"], false);
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Reading package lists"), "got:\n{stderr}");
}
