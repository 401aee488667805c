//! Integration tests for argument parsing and read-only commands.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn bootstrap() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("skinetic-bootstrap"));
    cmd.env("NO_COLOR", "1");
    cmd.env("SKINETIC_BOOTSTRAP_CONFIG", "/nonexistent/skinetic/config.yaml");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_help_lists_named_targets() {
    bootstrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("install-dev-tools"))
        .stdout(predicate::str::contains("install-skinetic-sdk"));
}

#[test]
fn test_version_flag_shows_version() {
    bootstrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("skinetic-bootstrap"));
}

#[test]
fn test_version_command_shows_version() {
    bootstrap()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "skinetic-bootstrap {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let out = bootstrap().args(["version", "--json"]).output().unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid JSON");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}

// --- Argument errors ---

#[test]
fn test_unknown_target_exits_2() {
    bootstrap()
        .arg("install-everything")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_plan_unknown_step_exits_1() {
    bootstrap()
        .args(["plan", "reboot"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown step: reboot"));
}

// --- plan ---

#[test]
fn test_plan_lists_steps_in_order() {
    let out = bootstrap().arg("plan").output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let update = stdout.find("update").expect("update listed");
    let tools = stdout.find("install_dev_tools").expect("dev tools listed");
    let sdk = stdout.find("install_skinetic_sdk").expect("sdk listed");
    assert!(update < tools && tools < sdk, "got:\n{stdout}");
    assert!(stdout.contains("systemctl restart udev"));
}

#[test]
fn test_plan_json_lists_steps() {
    let out = bootstrap().args(["plan", "--json"]).output().unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid JSON");
    let names: Vec<&str> = value["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["update", "install_dev_tools", "install_skinetic_sdk"]);
}

#[test]
fn test_plan_single_step_accepts_snake_case() {
    let out = bootstrap()
        .args(["plan", "install_skinetic_sdk", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["steps"].as_array().unwrap().len(), 1);
    assert_eq!(value["steps"][0]["name"], "install_skinetic_sdk");
}

// --- rules ---

#[test]
fn test_rules_prints_vendor_rule() {
    bootstrap()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"ATTRS{idVendor}=="34a8""#))
        .stdout(predicate::str::contains(r#"ATTRS{idProduct}=="0110""#))
        .stdout(predicate::str::contains(r#"MODE="0666""#));
}

#[test]
fn test_rules_json_lists_products() {
    let out = bootstrap().args(["rules", "--json"]).output().unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["vendor_id"], "34a8");
    assert_eq!(value["products"].as_array().unwrap().len(), 3);
}

// --- doctor ---

#[test]
fn test_doctor_json_is_valid_whatever_the_host() {
    let out = bootstrap().args(["doctor", "--json"]).output().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid JSON");
    let healthy = value["status"] == "healthy";
    assert_eq!(out.status.success(), healthy);
    assert!(value["checks"]["programs"].is_array());
}
