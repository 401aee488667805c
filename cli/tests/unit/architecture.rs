//! Structural tests for layer boundary enforcement.
//!
//! These tests scan source files so the domain and application layers stay
//! free of infrastructure and presentation imports.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Read a file and strip comment lines to avoid false positives.
fn read_non_comment_lines(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .lines()
        .filter(|l| {
            let trimmed = l.trim();
            !trimmed.starts_with("//") && !trimmed.starts_with("/*") && !trimmed.starts_with('*')
        })
        .map(String::from)
        .collect()
}

/// Report every non-comment line under `src/<layer>` containing a forbidden needle.
fn forbidden_in(layer: &[&str], needles: &[&str]) -> Vec<String> {
    let mut dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    for part in layer {
        dir = dir.join(part);
    }
    let mut violations = Vec::new();
    for file in collect_rs_files(&dir) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();
        for (i, line) in read_non_comment_lines(&file).iter().enumerate() {
            for needle in needles {
                if line.contains(needle) {
                    violations.push(format!("{rel}:{}: `{needle}` in: {line}", i + 1));
                }
            }
        }
    }
    violations
}

#[test]
fn domain_has_no_io_or_outer_layer_imports() {
    let violations = forbidden_in(
        &["domain"],
        &[
            "crate::infra",
            "crate::application",
            "crate::commands",
            "crate::output",
            "tokio::",
            "std::fs",
            "std::process",
            "std::net",
        ],
    );
    assert!(
        violations.is_empty(),
        "domain/ must stay pure:\n{}",
        violations.join("\n")
    );
}

#[test]
fn application_does_not_reach_into_infra_or_output() {
    let violations = forbidden_in(
        &["application"],
        &["crate::infra", "crate::output", "crate::commands", "std::fs"],
    );
    assert!(
        violations.is_empty(),
        "application/ must only use domain types and ports:\n{}",
        violations.join("\n")
    );
}

#[test]
fn no_inline_json_branching_in_commands() {
    let violations = forbidden_in(
        &["commands"],
        &["json: bool", "if json", "if !json", "is_json()", "serde_json::"],
    );
    assert!(
        violations.is_empty(),
        "Found inline JSON handling in commands/, use app.renderer() instead:\n{}",
        violations.join("\n")
    );
}

#[test]
fn services_are_generic_over_ports() {
    let violations = forbidden_in(
        &["application", "services"],
        &["TokioCommandRunner", "UreqDownloader", "SystemHost", "LocalFs"],
    );
    assert!(
        violations.is_empty(),
        "Found concrete infra types in services, use trait bounds instead:\n{}",
        violations.join("\n")
    );
}
