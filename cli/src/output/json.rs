//! JSON output for `--json` code paths.
//!
//! Every document is pretty-printed to stdout. Failures render through
//! [`format_error`] instead.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::domain::udev::{SKINETIC_PRODUCTS, SKINETIC_VENDOR_ID};
use crate::domain::{BootstrapConfig, DoctorChecks, Escalation, Plan, StepId};

/// Renders domain types as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_plan(plan: &Plan, escalation: Escalation, is_root: bool) -> Result<()> {
        emit(&plan_document(plan, escalation, is_root))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_doctor(checks: &DoctorChecks, issues: &[String]) -> Result<()> {
        let checks = serde_json::to_value(checks).context("JSON serialization failed")?;
        let status = if issues.is_empty() {
            "healthy"
        } else {
            "unhealthy"
        };
        emit(&json!({
            "status": status,
            "checks": checks,
            "issues": issues,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_rules(rule: &str) -> Result<()> {
        emit(&json!({
            "vendor_id": SKINETIC_VENDOR_ID,
            "products": SKINETIC_PRODUCTS,
            "rule": rule,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(config: &BootstrapConfig, path: &Path) -> Result<()> {
        emit(&json!({
            "path": path.display().to_string(),
            "config": config,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_run_summary(completed: &[StepId], dry_run: bool) -> Result<()> {
        emit(&json!({ "completed": completed, "dry_run": dry_run }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config_path(path: &Path) -> Result<()> {
        emit(&json!({ "path": path.display().to_string() }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config_value(key: &str, value: &str) -> Result<()> {
        emit(&json!({ "key": key, "value": value }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(version: &str) -> Result<()> {
        emit(&json!({ "version": version }))
    }
}

/// Plan as a JSON document with escalation already applied to each command.
#[must_use]
pub fn plan_document(plan: &Plan, escalation: Escalation, is_root: bool) -> Value {
    let steps: Vec<Value> = plan
        .steps()
        .iter()
        .map(|step| {
            json!({
                "name": step.name(),
                "requires_privilege": step.requires_privilege(),
                "actions": step
                    .actions()
                    .iter()
                    .map(|a| a.describe(escalation, is_root))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();
    json!({ "steps": steps })
}

fn emit(value: &Value) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{out}");
    Ok(())
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
