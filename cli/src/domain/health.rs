//! Health check domain types and pure diagnostic functions.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use serde::Serialize;

// ── Types ─────────────────────────────────────────────────────────────────────

/// All check categories returned by the doctor command.
#[derive(Debug, Serialize)]
pub struct DoctorChecks {
    /// Whether the process runs with effective uid 0.
    pub running_as_root: bool,
    /// Programs the provisioning run invokes.
    pub programs: Vec<ProgramCheck>,
    /// Installed udev rule.
    pub rule: RuleCheck,
    /// Skinetic devices currently attached.
    pub devices: Vec<DetectedDevice>,
}

/// Presence of one required program on `PATH`.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramCheck {
    pub name: String,
    pub found: bool,
}

/// State of the installed rule file.
#[derive(Debug, Clone, Serialize)]
pub struct RuleCheck {
    pub path: String,
    pub installed: bool,
    /// Whether the file matches the Skinetic vendor id.
    pub grants_vendor: bool,
}

/// One attached device found on the USB bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedDevice {
    pub product_id: String,
    pub name: String,
    /// Sysfs device directory name, e.g. `1-2`.
    pub bus_path: String,
}

// ── Pure functions ────────────────────────────────────────────────────────────

/// Collect actionable issues from check results.
///
/// A missing device is not an issue: the vest is usually unplugged while
/// the machine is being provisioned.
#[must_use]
pub fn collect_issues(checks: &DoctorChecks) -> Vec<String> {
    let mut issues: Vec<String> = checks
        .programs
        .iter()
        .filter(|p| !p.found)
        .map(|p| format!("{} is not installed", p.name))
        .collect();
    if !checks.rule.installed {
        issues.push(format!(
            "udev rule not installed at {}. Run 'skinetic-bootstrap install-skinetic-sdk'",
            checks.rule.path
        ));
    } else if !checks.rule.grants_vendor {
        issues.push(format!(
            "udev rule at {} does not match the Skinetic vendor id",
            checks.rule.path
        ));
    }
    issues
}

// ── Unit tests ────────────────────────────────────────────────────────────────
