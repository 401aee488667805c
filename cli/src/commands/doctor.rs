//! `skinetic-bootstrap doctor`: read-only diagnosis of the provisioned host.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::HostProbe;
use crate::application::services::doctor::run_doctor;
use crate::domain::collect_issues;

/// Run `skinetic-bootstrap doctor`.
///
/// Exits 1 when any issue is found.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the host cannot be
/// inspected.
pub fn run(app: &AppContext, host: &impl HostProbe) -> Result<ExitCode> {
    let config = app.load_config()?;
    let checks = run_doctor(&config, host)?;
    let issues = collect_issues(&checks);
    tracing::debug!(issues = issues.len(), devices = checks.devices.len(), "doctor finished");

    app.renderer().render_doctor(&checks, &issues)?;
    Ok(if issues.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
