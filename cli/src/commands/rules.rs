//! `skinetic-bootstrap rules`: print a udev rule for every known Skinetic device.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::domain::udev::render_rule;

/// Run `skinetic-bootstrap rules`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    app.renderer().render_rules(&render_rule())?;
    Ok(ExitCode::SUCCESS)
}
