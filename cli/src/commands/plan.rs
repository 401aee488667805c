//! `skinetic-bootstrap plan`: show the ordered steps without running them.

use anyhow::Result;
use clap::Args;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::domain::{Escalation, Plan, StepId, Target};
use crate::infra::host::is_effective_root;

/// Arguments for the plan command.
#[derive(Args)]
pub struct PlanArgs {
    /// Show a single step (update, install-dev-tools, install-skinetic-sdk)
    pub step: Option<String>,
}

/// Run `skinetic-bootstrap plan`.
///
/// # Errors
///
/// Returns an error for an unknown step name or an invalid configuration.
pub fn run(app: &AppContext, args: &PlanArgs) -> Result<ExitCode> {
    let target = match &args.step {
        Some(name) => Target::Only(name.parse::<StepId>()?),
        None => Target::All,
    };
    let config = app.load_config()?;
    let plan = Plan::for_target(&config, target)?;
    let escalation = Escalation::from_config(&config.privilege.escalation);
    app.renderer()
        .render_plan(&plan, escalation, is_effective_root())?;
    Ok(ExitCode::SUCCESS)
}
