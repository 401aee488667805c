//! `skinetic-bootstrap [update|install-dev-tools|install-skinetic-sdk]`: run
//! the provisioning plan.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::services::bootstrap::{self, Executors, RunOptions};
use crate::domain::{Escalation, Plan, Target};
use crate::infra::download::UreqDownloader;
use crate::infra::fs::LocalFs;
use crate::infra::host::is_effective_root;
use crate::output::TerminalReporter;

/// Run every step of `target` in order.
///
/// # Errors
///
/// Returns the first step failure (see `BootstrapError`), or an error if the
/// configuration is invalid.
pub async fn run(app: &AppContext, target: Target) -> Result<ExitCode> {
    let config = app.load_config()?;
    let plan = Plan::for_target(&config, target)?;
    let opts = RunOptions {
        escalation: Escalation::from_config(&config.privilege.escalation),
        is_root: is_effective_root(),
        dry_run: app.dry_run,
    };
    tracing::info!(?target, is_root = opts.is_root, dry_run = opts.dry_run, "bootstrap");

    if opts.dry_run {
        app.output.info("Dry run: nothing will be executed.");
    }
    if opts.escalation == Escalation::None && !opts.is_root {
        app.output
            .warn("privilege.escalation is 'none' and not running as root; privileged steps may fail");
    }

    let runner = app.command_runner();
    let downloader = UreqDownloader::new(!app.output.show_progress());
    let exec = Executors {
        runner: &runner,
        downloader: &downloader,
        hasher: &LocalFs,
    };
    let reporter = TerminalReporter::new(&app.output);

    let report = bootstrap::run_plan(&plan, &exec, &reporter, opts).await?;
    app.renderer()
        .render_run_summary(&report.completed, opts.dry_run)?;
    Ok(ExitCode::SUCCESS)
}
