//! Application service: the bootstrap runner.
//!
//! Executes a [`Plan`] strictly in order. The first failing action aborts the
//! run; nothing after it is attempted and nothing before it is rolled back.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, Downloader, FileHasher, ProgressReporter};
use crate::domain::error::BootstrapError;
use crate::domain::plan::Plan;
use crate::domain::step::{Action, Escalation, FetchSpec, Invocation, ProvisioningStep, StepId};

/// How invocations are resolved and whether they run at all.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub escalation: Escalation,
    /// Effective uid is 0; escalation is skipped.
    pub is_root: bool,
    /// Report every action without executing it.
    pub dry_run: bool,
}

/// Outcome of a successful run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Steps that completed, in execution order.
    pub completed: Vec<StepId>,
}

/// Port bundle the runner drives.
pub struct Executors<'a, R, D, H> {
    pub runner: &'a R,
    pub downloader: &'a D,
    pub hasher: &'a H,
}

/// Execute every step of `plan` in order.
///
/// # Errors
///
/// Returns [`BootstrapError::StepFailed`] for the first invocation that
/// exits non-zero, [`BootstrapError::FetchFailed`] or
/// [`BootstrapError::ChecksumMismatch`] for a failed download, or a plain
/// error when a program cannot be started. Later steps are never attempted.
pub async fn run_plan<R, D, H>(
    plan: &Plan,
    exec: &Executors<'_, R, D, H>,
    reporter: &impl ProgressReporter,
    opts: RunOptions,
) -> Result<RunReport>
where
    R: CommandRunner,
    D: Downloader,
    H: FileHasher,
{
    let total = plan.steps().len();
    let mut report = RunReport::default();

    for (index, step) in plan.steps().iter().enumerate() {
        reporter.step(&format!("[{}/{total}] {}", index + 1, step.name()));
        tracing::info!(step = step.name(), privileged = step.requires_privilege(), "starting step");

        run_step(step, exec, reporter, opts).await?;

        reporter.success(&format!("{} complete", step.name()));
        report.completed.push(step.id());
    }

    Ok(report)
}

async fn run_step<R, D, H>(
    step: &ProvisioningStep,
    exec: &Executors<'_, R, D, H>,
    reporter: &impl ProgressReporter,
    opts: RunOptions,
) -> Result<()>
where
    R: CommandRunner,
    D: Downloader,
    H: FileHasher,
{
    for action in step.actions() {
        if opts.dry_run {
            reporter.step(&format!(
                "would run: {}",
                action.describe(opts.escalation, opts.is_root)
            ));
            continue;
        }
        match action {
            Action::Run(inv) => run_invocation(step.name(), inv, exec.runner, opts).await?,
            Action::Fetch(spec) => fetch(step.name(), spec, exec, reporter)?,
        }
    }
    Ok(())
}

async fn run_invocation(
    step: &str,
    inv: &Invocation,
    runner: &impl CommandRunner,
    opts: RunOptions,
) -> Result<()> {
    let (program, args) = inv.resolve(opts.escalation, opts.is_root);
    let command = inv.command_line(opts.escalation, opts.is_root);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

    tracing::debug!(step, %command, "running");
    let status = runner
        .run_status(&program, &arg_refs)
        .await
        .with_context(|| format!("step '{step}': cannot run `{command}`"))?;

    if !status.success() {
        return Err(BootstrapError::StepFailed {
            step: step.to_string(),
            command,
            code: status.code().unwrap_or(-1),
        }
        .into());
    }
    Ok(())
}

fn fetch<R, D, H>(
    step: &str,
    spec: &FetchSpec,
    exec: &Executors<'_, R, D, H>,
    reporter: &impl ProgressReporter,
) -> Result<()>
where
    D: Downloader,
    H: FileHasher,
{
    let dest: &Path = &spec.dest;
    let downloaded = exec
        .downloader
        .download(&spec.url, dest)
        .map_err(|e| BootstrapError::FetchFailed {
            step: step.to_string(),
            url: spec.url.clone(),
            reason: format!("{e:#}"),
        })?;
    tracing::info!(url = %spec.url, bytes = downloaded.bytes, "downloaded");

    let actual = match exec.hasher.sha256_file(dest) {
        Ok(digest) => digest,
        Err(e) => {
            if let Err(discard) = exec.downloader.discard(dest) {
                tracing::warn!(error = %discard, path = %dest.display(), "cannot remove archive");
            }
            return Err(e.context(format!("hashing {}", dest.display())));
        }
    };

    match spec.sha256.as_deref() {
        Some(expected) if expected != actual => {
            exec.downloader
                .discard(dest)
                .with_context(|| format!("removing {}", dest.display()))?;
            Err(BootstrapError::ChecksumMismatch {
                expected: expected.to_string(),
                actual,
            }
            .into())
        }
        Some(_) => {
            reporter.success(&format!("checksum verified ({actual})"));
            Ok(())
        }
        None => {
            reporter.warn(&format!(
                "archive is unverified; pin sdk.sha256: {actual} to enforce it"
            ));
            Ok(())
        }
    }
}
