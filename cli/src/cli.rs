//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;
use crate::domain::{BootstrapError, StepId, Target};
use crate::infra::host::SystemHost;
use crate::output::json::format_error;

/// Provision a Linux machine for Skinetic SDK development.
///
/// Without a subcommand every step runs in order: update,
/// install-dev-tools, install-skinetic-sdk.
#[derive(Parser)]
#[command(name = "skinetic-bootstrap", version, propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print every command instead of executing it
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Update system packages
    Update,

    /// Install developer utilities (git, curl, unzip, ...)
    #[command(alias = "install_dev_tools")]
    InstallDevTools,

    /// Download the Skinetic SDK and register its udev rule
    #[command(alias = "install_skinetic_sdk")]
    InstallSkineticSdk,

    /// Show the steps that would run
    Plan(commands::plan::PlanArgs),

    /// Diagnose the provisioned host
    Doctor,

    /// Print a udev rule for known Skinetic devices
    Rules,

    /// Inspect configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            dry_run,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { dry_run },
        });

        match command {
            None => commands::run::run(&app, Target::All).await,
            Some(Command::Update) => commands::run::run(&app, Target::Only(StepId::Update)).await,
            Some(Command::InstallDevTools) => {
                commands::run::run(&app, Target::Only(StepId::InstallDevTools)).await
            }
            Some(Command::InstallSkineticSdk) => {
                commands::run::run(&app, Target::Only(StepId::InstallSkineticSdk)).await
            }
            Some(Command::Plan(args)) => commands::plan::run(&app, &args),
            Some(Command::Doctor) => commands::doctor::run(&app, &SystemHost::new()),
            Some(Command::Rules) => commands::rules::run(&app),
            Some(Command::Config(cmd)) => commands::config::run(&app, &cmd),
            Some(Command::Version) => commands::version::run(&app),
        }
    }
}

/// Process exit code for a failed command.
///
/// A step whose command exited non-zero surfaces that code; everything
/// else exits 1.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<BootstrapError>()
        .map_or(1, BootstrapError::exit_code)
        .try_into()
        .unwrap_or(1)
}

/// Print `err` to the terminal, or as a JSON error object in `--json` mode.
pub fn report_error(err: &anyhow::Error, json: bool) {
    if json {
        let code = err
            .downcast_ref::<BootstrapError>()
            .map_or("error", BootstrapError::code);
        match format_error(&format!("{err:#}"), code) {
            Ok(out) => {
                println!("{out}");
                return;
            }
            Err(e) => tracing::warn!(error = %e, "cannot render JSON error"),
        }
    }
    eprintln!("Error: {err:#}");
}
