//! `skinetic-bootstrap config`: inspect the effective configuration.

use anyhow::Result;
use clap::Subcommand;
use std::process::ExitCode;

use crate::app::AppContext;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Print a single value (e.g. sdk.url)
    Get {
        /// Dotted configuration key
        key: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the key is
/// unknown.
pub fn run(app: &AppContext, cmd: &ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => {
            let config = app.load_config()?;
            let path = app.config_path()?;
            app.renderer().render_config(&config, &path)?;
        }
        ConfigCommand::Path => {
            app.renderer().render_config_path(&app.config_path()?)?;
        }
        ConfigCommand::Get { key } => {
            let value = app.load_config()?.get(key)?;
            app.renderer().render_config_value(key, &value)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
