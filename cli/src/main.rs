//! skinetic-bootstrap - provision a Linux machine for Skinetic SDK development

use std::process::ExitCode;

use clap::Parser;
use skinetic_bootstrap::cli::{Cli, exit_code_for, report_error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            report_error(&e, json);
            ExitCode::from(exit_code_for(&e))
        }
    }
}
