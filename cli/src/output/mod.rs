//! Output formatting module

pub mod human;
pub mod json;
pub mod reporter;
pub mod styles;

use std::path::Path;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::domain::{BootstrapConfig, DoctorChecks, Escalation, Plan, StepId};

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `!` to stderr. Never suppressed:
    /// `--quiet` and `--json` silence progress, not warnings.
    pub fn warn(&self, msg: &str) {
        eprintln!("{}", self.warning_line(msg));
    }

    /// A warning as printed by [`OutputContext::warn`], without the newline.
    #[must_use]
    pub fn warning_line(&self, msg: &str) -> String {
        format!("  {} {msg}", "!".style(self.styles.warning))
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }
}

/// Dispatches rendering to the human or JSON renderer for the active mode.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// Render the ordered provisioning plan with resolved command lines.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_plan(&self, plan: &Plan, escalation: Escalation, is_root: bool) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_plan(plan, escalation, is_root);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_plan(plan, escalation, is_root),
        }
    }

    /// Render doctor check results and the issues derived from them.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_doctor(&self, checks: &DoctorChecks, issues: &[String]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_doctor(checks, issues);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_doctor(checks, issues),
        }
    }

    /// Render the generated udev rule.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_rules(&self, rule: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_rules(rule);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_rules(rule),
        }
    }

    /// Render the effective configuration and where it was loaded from.
    ///
    /// # Errors
    ///
    /// Returns an error if YAML or JSON serialization fails.
    pub fn render_config(&self, config: &BootstrapConfig, path: &Path) -> Result<()> {
        match self {
            Self::Human(r) => r.render_config(config, path),
            Self::Json(_) => JsonRenderer::render_config(config, path),
        }
    }

    /// Render the outcome of a successful run.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_run_summary(&self, completed: &[StepId], dry_run: bool) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_run_summary(completed, dry_run);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_run_summary(completed, dry_run),
        }
    }

    /// Render the resolved configuration file path.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config_path(&self, path: &Path) -> Result<()> {
        match self {
            Self::Human(_) => {
                println!("{}", path.display());
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_config_path(path),
        }
    }

    /// Render a single configuration value.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config_value(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::Human(_) => {
                println!("{value}");
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_config_value(key, value),
        }
    }

    /// Render the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_version(version),
        }
    }
}
