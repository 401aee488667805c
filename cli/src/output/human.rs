//! Human-readable terminal renderer.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize as _;

use crate::domain::health::DetectedDevice;
use crate::domain::udev::SKINETIC_VENDOR_ID;
use crate::domain::{BootstrapConfig, DoctorChecks, Escalation, Plan, ProvisioningStep, StepId};
use crate::infra::config::CONFIG_ENV;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("skinetic-bootstrap {version}");
    }

    /// Closing line of a successful run.
    pub fn render_run_summary(&self, completed: &[StepId], dry_run: bool) {
        if dry_run {
            self.ctx.success("Dry run finished. Nothing was changed.");
        } else if completed.contains(&StepId::InstallSkineticSdk) {
            self.ctx.success("Machine provisioned.");
            self.ctx
                .info("Reconnect the Skinetic device so the new udev rule applies.");
        } else {
            self.ctx.success(&format!(
                "{} step(s) completed.",
                completed.len()
            ));
        }
    }

    /// Render the plan, one numbered block per step.
    pub fn render_plan(&self, plan: &Plan, escalation: Escalation, is_root: bool) {
        println!();
        println!("  {}", "Provisioning plan".style(self.ctx.styles.header));
        println!();
        for (index, step) in plan.steps().iter().enumerate() {
            let marker = if step.requires_privilege() {
                " (privileged)"
            } else {
                ""
            };
            println!(
                "  {}. {}{}",
                index + 1,
                step.name().style(self.ctx.styles.bold),
                marker.style(self.ctx.styles.dim)
            );
            for line in action_lines(step, escalation, is_root) {
                println!("       {}", line.style(self.ctx.styles.dim));
            }
        }
        println!();
    }

    /// Render doctor health check results.
    pub fn render_doctor(&self, checks: &DoctorChecks, issues: &[String]) {
        println!();
        println!(
            "  {}",
            "Skinetic Environment Check".style(self.ctx.styles.header)
        );
        println!();

        println!("  Programs:");
        for program in &checks.programs {
            if program.found {
                self.print_check(true, &program.name);
            } else {
                self.print_check(false, &format!("{} not found on PATH", program.name));
            }
        }
        println!();

        println!("  udev rule:");
        if checks.rule.installed {
            self.print_check(true, &format!("{} installed", checks.rule.path));
            self.print_check(
                checks.rule.grants_vendor,
                &format!("matches vendor id {SKINETIC_VENDOR_ID}"),
            );
        } else {
            self.print_check(false, &format!("{} missing", checks.rule.path));
        }
        println!();

        println!("  Devices:");
        if checks.devices.is_empty() {
            println!(
                "    {} no Skinetic device attached",
                "!".style(self.ctx.styles.warning)
            );
        }
        for device in &checks.devices {
            self.print_check(true, &device_label(device));
        }

        println!();
        if issues.is_empty() {
            println!(
                "  {} Everything looks good!",
                "\u{2713}".style(self.ctx.styles.success)
            );
        } else {
            println!(
                "  {} {}",
                "\u{2717}".style(self.ctx.styles.error),
                issue_summary(issues.len())
            );
            println!();
            for issue in issues {
                println!("    {} {issue}", "\u{2717}".style(self.ctx.styles.error));
            }
        }
        println!();
    }

    /// Print the rule verbatim so it can be redirected into a file.
    pub fn render_rules(&self, rule: &str) {
        print!("{rule}");
    }

    /// Render the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be encoded as YAML.
    pub fn render_config(&self, config: &BootstrapConfig, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(config).context("YAML serialization failed")?;
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        for line in yaml.lines() {
            println!("  {line}");
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        println!(
            "    {:<28} {}",
            format!("{CONFIG_ENV}:"),
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| "(not set)".to_string())
        );
        println!(
            "    {:<28} {}",
            "NO_COLOR:",
            std::env::var("NO_COLOR").unwrap_or_else(|_| "(not set)".to_string())
        );
        println!(
            "    {:<28} {}",
            "RUST_LOG:",
            std::env::var("RUST_LOG").unwrap_or_else(|_| "(not set)".to_string())
        );
        println!();
        Ok(())
    }

    fn print_check(&self, ok: bool, msg: &str) {
        if ok {
            println!("    {} {msg}", "\u{2713}".style(self.ctx.styles.success));
        } else {
            println!("    {} {msg}", "\u{2717}".style(self.ctx.styles.error));
        }
    }
}

// ── Display helpers ───────────────────────────────────────────────────────────

/// Resolved command lines of a step, in execution order.
#[must_use]
pub fn action_lines(step: &ProvisioningStep, escalation: Escalation, is_root: bool) -> Vec<String> {
    step.actions()
        .iter()
        .map(|a| a.describe(escalation, is_root))
        .collect()
}

#[must_use]
pub fn device_label(device: &DetectedDevice) -> String {
    format!(
        "{} ({SKINETIC_VENDOR_ID}:{}) on bus {}",
        device.name, device.product_id, device.bus_path
    )
}

#[must_use]
pub fn issue_summary(count: usize) -> String {
    let noun = if count == 1 { "issue" } else { "issues" };
    format!("Found {count} {noun}.")
}
