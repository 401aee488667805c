//! Application service: read-only host diagnosis.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::HostProbe;
use crate::domain::BootstrapConfig;
use crate::domain::health::{DoctorChecks, ProgramCheck, RuleCheck};
use crate::domain::step::Escalation;
use crate::domain::udev::rule_grants_vendor;

/// Programs a full run invokes, escalation program excluded.
#[must_use]
pub fn required_programs(config: &BootstrapConfig, is_root: bool) -> Vec<String> {
    let mut programs = vec![
        config.packages.manager.clone(),
        "unzip".to_string(),
        "systemctl".to_string(),
    ];
    if !is_root
        && let Some(esc) = Escalation::from_config(&config.privilege.escalation).program()
    {
        programs.push(esc.to_string());
    }
    programs
}

/// Gather every doctor check without mutating the host.
///
/// # Errors
///
/// Returns an error if the rule file exists but cannot be read, or the USB
/// device tree cannot be listed.
pub fn run_doctor(config: &BootstrapConfig, host: &impl HostProbe) -> Result<DoctorChecks> {
    let running_as_root = host.is_root();

    let programs = required_programs(config, running_as_root)
        .into_iter()
        .map(|name| {
            let found = host.has_program(&name);
            ProgramCheck { name, found }
        })
        .collect();

    let rule_path = Path::new(&config.udev.rules_dir).join(config.sdk.rule_file_name());
    let content = host
        .read_file(&rule_path)
        .with_context(|| format!("reading {}", rule_path.display()))?;
    let rule = RuleCheck {
        path: rule_path.display().to_string(),
        installed: content.is_some(),
        grants_vendor: content.as_deref().is_some_and(rule_grants_vendor),
    };

    let devices = host
        .skinetic_devices()
        .context("listing USB devices")?;

    Ok(DoctorChecks {
        running_as_root,
        programs,
        rule,
        devices,
    })
}
