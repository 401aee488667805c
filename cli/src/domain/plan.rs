//! Building the ordered provisioning plan from configuration.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::config::BootstrapConfig;
use crate::domain::error::PlanError;
use crate::domain::step::{Action, FetchSpec, Invocation, ProvisioningStep, StepId};

/// Which part of the plan a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The default invocation: every step in order.
    All,
    /// A single named sub-target.
    Only(StepId),
}

impl Target {
    #[must_use]
    pub fn step_ids(self) -> Vec<StepId> {
        match self {
            Self::All => StepId::ALL.to_vec(),
            Self::Only(id) => vec![id],
        }
    }
}

/// An immutable, validated, ordered list of steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    steps: Vec<ProvisioningStep>,
}

impl Plan {
    /// Validate and freeze `steps`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Empty`] for an empty list and
    /// [`PlanError::EmptyCommandGroup`] for a step without actions.
    pub fn new(steps: Vec<ProvisioningStep>) -> Result<Self, PlanError> {
        if steps.is_empty() {
            return Err(PlanError::Empty);
        }
        if let Some(step) = steps.iter().find(|s| s.actions().is_empty()) {
            return Err(PlanError::EmptyCommandGroup(step.name().to_string()));
        }
        Ok(Self { steps })
    }

    /// Build the plan for `target` from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a selected step ends up with no actions
    /// (e.g. an empty `packages.dev_tools` list).
    pub fn for_target(config: &BootstrapConfig, target: Target) -> Result<Self, PlanError> {
        let steps = target
            .step_ids()
            .into_iter()
            .map(|id| build_step(config, id))
            .collect();
        Self::new(steps)
    }

    #[must_use]
    pub fn steps(&self) -> &[ProvisioningStep] {
        &self.steps
    }
}

/// Build a single step from configuration.
#[must_use]
pub fn build_step(config: &BootstrapConfig, id: StepId) -> ProvisioningStep {
    let actions = match id {
        StepId::Update => update_actions(&config.packages.manager),
        StepId::InstallDevTools => dev_tools_actions(config),
        StepId::InstallSkineticSdk => sdk_actions(config),
    };
    ProvisioningStep::new(id, actions)
}

fn update_actions(manager: &str) -> Vec<Action> {
    let refresh = if manager == "dnf" { "makecache" } else { "update" };
    vec![
        Action::Run(Invocation::new(manager, [refresh]).privileged()),
        Action::Run(Invocation::new(manager, ["upgrade", "-y"]).privileged()),
    ]
}

fn dev_tools_actions(config: &BootstrapConfig) -> Vec<Action> {
    if config.packages.dev_tools.is_empty() {
        return Vec::new();
    }
    let args = ["install", "-y"]
        .into_iter()
        .map(str::to_string)
        .chain(config.packages.dev_tools.iter().cloned());
    vec![Action::Run(
        Invocation::new(config.packages.manager.as_str(), args).privileged(),
    )]
}

fn sdk_actions(config: &BootstrapConfig) -> Vec<Action> {
    let sdk = &config.sdk;
    let archive = sdk.archive.as_str();
    let extract_dir = sdk.extract_dir.as_str();
    let rule_src = Path::new(extract_dir).join(&sdk.rules_path);
    let rule_dest = Path::new(&config.udev.rules_dir).join(sdk.rule_file_name());

    vec![
        Action::Fetch(FetchSpec {
            url: sdk.url.clone(),
            dest: PathBuf::from(archive),
            sha256: sdk.sha256.as_ref().map(|d| d.to_ascii_lowercase()),
        }),
        Action::Run(Invocation::new(
            "unzip",
            ["-o", "-q", archive, "-d", extract_dir],
        )),
        Action::Run(Invocation::new("rm", ["-f", archive])),
        Action::Run(
            Invocation::new(
                "cp",
                [
                    rule_src.to_string_lossy().into_owned(),
                    rule_dest.to_string_lossy().into_owned(),
                ],
            )
            .privileged(),
        ),
        Action::Run(
            Invocation::new("systemctl", ["restart", config.udev.service.as_str()]).privileged(),
        ),
        Action::Run(Invocation::new("rm", ["-rf", extract_dir])),
    ]
}
