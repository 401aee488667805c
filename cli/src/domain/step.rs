//! Provisioning step types.
//!
//! A step is a named, ordered command group. Steps are built once from
//! configuration and never mutated afterwards.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::error::PlanError;

// ── Step identity ─────────────────────────────────────────────────────────────

/// The three provisioning steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Update,
    InstallDevTools,
    InstallSkineticSdk,
}

impl StepId {
    /// Every step in the fixed default order.
    pub const ALL: [StepId; 3] = [
        StepId::Update,
        StepId::InstallDevTools,
        StepId::InstallSkineticSdk,
    ];

    /// Human-readable label, also accepted on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::InstallDevTools => "install_dev_tools",
            Self::InstallSkineticSdk => "install_skinetic_sdk",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StepId {
    type Err = PlanError;

    /// Accepts both `install_dev_tools` and `install-dev-tools` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|id| id.name() == normalized)
            .ok_or_else(|| PlanError::UnknownStep {
                name: s.to_string(),
                valid: Self::ALL.map(StepId::name).join(", "),
            })
    }
}

// ── Privilege escalation ──────────────────────────────────────────────────────

/// Host mechanism used to run privileged invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    Sudo,
    Doas,
    /// Run privileged invocations as-is.
    None,
}

impl Escalation {
    /// Parse a validated `privilege.escalation` value. Unknown values fall
    /// back to `sudo`.
    #[must_use]
    pub fn from_config(value: &str) -> Self {
        match value {
            "doas" => Self::Doas,
            "none" => Self::None,
            _ => Self::Sudo,
        }
    }

    /// Program prefixed to privileged invocations, if any.
    #[must_use]
    pub fn program(self) -> Option<&'static str> {
        match self {
            Self::Sudo => Some("sudo"),
            Self::Doas => Some("doas"),
            Self::None => None,
        }
    }
}

// ── Actions ───────────────────────────────────────────────────────────────────

/// One external program invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Needs administrative privileges.
    pub privileged: bool,
}

impl Invocation {
    /// Unprivileged invocation of `program` with `args`.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            privileged: false,
        }
    }

    /// Mark this invocation as requiring elevation.
    #[must_use]
    pub fn privileged(mut self) -> Self {
        self.privileged = true;
        self
    }

    /// The `(program, args)` pair actually spawned.
    ///
    /// Privileged invocations get the escalation program in front unless the
    /// caller already runs as root.
    #[must_use]
    pub fn resolve(&self, escalation: Escalation, is_root: bool) -> (String, Vec<String>) {
        match escalation.program() {
            Some(prefix) if self.privileged && !is_root => {
                let mut args = Vec::with_capacity(self.args.len() + 1);
                args.push(self.program.clone());
                args.extend(self.args.iter().cloned());
                (prefix.to_string(), args)
            }
            _ => (self.program.clone(), self.args.clone()),
        }
    }

    /// Shell-like rendering used in logs and error messages.
    #[must_use]
    pub fn command_line(&self, escalation: Escalation, is_root: bool) -> String {
        let (program, args) = self.resolve(escalation, is_root);
        std::iter::once(program)
            .chain(args)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Download of one file over HTTPS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchSpec {
    pub url: String,
    pub dest: PathBuf,
    /// Expected lowercase hex SHA-256 of the body, if pinned.
    pub sha256: Option<String>,
}

/// One entry of a step's command group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    Run(Invocation),
    Fetch(FetchSpec),
}

impl Action {
    #[must_use]
    pub fn is_privileged(&self) -> bool {
        matches!(self, Self::Run(inv) if inv.privileged)
    }

    /// Rendering used by `plan` and dry runs.
    #[must_use]
    pub fn describe(&self, escalation: Escalation, is_root: bool) -> String {
        match self {
            Self::Run(inv) => inv.command_line(escalation, is_root),
            Self::Fetch(spec) => format!("fetch {} -> {}", spec.url, spec.dest.display()),
        }
    }
}

// ── Step ──────────────────────────────────────────────────────────────────────

/// A named, ordered command group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisioningStep {
    id: StepId,
    actions: Vec<Action>,
}

impl ProvisioningStep {
    #[must_use]
    pub fn new(id: StepId, actions: Vec<Action>) -> Self {
        Self { id, actions }
    }

    #[must_use]
    pub fn id(&self) -> StepId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Whether any action in the group needs elevation.
    #[must_use]
    pub fn requires_privilege(&self) -> bool {
        self.actions.iter().any(Action::is_privileged)
    }
}
