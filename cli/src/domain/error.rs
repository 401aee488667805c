//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Bootstrap errors ──────────────────────────────────────────────────────────

/// Errors raised while executing a provisioning plan.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("step '{step}' failed: `{command}` exited with code {code}")]
    StepFailed {
        step: String,
        command: String,
        code: i32,
    },

    #[error("step '{step}' failed: could not download {url}: {reason}")]
    FetchFailed {
        step: String,
        url: String,
        reason: String,
    },

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}

impl BootstrapError {
    /// Process exit code to surface for this failure.
    ///
    /// A failing command propagates its own exit status; anything else
    /// (including a command killed by a signal, recorded as `-1`) exits 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::StepFailed { code, .. } if *code > 0 && *code < 256 => *code,
            _ => 1,
        }
    }

    /// Stable identifier used in JSON error objects.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::StepFailed { .. } => "step_failed",
            Self::FetchFailed { .. } => "fetch_failed",
            Self::ChecksumMismatch { .. } => "checksum_mismatch",
        }
    }
}

// ── Plan errors ───────────────────────────────────────────────────────────────

/// Errors raised while assembling a provisioning plan.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("provisioning plan has no steps")]
    Empty,

    #[error("step '{0}' has an empty command group")]
    EmptyCommandGroup(String),

    #[error("Unknown step: {name}\n\nValid steps: {valid}")]
    UnknownStep { name: String, valid: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}
