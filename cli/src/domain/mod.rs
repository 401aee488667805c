//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod health;
pub mod plan;
pub mod step;
pub mod udev;

pub use config::BootstrapConfig;
pub use error::{BootstrapError, ConfigError, PlanError};
pub use health::{DoctorChecks, collect_issues};
pub use plan::{Plan, Target};
pub use step::{Action, Escalation, FetchSpec, Invocation, ProvisioningStep, StepId};
