//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use anyhow::Result;

use crate::domain::BootstrapConfig;
use crate::domain::health::DetectedDevice;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program with inherited stdio and return only its exit status.
    ///
    /// No timeout: package upgrades can legitimately take a long time.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or waited on. A
    /// non-zero exit is not an error at this level.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
}

// ── Download Port ─────────────────────────────────────────────────────────────

/// Result of a completed download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Downloaded {
    /// Bytes written to the destination.
    pub bytes: u64,
}

/// Abstracts fetching a URL to a local file.
pub trait Downloader {
    /// Download `url` into `dest`, replacing any existing file.
    ///
    /// The destination must not be left half-written on failure.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success HTTP status,
    /// or a filesystem error.
    fn download(&self, url: &str, dest: &Path) -> Result<Downloaded>;

    /// Remove a downloaded file that failed verification. Missing files are
    /// not an error.
    fn discard(&self, dest: &Path) -> Result<()>;
}

// ── Filesystem Ports ──────────────────────────────────────────────────────────

/// Abstracts file hashing operations.
pub trait FileHasher {
    /// Compute the lowercase hex SHA-256 hash of a file.
    fn sha256_file(&self, path: &Path) -> Result<String>;
}

/// Abstracts configuration loading.
pub trait ConfigStore {
    /// Load the configuration, returning defaults when no file exists.
    fn load(&self) -> Result<BootstrapConfig>;
    /// Resolved configuration file path.
    fn path(&self) -> Result<PathBuf>;
}

// ── Host Probe Port ───────────────────────────────────────────────────────────

/// Read-only view of the host used by the doctor service.
pub trait HostProbe {
    /// Whether the process runs with effective uid 0.
    fn is_root(&self) -> bool;
    /// Whether `program` resolves on `PATH`.
    fn has_program(&self, program: &str) -> bool;
    /// Read a text file, `None` if it does not exist.
    fn read_file(&self, path: &Path) -> Result<Option<String>>;
    /// Attached USB devices matching the Skinetic vendor id.
    fn skinetic_devices(&self) -> Result<Vec<DetectedDevice>>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
