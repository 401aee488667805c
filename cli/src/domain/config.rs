//! Domain types and validators for bootstrap configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_PACKAGE_MANAGERS: &[&str] = &["apt-get", "apt", "dnf"];
pub const VALID_ESCALATIONS: &[&str] = &["sudo", "doas", "none"];

/// Assumed release location of the Linux SDK archive; set `sdk.url` to the
/// archive actually distributed to you.
pub const DEFAULT_SDK_URL: &str =
    "https://github.com/Actronika/skinetic-sdk/releases/download/v1.4.0/SkineticSDK_linux.zip";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.skinetic-bootstrap/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BootstrapConfig {
    pub packages: PackagesConfig,
    pub privilege: PrivilegeConfig,
    pub sdk: SdkConfig,
    pub udev: UdevConfig,
}

/// System package settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PackagesConfig {
    /// Package manager front-end: `apt-get` (default), `apt`, or `dnf`.
    pub manager: String,
    /// Developer utilities installed by `install_dev_tools`.
    pub dev_tools: Vec<String>,
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            manager: "apt-get".to_string(),
            dev_tools: ["git", "curl", "unzip", "build-essential", "python3-pip"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Privilege escalation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PrivilegeConfig {
    /// Escalation program: `sudo` (default), `doas`, or `none`.
    pub escalation: String,
}

impl Default for PrivilegeConfig {
    fn default() -> Self {
        Self {
            escalation: "sudo".to_string(),
        }
    }
}

/// SDK archive location and layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SdkConfig {
    pub url: String,
    /// Expected hex SHA-256 of the archive. `None` leaves it unverified.
    pub sha256: Option<String>,
    /// Archive file name, created in the working directory.
    pub archive: String,
    /// Extraction directory, created in the working directory.
    pub extract_dir: String,
    /// Rule file location relative to `extract_dir`.
    pub rules_path: String,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SDK_URL.to_string(),
            sha256: None,
            archive: "skinetic_sdk.zip".to_string(),
            extract_dir: "skinetic_sdk".to_string(),
            rules_path: "udev/99-skinetic.rules".to_string(),
        }
    }
}

/// Target udev locations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UdevConfig {
    pub rules_dir: String,
    pub service: String,
}

impl Default for UdevConfig {
    fn default() -> Self {
        Self {
            rules_dir: "/etc/udev/rules.d".to_string(),
            service: "udev".to_string(),
        }
    }
}

impl SdkConfig {
    /// File name of the rule inside the rules directory.
    #[must_use]
    pub fn rule_file_name(&self) -> &str {
        self.rules_path
            .rsplit('/')
            .next()
            .unwrap_or(self.rules_path.as_str())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

impl BootstrapConfig {
    /// Validate every field that has a restricted value set.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<()> {
        validate_choice("packages.manager", &self.packages.manager, VALID_PACKAGE_MANAGERS)?;
        validate_choice(
            "privilege.escalation",
            &self.privilege.escalation,
            VALID_ESCALATIONS,
        )?;
        validate_sdk_url(&self.sdk.url)?;
        if let Some(digest) = &self.sdk.sha256 {
            validate_sha256(digest)?;
        }
        validate_relative_path("sdk.rules_path", &self.sdk.rules_path)?;
        validate_relative_path("sdk.archive", &self.sdk.archive)?;
        validate_relative_path("sdk.extract_dir", &self.sdk.extract_dir)?;
        Ok(())
    }
}

/// Dotted keys accepted by `config get`.
pub const VALID_KEYS: &[&str] = &[
    "packages.manager",
    "packages.dev_tools",
    "privilege.escalation",
    "sdk.url",
    "sdk.sha256",
    "sdk.archive",
    "sdk.extract_dir",
    "sdk.rules_path",
    "udev.rules_dir",
    "udev.service",
];

impl BootstrapConfig {
    /// Look up a single value by dotted key, rendered as plain text.
    ///
    /// Lists are space-separated; an unset digest renders as an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] for keys outside [`VALID_KEYS`].
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "packages.manager" => self.packages.manager.clone(),
            "packages.dev_tools" => self.packages.dev_tools.join(" "),
            "privilege.escalation" => self.privilege.escalation.clone(),
            "sdk.url" => self.sdk.url.clone(),
            "sdk.sha256" => self.sdk.sha256.clone().unwrap_or_default(),
            "sdk.archive" => self.sdk.archive.clone(),
            "sdk.extract_dir" => self.sdk.extract_dir.clone(),
            "sdk.rules_path" => self.sdk.rules_path.clone(),
            "udev.rules_dir" => self.udev.rules_dir.clone(),
            "udev.service" => self.udev.service.clone(),
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                    valid: VALID_KEYS.join(", "),
                });
            }
        };
        Ok(value)
    }
}

fn validate_choice(key: &str, value: &str, valid: &[&str]) -> Result<()> {
    if !valid.contains(&value) {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            valid: valid.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates that the SDK URL uses HTTPS.
///
/// # Errors
///
/// Returns an error for any other scheme.
pub fn validate_sdk_url(url: &str) -> Result<()> {
    if !url.starts_with("https://") || url.len() <= "https://".len() {
        return Err(ConfigError::InvalidValue {
            key: "sdk.url".to_string(),
            value: url.to_string(),
            valid: "an https:// URL".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Validates a hex-encoded SHA-256 digest (64 hex characters).
///
/// # Errors
///
/// Returns an error if the digest has the wrong length or non-hex characters.
pub fn validate_sha256(digest: &str) -> Result<()> {
    if digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidValue {
            key: "sdk.sha256".to_string(),
            value: digest.to_string(),
            valid: "64 hexadecimal characters".to_string(),
        }
        .into());
    }
    Ok(())
}

fn validate_relative_path(key: &str, path: &str) -> Result<()> {
    let escapes = path.split('/').any(|part| part == "..");
    if path.is_empty() || path.starts_with('/') || escapes {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: path.to_string(),
            valid: "a non-empty relative path without '..'".to_string(),
        }
        .into());
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
