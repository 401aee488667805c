//! Host inspection: implements `HostProbe` against the live system.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::HostProbe;
use crate::domain::health::DetectedDevice;
use crate::domain::udev::{SKINETIC_VENDOR_ID, product_by_id};

/// Kernel view of attached USB devices.
pub const SYSFS_USB_DEVICES: &str = "/sys/bus/usb/devices";

/// Production `HostProbe`.
pub struct SystemHost {
    usb_root: PathBuf,
}

impl SystemHost {
    #[must_use]
    pub fn new() -> Self {
        Self::with_usb_root(SYSFS_USB_DEVICES)
    }

    /// Probe a different sysfs tree (used by tests).
    #[must_use]
    pub fn with_usb_root(root: impl Into<PathBuf>) -> Self {
        Self {
            usb_root: root.into(),
        }
    }
}

impl Default for SystemHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostProbe for SystemHost {
    fn is_root(&self) -> bool {
        is_effective_root()
    }

    fn has_program(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn read_file(&self, path: &Path) -> Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("cannot read {}", path.display())),
        }
    }

    fn skinetic_devices(&self) -> Result<Vec<DetectedDevice>> {
        scan_usb(&self.usb_root)
    }
}

/// `/proc/self` is owned by the effective uid of the reading process.
#[cfg(target_os = "linux")]
#[must_use]
pub fn is_effective_root() -> bool {
    use std::os::unix::fs::MetadataExt;
    std::fs::metadata("/proc/self").is_ok_and(|m| m.uid() == 0)
}

#[cfg(not(target_os = "linux"))]
#[must_use]
pub fn is_effective_root() -> bool {
    false
}

fn scan_usb(root: &Path) -> Result<Vec<DetectedDevice>> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).with_context(|| format!("cannot list {}", root.display())),
    };

    let mut devices = Vec::new();
    for entry in entries.flatten() {
        let dir = entry.path();
        let Some(vendor) = read_attr(&dir, "idVendor") else {
            continue;
        };
        if !vendor.eq_ignore_ascii_case(SKINETIC_VENDOR_ID) {
            continue;
        }
        let product_id = read_attr(&dir, "idProduct").unwrap_or_default();
        let name = product_by_id(&product_id)
            .map_or("unknown Actronika device", |p| p.name)
            .to_string();
        devices.push(DetectedDevice {
            product_id,
            name,
            bus_path: entry.file_name().to_string_lossy().into_owned(),
        });
    }
    devices.sort_by(|a, b| a.bus_path.cmp(&b.bus_path));
    Ok(devices)
}

fn read_attr(dir: &Path, attr: &str) -> Option<String> {
    std::fs::read_to_string(dir.join(attr))
        .ok()
        .map(|s| s.trim().to_lowercase())
}
