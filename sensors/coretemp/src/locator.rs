//! Discovery of the coretemp hardware monitor directory.
//!
//! The kernel exposes the Intel package sensor as
//! `/sys/devices/platform/coretemp.<N>/hwmon/hwmon<M>`. Both suffixes are
//! assigned at boot and unpredictable but small, so each is found by a
//! bounded linear probe that stops at the first existing directory.

use crate::error::{CoretempError, Result};
use std::path::PathBuf;
use tempbgline_core::sysfs;
use tracing::debug;

/// Where platform devices live in sysfs.
pub const PLATFORM_ROOT: &str = "/sys/devices/platform";

/// Number of suffixes tried for each path component.
pub const PROBE_LIMIT: u32 = 10;

/// Finds the monitor directory below a platform root.
#[derive(Debug, Clone)]
pub struct MonitorLocator {
    platform_root: PathBuf,
    limit: u32,
}

impl MonitorLocator {
    /// Create a locator probing below `platform_root`.
    pub fn new(platform_root: impl Into<PathBuf>) -> Self {
        Self {
            platform_root: platform_root.into(),
            limit: PROBE_LIMIT,
        }
    }

    /// Probe `coretemp.0` .. `coretemp.9`, then `hwmon/hwmon0` .. `hwmon/hwmon9`.
    ///
    /// # Errors
    ///
    /// [`CoretempError::NoPackageDirectory`] if no package directory exists,
    /// [`CoretempError::NoMonitorDirectory`] if the package has no monitor.
    pub fn locate(&self) -> Result<PathBuf> {
        let package = self
            .probe(|n| self.platform_root.join(format!("coretemp.{n}")))
            .ok_or_else(|| CoretempError::NoPackageDirectory {
                root: self.platform_root.clone(),
            })?;
        debug!(path = %package.display(), "found coretemp package directory");

        let monitor = self
            .probe(|n| package.join("hwmon").join(format!("hwmon{n}")))
            .ok_or_else(|| CoretempError::NoMonitorDirectory {
                package: package.clone(),
            })?;
        debug!(path = %monitor.display(), "found hardware monitor directory");

        Ok(monitor)
    }

    fn probe(&self, candidate: impl Fn(u32) -> PathBuf) -> Option<PathBuf> {
        (0..self.limit)
            .map(candidate)
            .find(|path| sysfs::is_valid_directory(path))
    }
}

impl Default for MonitorLocator {
    fn default() -> Self {
        Self::new(PLATFORM_ROOT)
    }
}

/// Locate the coretemp monitor directory under `/sys/devices/platform`.
///
/// # Errors
///
/// See [`MonitorLocator::locate`].
pub fn locate_monitor_path() -> Result<PathBuf> {
    MonitorLocator::default().locate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_locates_first_package_and_monitor() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("coretemp.3/hwmon/hwmon5")).unwrap();
        fs::create_dir_all(root.path().join("coretemp.3/hwmon/hwmon7")).unwrap();
        fs::create_dir_all(root.path().join("coretemp.8/hwmon/hwmon0")).unwrap();

        let locator = MonitorLocator::new(root.path());
        assert_eq!(
            locator.locate().unwrap(),
            root.path().join("coretemp.3/hwmon/hwmon5")
        );
    }

    #[test]
    fn test_no_package_directory() {
        let root = TempDir::new().unwrap();
        // beyond the probe range
        fs::create_dir_all(root.path().join("coretemp.10/hwmon/hwmon0")).unwrap();
        // a plain file is not a package directory
        fs::write(root.path().join("coretemp.0"), "").unwrap();

        let err = MonitorLocator::new(root.path()).locate().unwrap_err();
        assert!(matches!(err, CoretempError::NoPackageDirectory { .. }));
    }

    #[test]
    fn test_no_monitor_directory() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("coretemp.0/hwmon")).unwrap();

        let err = MonitorLocator::new(root.path()).locate().unwrap_err();
        match err {
            CoretempError::NoMonitorDirectory { package } => {
                assert_eq!(package, root.path().join("coretemp.0"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
