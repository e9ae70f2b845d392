//! Enumeration of the `temp<i>_*` attribute files of one hardware monitor.

use crate::error::Result;
use crate::mapper::{map_label_to_core, CoreIndex};
use std::path::{Path, PathBuf};
use tempbgline_core::{sysfs, SensorError};
use tracing::{debug, warn};

/// One temperature sensor of the monitor.
///
/// Values are raw millidegrees Celsius. A field is `None` when its file
/// could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    /// 1-based sensor slot (`temp<index>_*`)
    pub index: u32,
    /// Current temperature (`temp<i>_input`)
    pub temperature: Option<i64>,
    /// High threshold (`temp<i>_max`)
    pub high: Option<i64>,
    /// Critical threshold (`temp<i>_crit`)
    pub critical: Option<i64>,
    /// Firmware label (`temp<i>_label`)
    pub label: Option<String>,
    /// Bar-graph slot derived from the label
    pub core: CoreIndex,
}

impl Reading {
    /// Build a reading, deriving the core index from the label.
    pub fn new(
        index: u32,
        temperature: Option<i64>,
        high: Option<i64>,
        critical: Option<i64>,
        label: Option<String>,
    ) -> Self {
        let core = label
            .as_deref()
            .map_or(CoreIndex::NotCore, map_label_to_core);
        Self {
            index,
            temperature,
            high,
            critical,
            label,
            core,
        }
    }

    /// Temperature relative to the high threshold.
    ///
    /// `None` if the temperature is unknown or the threshold is unknown or
    /// not positive.
    #[must_use]
    pub fn relative_temperature(&self) -> Option<f64> {
        match (self.temperature, self.high) {
            (Some(temperature), Some(high)) if high > 0 => Some(temperature as f64 / high as f64),
            _ => None,
        }
    }
}

/// Everything read from one monitor directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorScan {
    /// All sensors, per-core or not, in discovery order
    pub readings: Vec<Reading>,
    /// Number of bar-graph slots: highest core index + 1
    pub core_count: usize,
}

/// Reads the numbered sensors below a monitor directory.
#[derive(Debug, Clone)]
pub struct SensorReader {
    monitor_path: PathBuf,
}

impl SensorReader {
    pub fn new(monitor_path: impl Into<PathBuf>) -> Self {
        Self {
            monitor_path: monitor_path.into(),
        }
    }

    fn attribute(&self, index: u32, name: &str) -> PathBuf {
        self.monitor_path.join(format!("temp{index}_{name}"))
    }

    /// Read every sensor, starting at `temp1`.
    ///
    /// Enumeration stops at the first missing `temp<i>_label`, except that a
    /// missing `temp1_label` is skipped: some platforms start at `temp2`.
    /// Unreadable attribute files are logged and recorded as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::Unavailable`] if the monitor path is not a
    /// directory. An existing directory without sensors is not an error; the
    /// scan then has a `core_count` of 0.
    pub fn read_all(&self) -> Result<SensorScan> {
        if !sysfs::is_valid_directory(&self.monitor_path) {
            return Err(SensorError::unavailable(format!(
                "{} is not a directory",
                self.monitor_path.display()
            ))
            .into());
        }

        let mut scan = SensorScan::default();

        for index in 1u32.. {
            let label_path = self.attribute(index, "label");
            if !label_path.exists() {
                if index == 1 {
                    debug!("temp1_label missing, continuing with temp2");
                    continue;
                }
                break;
            }

            let reading = Reading::new(
                index,
                self.field(index, "input", |path| sysfs::read_integer(path)),
                self.field(index, "max", |path| sysfs::read_integer(path)),
                self.field(index, "crit", |path| sysfs::read_integer(path)),
                self.field(index, "label", |path| sysfs::read_string(path)),
            );
            debug!(
                index,
                label = reading.label.as_deref().unwrap_or("?"),
                core = %reading.core,
                "read sensor"
            );

            if let Some(slots) = reading.core.slot_count() {
                scan.core_count = scan.core_count.max(slots);
            }
            scan.readings.push(reading);
        }

        Ok(scan)
    }

    fn field<T>(
        &self,
        index: u32,
        name: &str,
        read: impl Fn(&Path) -> std::result::Result<T, SensorError>,
    ) -> Option<T> {
        let path = self.attribute(index, name);
        match read(&path) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(path = %path.display(), "failed to read sensor attribute: {err}");
                None
            }
        }
    }
}

/// Read all sensors below `monitor_path`.
///
/// # Errors
///
/// See [`SensorReader::read_all`].
pub fn read_all_sensors(monitor_path: impl Into<PathBuf>) -> Result<SensorScan> {
    SensorReader::new(monitor_path).read_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_sensor(dir: &Path, index: u32, label: &str, input: &str, max: &str, crit: &str) {
        fs::write(dir.join(format!("temp{index}_label")), format!("{label}\n")).unwrap();
        fs::write(dir.join(format!("temp{index}_input")), format!("{input}\n")).unwrap();
        fs::write(dir.join(format!("temp{index}_max")), format!("{max}\n")).unwrap();
        fs::write(dir.join(format!("temp{index}_crit")), format!("{crit}\n")).unwrap();
    }

    #[test]
    fn test_reads_all_sensors() {
        let dir = TempDir::new().unwrap();
        write_sensor(dir.path(), 1, "Package id 0", "52000", "80000", "100000");
        write_sensor(dir.path(), 2, "Core 0", "45000", "80000", "100000");
        write_sensor(dir.path(), 3, "Core 1", "90000", "80000", "100000");

        let scan = read_all_sensors(dir.path()).unwrap();
        assert_eq!(scan.readings.len(), 3);
        assert_eq!(scan.core_count, 2);
        assert_eq!(scan.readings.iter().filter(|r| r.core.is_core()).count(), 2);

        let core1 = &scan.readings[2];
        assert_eq!(core1.index, 3);
        assert_eq!(core1.label.as_deref(), Some("Core 1"));
        assert_eq!(core1.core, CoreIndex::Core(1));
        assert_eq!(core1.temperature, Some(90000));
        assert_eq!(core1.high, Some(80000));
        assert_eq!(core1.critical, Some(100000));
        assert_eq!(scan.readings[0].core, CoreIndex::NotCore);
    }

    #[test]
    fn test_missing_first_sensor_is_skipped() {
        let dir = TempDir::new().unwrap();
        write_sensor(dir.path(), 2, "Core 0", "40000", "80000", "100000");
        write_sensor(dir.path(), 3, "Core 1", "41000", "80000", "100000");

        let scan = read_all_sensors(dir.path()).unwrap();
        assert_eq!(scan.readings.len(), 2);
        assert_eq!(scan.readings[0].index, 2);
        assert_eq!(scan.core_count, 2);
    }

    #[test]
    fn test_missing_later_sensor_ends_enumeration() {
        let dir = TempDir::new().unwrap();
        write_sensor(dir.path(), 1, "Core 0", "40000", "80000", "100000");
        write_sensor(dir.path(), 3, "Core 1", "41000", "80000", "100000");

        let scan = read_all_sensors(dir.path()).unwrap();
        assert_eq!(scan.readings.len(), 1);
        assert_eq!(scan.core_count, 1);
    }

    #[test]
    fn test_missing_first_and_second_sensor_finds_nothing() {
        let dir = TempDir::new().unwrap();
        write_sensor(dir.path(), 3, "Core 0", "40000", "80000", "100000");

        let scan = read_all_sensors(dir.path()).unwrap();
        assert!(scan.readings.is_empty());
        assert_eq!(scan.core_count, 0);
    }

    #[test]
    fn test_unreadable_fields_become_none() {
        let dir = TempDir::new().unwrap();
        write_sensor(dir.path(), 1, "Core 0", "garbage", "80000", "100000");
        fs::remove_file(dir.path().join("temp1_crit")).unwrap();
        write_sensor(dir.path(), 2, "Core 1", "41000", "80000", "100000");

        let scan = read_all_sensors(dir.path()).unwrap();
        assert_eq!(scan.readings.len(), 2);
        assert_eq!(scan.readings[0].temperature, None);
        assert_eq!(scan.readings[0].high, Some(80000));
        assert_eq!(scan.readings[0].critical, None);
        assert_eq!(scan.readings[1].temperature, Some(41000));
    }

    #[test]
    fn test_empty_label_is_not_a_core() {
        let dir = TempDir::new().unwrap();
        write_sensor(dir.path(), 1, "", "40000", "80000", "100000");

        let scan = read_all_sensors(dir.path()).unwrap();
        assert_eq!(scan.readings.len(), 1);
        assert_eq!(scan.readings[0].label, None);
        assert_eq!(scan.readings[0].core, CoreIndex::NotCore);
        assert_eq!(scan.core_count, 0);
    }

    #[test]
    fn test_core_count_follows_highest_index() {
        let dir = TempDir::new().unwrap();
        write_sensor(dir.path(), 1, "Core 0", "40000", "80000", "100000");
        write_sensor(dir.path(), 2, "Core 4", "41000", "80000", "100000");

        let scan = read_all_sensors(dir.path()).unwrap();
        assert_eq!(scan.readings.len(), 2);
        assert_eq!(scan.core_count, 5);
    }

    #[test]
    fn test_huge_core_numbers_do_not_widen_the_graph() {
        let dir = TempDir::new().unwrap();
        write_sensor(dir.path(), 1, "Core 0", "40000", "80000", "100000");
        write_sensor(dir.path(), 2, "Core 18446744073709551615", "41000", "80000", "100000");
        write_sensor(dir.path(), 3, "Core 4000000000", "42000", "80000", "100000");
        write_sensor(dir.path(), 4, "Core 1", "43000", "80000", "100000");

        let scan = read_all_sensors(dir.path()).unwrap();
        assert_eq!(scan.readings.len(), 4);
        assert_eq!(scan.core_count, 2);
        assert_eq!(scan.readings[1].core, CoreIndex::NotCore);
        assert_eq!(scan.readings[2].core, CoreIndex::NotCore);
    }

    #[test]
    fn test_monitor_path_must_be_a_directory() {
        let dir = TempDir::new().unwrap();
        let err = read_all_sensors(dir.path().join("hwmon9")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoretempError::Sensor(SensorError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_relative_temperature() {
        let reading = Reading::new(2, Some(45000), Some(80000), Some(100000), Some("Core 0".into()));
        assert_eq!(reading.relative_temperature(), Some(0.5625));

        let no_high = Reading::new(2, Some(45000), None, None, Some("Core 0".into()));
        assert_eq!(no_high.relative_temperature(), None);

        let zero_high = Reading::new(2, Some(45000), Some(0), None, Some("Core 0".into()));
        assert_eq!(zero_high.relative_temperature(), None);
    }
}
