//! Per-core CPU temperature bar graph for status bars and shell prompts.
//!
//! Reads the Intel `coretemp` hardware monitor below
//! `/sys/devices/platform/coretemp.*/hwmon/hwmon*` and renders one glyph
//! per core, from empty (` `) to full (`█`), or `!` when a core runs above
//! its high threshold.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tempbgline_coretemp::CoretempSensor;
//! use tempbgline_core::Sensor;
//!
//! let mut sensor = CoretempSensor::discover()?;
//! let output = sensor.read()?;
//! println!("{}", output.text);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod locator;
pub mod mapper;
pub mod reader;
pub mod render;
pub mod sensor;

pub use error::CoretempError;
pub use locator::{locate_monitor_path, MonitorLocator};
pub use mapper::{map_label_to_core, CoreIndex};
pub use reader::{read_all_sensors, Reading, SensorReader, SensorScan};
pub use render::{render_average, render_per_core, RenderMode, Slot};
pub use sensor::CoretempSensor;
