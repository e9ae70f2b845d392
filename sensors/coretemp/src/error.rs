//! Error handling for coretemp discovery and rendering.

use std::path::PathBuf;
use tempbgline_core::SensorError;
use thiserror::Error;

/// Result type for coretemp operations
pub type Result<T> = std::result::Result<T, CoretempError>;

/// Error types for the coretemp pipeline
#[derive(Error, Debug)]
pub enum CoretempError {
    /// No `coretemp.N` package directory within the probed range
    #[error("Cannot find a valid {}/coretemp.* directory. Don't you use an Intel CPU?", .root.display())]
    NoPackageDirectory { root: PathBuf },

    /// Package directory found, but no `hwmon/hwmonN` below it
    #[error("Cannot find a valid {}/hwmon/hwmon* directory", .package.display())]
    NoMonitorDirectory { package: PathBuf },

    /// Monitor directory holds no per-core sensors
    #[error("No CPU core temperature sensors found in {}", .path.display())]
    NoCores { path: PathBuf },

    /// A reading claims a core slot the graph does not have
    #[error("Core index {index} is out of range for {core_count} cores")]
    CoreIndexOutOfRange { index: usize, core_count: usize },

    /// Failure bubbled up from the shared sensor layer
    #[error(transparent)]
    Sensor(#[from] SensorError),
}

impl From<CoretempError> for SensorError {
    fn from(err: CoretempError) -> Self {
        match err {
            CoretempError::Sensor(inner) => inner,
            CoretempError::CoreIndexOutOfRange { .. } => {
                SensorError::invalid_data(err.to_string())
            }
            other => SensorError::unavailable(other.to_string()),
        }
    }
}
