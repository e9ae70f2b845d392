//! # tempbgline-core
//!
//! Shared plumbing for the tempbgline sensors: reading the hardware
//! monitoring pseudo-filesystem and producing status-bar output.
//!
//! ## Features
//!
//! - **Filesystem probing** - Directory checks and single-value file readers for `/sys`
//! - **Waybar JSON output format** - Native Waybar protocol support
//! - **Common sensor trait** - Standardized sensor interface
//! - **Error handling** - Comprehensive error types with context
//!
//! ## Quick Start
//!
//! ```rust
//! use tempbgline_core::{Sensor, SensorError, WaybarOutput};
//!
//! struct MySensor {
//!     name: String,
//! }
//!
//! impl Sensor for MySensor {
//!     type Error = SensorError;
//!
//!     fn read(&mut self) -> Result<WaybarOutput, Self::Error> {
//!         Ok(WaybarOutput::from_str("▃▄"))
//!     }
//!
//!     fn name(&self) -> &str {
//!         &self.name
//!     }
//! }
//! ```

use serde::Serialize;
use std::fmt;

/// Standard Waybar output format compliant with Waybar's JSON protocol.
///
/// All fields except `text` are optional and will be omitted from JSON
/// serialization if they are `None`.
///
/// # Examples
///
/// ```rust
/// use tempbgline_core::WaybarOutput;
///
/// let output = WaybarOutput::new("▅▂".to_string())
///     .with_tooltip("Core 0: 45000")
///     .with_class("normal")
///     .with_percentage(50);
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WaybarOutput {
    /// The main text to display in the bar
    pub text: String,
    /// Optional tooltip text shown on hover
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// Optional CSS class for styling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Optional percentage value (0-100) for progress indicators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<u8>,
}

impl WaybarOutput {
    /// Create a new WaybarOutput with just the required text field.
    #[must_use]
    pub const fn new(text: String) -> Self {
        Self {
            text,
            tooltip: None,
            class: None,
            percentage: None,
        }
    }

    /// Create a new WaybarOutput from a string slice.
    #[must_use]
    pub fn from_str(text: &str) -> Self {
        Self::new(text.to_owned())
    }

    /// Add a tooltip to this output.
    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Add a CSS class to this output.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Add a percentage value to this output.
    ///
    /// # Panics
    ///
    /// Panics if `percentage` is greater than 100.
    #[must_use]
    pub fn with_percentage(mut self, percentage: u8) -> Self {
        assert!(
            percentage <= 100,
            "Percentage must be <= 100, got {}",
            percentage
        );
        self.percentage = Some(percentage);
        self
    }
}

/// Health of a sensor reading, ordered from least to most alarming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    /// Reading within its thresholds
    Normal,
    /// Reading could not be interpreted
    Unknown,
    /// Reading above its high threshold
    Warning,
    /// Reading above its critical threshold
    Critical,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Normal => write!(f, "normal"),
            Status::Unknown => write!(f, "unknown"),
            Status::Warning => write!(f, "warning"),
            Status::Critical => write!(f, "critical"),
        }
    }
}

/// CSS class names used for Waybar styling.
///
/// # Examples
///
/// ```rust
/// use tempbgline_core::{Status, Theme};
///
/// let theme = Theme::new().with_critical("on-fire");
/// assert_eq!(theme.class_for(Status::Critical), "on-fire");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// CSS class for normal/neutral state
    pub normal: String,
    /// CSS class for warning state (moderate concern)
    pub warning: String,
    /// CSS class for critical state (high concern)
    pub critical: String,
    /// CSS class for unknown/unavailable state
    pub unknown: String,
}

impl Theme {
    /// Create a new theme with default class names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the critical state class name.
    #[must_use]
    pub fn with_critical(mut self, class: impl Into<String>) -> Self {
        self.critical = class.into();
        self
    }

    /// Get the class name for a status.
    #[must_use]
    pub fn class_for(&self, status: Status) -> &str {
        match status {
            Status::Normal => &self.normal,
            Status::Unknown => &self.unknown,
            Status::Warning => &self.warning,
            Status::Critical => &self.critical,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            normal: Status::Normal.to_string(),
            warning: Status::Warning.to_string(),
            critical: Status::Critical.to_string(),
            unknown: Status::Unknown.to_string(),
        }
    }
}

/// Core trait that all sensors implement.
///
/// A sensor takes one snapshot of the system and turns it into a
/// [`WaybarOutput`]. Plain-text front ends print only its `text`.
pub trait Sensor {
    /// Error type for sensor operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read current sensor data and return Waybar-formatted output.
    ///
    /// # Errors
    ///
    /// Returns an error if the sensor data cannot be read or rendered.
    fn read(&mut self) -> Result<WaybarOutput, Self::Error>;

    /// Get the unique name/identifier for this sensor.
    fn name(&self) -> &str;

    /// Check if the sensor is available on this system.
    ///
    /// Default implementation returns `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sensor is not available or supported.
    fn check_availability(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Helpers for reading the sysfs pseudo-filesystem.
///
/// Every sysfs attribute holds a single value, so the readers here open the
/// file, take the value and close it again.
pub mod sysfs {
    use super::SensorError;
    use std::fs;
    use std::path::Path;

    /// Returns `true` only if `path` exists and is a directory.
    ///
    /// Symlinks are followed. Any stat failure, including a missing path,
    /// yields `false`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tempbgline_core::sysfs;
    ///
    /// assert!(sysfs::is_valid_directory("/"));
    /// assert!(!sysfs::is_valid_directory("/definitely/not/here"));
    /// ```
    #[must_use]
    pub fn is_valid_directory(path: impl AsRef<Path>) -> bool {
        fs::metadata(path).map(|meta| meta.is_dir()).unwrap_or(false)
    }

    /// Read a single integer attribute such as `temp1_input`.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::Io`] if the file cannot be read and
    /// [`SensorError::Parse`] if it does not hold a decimal integer.
    pub fn read_integer(path: impl AsRef<Path>) -> Result<i64, SensorError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let trimmed = content.trim();

        trimmed.parse::<i64>().map_err(|e| {
            SensorError::parse_with_source(
                format!("{}: expected an integer, got '{}'", path.display(), trimmed),
                e,
            )
        })
    }

    /// Read the first line of a string attribute such as `temp1_label`.
    ///
    /// Trailing newlines are removed; other whitespace is kept.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::Io`] if the file cannot be read and
    /// [`SensorError::InvalidData`] if it is empty.
    pub fn read_string(path: impl AsRef<Path>) -> Result<String, SensorError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let line = content.split_inclusive('\n').next().unwrap_or("");
        let line = line.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            return Err(SensorError::invalid_data_with_value(
                "empty attribute file",
                path.display().to_string(),
            ));
        }
        Ok(line.to_owned())
    }
}

/// Utility functions for formatting sensor output.
pub mod format {
    use std::fmt;

    /// ANSI sequence that ends an [`AlertStyle::Ansi`] alert.
    pub const ANSI_RESET: &str = "\x1b[0m";

    /// How alert glyphs are decorated for the target display.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum AlertStyle {
        /// ANSI escape sequences for terminals and shell prompts
        #[default]
        Ansi,
        /// Pango markup for Waybar
        Pango,
        /// No decoration
        Plain,
    }

    impl fmt::Display for AlertStyle {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                AlertStyle::Ansi => write!(f, "ansi"),
                AlertStyle::Pango => write!(f, "pango"),
                AlertStyle::Plain => write!(f, "plain"),
            }
        }
    }

    /// Wrap `text` so it stands out as an alert (bold red).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tempbgline_core::format::{self, AlertStyle};
    ///
    /// assert_eq!(format::alert("!", AlertStyle::Plain), "!");
    /// assert_eq!(format::alert("!", AlertStyle::Ansi), "\x1b[1;31m!\x1b[0m");
    /// ```
    #[must_use]
    pub fn alert(text: &str, style: AlertStyle) -> String {
        match style {
            AlertStyle::Ansi => format!("\x1b[1;31m{text}{ANSI_RESET}"),
            AlertStyle::Pango => {
                format!("<span weight=\"bold\" color=\"red\">{}</span>", escape_markup(text))
            }
            AlertStyle::Plain => text.to_owned(),
        }
    }

    /// Escape the characters Pango treats as markup.
    #[must_use]
    pub fn escape_markup(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                _ => escaped.push(c),
            }
        }
        escaped
    }

    /// Format an optional raw sensor value, using `?` when it is missing.
    #[must_use]
    pub fn raw_value(value: Option<i64>) -> String {
        value.map_or_else(|| "?".to_owned(), |v| v.to_string())
    }
}

/// Common error types for sensor operations.
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    /// I/O error occurred while reading sensor data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing sensor data from text format.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what failed to parse
        message: String,
        /// Underlying parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Sensor is not available on this system.
    #[error("Sensor unavailable: {reason}")]
    Unavailable {
        /// Reason why the sensor is unavailable
        reason: String,
    },

    /// Invalid data format or unexpected values.
    #[error("Invalid data: {message}")]
    InvalidData {
        /// Description of what makes the data invalid
        message: String,
        /// The invalid data if it can be safely displayed
        data: Option<String>,
    },
}

impl SensorError {
    /// Create a new parse error with a source error.
    pub fn parse_with_source<S: Into<String>, E>(message: S, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parse {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// Create a new unavailable error.
    pub fn unavailable<S: Into<String>>(reason: S) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Create a new invalid data error.
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData {
            message: message.into(),
            data: None,
        }
    }

    /// Create a new invalid data error with the problematic data.
    pub fn invalid_data_with_value<S: Into<String>, D: Into<String>>(message: S, data: D) -> Self {
        Self::InvalidData {
            message: message.into(),
            data: Some(data.into()),
        }
    }
}
