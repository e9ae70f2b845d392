use crate::error::{CoretempError, Result};
use crate::locator;
use crate::reader::{SensorReader, SensorScan};
use crate::render::{self, RenderMode, Slot};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tempbgline_core::format::{self, AlertStyle};
use tempbgline_core::{Sensor, SensorError, Status, Theme, WaybarOutput};

/// Per-core CPU temperature bar graph backed by the coretemp hwmon driver.
#[derive(Debug)]
pub struct CoretempSensor {
    name: String,
    monitor_path: PathBuf,
    mode: RenderMode,
    alert_style: AlertStyle,
    theme: Theme,
}

impl CoretempSensor {
    /// Create a sensor reading from an explicit monitor directory.
    pub fn new(monitor_path: impl Into<PathBuf>) -> Self {
        Self {
            name: "coretemp".to_owned(),
            monitor_path: monitor_path.into(),
            mode: RenderMode::default(),
            alert_style: AlertStyle::default(),
            theme: Theme::default(),
        }
    }

    /// Create a sensor for the discovered `/sys/devices/platform/coretemp.*` monitor.
    ///
    /// # Errors
    ///
    /// Returns a discovery error if no package or monitor directory exists.
    pub fn discover() -> Result<Self> {
        Ok(Self::new(locator::locate_monitor_path()?))
    }

    #[must_use]
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_alert_style(mut self, style: AlertStyle) -> Self {
        self.alert_style = style;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn monitor_path(&self) -> &Path {
        &self.monitor_path
    }

    /// Read all sensors of the monitor.
    ///
    /// # Errors
    ///
    /// [`CoretempError::NoCores`] if no per-core sensor was found, or the
    /// reader's error if the monitor directory is unusable.
    pub fn scan(&self) -> Result<SensorScan> {
        let scan = SensorReader::new(&self.monitor_path).read_all()?;
        if scan.core_count == 0 {
            return Err(CoretempError::NoCores {
                path: self.monitor_path.clone(),
            });
        }
        Ok(scan)
    }

    /// Render the bar graph for a scan in the configured mode.
    ///
    /// # Errors
    ///
    /// See [`render::render_per_core`].
    pub fn render(&self, scan: &SensorScan) -> Result<String> {
        match self.mode {
            RenderMode::PerCore => {
                render::render_per_core(&scan.readings, scan.core_count, self.alert_style)
            }
            RenderMode::Average => Ok(render::render_average(&scan.readings, scan.core_count)),
        }
    }

    /// Worst status among the displayed slots.
    fn status(&self, scan: &SensorScan) -> Result<Status> {
        let status = match self.mode {
            RenderMode::PerCore => render::per_core_slots(&scan.readings, scan.core_count)?
                .into_iter()
                .map(Slot::status)
                .max()
                .unwrap_or(Status::Unknown),
            RenderMode::Average => render::average_ratio(&scan.readings, scan.core_count)
                .map_or(Status::Unknown, |average| Slot::for_average(average).status()),
        };
        Ok(status)
    }

    fn tooltip(&self, scan: &SensorScan) -> String {
        let mut tooltip = format!("Monitor: {}", self.monitor_path.display());
        for reading in &scan.readings {
            let _ = write!(
                tooltip,
                "\n{}: {} (high {}, crit {})",
                format::escape_markup(reading.label.as_deref().unwrap_or("?")),
                format::raw_value(reading.temperature),
                format::raw_value(reading.high),
                format::raw_value(reading.critical),
            );
        }
        tooltip
    }

    fn output(&self, scan: &SensorScan) -> Result<WaybarOutput> {
        let text = self.render(scan)?;
        let class = self.theme.class_for(self.status(scan)?).to_owned();
        let mut output = WaybarOutput::new(text)
            .with_tooltip(self.tooltip(scan))
            .with_class(class);

        if let Some(average) = render::average_ratio(&scan.readings, scan.core_count) {
            output = output.with_percentage((average * 100.0).clamp(0.0, 100.0).round() as u8);
        }
        Ok(output)
    }
}

impl Sensor for CoretempSensor {
    type Error = SensorError;

    fn read(&mut self) -> std::result::Result<WaybarOutput, Self::Error> {
        let scan = self.scan()?;
        Ok(self.output(&scan)?)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn check_availability(&self) -> std::result::Result<(), Self::Error> {
        self.scan()?;
        Ok(())
    }
}
