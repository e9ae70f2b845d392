//! Conversion of readings into bar-graph glyphs.
//!
//! Each core's temperature relative to its high threshold selects one of
//! nine glyphs, from empty to full block, in steps of one eighth:
//! `level = floor(8 * relative + 0.5)`. Cores above their high threshold
//! show `!`, above their critical threshold `!` in the alert style.

use crate::error::{CoretempError, Result};
use crate::mapper::CoreIndex;
use crate::reader::Reading;
use tempbgline_core::format::{self, AlertStyle};
use tempbgline_core::Status;
use tracing::debug;

/// Glyphs for 0/8 .. 8/8 fill.
pub const RAMP: [&str; 9] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Highest index into [`RAMP`].
pub const MAX_LEVEL: usize = RAMP.len() - 1;

/// Shown for a temperature above its threshold.
pub const OVERHEAT_GLYPH: &str = "!";

/// Shown for a core whose reading cannot be interpreted.
pub const UNKNOWN_GLYPH: &str = "?";

/// Whether the graph has one glyph per core or one for the whole CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    PerCore,
    Average,
}

/// What one bar-graph position shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Ramp glyph at this level (0..=8)
    Level(usize),
    /// Above the high threshold
    Overheat,
    /// Above the critical threshold
    Critical,
    /// Temperature or high threshold unavailable
    Unknown,
}

impl Slot {
    /// Classify one per-core reading.
    ///
    /// The critical check runs first, then the high check, then the ramp
    /// level. The level is clamped to the ramp, so negative temperatures
    /// show an empty glyph.
    #[must_use]
    pub fn for_reading(reading: &Reading) -> Self {
        let Some(temperature) = reading.temperature else {
            return Slot::Unknown;
        };

        if reading.critical.is_some_and(|critical| temperature > critical) {
            return Slot::Critical;
        }

        match reading.high {
            Some(high) if high > 0 && temperature > high => Slot::Overheat,
            Some(high) if high > 0 => {
                let level = round_level(temperature as f64 / high as f64);
                Slot::Level(level.clamp(0, MAX_LEVEL as i64) as usize)
            }
            _ => Slot::Unknown,
        }
    }

    /// Classify an average relative temperature.
    ///
    /// The average may exceed 1.0 without any core crossing its critical
    /// threshold; levels past the ramp show the plain overheat glyph.
    #[must_use]
    pub fn for_average(average: f64) -> Self {
        let level = round_level(average);
        if level > MAX_LEVEL as i64 {
            Slot::Overheat
        } else {
            Slot::Level(level.max(0) as usize)
        }
    }

    /// The glyph for this slot, decorating critical slots with `style`.
    #[must_use]
    pub fn glyph(self, style: AlertStyle) -> String {
        match self {
            Slot::Level(level) => RAMP[level.min(MAX_LEVEL)].to_owned(),
            Slot::Overheat => OVERHEAT_GLYPH.to_owned(),
            Slot::Critical => format::alert(OVERHEAT_GLYPH, style),
            Slot::Unknown => UNKNOWN_GLYPH.to_owned(),
        }
    }

    #[must_use]
    pub fn status(self) -> Status {
        match self {
            Slot::Level(_) => Status::Normal,
            Slot::Overheat => Status::Warning,
            Slot::Critical => Status::Critical,
            Slot::Unknown => Status::Unknown,
        }
    }
}

/// Round half up: `floor(8 * ratio + 0.5)`.
#[must_use]
pub fn round_level(ratio: f64) -> i64 {
    (MAX_LEVEL as f64 * ratio + 0.5).floor() as i64
}

/// One slot per core, indexed by core number.
///
/// Non-core readings are ignored. Cores without a reading stay empty.
///
/// # Errors
///
/// [`CoretempError::CoreIndexOutOfRange`] if a reading's core index is not
/// below `core_count`.
pub fn per_core_slots(readings: &[Reading], core_count: usize) -> Result<Vec<Slot>> {
    let mut slots = vec![Slot::Level(0); core_count];
    let mut seen = vec![false; core_count];

    for reading in readings {
        let CoreIndex::Core(index) = reading.core else {
            continue;
        };
        if index >= core_count {
            return Err(CoretempError::CoreIndexOutOfRange { index, core_count });
        }
        if seen[index] {
            debug!(core = index, sensor = reading.index, "duplicate core label, replacing slot");
        }
        seen[index] = true;
        slots[index] = Slot::for_reading(reading);
    }

    Ok(slots)
}

/// Render one glyph per core, in core order.
///
/// # Errors
///
/// See [`per_core_slots`].
pub fn render_per_core(readings: &[Reading], core_count: usize, style: AlertStyle) -> Result<String> {
    Ok(per_core_slots(readings, core_count)?
        .into_iter()
        .map(|slot| slot.glyph(style))
        .collect())
}

/// Mean relative temperature over `core_count` cores.
///
/// The sum runs over per-core readings with a usable relative temperature
/// but is divided by `core_count`, so cores missing from the readings count
/// as zero. Returns `None` when there are no cores.
#[must_use]
pub fn average_ratio(readings: &[Reading], core_count: usize) -> Option<f64> {
    if core_count == 0 {
        return None;
    }

    let sum: f64 = readings
        .iter()
        .filter(|reading| reading.core.is_core())
        .filter_map(|reading| {
            let ratio = reading.relative_temperature();
            if ratio.is_none() {
                debug!(sensor = reading.index, "excluding unreadable sensor from average");
            }
            ratio
        })
        .sum();

    Some(sum / core_count as f64)
}

/// Render a single glyph for the average over all cores.
///
/// Renders nothing when there are no cores.
#[must_use]
pub fn render_average(readings: &[Reading], core_count: usize) -> String {
    average_ratio(readings, core_count)
        .map(|average| Slot::for_average(average).glyph(AlertStyle::Plain))
        .unwrap_or_default()
}
