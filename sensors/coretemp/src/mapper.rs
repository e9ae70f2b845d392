//! Sensor label to CPU core mapping.
//!
//! The Intel `coretemp` driver labels its per-core sensors `Core 0`,
//! `Core 1`, ... and its aggregate sensor `Package id 0`. Only the former
//! occupy a slot in the bar graph.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::warn;

/// Core numbers at or above this are treated as firmware garbage.
///
/// Each core is one glyph, so the bound also caps the graph width.
pub const MAX_CORES: usize = 1024;

static CORE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Core\s*(\d+)").expect("core label pattern is valid")
});

/// Which bar-graph slot a sensor belongs to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreIndex {
    /// Physical core number parsed from the label
    Core(usize),
    /// Aggregate or foreign sensor that has no slot
    NotCore,
}

impl CoreIndex {
    /// Graph width needed to show this core: its number plus one.
    #[must_use]
    pub fn slot_count(self) -> Option<usize> {
        match self {
            CoreIndex::Core(index) => index.checked_add(1),
            CoreIndex::NotCore => None,
        }
    }

    #[must_use]
    pub const fn is_core(self) -> bool {
        matches!(self, CoreIndex::Core(_))
    }
}

impl fmt::Display for CoreIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreIndex::Core(index) => write!(f, "{index}"),
            CoreIndex::NotCore => write!(f, "-"),
        }
    }
}

/// Map a sensor label to its core index.
///
/// `"Core <n>"` yields `Core(n)`; any other label yields `NotCore`, so
/// sensors of other vendors degrade to "no per-core data". Core numbers of
/// [`MAX_CORES`] or more, including ones too large for `usize`, are logged
/// and yield `NotCore`.
///
/// # Examples
///
/// ```rust
/// use tempbgline_coretemp::mapper::{map_label_to_core, CoreIndex};
///
/// assert_eq!(map_label_to_core("Core 3"), CoreIndex::Core(3));
/// assert_eq!(map_label_to_core("Package id 0"), CoreIndex::NotCore);
/// ```
#[must_use]
pub fn map_label_to_core(label: &str) -> CoreIndex {
    let Some(caps) = CORE_LABEL.captures(label) else {
        return CoreIndex::NotCore;
    };

    match caps[1].parse::<usize>() {
        Ok(index) if index < MAX_CORES => CoreIndex::Core(index),
        _ => {
            warn!(label, "core number out of range, ignoring sensor");
            CoreIndex::NotCore
        }
    }
}
