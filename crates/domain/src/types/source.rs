//! Calendar source descriptors and per-calendar lookup maps.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A named, fetchable calendar feed.
///
/// `name` doubles as the display label and the grouping key carried on every
/// occurrence extracted from this feed; it must be unique within one
/// extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSource {
    pub name: String,
    pub url: String,
}

impl CalendarSource {
    /// Create a new source descriptor.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into() }
    }
}

/// Per-calendar goal hours, keyed by calendar name.
pub type GoalMap = HashMap<String, f64>;

/// Per-calendar theme labels, keyed by calendar name.
pub type ThemeMap = HashMap<String, String>;

/// Per-calendar display colors, keyed by calendar name.
pub type ColorMap = HashMap<String, String>;
