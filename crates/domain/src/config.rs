//! Typed feed configuration.
//!
//! One structure replaces the ad-hoc per-calendar source/color/theme/goal
//! tables: each calendar is a single entry carrying all of its metadata, and
//! the accessors below project out the views the engine consumes (source
//! list, goal map, theme map, color map).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{HourglassError, Result};
use crate::types::source::{CalendarSource, ColorMap, GoalMap, ThemeMap};

/// One configured calendar feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub name: String,
    pub url: String,
    /// Display color hint for the presentation layer.
    #[serde(default)]
    pub color: Option<String>,
    /// Theme label used for theme rollups.
    #[serde(default)]
    pub theme: Option<String>,
    /// Target hours per bucket; required only for goal comparisons.
    #[serde(default)]
    pub goal_hours: Option<f64>,
}

/// Full feed configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub calendars: Vec<CalendarEntry>,
}

impl FeedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns `HourglassError::Config` for empty names/urls or non-positive
    /// goals, and `HourglassError::DuplicateSourceName` for repeated names.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for entry in &self.calendars {
            if entry.name.trim().is_empty() {
                return Err(HourglassError::Config("calendar entry with empty name".into()));
            }
            if entry.url.trim().is_empty() {
                return Err(HourglassError::Config(format!(
                    "calendar '{}' has an empty url",
                    entry.name
                )));
            }
            if let Some(goal) = entry.goal_hours {
                if goal <= 0.0 {
                    return Err(HourglassError::Config(format!(
                        "calendar '{}' has a non-positive goal ({goal})",
                        entry.name
                    )));
                }
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(HourglassError::DuplicateSourceName(entry.name.clone()));
            }
        }

        Ok(())
    }

    /// Source descriptors in configuration order.
    pub fn sources(&self) -> Vec<CalendarSource> {
        self.calendars
            .iter()
            .map(|entry| CalendarSource::new(entry.name.clone(), entry.url.clone()))
            .collect()
    }

    /// Goal hours for every calendar that configures one.
    pub fn goals(&self) -> GoalMap {
        self.calendars
            .iter()
            .filter_map(|entry| entry.goal_hours.map(|goal| (entry.name.clone(), goal)))
            .collect()
    }

    /// Theme labels for every calendar that configures one.
    pub fn themes(&self) -> ThemeMap {
        self.calendars
            .iter()
            .filter_map(|entry| {
                entry.theme.as_ref().map(|theme| (entry.name.clone(), theme.clone()))
            })
            .collect()
    }

    /// Display colors for every calendar that configures one.
    pub fn colors(&self) -> ColorMap {
        self.calendars
            .iter()
            .filter_map(|entry| {
                entry.color.as_ref().map(|color| (entry.name.clone(), color.clone()))
            })
            .collect()
    }
}
