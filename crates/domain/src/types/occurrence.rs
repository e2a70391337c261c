//! Occurrence records and calendar bucket keys.
//!
//! An [`Occurrence`] is one concrete event instance emitted by recurrence
//! expansion. It is immutable after construction; the constructor derives the
//! duration and all three bucket keys from the event's start instant so that
//! aggregation never has to re-derive them.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{HourglassError, Result};

/// Aggregation granularity selecting which bucket key applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    Day,
    Week,
    Month,
}

/// ISO week bucket key.
///
/// Keyed by ISO year as well as week number: ISO-8601 places the first days
/// of January in week 52/53 of the previous year, so a bare week number would
/// collide across year boundaries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct WeekKey {
    pub iso_year: i32,
    pub week: u32,
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.iso_year, self.week)
    }
}

/// Month bucket key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Bucket key for one aggregation granularity.
///
/// Orders chronologically within each granularity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum BucketKey {
    Day(NaiveDate),
    Week(WeekKey),
    Month(MonthKey),
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(date) => write!(f, "{date}"),
            Self::Week(week) => write!(f, "{week}"),
            Self::Month(month) => write!(f, "{month}"),
        }
    }
}

/// One concrete event instance inside the extraction window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Event title; source calendars are not required to set one.
    pub event_name: Option<String>,
    /// Name of the owning [`crate::CalendarSource`].
    pub calendar_name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// `(end - start)` expressed in hours; never negative.
    pub duration_hours: f64,
    pub day_key: NaiveDate,
    pub week_key: WeekKey,
    pub month_key: MonthKey,
}

impl Occurrence {
    /// Build an occurrence, deriving duration and bucket keys from `start`.
    ///
    /// # Errors
    /// Returns `HourglassError::Internal` when the event ends before it
    /// starts.
    pub fn new(
        event_name: Option<String>,
        calendar_name: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self> {
        if end < start {
            return Err(HourglassError::Internal(format!(
                "event ends before it starts: start={start}, end={end}"
            )));
        }

        let date = start.date_naive();
        let iso = date.iso_week();

        Ok(Self {
            event_name,
            calendar_name: calendar_name.into(),
            start,
            end,
            duration_hours: (end - start).num_seconds() as f64 / 3600.0,
            day_key: date,
            week_key: WeekKey { iso_year: iso.year(), week: iso.week() },
            month_key: MonthKey { year: date.year(), month: date.month() },
        })
    }

    /// Bucket key for the requested granularity.
    pub fn bucket_key(&self, granularity: Granularity) -> BucketKey {
        match granularity {
            Granularity::Day => BucketKey::Day(self.day_key),
            Granularity::Week => BucketKey::Week(self.week_key),
            Granularity::Month => BucketKey::Month(self.month_key),
        }
    }
}
