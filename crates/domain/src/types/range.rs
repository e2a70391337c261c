//! Date windows and relative range presets.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{HourglassError, Result};

/// Closed, inclusive calendar-day window.
///
/// Normalizes to `[start 00:00:00, end 23:59:59]` UTC. Occurrences are
/// selected by whether their *start* instant falls inside the window;
/// partially overlapping events are never clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a window from two inclusive day bounds.
    ///
    /// # Errors
    /// Returns `HourglassError::InvalidRange` when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(HourglassError::InvalidRange(format!(
                "range start {start} is after range end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Create a window from `(year, month, day)` triples.
    ///
    /// # Errors
    /// Returns `HourglassError::InvalidRange` for impossible calendar dates
    /// or when `start > end`.
    pub fn from_ymd(start: (i32, u32, u32), end: (i32, u32, u32)) -> Result<Self> {
        let date = |(y, m, d): (i32, u32, u32)| {
            NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| {
                HourglassError::InvalidRange(format!("invalid calendar date {y:04}-{m:02}-{d:02}"))
            })
        };
        Self::new(date(start)?, date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// First instant of the window: start day at 00:00:00 UTC.
    pub fn window_start(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// Last instant of the window: end day at 23:59:59 UTC.
    pub fn window_end(&self) -> DateTime<Utc> {
        self.end.and_time(NaiveTime::MIN).and_utc() + Duration::seconds(86_399)
    }

    /// Whether an instant falls inside the closed window.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.window_start() && instant <= self.window_end()
    }
}

/// Relative window presets offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangePreset {
    /// January 1st of the reference year through the reference day.
    YearToDate,
    /// Start of the current calendar quarter through the reference day.
    Quarter,
    LastSevenDays,
    LastThirtyDays,
}

impl RangePreset {
    /// Resolve the preset against a reference day (usually today).
    ///
    /// The reference day is always the window end; no wall clock is read
    /// here so resolution stays deterministic.
    ///
    /// # Errors
    /// Returns `HourglassError::InvalidRange` when the computed start is not
    /// representable.
    pub fn resolve(self, today: NaiveDate) -> Result<DateRange> {
        let start = match self {
            Self::YearToDate => first_of_month(today.year(), 1)?,
            Self::Quarter => {
                let quarter_start_month = (today.month0() / 3) * 3 + 1;
                first_of_month(today.year(), quarter_start_month)?
            }
            Self::LastSevenDays => today - Duration::days(7),
            Self::LastThirtyDays => today - Duration::days(30),
        };
        DateRange::new(start, today)
    }
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        HourglassError::InvalidRange(format!("invalid calendar month {year:04}-{month:02}"))
    })
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn rejects_inverted_range() {
        let result = DateRange::new(day(2024, 3, 10), day(2024, 3, 1));
        assert!(matches!(result, Err(HourglassError::InvalidRange(_))));
    }

    #[test]
    fn rejects_impossible_dates() {
        let result = DateRange::from_ymd((2024, 2, 30), (2024, 3, 1));
        assert!(matches!(result, Err(HourglassError::InvalidRange(_))));
    }

    #[test]
    fn window_spans_full_days() {
        let range = DateRange::from_ymd((2024, 3, 1), (2024, 3, 2)).expect("range");

        assert_eq!(range.window_start().time().num_seconds_from_midnight(), 0);
        assert_eq!(range.window_end().time().num_seconds_from_midnight(), 86_399);
    }

    #[test]
    fn contains_is_inclusive_at_both_boundaries() {
        let range = DateRange::from_ymd((2024, 3, 1), (2024, 3, 2)).expect("range");

        assert!(range.contains(range.window_start()));
        assert!(range.contains(range.window_end()));
        assert!(!range.contains(range.window_start() - Duration::seconds(1)));
        assert!(!range.contains(range.window_end() + Duration::seconds(1)));
    }

    #[test]
    fn year_to_date_starts_on_january_first() {
        let range = RangePreset::YearToDate.resolve(day(2024, 8, 6)).expect("range");
        assert_eq!(range.start(), day(2024, 1, 1));
        assert_eq!(range.end(), day(2024, 8, 6));
    }

    #[test]
    fn quarter_starts_at_the_current_quarter() {
        let range = RangePreset::Quarter.resolve(day(2024, 8, 6)).expect("range");
        assert_eq!(range.start(), day(2024, 7, 1));

        let range = RangePreset::Quarter.resolve(day(2024, 1, 15)).expect("range");
        assert_eq!(range.start(), day(2024, 1, 1));
    }

    #[test]
    fn rolling_presets_count_back_from_the_reference_day() {
        let today = day(2024, 8, 6);

        let week = RangePreset::LastSevenDays.resolve(today).expect("range");
        assert_eq!(week.start(), day(2024, 7, 30));

        let month = RangePreset::LastThirtyDays.resolve(today).expect("range");
        assert_eq!(month.start(), day(2024, 7, 7));
    }
}
