//! Aggregated output records consumed by the presentation layer.
//!
//! These are plain data carriers: every numeric field is an explicit sum,
//! count or ratio produced by the aggregation engine, never a value the
//! presentation layer has to re-derive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::occurrence::BucketKey;

/// Summed duration for one `(bucket_key, calendar_name)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedBucket {
    pub bucket_key: BucketKey,
    pub calendar_name: String,
    pub total_duration_hours: f64,
    /// Earliest occurrence start in the bucket; places the bucket on a
    /// chronological axis.
    pub representative_date: DateTime<Utc>,
    pub occurrence_count: usize,
}

/// Per-calendar total across the full queried window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarRollup {
    pub calendar_name: String,
    pub total_duration_hours: f64,
    /// Number of distinct buckets the calendar appears in — an
    /// activity-frequency signal, intentionally distinct from the number of
    /// occurrences.
    pub bucket_count: usize,
}

/// Attainment of a configured goal for one aggregated bucket.
///
/// `change_ratio` is `total_duration_hours / goal_hours - 1`: zero means the
/// goal was met exactly, negative means shortfall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalComparison {
    pub bucket_key: BucketKey,
    pub calendar_name: String,
    pub goal_hours: f64,
    pub change_ratio: f64,
}

/// Average extracted hours per distinct day, ISO week and month observed in
/// the occurrence set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSummary {
    pub per_day: f64,
    pub per_week: f64,
    pub per_month: f64,
}

/// Duration total per configured theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeRollup {
    pub theme: String,
    pub total_duration_hours: f64,
}
