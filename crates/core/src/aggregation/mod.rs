//! Aggregation engine - rolls occurrences up into duration buckets.
//!
//! Every output field is an explicit sum, count, minimum or ratio over the
//! input records; nothing is inferred from "whatever numeric columns exist".
//! All functions derive new records and never mutate their inputs.

use ahash::{AHashMap, AHashSet};
use chrono::{DateTime, Utc};
use hourglass_domain::{
    AggregatedBucket, BucketKey, CalendarRollup, GoalComparison, GoalMap, Granularity,
    HourglassError, Occurrence, RateSummary, Result, ThemeMap, ThemeRollup,
};

/// Buckets and per-calendar rollups produced by one aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Sorted by representative date ascending, ties by calendar name.
    pub buckets: Vec<AggregatedBucket>,
    /// Sorted by total duration descending, ties by calendar name.
    pub rollups: Vec<CalendarRollup>,
}

struct Group {
    total: f64,
    count: usize,
    earliest: DateTime<Utc>,
}

/// Group occurrences by `(bucket key, calendar)` and sum durations.
///
/// Accumulation follows input order within each group, so repeated calls
/// over the same input produce bit-identical sums.
pub fn aggregate(occurrences: &[Occurrence], granularity: Granularity) -> Aggregation {
    let mut groups: AHashMap<(BucketKey, &str), Group> = AHashMap::new();

    for occurrence in occurrences {
        let key = (occurrence.bucket_key(granularity), occurrence.calendar_name.as_str());
        groups
            .entry(key)
            .and_modify(|group| {
                group.total += occurrence.duration_hours;
                group.count += 1;
                group.earliest = group.earliest.min(occurrence.start);
            })
            .or_insert_with(|| Group {
                total: occurrence.duration_hours,
                count: 1,
                earliest: occurrence.start,
            });
    }

    let mut buckets: Vec<AggregatedBucket> = groups
        .into_iter()
        .map(|((bucket_key, calendar_name), group)| AggregatedBucket {
            bucket_key,
            calendar_name: calendar_name.to_string(),
            total_duration_hours: group.total,
            representative_date: group.earliest,
            occurrence_count: group.count,
        })
        .collect();

    buckets.sort_by(|a, b| {
        a.representative_date
            .cmp(&b.representative_date)
            .then_with(|| a.calendar_name.cmp(&b.calendar_name))
    });

    let rollups = rollup_calendars(&buckets);
    Aggregation { buckets, rollups }
}

fn rollup_calendars(buckets: &[AggregatedBucket]) -> Vec<CalendarRollup> {
    let mut totals: AHashMap<&str, (f64, usize)> = AHashMap::new();

    for bucket in buckets {
        let entry = totals.entry(bucket.calendar_name.as_str()).or_insert((0.0, 0));
        entry.0 += bucket.total_duration_hours;
        entry.1 += 1;
    }

    let mut rollups: Vec<CalendarRollup> = totals
        .into_iter()
        .map(|(calendar_name, (total, bucket_count))| CalendarRollup {
            calendar_name: calendar_name.to_string(),
            total_duration_hours: total,
            bucket_count,
        })
        .collect();

    rollups.sort_by(|a, b| {
        b.total_duration_hours
            .total_cmp(&a.total_duration_hours)
            .then_with(|| a.calendar_name.cmp(&b.calendar_name))
    });
    rollups
}

/// Goal attainment per aggregated bucket.
///
/// # Errors
/// Returns `HourglassError::MissingGoal` naming the first calendar present
/// in `buckets` without a positive configured goal. A zero goal cannot
/// express attainment, so it is treated the same as an absent one rather
/// than silently defaulting the ratio.
pub fn compare_goals(
    buckets: &[AggregatedBucket],
    goals: &GoalMap,
) -> Result<Vec<GoalComparison>> {
    buckets
        .iter()
        .map(|bucket| {
            let goal_hours = goals
                .get(&bucket.calendar_name)
                .copied()
                .filter(|goal| *goal > 0.0)
                .ok_or_else(|| HourglassError::MissingGoal(bucket.calendar_name.clone()))?;

            Ok(GoalComparison {
                bucket_key: bucket.bucket_key,
                calendar_name: bucket.calendar_name.clone(),
                goal_hours,
                change_ratio: bucket.total_duration_hours / goal_hours - 1.0,
            })
        })
        .collect()
}

/// Average hours per distinct day, ISO week and month observed in the
/// occurrence set.
///
/// Denominators come from the occurrence set itself, not from any bucket
/// set, so the rates are independent of the display granularity.
///
/// # Errors
/// Returns `HourglassError::EmptyDataset` when there are no occurrences.
pub fn rate_summary(occurrences: &[Occurrence]) -> Result<RateSummary> {
    if occurrences.is_empty() {
        return Err(HourglassError::EmptyDataset("no occurrences to compute rates over".into()));
    }

    let mut days = AHashSet::new();
    let mut weeks = AHashSet::new();
    let mut months = AHashSet::new();
    let mut total = 0.0;

    for occurrence in occurrences {
        days.insert(occurrence.day_key);
        weeks.insert(occurrence.week_key);
        months.insert(occurrence.month_key);
        total += occurrence.duration_hours;
    }

    Ok(RateSummary {
        per_day: total / days.len() as f64,
        per_week: total / weeks.len() as f64,
        per_month: total / months.len() as f64,
    })
}

/// Sum calendar rollups by configured theme.
///
/// Calendars without a configured theme keep their own name as the theme
/// label. Sorted by total duration descending, ties by theme ascending.
pub fn theme_rollups(rollups: &[CalendarRollup], themes: &ThemeMap) -> Vec<ThemeRollup> {
    let mut totals: AHashMap<&str, f64> = AHashMap::new();

    for rollup in rollups {
        let theme = themes
            .get(&rollup.calendar_name)
            .map_or(rollup.calendar_name.as_str(), String::as_str);
        *totals.entry(theme).or_insert(0.0) += rollup.total_duration_hours;
    }

    let mut out: Vec<ThemeRollup> = totals
        .into_iter()
        .map(|(theme, total_duration_hours)| ThemeRollup {
            theme: theme.to_string(),
            total_duration_hours,
        })
        .collect();

    out.sort_by(|a, b| {
        b.total_duration_hours
            .total_cmp(&a.total_duration_hours)
            .then_with(|| a.theme.cmp(&b.theme))
    });
    out
}
