//! Fetches the configured calendars for the last 30 days and prints the
//! weekly aggregation.
//!
//! Run with a `hourglass.toml` in the working directory, or point
//! `HOURGLASS_CONFIG` at one.

use std::sync::Arc;

use chrono::Utc;
use hourglass_core::{aggregate, rate_summary, ExtractionService};
use hourglass_domain::{Granularity, RangePreset};
use hourglass_infra::{load, HttpFeedFetcher, IcsFeedDecoder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = load()?;
    let range = RangePreset::LastThirtyDays.resolve(Utc::now().date_naive())?;

    let service = ExtractionService::new(
        Arc::new(HttpFeedFetcher::with_defaults()?),
        Arc::new(IcsFeedDecoder::new()),
    );
    let report = service.extract(&config.sources(), range).await?;

    for warning in &report.warnings {
        eprintln!("warning: {}: {}", warning.calendar_name, warning.error);
    }

    let result = aggregate(&report.occurrences, Granularity::Week);
    for bucket in &result.buckets {
        println!(
            "{} {:>14} {:>6.1}h ({} events)",
            bucket.bucket_key,
            bucket.calendar_name,
            bucket.total_duration_hours,
            bucket.occurrence_count
        );
    }

    println!("---");
    for rollup in &result.rollups {
        println!(
            "{:>14} {:>6.1}h across {} buckets",
            rollup.calendar_name, rollup.total_duration_hours, rollup.bucket_count
        );
    }

    match rate_summary(&report.occurrences) {
        Ok(rates) => println!(
            "avg {:.1}h/day, {:.1}h/week, {:.1}h/month",
            rates.per_day, rates.per_week, rates.per_month
        ),
        Err(_) => println!("no events in range"),
    }

    Ok(())
}
