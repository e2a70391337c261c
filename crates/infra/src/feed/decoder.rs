//! ICS decoder: parses calendar documents and expands recurrences.
//!
//! Documents are parsed with the `ical` crate (VEVENT property walk) and
//! RRULE/RDATE/EXDATE sets are expanded with the `rrule` crate. The decoder
//! owns the window rule: an instance is emitted iff its start falls inside
//! the closed day window, and events are never clipped to the boundary.

use std::io::BufReader;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use hourglass_core::{FeedDecoder, FeedEvent};
use hourglass_domain::{DateRange, HourglassError, Result};
use ical::parser::ical::component::IcalEvent;
use ical::property::Property;
use rrule::{RRuleSet, Tz};
use tracing::warn;

/// Cap on expanded instances per recurring event.
const MAX_EXPANSIONS: u16 = 10_000;

/// Decodes ICS documents and expands recurrence rules against a window.
///
/// TZID parameters are not resolved: floating and zoned local times are read
/// as UTC wall-clock values.
#[derive(Debug, Default, Clone, Copy)]
pub struct IcsFeedDecoder;

impl IcsFeedDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self
    }
}

impl FeedDecoder for IcsFeedDecoder {
    fn expand(&self, document: &str, window: &DateRange) -> Result<Vec<FeedEvent>> {
        let mut events = Vec::new();
        let mut calendar_count = 0usize;

        for calendar in ical::IcalParser::new(BufReader::new(document.as_bytes())) {
            let calendar = calendar.map_err(|err| {
                HourglassError::Decode(format!("invalid calendar document: {err}"))
            })?;
            calendar_count += 1;

            for component in &calendar.events {
                match EventDefinition::from_component(component) {
                    Ok(Some(definition)) => definition.expand_into(window, &mut events)?,
                    // No DTSTART; nothing to place on a timeline.
                    Ok(None) => {}
                    Err(error) => warn!(%error, "skipping unreadable event"),
                }
            }
        }

        if calendar_count == 0 {
            return Err(HourglassError::Decode(
                "document contains no calendar".into(),
            ));
        }

        Ok(events)
    }
}

/// One VEVENT, reduced to the fields expansion needs.
struct EventDefinition {
    summary: Option<String>,
    start: DateTime<Utc>,
    duration: Duration,
    recurrence: Option<String>,
    exception_dates: Vec<DateTime<Utc>>,
    extra_dates: Vec<DateTime<Utc>>,
}

impl EventDefinition {
    fn from_component(event: &IcalEvent) -> Result<Option<Self>> {
        let mut summary = None;
        let mut dtstart: Option<IcsInstant> = None;
        let mut dtend: Option<IcsInstant> = None;
        let mut duration_prop: Option<Duration> = None;
        let mut recurrence = None;
        let mut exception_dates = Vec::new();
        let mut extra_dates = Vec::new();

        for property in &event.properties {
            let Some(value) = property.value.as_deref() else { continue };

            match property.name.as_str() {
                "SUMMARY" => {
                    summary = Some(value.to_string()).filter(|s| !s.trim().is_empty());
                }
                "DTSTART" => dtstart = Some(parse_instant(value, property)?),
                "DTEND" => dtend = Some(parse_instant(value, property)?),
                "DURATION" => duration_prop = Some(parse_duration(value)?),
                "RRULE" => recurrence = Some(value.to_string()),
                "EXDATE" => exception_dates.extend(parse_instant_list(value, property)?),
                "RDATE" => extra_dates.extend(parse_instant_list(value, property)?),
                _ => {}
            }
        }

        let Some(start) = dtstart else { return Ok(None) };

        // DTEND wins over DURATION; an all-day DTEND date is exclusive, so
        // the subtraction already yields whole 24h days.
        let duration = match (dtend, duration_prop) {
            (Some(end), _) => end.instant - start.instant,
            (None, Some(duration)) => duration,
            (None, None) if start.is_date => Duration::days(1),
            (None, None) => Duration::zero(),
        };

        Ok(Some(Self {
            summary,
            start: start.instant,
            duration,
            recurrence,
            exception_dates,
            extra_dates,
        }))
    }

    fn expand_into(&self, window: &DateRange, out: &mut Vec<FeedEvent>) -> Result<()> {
        if let Some(rule) = &self.recurrence {
            return self.expand_recurring(rule, window, out);
        }

        for start in std::iter::once(self.start).chain(self.extra_dates.iter().copied()) {
            if window.contains(start) {
                out.push(self.instance_at(start));
            }
        }
        Ok(())
    }

    fn expand_recurring(
        &self,
        rule: &str,
        window: &DateRange,
        out: &mut Vec<FeedEvent>,
    ) -> Result<()> {
        let mut block = format!("DTSTART:{}\nRRULE:{}", format_utc(self.start), rule);
        if !self.exception_dates.is_empty() {
            block.push_str(&format!("\nEXDATE:{}", join_utc(&self.exception_dates)));
        }
        if !self.extra_dates.is_empty() {
            block.push_str(&format!("\nRDATE:{}", join_utc(&self.extra_dates)));
        }

        let set: RRuleSet = block.parse().map_err(|err| {
            HourglassError::Decode(format!("invalid recurrence rule '{rule}': {err}"))
        })?;

        // Bounds widened by one second on each side; the closed-window rule
        // below decides inclusion, independent of the expander's own bound
        // semantics.
        let after = (window.window_start() - Duration::seconds(1)).with_timezone(&Tz::UTC);
        let before = (window.window_end() + Duration::seconds(1)).with_timezone(&Tz::UTC);
        let result = set.after(after).before(before).all(MAX_EXPANSIONS);

        if result.limited {
            warn!(rule, cap = MAX_EXPANSIONS, "recurrence expansion truncated at cap");
        }

        for date in result.dates {
            let start = date.with_timezone(&Utc);
            if window.contains(start) {
                out.push(self.instance_at(start));
            }
        }
        Ok(())
    }

    fn instance_at(&self, start: DateTime<Utc>) -> FeedEvent {
        FeedEvent { summary: self.summary.clone(), start, end: start + self.duration }
    }
}

/// A parsed DATE or DATE-TIME value; dates resolve to midnight.
struct IcsInstant {
    instant: DateTime<Utc>,
    is_date: bool,
}

fn parse_instant(value: &str, property: &Property) -> Result<IcsInstant> {
    let trimmed = value.trim();

    if is_date_value(trimmed, property) {
        let date = NaiveDate::parse_from_str(trimmed, "%Y%m%d").map_err(|err| {
            HourglassError::Decode(format!("bad ICS date '{trimmed}': {err}"))
        })?;
        return Ok(IcsInstant { instant: date.and_time(NaiveTime::MIN).and_utc(), is_date: true });
    }

    let normalized = trimmed.trim_end_matches('Z');
    let datetime = NaiveDateTime::parse_from_str(normalized, "%Y%m%dT%H%M%S").map_err(|err| {
        HourglassError::Decode(format!("bad ICS datetime '{trimmed}': {err}"))
    })?;
    Ok(IcsInstant { instant: datetime.and_utc(), is_date: false })
}

/// EXDATE/RDATE carry comma-separated value lists.
fn parse_instant_list(value: &str, property: &Property) -> Result<Vec<DateTime<Utc>>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_instant(part, property).map(|instant| instant.instant))
        .collect()
}

fn is_date_value(value: &str, property: &Property) -> bool {
    let declared = property.params.as_ref().is_some_and(|params| {
        params.iter().any(|(name, values)| {
            name.eq_ignore_ascii_case("VALUE")
                && values.iter().any(|v| v.eq_ignore_ascii_case("DATE"))
        })
    });
    declared || (value.len() == 8 && !value.contains('T'))
}

/// Subset of RFC 5545 DURATION: `[+|-]P[nW][nD][T[nH][nM][nS]]`.
fn parse_duration(value: &str) -> Result<Duration> {
    let trimmed = value.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let rest = rest.strip_prefix('P').ok_or_else(|| {
        HourglassError::Decode(format!("bad ICS duration '{trimmed}': missing P"))
    })?;

    let mut seconds: i64 = 0;
    let mut digits = String::new();
    let mut in_time = false;

    for ch in rest.chars() {
        match ch {
            'T' => in_time = true,
            '0'..='9' => digits.push(ch),
            'W' | 'D' | 'H' | 'M' | 'S' => {
                let amount: i64 = digits.parse().map_err(|err| {
                    HourglassError::Decode(format!("bad ICS duration '{trimmed}': {err}"))
                })?;
                digits.clear();

                let unit = match (ch, in_time) {
                    ('W', false) => 604_800,
                    ('D', false) => 86_400,
                    ('H', true) => 3_600,
                    ('M', true) => 60,
                    ('S', true) => 1,
                    _ => {
                        return Err(HourglassError::Decode(format!(
                            "bad ICS duration '{trimmed}': unit {ch} out of place"
                        )))
                    }
                };
                seconds += amount * unit;
            }
            _ => {
                return Err(HourglassError::Decode(format!(
                    "bad ICS duration '{trimmed}': unexpected '{ch}'"
                )))
            }
        }
    }

    let duration = Duration::seconds(seconds);
    Ok(if negative { -duration } else { duration })
}

fn format_utc(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

fn join_utc(instants: &[DateTime<Utc>]) -> String {
    instants.iter().map(|instant| format_utc(*instant)).collect::<Vec<_>>().join(",")
}
