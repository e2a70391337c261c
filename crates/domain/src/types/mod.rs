//! Domain data types.

pub mod aggregate;
pub mod occurrence;
pub mod range;
pub mod source;

pub use aggregate::{
    AggregatedBucket, CalendarRollup, GoalComparison, RateSummary, ThemeRollup,
};
pub use occurrence::{BucketKey, Granularity, MonthKey, Occurrence, WeekKey};
pub use range::{DateRange, RangePreset};
pub use source::{CalendarSource, ColorMap, GoalMap, ThemeMap};
