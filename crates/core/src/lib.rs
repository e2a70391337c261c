//! # Hourglass Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The occurrence extraction service and its port traits
//! - The aggregation engine (buckets, rollups, goals, rates)
//!
//! ## Architecture Principles
//! - Only depends on `hourglass-domain`
//! - No HTTP or parsing code; all external dependencies via traits
//! - Pure, testable business logic

pub mod aggregation;
pub mod extraction;

// Re-export specific items to avoid ambiguity
pub use aggregation::{aggregate, compare_goals, rate_summary, theme_rollups, Aggregation};
pub use extraction::ports::{FeedDecoder, FeedEvent, FeedFetcher};
pub use extraction::service::{ExtractionReport, ExtractionService, SourceWarning};
