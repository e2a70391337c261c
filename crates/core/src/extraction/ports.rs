//! Feed ingestion port interfaces

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hourglass_domain::{CalendarSource, DateRange, Result};

/// Decoder-level event record: one concrete instance after recurrence
/// expansion, before it is tagged with its owning calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEvent {
    pub summary: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Trait for fetching raw calendar documents
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch the raw calendar document for one source.
    async fn fetch(&self, source: &CalendarSource) -> Result<String>;
}

/// Trait for decoding calendar documents and expanding recurrences
pub trait FeedDecoder: Send + Sync {
    /// Decode a document and expand every event (recurring or not) into the
    /// concrete instances whose start falls inside `window`.
    ///
    /// Implementations filter by start instant only; events partially
    /// overlapping the window boundary are returned in full, never clipped.
    fn expand(&self, document: &str, window: &DateRange) -> Result<Vec<FeedEvent>>;
}
