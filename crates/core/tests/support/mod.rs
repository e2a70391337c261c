//! In-memory port mocks shared by core integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hourglass_core::{FeedDecoder, FeedEvent, FeedFetcher};
use hourglass_domain::{CalendarSource, DateRange, HourglassError, Result};

/// Scripted fetcher returning canned documents (or failures) per source name.
///
/// Records every fetch so tests can assert that duplicate-name validation
/// aborts before any network activity.
#[derive(Default, Clone)]
pub struct MockFeedFetcher {
    documents: Arc<Mutex<HashMap<String, Result<String>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockFeedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, name: &str, document: &str) -> Self {
        self.documents
            .lock()
            .expect("mock lock")
            .insert(name.to_string(), Ok(document.to_string()));
        self
    }

    pub fn with_failure(self, name: &str, error: HourglassError) -> Self {
        self.documents.lock().expect("mock lock").insert(name.to_string(), Err(error));
        self
    }

    pub fn fetched_sources(&self) -> Vec<String> {
        self.calls.lock().expect("mock lock").clone()
    }
}

#[async_trait]
impl FeedFetcher for MockFeedFetcher {
    async fn fetch(&self, source: &CalendarSource) -> Result<String> {
        self.calls.lock().expect("mock lock").push(source.name.clone());
        self.documents
            .lock()
            .expect("mock lock")
            .get(&source.name)
            .cloned()
            .unwrap_or_else(|| {
                Err(HourglassError::Fetch(format!(
                    "no canned document for '{}'",
                    source.name
                )))
            })
    }
}

/// Line-oriented decoder for tests: each non-empty line is
/// `summary|start_rfc3339|end_rfc3339`, with `-` for a missing summary.
///
/// Applies the same start-instant window rule the production decoder does.
pub struct LineDecoder;

impl FeedDecoder for LineDecoder {
    fn expand(&self, document: &str, window: &DateRange) -> Result<Vec<FeedEvent>> {
        let mut events = Vec::new();

        for line in document.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let mut parts = line.splitn(3, '|');
            let summary = parts
                .next()
                .filter(|summary| *summary != "-")
                .map(str::to_string);
            let start = parse_instant(parts.next(), line)?;
            let end = parse_instant(parts.next(), line)?;

            if window.contains(start) {
                events.push(FeedEvent { summary, start, end });
            }
        }

        Ok(events)
    }
}

/// Decoder that always fails, for decode-warning tests.
pub struct FailingDecoder;

impl FeedDecoder for FailingDecoder {
    fn expand(&self, _document: &str, _window: &DateRange) -> Result<Vec<FeedEvent>> {
        Err(HourglassError::Decode("document is not a calendar".into()))
    }
}

fn parse_instant(field: Option<&str>, line: &str) -> Result<DateTime<Utc>> {
    let raw = field
        .ok_or_else(|| HourglassError::Decode(format!("malformed test line: {line}")))?;
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|err| HourglassError::Decode(format!("bad instant '{raw}': {err}")))
}
