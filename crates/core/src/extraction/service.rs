//! Occurrence extraction service - core orchestration logic

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use hourglass_domain::{CalendarSource, DateRange, HourglassError, Occurrence, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::ports::{FeedDecoder, FeedFetcher};

/// Default bound on concurrent source fetches.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Per-source failure carried in the extraction report.
///
/// Lets callers distinguish "zero events" from "zero events because the
/// source failed".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceWarning {
    pub calendar_name: String,
    pub error: HourglassError,
}

/// Result of one extraction call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Occurrences grouped by source encounter order.
    pub occurrences: Vec<Occurrence>,
    /// One entry per source that failed to contribute.
    pub warnings: Vec<SourceWarning>,
}

/// Occurrence extraction service
pub struct ExtractionService {
    fetcher: Arc<dyn FeedFetcher>,
    decoder: Arc<dyn FeedDecoder>,
    max_concurrent: usize,
}

impl ExtractionService {
    /// Create a new extraction service
    pub fn new(fetcher: Arc<dyn FeedFetcher>, decoder: Arc<dyn FeedDecoder>) -> Self {
        Self { fetcher, decoder, max_concurrent: DEFAULT_MAX_CONCURRENT }
    }

    /// Bound the number of sources fetched in parallel.
    pub fn with_max_concurrent(mut self, limit: usize) -> Self {
        self.max_concurrent = limit.max(1);
        self
    }

    /// Fetch every source and expand its events into occurrences.
    ///
    /// Sources are fetched concurrently; results keep source encounter
    /// order. A source that fails to fetch or decode degrades to a
    /// [`SourceWarning`] and never aborts the batch.
    ///
    /// # Errors
    /// Returns `HourglassError::DuplicateSourceName` before any fetch when
    /// two sources share a name.
    #[instrument(skip(self, sources), fields(source_count = sources.len()))]
    pub async fn extract(
        &self,
        sources: &[CalendarSource],
        range: DateRange,
    ) -> Result<ExtractionReport> {
        ensure_unique_names(sources)?;

        let results = stream::iter(sources)
            .map(|source| self.extract_source(source, range))
            .buffered(self.max_concurrent)
            .collect::<Vec<_>>()
            .await;

        let mut report = ExtractionReport::default();
        for (source, result) in sources.iter().zip(results) {
            match result {
                Ok(occurrences) => report.occurrences.extend(occurrences),
                Err(error) => {
                    warn!(calendar = %source.name, %error, "source skipped");
                    report
                        .warnings
                        .push(SourceWarning { calendar_name: source.name.clone(), error });
                }
            }
        }

        info!(
            occurrences = report.occurrences.len(),
            warnings = report.warnings.len(),
            "extraction finished"
        );
        Ok(report)
    }

    async fn extract_source(
        &self,
        source: &CalendarSource,
        range: DateRange,
    ) -> Result<Vec<Occurrence>> {
        let document = self.fetcher.fetch(source).await?;
        let events = self.decoder.expand(&document, &range)?;

        let mut occurrences = Vec::with_capacity(events.len());
        for event in events {
            match Occurrence::new(event.summary, source.name.clone(), event.start, event.end) {
                Ok(occurrence) => occurrences.push(occurrence),
                Err(error) => {
                    warn!(calendar = %source.name, %error, "dropping malformed event");
                }
            }
        }

        debug!(calendar = %source.name, count = occurrences.len(), "source expanded");
        Ok(occurrences)
    }
}

fn ensure_unique_names(sources: &[CalendarSource]) -> Result<()> {
    let mut seen = HashSet::new();
    for source in sources {
        if !seen.insert(source.name.as_str()) {
            return Err(HourglassError::DuplicateSourceName(source.name.clone()));
        }
    }
    Ok(())
}
