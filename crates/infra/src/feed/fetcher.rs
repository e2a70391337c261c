//! HTTP implementation of the feed fetcher port.

use async_trait::async_trait;
use hourglass_core::FeedFetcher;
use hourglass_domain::{CalendarSource, Result};
use tracing::{debug, instrument};

use crate::http::HttpClient;

/// Fetches calendar documents over HTTP(S).
#[derive(Clone)]
pub struct HttpFeedFetcher {
    client: HttpClient,
}

impl HttpFeedFetcher {
    /// Create a fetcher over an existing HTTP client.
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Fetcher with default client configuration.
    ///
    /// # Errors
    /// Propagates HTTP client construction failures.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(HttpClient::new()?))
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    #[instrument(skip(self, source), fields(calendar = %source.name))]
    async fn fetch(&self, source: &CalendarSource) -> Result<String> {
        let document = self.client.fetch_text(&source.url).await?;
        debug!(bytes = document.len(), "fetched calendar document");
        Ok(document)
    }
}
