//! Occurrence extraction: feed ports and the expansion service.

pub mod ports;
pub mod service;

pub use ports::{FeedDecoder, FeedEvent, FeedFetcher};
pub use service::{ExtractionReport, ExtractionService, SourceWarning};
