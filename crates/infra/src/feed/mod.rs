//! Calendar feed adapters: HTTP fetching and ICS decoding.

pub mod decoder;
pub mod fetcher;

pub use decoder::IcsFeedDecoder;
pub use fetcher::HttpFeedFetcher;
