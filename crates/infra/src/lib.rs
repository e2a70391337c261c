//! # Hourglass Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client and feed fetcher (reqwest)
//! - ICS decoder with recurrence expansion (ical + rrule)
//! - Feed configuration loading (TOML)
//!
//! ## Architecture
//! - Implements traits defined in `hourglass-core`
//! - Depends on `hourglass-domain` and `hourglass-core`
//! - Contains all "impure" code (I/O, parsing)

pub mod config;
pub mod errors;
pub mod feed;
pub mod http;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use feed::*;
pub use http::*;
