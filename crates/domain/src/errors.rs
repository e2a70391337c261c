//! Error types used throughout the engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Hourglass
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum HourglassError {
    #[error("Duplicate source name: {0}")]
    DuplicateSourceName(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Missing goal for calendar: {0}")]
    MissingGoal(String),

    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Hourglass operations
pub type Result<T> = std::result::Result<T, HourglassError>;
