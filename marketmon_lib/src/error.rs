//! Error types for the library layer.

use thiserror::Error;

/// Errors produced by the dashboard pipeline and its supporting layers.
///
/// `InvalidInput` aborts a run before any ticker is processed; every other
/// variant is confined to the ticker that raised it.
#[derive(Error, Debug)]
pub enum MarketMonError {
    /// User-provided input failed validation (empty or malformed ticker list).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The provider could not supply usable data for a symbol.
    #[error("Data unavailable: {0}")]
    DataUnavailable(#[from] marketmon_api::Error),
    /// Fewer than two bars: the percentage change cannot be computed.
    #[error("Insufficient history: {0} bar(s), need at least 2")]
    InsufficientHistory(usize),
    /// A cache operation failed (e.g. deserialization of cached data).
    #[error("Cache error: {0}")]
    Cache(String),
    /// JSON serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Any other failure surfaced while processing a ticker.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}
