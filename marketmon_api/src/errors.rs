//! Error types for the price-history client.

use thiserror::Error;

/// Errors that can occur when fetching daily price history.
#[derive(Error, Debug)]
pub enum Error {
    /// Rate limited by the provider (HTTP 429).
    #[error("Rate limited by provider (HTTP 429)")]
    RateLimited,
    /// The provider reported no data for the symbol (unknown, delisted,
    /// or nothing in the requested range).
    #[error("No data for symbol {symbol}: {reason}")]
    NoData { symbol: String, reason: String },
    /// The provider returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
    /// The HTTP request itself failed (connect, TLS, or timeout).
    #[error("Network error")]
    Network(#[from] reqwest::Error),
}
