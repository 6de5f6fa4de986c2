//! Library layer for marketmon: the per-ticker dashboard pipeline.
//!
//! Wraps the `marketmon_api` provider client with an in-memory TTL cache,
//! ticker-list validation, timeframe resolution, moving-average and summary
//! computation, candlestick figure specs, and the column-grid layout.

pub mod cache;
pub mod chart;
pub mod client;
pub mod error;
pub mod indicators;
pub mod layout;
pub mod pipeline;
pub mod range;
pub mod summary;
pub mod validation;

pub use marketmon_api;
pub use marketmon_api::{DateRange, PriceBar};

pub use cache::MemoryCache;
pub use client::CachedClient;
pub use error::MarketMonError;
pub use indicators::PriceSeries;
pub use pipeline::{EmptyPolicy, PipelineConfig, TickerOutcome, TickerPanel};
pub use range::Timeframe;
pub use summary::Summary;
