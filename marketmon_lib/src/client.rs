//! Caching wrapper around the provider client.

use std::time::Duration;

use marketmon_api::{Client, DateRange, PriceBar};

use crate::cache::{MemoryCache, SeriesKey};
use crate::error::MarketMonError;

/// Provider client with an injected in-memory TTL cache.
///
/// Cache hits bypass the network entirely; misses and expired entries fetch
/// from the provider and store the result before returning it. The cache
/// key is the exact (symbol, start, end) triple, so changing the timeframe
/// never serves a stale interval.
pub struct CachedClient {
    inner: Client,
    cache: MemoryCache,
}

impl CachedClient {
    /// Creates a cached client against the production provider.
    pub fn new(cache: MemoryCache, timeout: Duration) -> Result<Self, MarketMonError> {
        Ok(Self {
            inner: Client::new(timeout)?,
            cache,
        })
    }

    /// Creates a cached client with a custom base URL. Used for testing.
    pub fn with_base_url(
        base_url: &str,
        cache: MemoryCache,
        timeout: Duration,
    ) -> Result<Self, MarketMonError> {
        Ok(Self {
            inner: Client::with_base_url(base_url, timeout)?,
            cache,
        })
    }

    /// Fetches daily bars for a symbol, returning cached results when available.
    pub async fn daily_history(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<Vec<PriceBar>, MarketMonError> {
        let key = SeriesKey::new(symbol, range);

        if let Some(cached) = self.cache.get(&key) {
            let bars: Vec<PriceBar> = serde_json::from_str(&cached)
                .map_err(|e| MarketMonError::Cache(format!("stored series unreadable: {}", e)))?;
            tracing::debug!("{}: cache hit ({} bars)", symbol, bars.len());
            return Ok(bars);
        }

        let bars = self.inner.daily_history(symbol, range).await?;
        if let Ok(json) = serde_json::to_string(&bars) {
            self.cache.set(key, json);
        }
        Ok(bars)
    }

    /// Removes all entries from the cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
