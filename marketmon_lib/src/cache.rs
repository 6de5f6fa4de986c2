//! In-memory TTL cache for fetched price series, backed by `DashMap`.

use dashmap::DashMap;
use std::time::{Duration, Instant};

use marketmon_api::DateRange;

/// Cache key: one price-series fetch is identified by its symbol and the
/// exact date interval requested.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    pub symbol: String,
    pub range: DateRange,
}

impl SeriesKey {
    pub fn new(symbol: &str, range: &DateRange) -> Self {
        Self {
            symbol: symbol.to_string(),
            range: *range,
        }
    }
}

/// A single cached value with its expiration time.
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// Thread-safe in-memory cache with time-to-live expiration.
///
/// Values are stored as serialized JSON strings. Expired entries are
/// lazily evicted on the next `get` call for that key. The cache is owned
/// by the caller and injected where it is needed; there are no globals.
pub struct MemoryCache {
    store: DashMap<SeriesKey, CacheEntry>,
    ttl: Duration,
}

impl MemoryCache {
    /// Creates a new cache with the given time-to-live for entries.
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached value for `key`, or `None` if missing or expired.
    pub fn get(&self, key: &SeriesKey) -> Option<String> {
        let entry = self.store.get(key)?;
        if Instant::now() > entry.expires_at {
            drop(entry);
            self.store.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    /// Inserts or overwrites a cache entry. The entry expires after the configured TTL.
    pub fn set(&self, key: SeriesKey, value: String) {
        self.store.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Removes all entries from the cache.
    pub fn clear(&self) {
        self.store.clear();
    }
}
