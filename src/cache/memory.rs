//! Bounded in-memory TTL cache

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use super::{CachedRecord, DEFAULT_MAX_ENTRIES, DEFAULT_TTL, IpregistryCache};

/// In-memory cache with bounded capacity and a per-entry time-to-live.
///
/// Entries are evicted once the capacity is reached and expire `ttl`
/// after insertion. Safe to share across concurrent tasks.
pub struct InMemoryCache {
    entries: Cache<String, CachedRecord>,
}

impl InMemoryCache {
    /// Cache holding at most `max_entries` records, each for `ttl`.
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { entries }
    }
}

impl Default for InMemoryCache {
    /// 2048 entries with a 10 minute time-to-live.
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_TTL)
    }
}

#[async_trait]
impl IpregistryCache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<CachedRecord> {
        self.entries.get(key).await
    }

    async fn put(&self, key: &str, record: CachedRecord) {
        self.entries.insert(key.to_string(), record).await;
    }

    async fn invalidate(&self, key: &str) {
        self.entries.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}
