//! Cache that never stores anything

use async_trait::async_trait;

use super::{CachedRecord, IpregistryCache};

/// No-op cache: every probe misses, every store is dropped.
///
/// The default for new clients, so lookups always reach the network
/// unless a real cache is injected.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

#[async_trait]
impl IpregistryCache for NoCache {
    async fn get(&self, _key: &str) -> Option<CachedRecord> {
        None
    }

    async fn put(&self, _key: &str, _record: CachedRecord) {}

    async fn invalidate(&self, _key: &str) {}

    async fn invalidate_all(&self) {}
}
