//! Response caching for lookups
//!
//! One cache per client stores successful records from every lookup
//! family. Keys are plain composite strings built by [`cache_key`];
//! implementations are infallible by signature: a cache can miss, never
//! fail a lookup.

pub mod key;
pub mod memory;
pub mod noop;

use std::time::Duration;

use async_trait::async_trait;

use crate::models::{AutonomousSystem, IpInfo, RequesterIpInfo, UserAgent};

/// Default capacity of the in-memory cache, in entries
pub const DEFAULT_MAX_ENTRIES: u64 = 2048;

/// Default time-to-live of in-memory cache entries
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// A successful record held by the cache.
///
/// All lookup families share one cache, so entries carry their kind.
/// A hit of the wrong kind behaves as a miss.
#[derive(Debug, Clone)]
pub enum CachedRecord {
    Ip(IpInfo),
    RequesterIp(RequesterIpInfo),
    Asn(AutonomousSystem),
    UserAgent(UserAgent),
}

/// Storage capability the client runs lookups against.
///
/// Implementations must tolerate concurrent calls; the client holds one
/// instance and probes it before every network dispatch.
#[async_trait]
pub trait IpregistryCache: Send + Sync {
    /// Look up a previously stored record. Absent or expired entries
    /// return `None`.
    async fn get(&self, key: &str) -> Option<CachedRecord>;

    /// Store a record under `key`, replacing any existing entry.
    async fn put(&self, key: &str, record: CachedRecord);

    /// Drop the entry under `key`, if any.
    async fn invalidate(&self, key: &str);

    /// Drop every entry.
    async fn invalidate_all(&self);
}

/// Conversion between typed records and tagged cache entries.
///
/// `from_cached` returns `None` on a kind mismatch, which the client
/// treats as a miss.
pub(crate) trait LookupRecord: Clone + Send + Sync {
    fn into_cached(self) -> CachedRecord;
    fn from_cached(cached: CachedRecord) -> Option<Self>;
}

impl LookupRecord for IpInfo {
    fn into_cached(self) -> CachedRecord {
        CachedRecord::Ip(self)
    }

    fn from_cached(cached: CachedRecord) -> Option<Self> {
        match cached {
            CachedRecord::Ip(info) => Some(info),
            _ => None,
        }
    }
}

impl LookupRecord for RequesterIpInfo {
    fn into_cached(self) -> CachedRecord {
        CachedRecord::RequesterIp(self)
    }

    fn from_cached(cached: CachedRecord) -> Option<Self> {
        match cached {
            CachedRecord::RequesterIp(info) => Some(info),
            _ => None,
        }
    }
}

impl LookupRecord for AutonomousSystem {
    fn into_cached(self) -> CachedRecord {
        CachedRecord::Asn(self)
    }

    fn from_cached(cached: CachedRecord) -> Option<Self> {
        match cached {
            CachedRecord::Asn(system) => Some(system),
            _ => None,
        }
    }
}

impl LookupRecord for UserAgent {
    fn into_cached(self) -> CachedRecord {
        CachedRecord::UserAgent(self)
    }

    fn from_cached(cached: CachedRecord) -> Option<Self> {
        match cached {
            CachedRecord::UserAgent(agent) => Some(agent),
            _ => None,
        }
    }
}

// Re-export main types
pub use key::cache_key;
pub use memory::InMemoryCache;
pub use noop::NoCache;
