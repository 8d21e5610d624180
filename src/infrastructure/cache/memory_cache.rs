//! In-process cache implementation.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use super::service::{CacheResult, CacheService};

/// A DashMap-backed cache living inside the process.
///
/// Used when Redis is not configured or unreachable at startup, and by the
/// test suite. Per-key atomicity comes from DashMap's sharded locking: an
/// increment holds the shard guard for the whole read-modify-write.
///
/// Entries never expire; for a single-process deployment that matches the
/// "TTL-less" contract of the url keyspace, and counters are reconciled
/// from the store on every miss anyway.
#[derive(Default)]
pub struct MemoryCache {
    urls: DashMap<String, String>,
    counts: DashMap<String, i64>,
}

impl MemoryCache {
    pub fn new() -> Self {
        debug!("Using in-process cache");
        Self::default()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        Ok(self.urls.get(short_code).map(|url| url.clone()))
    }

    async fn set_url(&self, short_code: &str, original_url: &str) -> CacheResult<()> {
        self.urls
            .insert(short_code.to_string(), original_url.to_string());
        Ok(())
    }

    async fn get_count(&self, short_code: &str) -> CacheResult<Option<i64>> {
        Ok(self.counts.get(short_code).map(|count| *count))
    }

    async fn set_count(&self, short_code: &str, count: i64) -> CacheResult<()> {
        self.counts.insert(short_code.to_string(), count);
        Ok(())
    }

    async fn increment_count(&self, short_code: &str) -> CacheResult<i64> {
        let mut entry = self.counts.entry(short_code.to_string()).or_insert(0);
        *entry += 1;
        Ok(*entry)
    }

    async fn invalidate(&self, short_code: &str) -> CacheResult<()> {
        self.urls.remove(short_code);
        self.counts.remove(short_code);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
