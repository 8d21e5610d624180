//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for the resolution cache.
///
/// Two logical keyspaces per short code: the original URL (written once,
/// effectively immutable) and the visit counter (mutable, eventually
/// consistent with the store). The cache is a disposable accelerator: any
/// entry may vanish at any time, and callers treat a miss as "unknown",
/// never as "zero" or "not found".
///
/// Read and write operations are fail-open: implementations log errors and
/// degrade to a miss / no-op so a cache outage can never fail a request.
/// Only [`increment_count`](Self::increment_count) surfaces errors, because
/// there is no value to fake; its callers log and move on.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed, shared across instances
/// - [`crate::infrastructure::cache::MemoryCache`] - in-process fallback and test cache
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss or backend error (fail-open)
    ///
    /// # Errors
    ///
    /// Production implementations do not return errors; failures are logged
    /// and reported as misses.
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores the code to URL mapping.
    ///
    /// Write-once by convention: callers only set this on create and on
    /// cache-miss repopulation, both with the same value.
    ///
    /// # Errors
    ///
    /// Implementations log failures and return `Ok(())`.
    async fn set_url(&self, short_code: &str, original_url: &str) -> CacheResult<()>;

    /// Retrieves the cached visit counter.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(n))` when the counter key exists
    /// - `Ok(None)` on miss or backend error (fail-open)
    async fn get_count(&self, short_code: &str) -> CacheResult<Option<i64>>;

    /// Seeds the visit counter with a known store value.
    ///
    /// # Errors
    ///
    /// Implementations log failures and return `Ok(())`.
    async fn set_count(&self, short_code: &str, count: i64) -> CacheResult<()>;

    /// Atomically adds one to the visit counter and returns the new value.
    ///
    /// Must initialize missing keys at 1 (zero base), and must stay atomic
    /// under concurrent redirects on the same code: lost updates here would
    /// silently undercount popular links.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::OperationError`] on backend failure; callers
    /// log it and let the redirect proceed.
    async fn increment_count(&self, short_code: &str) -> CacheResult<i64>;

    /// Drops both keyspaces for a code.
    ///
    /// # Errors
    ///
    /// Implementations log failures and return `Ok(())`.
    async fn invalidate(&self, short_code: &str) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    ///
    /// Used by health check endpoints to report cache status.
    async fn health_check(&self) -> bool;
}
