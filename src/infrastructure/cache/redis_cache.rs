//! Redis-backed cache implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

use super::service::{CacheError, CacheResult, CacheService};

const URL_KEY_PREFIX: &str = "url:";
const COUNT_KEY_PREFIX: &str = "count:";

/// Redis cache for fast redirect resolution.
///
/// Uses `ConnectionManager` for connection reuse and reconnection. Every
/// command runs under the configured operation timeout so a stalled Redis
/// can only slow a request by that bound, never hang it. All operations are
/// fail-open except `INCR`, whose errors the service logs and ignores.
pub struct RedisCache {
    client: ConnectionManager,
    ttl_seconds: u64,
    op_timeout: Duration,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - connection string (e.g., `"redis://localhost:6379"`)
    /// - `ttl_seconds` - expiry applied to both keyspaces on writes; `0`
    ///   keeps entries until evicted (`CACHE_TTL_SECONDS`)
    /// - `op_timeout_ms` - per-command deadline (`CACHE_OP_TIMEOUT_MS`)
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(
        redis_url: &str,
        ttl_seconds: u64,
        op_timeout_ms: u64,
    ) -> CacheResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            ttl_seconds,
            op_timeout: Duration::from_millis(op_timeout_ms),
        })
    }

    fn url_key(short_code: &str) -> String {
        format!("{URL_KEY_PREFIX}{short_code}")
    }

    fn count_key(short_code: &str) -> String {
        format!("{COUNT_KEY_PREFIX}{short_code}")
    }

    /// Runs one Redis command under the operation timeout.
    async fn bounded<T, F>(&self, op: &str, fut: F) -> CacheResult<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(CacheError::OperationError(format!("{op}: {e}"))),
            Err(_) => Err(CacheError::OperationError(format!(
                "{op}: timed out after {:?}",
                self.op_timeout
            ))),
        }
    }

    /// SET, with expiry when a TTL is configured.
    async fn store(&self, op: &str, key: &str, value: String) -> CacheResult<()> {
        let mut conn = self.client.clone();
        if self.ttl_seconds > 0 {
            self.bounded(op, conn.set_ex::<_, _, ()>(key, value, self.ttl_seconds))
                .await
        } else {
            self.bounded(op, conn.set::<_, _, ()>(key, value)).await
        }
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let key = Self::url_key(short_code);
        let mut conn = self.client.clone();

        match self
            .bounded("GET url", conn.get::<_, Option<String>>(&key))
            .await
        {
            Ok(Some(url)) => {
                debug!("Cache HIT: {}", short_code);
                Ok(Some(url))
            }
            Ok(None) => {
                debug!("Cache MISS: {}", short_code);
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", short_code, e);
                Ok(None)
            }
        }
    }

    async fn set_url(&self, short_code: &str, original_url: &str) -> CacheResult<()> {
        let key = Self::url_key(short_code);

        if let Err(e) = self.store("SET url", &key, original_url.to_string()).await {
            warn!("Redis SET error for {}: {}", short_code, e);
        }
        Ok(())
    }

    async fn get_count(&self, short_code: &str) -> CacheResult<Option<i64>> {
        let key = Self::count_key(short_code);
        let mut conn = self.client.clone();

        match self
            .bounded("GET count", conn.get::<_, Option<i64>>(&key))
            .await
        {
            Ok(value) => Ok(value),
            Err(e) => {
                error!("Redis GET count error for {}: {}", short_code, e);
                Ok(None)
            }
        }
    }

    async fn set_count(&self, short_code: &str, count: i64) -> CacheResult<()> {
        let key = Self::count_key(short_code);

        if let Err(e) = self.store("SET count", &key, count.to_string()).await {
            warn!("Redis SET count error for {}: {}", short_code, e);
        }
        Ok(())
    }

    async fn increment_count(&self, short_code: &str) -> CacheResult<i64> {
        let key = Self::count_key(short_code);
        let mut conn = self.client.clone();

        // INCR is atomic server-side and treats a missing key as 0.
        self.bounded("INCR count", conn.incr::<_, _, i64>(&key, 1i64))
            .await
    }

    async fn invalidate(&self, short_code: &str) -> CacheResult<()> {
        let keys = vec![Self::url_key(short_code), Self::count_key(short_code)];
        let mut conn = self.client.clone();

        match self.bounded("DEL", conn.del::<_, i32>(keys)).await {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!("Cache INVALIDATE: {}", short_code);
                }
                Ok(())
            }
            Err(e) => {
                warn!("Redis DEL error for {}: {}", short_code, e);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        self.bounded("PING", conn.ping::<()>()).await.is_ok()
    }
}
