use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::domain::entities::Visit;
use crate::domain::repository::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::base62;
use crate::utils::url_normalizer::normalize_url;

/// Outcome of creating a short link.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedShortUrl {
    pub short_code: String,
    pub short_url: String,
}

/// Aggregated stats for one short link.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlStats {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub visits_count: i64,
}

/// One page of visit history plus the total row count for pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitHistory {
    pub total_items: i64,
    pub visits: Vec<Visit>,
}

/// Core shortening workflow: code assignment, cached resolution, stats.
///
/// The service owns no storage itself; it drives a [`UrlRepository`] for
/// durable state and a [`CacheService`] as a read-through layer in front
/// of it. Cache failures never fail a request, only the store does.
pub struct ShortenerService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    base_url: String,
}

impl ShortenerService {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            cache,
            base_url: base_url.into(),
        }
    }

    /// Creates a short link for `raw_url`.
    ///
    /// The URL is normalized first, then inserted as a pending row so the
    /// database assigns the id that the code is derived from. The code is
    /// written back in a second step; only then does the row resolve.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidInput`] for unparsable or non-http(s) URLs,
    /// [`AppError::DuplicateUrl`] when the URL is already shortened, and
    /// [`AppError::CodeTaken`] if code assignment collides twice.
    pub async fn create(&self, raw_url: &str) -> Result<CreatedShortUrl, AppError> {
        let url = normalize_url(raw_url)?;

        if let Some(existing) = self.repository.find_by_url(&url).await? {
            return Err(AppError::duplicate_url(existing.original_url));
        }

        let id = self.repository.insert_pending(&url).await?;
        let short_code = base62::encode(id as u64);
        let short_code = self.finalize_with_retry(id, short_code).await?;

        let _ = self.cache.set_url(&short_code, &url).await;
        let _ = self.cache.set_count(&short_code, 0).await;

        tracing::info!(%short_code, url = %url, "short url created");
        metrics::counter!("urls_created_total").increment(1);

        Ok(CreatedShortUrl {
            short_url: self.short_url(&short_code),
            short_code,
        })
    }

    /// Resolves `code` to its original URL and counts the visit.
    ///
    /// Cache hits bump the cached counter and skip the store entirely; the
    /// durable counter catches up through the visit worker. On a miss the
    /// cache is reseeded from the store before the increment, so a crash
    /// between the two leaves the cached count one behind, never ahead.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] for unknown or malformed codes.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        if !base62::is_well_formed(code) {
            return Err(AppError::not_found(code));
        }

        if let Ok(Some(url)) = self.cache.get_url(code).await {
            metrics::counter!("cache_hits_total").increment(1);
            if let Err(err) = self.cache.increment_count(code).await {
                tracing::warn!(%code, error = %err, "visit count increment failed");
            }
            return Ok(url);
        }
        metrics::counter!("cache_misses_total").increment(1);

        let row = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(code))?;

        let _ = self.cache.set_url(code, &row.original_url).await;
        let _ = self.cache.set_count(code, row.visits_count).await;
        self.repository.increment_visits(row.id, 1).await?;

        Ok(row.original_url)
    }

    /// Returns stats for `code`, preferring the cached visit counter.
    ///
    /// The cached counter includes visits the worker has not yet flushed
    /// to the store, so it is the fresher of the two when present.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] for unknown codes.
    pub async fn stats(&self, code: &str) -> Result<UrlStats, AppError> {
        let row = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(code))?;

        let visits_count = match self.cache.get_count(code).await {
            Ok(Some(count)) => count,
            _ => {
                let _ = self.cache.set_count(code, row.visits_count).await;
                row.visits_count
            }
        };

        Ok(UrlStats {
            short_code: row.short_code,
            original_url: row.original_url,
            created_at: row.created_at,
            visits_count,
        })
    }

    /// Returns one page of visit history for `code`, newest first.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] for unknown codes.
    pub async fn list_visits(
        &self,
        code: &str,
        page: i64,
        page_size: i64,
    ) -> Result<VisitHistory, AppError> {
        let row = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(code))?;

        let total_items = self.repository.count_visits(row.id).await?;
        let visits = self.repository.list_visits(row.id, page, page_size).await?;

        Ok(VisitHistory {
            total_items,
            visits,
        })
    }

    /// Pings the store; false means the database is unreachable.
    pub async fn store_healthy(&self) -> bool {
        self.repository.ping().await.is_ok()
    }

    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Writes `code` onto the pending row, retrying once on collision.
    ///
    /// The id-derived code only collides with rows imported from another
    /// deployment, so the retry appends a single random alphabet character
    /// rather than regenerating from scratch.
    async fn finalize_with_retry(&self, id: i64, code: String) -> Result<String, AppError> {
        match self.repository.finalize(id, &code).await {
            Ok(()) => Ok(code),
            Err(AppError::CodeTaken { .. }) => {
                let suffix = base62::ALPHABET[rand::rng().random_range(0..62)] as char;
                let retry = format!("{code}{suffix}");
                tracing::warn!(taken = %code, retry = %retry, "short code collision");
                self.repository.finalize(id, &retry).await?;
                Ok(retry)
            }
            Err(err) => Err(err),
        }
    }
}
