//! In-memory implementation of the URL repository.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{DashMap, Entry};

use crate::domain::entities::{NewVisit, ShortUrl, Visit};
use crate::domain::repository::UrlRepository;
use crate::error::AppError;

/// One stored row; `short_code` is `None` between insert and finalize.
#[derive(Debug, Clone)]
struct StoredUrl {
    id: i64,
    original_url: String,
    short_code: Option<String>,
    created_at: DateTime<Utc>,
    visits_count: i64,
}

impl StoredUrl {
    fn as_short_url(&self) -> Option<ShortUrl> {
        let code = self.short_code.clone()?;
        Some(ShortUrl {
            id: self.id,
            original_url: self.original_url.clone(),
            short_code: code,
            created_at: self.created_at,
            visits_count: self.visits_count,
        })
    }
}

/// DashMap-backed repository with the same observable behavior as
/// [`super::PgUrlRepository`], including both uniqueness constraints and the
/// pending-rows-are-invisible rule.
///
/// Backs the integration test suite and `cargo run` against no database;
/// everything is lost on process exit.
#[derive(Default)]
pub struct MemoryUrlRepository {
    rows: DashMap<i64, StoredUrl>,
    by_code: DashMap<String, i64>,
    by_url: DashMap<String, i64>,
    visits: DashMap<i64, Vec<Visit>>,
    next_id: AtomicI64,
    next_visit_id: AtomicI64,
}

impl MemoryUrlRepository {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            next_visit_id: AtomicI64::new(1),
            ..Default::default()
        }
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn insert_pending(&self, original_url: &str) -> Result<i64, AppError> {
        // The entry guard makes the uniqueness check and the index insert
        // one atomic step, like the SQL constraint.
        match self.by_url.entry(original_url.to_string()) {
            Entry::Occupied(_) => Err(AppError::duplicate_url(original_url)),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                slot.insert(id);
                self.rows.insert(
                    id,
                    StoredUrl {
                        id,
                        original_url: original_url.to_string(),
                        short_code: None,
                        created_at: Utc::now(),
                        visits_count: 0,
                    },
                );
                Ok(id)
            }
        }
    }

    async fn finalize(&self, id: i64, code: &str) -> Result<(), AppError> {
        match self.by_code.entry(code.to_string()) {
            Entry::Occupied(_) => Err(AppError::code_taken(code)),
            Entry::Vacant(slot) => {
                let Some(mut row) = self.rows.get_mut(&id) else {
                    return Err(AppError::Store(sqlx::Error::RowNotFound));
                };
                if row.short_code.is_some() {
                    return Err(AppError::Store(sqlx::Error::RowNotFound));
                }
                row.short_code = Some(code.to_string());
                slot.insert(id);
                Ok(())
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError> {
        let Some(id) = self.by_code.get(code).map(|entry| *entry) else {
            return Ok(None);
        };
        Ok(self.rows.get(&id).and_then(|row| row.as_short_url()))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<ShortUrl>, AppError> {
        let Some(id) = self.by_url.get(url).map(|entry| *entry) else {
            return Ok(None);
        };
        // A pending row is indexed by URL (it participates in uniqueness)
        // but not yet visible to lookups.
        Ok(self.rows.get(&id).and_then(|row| row.as_short_url()))
    }

    async fn increment_visits(&self, id: i64, delta: i64) -> Result<i64, AppError> {
        let Some(mut row) = self.rows.get_mut(&id) else {
            return Err(AppError::not_found(id.to_string()));
        };
        row.visits_count += delta;
        Ok(row.visits_count)
    }

    async fn insert_visit(&self, visit: NewVisit) -> Result<(), AppError> {
        let id = self.next_visit_id.fetch_add(1, Ordering::SeqCst);
        self.visits.entry(visit.url_id).or_default().push(Visit {
            id,
            url_id: visit.url_id,
            timestamp: Utc::now(),
            ip: visit.ip,
            user_agent: visit.user_agent,
        });
        Ok(())
    }

    async fn list_visits(
        &self,
        url_id: i64,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<Visit>, AppError> {
        let mut all = self
            .visits
            .get(&url_id)
            .map(|visits| visits.clone())
            .unwrap_or_default();

        // Newest first; id breaks ties for visits in the same instant.
        all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));

        let offset = ((page - 1) * page_size).max(0) as usize;
        Ok(all
            .into_iter()
            .skip(offset)
            .take(page_size.max(0) as usize)
            .collect())
    }

    async fn count_visits(&self, url_id: i64) -> Result<i64, AppError> {
        Ok(self
            .visits
            .get(&url_id)
            .map(|visits| visits.len() as i64)
            .unwrap_or(0))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
