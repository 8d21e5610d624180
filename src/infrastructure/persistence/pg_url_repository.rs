//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewVisit, ShortUrl, Visit};
use crate::domain::repository::UrlRepository;
use crate::error::AppError;
use crate::utils::db_error::{is_unique_violation_on_code, is_unique_violation_on_url};

/// PostgreSQL repository for URL and visit storage.
///
/// Uses runtime-prepared statements with bound parameters. Unique violations
/// on the two `urls` constraints are classified into their domain errors
/// here; everything else surfaces as [`AppError::Store`].
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert_pending(&self, original_url: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO urls (original_url)
            VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(original_url)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_url(&e) {
                AppError::duplicate_url(original_url)
            } else {
                AppError::Store(e)
            }
        })
    }

    async fn finalize(&self, id: i64, code: &str) -> Result<(), AppError> {
        // The IS NULL guard keeps an already-finalized row immutable even if
        // this is called twice with the same id.
        let result = sqlx::query(
            r#"
            UPDATE urls
            SET short_code = $2
            WHERE id = $1 AND short_code IS NULL
            "#,
        )
        .bind(id)
        .bind(code)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_code(&e) {
                AppError::code_taken(code)
            } else {
                AppError::Store(e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::Store(sqlx::Error::RowNotFound));
        }
        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrl>(
            r#"
            SELECT id, original_url, short_code, created_at, visits_count
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrl>(
            r#"
            SELECT id, original_url, short_code, created_at, visits_count
            FROM urls
            WHERE original_url = $1 AND short_code IS NOT NULL
            "#,
        )
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn increment_visits(&self, id: i64, delta: i64) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE urls
            SET visits_count = visits_count + $2
            WHERE id = $1
            RETURNING visits_count
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(self.pool.as_ref())
        .await?;

        count.ok_or_else(|| AppError::not_found(id.to_string()))
    }

    async fn insert_visit(&self, visit: NewVisit) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO visit_logs (url_id, ip, user_agent)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(visit.url_id)
        .bind(visit.ip)
        .bind(visit.user_agent)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn list_visits(
        &self,
        url_id: i64,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<Visit>, AppError> {
        let offset = (page - 1) * page_size;

        let visits = sqlx::query_as::<_, Visit>(
            r#"
            SELECT id, url_id, "timestamp", ip, user_agent
            FROM visit_logs
            WHERE url_id = $1
            ORDER BY "timestamp" DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(url_id)
        .bind(page_size)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(visits)
    }

    async fn count_visits(&self, url_id: i64) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM visit_logs
            WHERE url_id = $1
            "#,
        )
        .bind(url_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
