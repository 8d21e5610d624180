//! Repository trait for URL and visit data access.

use crate::domain::entities::{NewVisit, ShortUrl, Visit};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the durable URL store.
///
/// The store is the source of truth: the cache layered above it may lose any
/// entry at any time and is reconciled from these operations. Creation is a
/// two-phase write because a short code is derived from the row id, which
/// does not exist before the insert.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryUrlRepository`] - in-memory, for tests and local runs
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a URL row without a short code and returns the allocated id.
    ///
    /// The row stays invisible to [`find_by_code`](Self::find_by_code) and
    /// [`find_by_url`](Self::find_by_url) until
    /// [`finalize`](Self::finalize) assigns its code. A failure after this
    /// step may leave such a pending row behind; that is acceptable, since
    /// no code has been handed out for it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateUrl`] if the URL already has a row,
    /// [`AppError::Store`] on database errors.
    async fn insert_pending(&self, original_url: &str) -> Result<i64, AppError>;

    /// Assigns the derived short code to a pending row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeTaken`] on a short-code uniqueness violation
    /// (the caller retries once with a disambiguated code),
    /// [`AppError::Store`] on other database errors.
    async fn finalize(&self, id: i64, code: &str) -> Result<(), AppError>;

    /// Finds a finalized row by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Finds a finalized row by its original URL.
    ///
    /// Used by the duplicate pre-check during create.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn find_by_url(&self, url: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Adds `delta` to the durable visit counter and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `id` does not exist,
    /// [`AppError::Store`] on database errors.
    async fn increment_visits(&self, id: i64, delta: i64) -> Result<i64, AppError>;

    /// Appends one visit row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn insert_visit(&self, visit: NewVisit) -> Result<(), AppError>;

    /// Lists visits for a URL, newest first.
    ///
    /// `page` is 1-indexed; callers clamp `page_size` before reaching the
    /// repository.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn list_visits(
        &self,
        url_id: i64,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<Visit>, AppError>;

    /// Counts all visits for a URL, for pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn count_visits(&self, url_id: i64) -> Result<i64, AppError>;

    /// Connectivity probe for health reporting.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] when the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
