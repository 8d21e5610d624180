//! DTOs for link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregated statistics for a specific short link.
///
/// `visits_count` is served from the cache when available, so it includes
/// visits the background worker has not flushed to the database yet.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub visits_count: i64,
}
