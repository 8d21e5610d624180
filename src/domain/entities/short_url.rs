//! ShortUrl entity representing a code to URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL row, as stored.
///
/// `short_code` is derived from `id` once the row exists (the code is a
/// Base62 rendering of the id, so the id must be allocated first) and is
/// immutable afterwards. `visits_count` is the durable counter; the cache
/// may run ahead of it between reconciliations.
///
/// Rows still waiting for their code (`short_code IS NULL` in the schema)
/// are never materialized into this struct; repository lookups only return
/// finalized rows.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ShortUrl {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub visits_count: i64,
}
