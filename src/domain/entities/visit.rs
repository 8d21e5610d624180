//! Visit entity representing a single recorded redirect.

use chrono::{DateTime, Utc};

/// One recorded visit, append-only.
///
/// `ip` and `user_agent` are best-effort: clients behind proxies or with
/// stripped headers simply leave them empty.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Visit {
    pub id: i64,
    pub url_id: i64,
    pub timestamp: DateTime<Utc>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Input data for appending a visit row.
///
/// The timestamp is assigned by the store at insert time.
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub url_id: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}
