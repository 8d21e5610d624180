//! DTOs for visit history.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::pagination::PaginationMeta;
use crate::domain::entities::Visit;

/// One page of visit records for a short link, newest first.
#[derive(Debug, Serialize)]
pub struct VisitsResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<VisitInfo>,
}

/// Individual visit record.
///
/// Optional fields are omitted from JSON when `None` for cleaner responses.
#[derive(Debug, Serialize)]
pub struct VisitInfo {
    pub timestamp: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl From<Visit> for VisitInfo {
    fn from(visit: Visit) -> Self {
        Self {
            timestamp: visit.timestamp,
            ip: visit.ip,
            user_agent: visit.user_agent,
        }
    }
}
