//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves statistics for a specific short link.
///
/// # Endpoint
///
/// `GET /stats/{code}`
///
/// # Response
///
/// ```json
/// {
///   "short_code": "b3",
///   "original_url": "https://example.com/some/long/path",
///   "created_at": "2026-03-01T12:00:00Z",
///   "visits_count": 42
/// }
/// ```
///
/// The visit count prefers the cached counter, which runs ahead of the
/// database between worker flushes.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.service.stats(&code).await?;

    Ok(Json(StatsResponse {
        short_code: stats.short_code,
        original_url: stats.original_url,
        created_at: stats.created_at,
        visits_count: stats.visits_count,
    }))
}
