//! Handler for paginated visit history.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::pagination::{PaginationMeta, PaginationParams};
use crate::api::dto::visits::{VisitInfo, VisitsResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves the visit history for a specific short link.
///
/// # Endpoint
///
/// `GET /urls/{code}/visits`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: 20, max: 100)
///
/// # Response
///
/// Visits ordered newest first, with pagination metadata:
///
/// ```json
/// {
///   "pagination": {
///     "page": 1,
///     "page_size": 20,
///     "total_items": 42,
///     "total_pages": 3
///   },
///   "items": [
///     {
///       "timestamp": "2026-03-01T12:00:00Z",
///       "ip": "203.0.113.7",
///       "user_agent": "curl/8.5.0"
///     }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn visits_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<VisitsResponse>, AppError> {
    let (page, page_size) = params.resolve().map_err(AppError::invalid_input)?;

    let history = state.service.list_visits(&code, page, page_size).await?;

    Ok(Json(VisitsResponse {
        pagination: PaginationMeta::new(page, page_size, history.total_items),
        items: history.visits.into_iter().map(VisitInfo::from).collect(),
    }))
}
