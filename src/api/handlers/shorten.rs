//! Handler for the URL shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short_code": "b3",
///   "short_url": "http://localhost:3000/b3"
/// }
/// ```
///
/// The short code is derived from the database-assigned row id, so the
/// same deployment never hands out the same code twice.
///
/// # Errors
///
/// Returns 400 Bad Request for malformed or non-http(s) URLs, and for
/// URLs that already have a short link.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let created = state.service.create(&payload.url).await?;

    Ok(Json(ShortenResponse {
        short_code: created.short_code,
        short_url: created.short_url,
    }))
}
