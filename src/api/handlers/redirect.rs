//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Check cache for the URL (key: `url:{code}`)
/// 2. On a hit, bump the cached counter and redirect without touching the store
/// 3. On a miss, load from the database, reseed the cache, bump the durable counter
/// 4. Return 307 Temporary Redirect
///
/// Visit records (IP, user agent) are captured separately by the
/// [`crate::api::middleware::visit_capture`] middleware and written by the
/// background worker, so the redirect never waits on visit logging.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist or contains
/// characters outside the code alphabet.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let url = state.service.resolve(&code).await?;

    Ok(Redirect::temporary(&url))
}
