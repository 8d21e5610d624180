//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Returns service health status.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK** with `{"status": "ok"}` when all components respond
/// - **503 Service Unavailable** with `{"status": "degraded"}` otherwise
///
/// # Components Checked
///
/// 1. **Database**: `SELECT 1` through the repository
/// 2. **Cache**: Redis PING (the in-memory cache always reports healthy)
/// 3. **Visit queue**: channel still has a live consumer
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_ok = state.service.store_healthy().await;
    let cache_ok = state.cache.health_check().await;
    let queue_ok = !state.visit_tx.is_closed();

    if store_ok && cache_ok && queue_ok {
        Ok(Json(HealthResponse {
            status: "ok".to_string(),
        }))
    } else {
        tracing::warn!(store_ok, cache_ok, queue_ok, "health check degraded");
        Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded".to_string(),
            }),
        ))
    }
}
