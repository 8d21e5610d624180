//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`            - Create a short link
//! - `GET  /{code}`             - Short link redirect (307)
//! - `GET  /stats/{code}`       - Link statistics
//! - `GET  /urls/{code}/visits` - Paginated visit history
//! - `GET  /health`             - Health check: DB, cache, visit queue
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Visit capture** - Queues visit events for redirect-shaped requests
//!
//! Trailing-slash normalization wraps the router in [`crate::server`]; it
//! has to sit outside the router to rewrite paths before routing happens.

use axum::routing::{get, post};
use axum::{Router, middleware};

use crate::api::handlers::{
    health_handler, redirect_handler, shorten_handler, stats_handler, visits_handler,
};
use crate::api::middleware::{tracing, visit_capture};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// The redirect route is registered last so fixed routes like `/health`
/// win over the `/{code}` wildcard. Whether visit capture trusts
/// forwarding headers is carried in [`AppState`].
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/urls/{code}/visits", get(visits_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            visit_capture::layer,
        ))
        .with_state(state)
        .layer(tracing::layer())
}
