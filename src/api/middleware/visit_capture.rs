//! Response middleware that queues visit events for redirect requests.
//!
//! Capture happens outside the redirect handler so visit logging can never
//! slow down or fail a redirect. The middleware snapshots request metadata,
//! lets the request proceed, then fires a non-blocking send into the visit
//! queue. The background worker resolves the code against the store and
//! discards events for codes that don't exist.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::domain::visit_event::VisitEvent;
use crate::state::AppState;

/// Route prefixes that are service endpoints, never short codes.
const RESERVED_PATHS: &[&str] = &["health", "shorten", "favicon.ico"];

/// Captures visit metadata for single-segment paths and enqueues an event.
///
/// Only paths shaped like `/{code}` are considered: nested paths belong to
/// the stats and visits endpoints, and [`RESERVED_PATHS`] are service
/// routes. When the queue is full the event is dropped and counted; a
/// slow database must not build up backpressure into the redirect path.
pub async fn layer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let code = redirect_code(req.uri().path()).map(str::to_owned);
    let ip = client_ip(&req, state.behind_proxy);
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let response = next.run(req).await;

    if let Some(code) = code {
        let event = VisitEvent::new(code, ip, user_agent.as_deref());
        if let Err(e) = state.visit_tx.try_send(event) {
            metrics::counter!("visits_dropped_total").increment(1);
            debug!(error = %e, "visit event dropped");
        }
    }

    response
}

/// Extracts the short code from a redirect-shaped path.
///
/// Returns `None` for the root path, nested paths, and reserved routes.
fn redirect_code(path: &str) -> Option<&str> {
    let trimmed = path.trim_matches('/');

    if trimmed.is_empty() || trimmed.contains('/') {
        return None;
    }
    if RESERVED_PATHS.contains(&trimmed) {
        return None;
    }

    Some(trimmed)
}

/// Resolves the client IP for a request.
///
/// Forwarding headers are only trusted in proxy deployments; otherwise
/// anyone could spoof visit records with an arbitrary header.
fn client_ip(req: &Request, behind_proxy: bool) -> Option<String> {
    if behind_proxy {
        // X-Forwarded-For holds a chain; the first entry is the client.
        if let Some(forwarded) = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            && let Some(first) = forwarded.split(',').next()
        {
            let first = first.trim();
            if !first.is_empty() {
                return Some(first.to_string());
            }
        }

        if let Some(real_ip) = req
            .headers()
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
        {
            let real_ip = real_ip.trim();
            if !real_ip.is_empty() {
                return Some(real_ip.to_string());
            }
        }
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
}
