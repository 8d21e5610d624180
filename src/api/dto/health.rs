//! DTO for the health check endpoint.

use serde::Serialize;

/// Health check response.
///
/// `status` is `"ok"` when the database, cache, and visit queue are all
/// operational, `"degraded"` otherwise.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}
