//! Event publisher interface for the downstream analytics pipeline.

use async_trait::async_trait;
use serde::Serialize;

/// Message handed to the external messaging collaborator per recorded visit.
///
/// Delivery is at-least-once from the publisher's perspective; consumers are
/// expected to deduplicate if they need exactly-once semantics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitMessage {
    pub url_id: i64,
    pub short_code: String,
    pub ip: Option<String>,
}

#[derive(Debug, thiserror::Error)]
#[error("event publish failed: {0}")]
pub struct PublishError(pub String);

/// Interface to the external event sink.
///
/// Publish failures are non-fatal by contract: the visit worker logs them
/// and moves on, and the visit itself stays recorded in the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::events::RedisStreamPublisher`] - Redis Streams sink
/// - [`crate::infrastructure::events::NullPublisher`] - publishing disabled
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Hands one visit message to the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when the sink rejects or cannot accept the
    /// message; callers treat this as a logged warning, never a failure.
    async fn publish_visit(&self, message: &VisitMessage) -> Result<(), PublishError>;
}
