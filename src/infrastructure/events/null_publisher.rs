//! No-op event publisher for disabled publishing.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::publisher::{EventPublisher, PublishError, VisitMessage};

/// Swallows every message.
///
/// The default when no event stream is configured; visits are still fully
/// recorded in the store, only the downstream hand-off is skipped.
pub struct NullPublisher;

impl NullPublisher {
    pub fn new() -> Self {
        debug!("Visit event publishing disabled");
        Self
    }
}

impl Default for NullPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for NullPublisher {
    async fn publish_visit(&self, _message: &VisitMessage) -> Result<(), PublishError> {
        Ok(())
    }
}
