//! Redis Streams implementation of the event publisher.

use async_trait::async_trait;
use redis::{Client, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::publisher::{EventPublisher, PublishError, VisitMessage};

/// Publishes visit messages onto a Redis stream with `XADD`.
///
/// Consumers read the stream with consumer groups, which gives the pipeline
/// its at-least-once delivery. The payload is one JSON field per entry.
pub struct RedisStreamPublisher {
    client: ConnectionManager,
    stream: String,
}

impl RedisStreamPublisher {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when the connection cannot be established.
    pub async fn connect(redis_url: &str, stream: &str) -> Result<Self, PublishError> {
        let client = Client::open(redis_url)
            .map_err(|e| PublishError(format!("invalid Redis URL: {e}")))?;

        let mut manager = ConnectionManager::new(client)
            .await
            .map_err(|e| PublishError(format!("Redis connection failed: {e}")))?;

        redis::cmd("PING")
            .query_async::<()>(&mut manager)
            .await
            .map_err(|e| PublishError(format!("Redis PING failed: {e}")))?;

        info!(stream = %stream, "Visit event publishing enabled (Redis Streams)");

        Ok(Self {
            client: manager,
            stream: stream.to_string(),
        })
    }
}

#[async_trait]
impl EventPublisher for RedisStreamPublisher {
    async fn publish_visit(&self, message: &VisitMessage) -> Result<(), PublishError> {
        let payload = serde_json::to_string(message)
            .map_err(|e| PublishError(format!("serialize failed: {e}")))?;

        let mut conn = self.client.clone();
        let entry_id: String = redis::cmd("XADD")
            .arg(&self.stream)
            .arg("*")
            .arg("payload")
            .arg(payload)
            .query_async(&mut conn)
            .await
            .map_err(|e| PublishError(format!("XADD failed: {e}")))?;

        debug!(stream = %self.stream, entry_id = %entry_id, url_id = message.url_id, "Visit event published");
        Ok(())
    }
}
