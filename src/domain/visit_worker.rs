//! Background worker persisting visit events.
//!
//! The redirect path never writes visit data itself: the response middleware
//! queues a [`VisitEvent`] and this worker does the store writes and the
//! event hand-off. Every event is independently transactional, so the worker
//! can be stopped between events without corrupting anything.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::entities::NewVisit;
use crate::domain::publisher::{EventPublisher, VisitMessage};
use crate::domain::repository::UrlRepository;
use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;

/// Consumes the visit channel until every sender is dropped and the buffer
/// is drained, recording one visit per event.
///
/// Failures are logged and swallowed; by the time an event reaches the
/// worker the HTTP response is long gone, so there is nobody to report to.
pub async fn run_visit_worker(
    mut rx: mpsc::Receiver<VisitEvent>,
    repository: Arc<dyn UrlRepository>,
    publisher: Arc<dyn EventPublisher>,
) {
    while let Some(event) = rx.recv().await {
        match record_visit(repository.as_ref(), publisher.as_ref(), &event).await {
            Ok(true) => {
                metrics::counter!("visits_recorded_total").increment(1);
            }
            Ok(false) => {}
            Err(e) => {
                metrics::counter!("visits_failed_total").increment(1);
                tracing::warn!(code = %event.code, error = %e, "Failed to record visit");
            }
        }
    }

    tracing::info!("Visit worker stopped (queue closed and drained)");
}

/// Records a single visit: resolve the code, append the log row, bump the
/// durable counter, notify the pipeline.
///
/// Returns `Ok(false)` for codes with no row; requests for unknown codes
/// still pass through the capture middleware and are dropped here.
async fn record_visit(
    repository: &dyn UrlRepository,
    publisher: &dyn EventPublisher,
    event: &VisitEvent,
) -> Result<bool, AppError> {
    let Some(url) = repository.find_by_code(&event.code).await? else {
        tracing::debug!(code = %event.code, "Visit event for unknown code, skipping");
        return Ok(false);
    };

    let visit = NewVisit {
        url_id: url.id,
        ip: event.ip.clone(),
        user_agent: event.user_agent.clone(),
    };

    // Transient store hiccups get a couple of quick retries; a retried
    // insert that actually committed just means one extra log row, which
    // the at-least-once pipeline already tolerates.
    let strategy = ExponentialBackoff::from_millis(50).map(jitter).take(2);
    Retry::spawn(strategy, || repository.insert_visit(visit.clone())).await?;

    repository.increment_visits(url.id, 1).await?;

    let message = VisitMessage {
        url_id: url.id,
        short_code: url.short_code,
        ip: event.ip.clone(),
    };
    if let Err(e) = publisher.publish_visit(&message).await {
        tracing::warn!(url_id = message.url_id, error = %e, "Visit event publish failed");
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::publisher::{MockEventPublisher, PublishError};
    use crate::infrastructure::persistence::MemoryUrlRepository;

    async fn seeded_repository(url: &str) -> (Arc<MemoryUrlRepository>, String) {
        let repository = Arc::new(MemoryUrlRepository::new());
        let id = repository.insert_pending(url).await.unwrap();
        let code = crate::utils::base62::encode(id as u64);
        repository.finalize(id, &code).await.unwrap();
        (repository, code)
    }

    #[tokio::test]
    async fn test_worker_records_visit_for_known_code() {
        let (repository, code) = seeded_repository("https://example.com").await;

        let mut publisher = MockEventPublisher::new();
        publisher
            .expect_publish_visit()
            .times(1)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(8);
        tx.send(VisitEvent::new(
            code.clone(),
            Some("203.0.113.9".to_string()),
            Some("curl/8.5"),
        ))
        .await
        .unwrap();
        drop(tx);

        run_visit_worker(rx, repository.clone(), Arc::new(publisher)).await;

        let url = repository.find_by_code(&code).await.unwrap().unwrap();
        assert_eq!(url.visits_count, 1);
        assert_eq!(repository.count_visits(url.id).await.unwrap(), 1);

        let visits = repository.list_visits(url.id, 1, 10).await.unwrap();
        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].ip.as_deref(), Some("203.0.113.9"));
        assert_eq!(visits[0].user_agent.as_deref(), Some("curl/8.5"));
    }

    #[tokio::test]
    async fn test_worker_skips_unknown_code() {
        let repository = Arc::new(MemoryUrlRepository::new());

        let mut publisher = MockEventPublisher::new();
        publisher.expect_publish_visit().times(0);

        let (tx, rx) = mpsc::channel(8);
        tx.send(VisitEvent::new("nope".to_string(), None, None))
            .await
            .unwrap();
        drop(tx);

        run_visit_worker(rx, repository, Arc::new(publisher)).await;
    }

    #[tokio::test]
    async fn test_publish_failure_does_not_lose_the_visit() {
        let (repository, code) = seeded_repository("https://example.com/p").await;

        let mut publisher = MockEventPublisher::new();
        publisher
            .expect_publish_visit()
            .times(1)
            .returning(|_| Err(PublishError("stream unavailable".to_string())));

        let (tx, rx) = mpsc::channel(8);
        tx.send(VisitEvent::new(code.clone(), None, None))
            .await
            .unwrap();
        drop(tx);

        run_visit_worker(rx, repository.clone(), Arc::new(publisher)).await;

        let url = repository.find_by_code(&code).await.unwrap().unwrap();
        assert_eq!(url.visits_count, 1);
    }

    #[tokio::test]
    async fn test_worker_drains_buffered_events_after_close() {
        let (repository, code) = seeded_repository("https://example.com/drain").await;

        let mut publisher = MockEventPublisher::new();
        publisher.expect_publish_visit().returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(16);
        for _ in 0..5 {
            tx.send(VisitEvent::new(code.clone(), None, None))
                .await
                .unwrap();
        }
        drop(tx);

        run_visit_worker(rx, repository.clone(), Arc::new(publisher)).await;

        let url = repository.find_by_code(&code).await.unwrap().unwrap();
        assert_eq!(url.visits_count, 5);
        assert_eq!(repository.count_visits(url.id).await.unwrap(), 5);
    }
}
