#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;
use tokio::sync::mpsc;

use shortlink::domain::entities::NewVisit;
use shortlink::domain::repository::UrlRepository;
use shortlink::domain::visit_event::VisitEvent;
use shortlink::infrastructure::cache::MemoryCache;
use shortlink::infrastructure::persistence::MemoryUrlRepository;
use shortlink::routes::app_router;
use shortlink::state::AppState;

pub const BASE_URL: &str = "http://sho.rt";

/// Builds application state over in-memory implementations.
///
/// Returns the receiving end of the visit queue (so tests can assert on
/// queued events) and the repository (so tests can seed rows directly).
pub fn create_test_state() -> (
    AppState,
    mpsc::Receiver<VisitEvent>,
    Arc<MemoryUrlRepository>,
) {
    let repository = Arc::new(MemoryUrlRepository::new());
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        repository.clone(),
        Arc::new(MemoryCache::new()),
        tx,
        BASE_URL,
        false,
    );

    (state, rx, repository)
}

/// Full application router wrapped in a test server.
pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state)).unwrap()
}

/// Creates a short link through the API and returns its code.
pub async fn create_short_link(server: &TestServer, url: &str) -> String {
    let response = server.post("/shorten").json(&json!({ "url": url })).await;

    response.assert_status_ok();

    response.json::<serde_json::Value>()["short_code"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Looks up the row id behind a short code.
pub async fn url_id(repository: &MemoryUrlRepository, code: &str) -> i64 {
    repository.find_by_code(code).await.unwrap().unwrap().id
}

/// Inserts a visit row directly, bypassing the queue and worker.
pub async fn create_test_visit(repository: &MemoryUrlRepository, url_id: i64, ip: Option<&str>) {
    repository
        .insert_visit(NewVisit {
            url_id,
            ip: ip.map(str::to_string),
            user_agent: None,
        })
        .await
        .unwrap();
}

/// Bumps the durable visit counter, as the background worker would.
pub async fn add_store_visits(repository: &MemoryUrlRepository, url_id: i64, by: i64) {
    repository.increment_visits(url_id, by).await.unwrap();
}
