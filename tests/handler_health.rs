mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_ok() {
    let (state, _rx, _repository) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["status"], "ok");
}

#[tokio::test]
async fn test_health_body_has_only_status() {
    let (state, _rx, _repository) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();
    assert_eq!(json.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn test_health_degraded_when_visit_queue_closed() {
    let (state, rx, _repository) = common::create_test_state();
    let server = common::test_server(state);

    // Dropping the receiver closes the queue, as a crashed worker would.
    drop(rx);

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<serde_json::Value>()["status"], "degraded");
}
