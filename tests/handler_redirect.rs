mod common;

use shortlink::infrastructure::cache::CacheService;

#[tokio::test]
async fn test_create_then_redirect_roundtrip() {
    let (state, _rx, _repository) = common::create_test_state();
    let server = common::test_server(state);

    let code = common::create_short_link(&server, "https://example.com/target").await;

    let response = server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _rx, _repository) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/nope").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_rejects_code_outside_alphabet() {
    let (state, _rx, _repository) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/has-dash").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_queues_visit_event() {
    let (state, mut rx, _repository) = common::create_test_state();
    let server = common::test_server(state);

    let code = common::create_short_link(&server, "https://example.com/tracked").await;

    let response = server
        .get(&format!("/{code}"))
        .add_header("User-Agent", "TestBot/1.0")
        .await;

    assert_eq!(response.status_code(), 307);

    let event = rx.try_recv().expect("redirect should queue a visit event");
    assert_eq!(event.code, code);
    assert_eq!(event.user_agent.as_deref(), Some("TestBot/1.0"));
}

#[tokio::test]
async fn test_create_does_not_queue_visit_event() {
    let (state, mut rx, _repository) = common::create_test_state();
    let server = common::test_server(state);

    common::create_short_link(&server, "https://example.com/quiet").await;

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirects_accumulate_in_stats() {
    let (state, _rx, _repository) = common::create_test_state();
    let server = common::test_server(state);

    let code = common::create_short_link(&server, "https://example.com/counted").await;

    for _ in 0..3 {
        let response = server.get(&format!("/{code}")).await;
        assert_eq!(response.status_code(), 307);
    }

    let response = server.get(&format!("/stats/{code}")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["visits_count"], 3);
}

#[tokio::test]
async fn test_redirect_survives_cache_eviction() {
    let (state, _rx, _repository) = common::create_test_state();
    let cache = state.cache.clone();
    let server = common::test_server(state);

    let code = common::create_short_link(&server, "https://example.com/evicted").await;

    let response = server.get(&format!("/{code}")).await;
    assert_eq!(response.status_code(), 307);

    // Simulate eviction: both keyspaces vanish, the store must take over.
    cache.invalidate(&code).await.unwrap();

    let response = server.get(&format!("/{code}")).await;
    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/evicted");

    // The miss reseeded the cache, so this resolves as a hit again.
    let response = server.get(&format!("/{code}")).await;
    assert_eq!(response.status_code(), 307);

    let stats = server.get(&format!("/stats/{code}")).await;
    stats.assert_status_ok();
    assert_eq!(stats.json::<serde_json::Value>()["visits_count"], 1);
}
