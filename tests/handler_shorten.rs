mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_shorten_url_success() {
    let (state, _rx, _repository) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/some/path" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let code = json["short_code"].as_str().unwrap();
    assert!(!code.is_empty());
    assert_eq!(
        json["short_url"],
        format!("{}/{}", common::BASE_URL, code)
    );
}

#[tokio::test]
async fn test_shorten_assigns_distinct_codes() {
    let (state, _rx, _repository) = common::create_test_state();
    let server = common::test_server(state);

    let first = common::create_short_link(&server, "https://example.com/1").await;
    let second = common::create_short_link(&server, "https://example.com/2").await;

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_shorten_rejects_invalid_url() {
    let (state, _rx, _repository) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "not a url" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_input");
}

#[tokio::test]
async fn test_shorten_rejects_unsupported_scheme() {
    let (state, _rx, _repository) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "ftp://example.com/file" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_rejects_duplicate_url() {
    let (state, _rx, _repository) = common::create_test_state();
    let server = common::test_server(state);

    common::create_short_link(&server, "https://example.com/dup").await;

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/dup" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "duplicate_url");
}

#[tokio::test]
async fn test_shorten_deduplicates_after_normalization() {
    let (state, _rx, _repository) = common::create_test_state();
    let server = common::test_server(state);

    common::create_short_link(&server, "https://example.com/page").await;

    // Host case and fragments are normalized away before the duplicate check.
    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://EXAMPLE.com/page#section" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "duplicate_url");
}

#[tokio::test]
async fn test_shorten_missing_url_field() {
    let (state, _rx, _repository) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.post("/shorten").json(&json!({})).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}
