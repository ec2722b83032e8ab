mod common;

use linkfold::application::generators::CodeStrategy;
use serde_json::json;

#[tokio::test]
async fn test_redirect_success() {
    let (server, _ctx) = common::create_test_server(CodeStrategy::Random);

    let created = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/target" }))
        .await
        .json::<serde_json::Value>();
    let code = created["short_code"].as_str().unwrap();

    let response = server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_after_cache_flush() {
    let (server, ctx) = common::create_test_server(CodeStrategy::Sequential);

    server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/flushed" }))
        .await
        .assert_status_ok();
    ctx.cache.clear();

    let response = server.get("/1").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/flushed");
    assert_eq!(ctx.repository.code_lookups(), 1);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (server, _ctx) = common::create_test_server(CodeStrategy::Random);

    let response = server.get("/nonexistent123").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["details"]["short_code"], "nonexistent123");
}

#[tokio::test]
async fn test_redirect_malformed_code() {
    let (server, ctx) = common::create_test_server(CodeStrategy::Random);

    server.get("/bad-code").await.assert_status_not_found();
    assert_eq!(ctx.repository.code_lookups(), 0);
}

#[tokio::test]
async fn test_reserved_code_never_allocated() {
    let (server, ctx) = common::create_test_server_with_codes(&["health", "shorten", "aB3xY9"]);

    let created = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/reserved" }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(created["short_code"], "aB3xY9");
    assert_eq!(ctx.repository.mappings().len(), 1);

    let response = server.get("/aB3xY9").await;
    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/reserved");

    server.get("/health").await.assert_status_ok();
}
