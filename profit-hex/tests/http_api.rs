//! Integration tests for the HTTP adapter.
//!
//! These drive the full router with in-memory conversations and a
//! file-backed greeting store in a temporary directory.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use profit_hex::{BotService, inbound::HttpServer};
use profit_repo::{InMemoryConversationStore, JsonSeenUsersStore};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

/// Helper to create a test router; keep the TempDir alive for the test.
async fn create_app(requests_per_minute: u32) -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let seen = JsonSeenUsersStore::open(dir.path().join("seen_users.json")).await;
    let service = BotService::new(InMemoryConversationStore::new(), seen);
    let server = HttpServer::with_rate_limit(service, requests_per_minute);
    (server.router(), dir)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

async fn say(app: &Router, user_id: i64, text: &str) -> Value {
    let (status, body) = call(
        app,
        json_request(
            Method::POST,
            "/api/messages",
            json!({ "user_id": user_id, "text": text }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    body
}

#[tokio::test]
async fn test_health() {
    let (app, _dir) = create_app(100).await;

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["active_conversations"], 0);
}

#[tokio::test]
async fn test_start_returns_welcome_and_menu() {
    let (app, _dir) = create_app(100).await;

    let body = say(&app, 42, "/start").await;
    let messages = body["messages"].as_array().unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["formatted"], true);
    assert_eq!(messages[0]["chat_id"], 42);
    assert_eq!(messages[1]["buttons"][0]["callback_data"], "calc_profit");

    let again = say(&app, 42, "/start").await;
    assert_eq!(again["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_full_flow_over_http() {
    let (app, _dir) = create_app(100).await;

    let (status, body) = call(
        &app,
        json_request(
            Method::POST,
            "/api/callbacks",
            json!({ "user_id": 7, "chat_id": -5, "data": "calc_profit" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["messages"][0]["chat_id"], -5);

    say(&app, 7, "1000").await;
    say(&app, 7, "1 050,5").await;
    let result = say(&app, 7, "1040").await;

    let text = result["messages"][0]["text"].as_str().unwrap();
    assert!(text.contains("<b>1000 EUR</b>"));
    assert!(text.contains("<b>1050.5</b>"));
    assert!(text.contains("<b>0.95 USDT</b>"));
    assert_eq!(result["messages"][0]["formatted"], true);

    let request = Request::builder()
        .uri("/api/conversations/7")
        .body(Body::empty())
        .unwrap();
    let (_, snapshot) = call(&app, request).await;
    assert_eq!(snapshot["state"], "idle");
}

#[tokio::test]
async fn test_invalid_input_over_http() {
    let (app, _dir) = create_app(100).await;

    say(&app, 7, "/calc").await;
    let body = say(&app, 7, "abc").await;

    assert_eq!(body["messages"].as_array().unwrap().len(), 1);

    let request = Request::builder()
        .uri("/api/conversations/7")
        .body(Body::empty())
        .unwrap();
    let (_, snapshot) = call(&app, request).await;
    assert_eq!(snapshot["state"], "awaiting_amount");
}

#[tokio::test]
async fn test_restore_and_delete_conversation() {
    let (app, _dir) = create_app(100).await;

    let (status, body) = call(
        &app,
        json_request(
            Method::PUT,
            "/api/conversations/9",
            json!({ "user_id": 9, "state": "awaiting_buy_rate", "eur_amount": 1000.0, "sell_rate": 1050.5 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "awaiting_buy_rate");

    let result = say(&app, 9, "1040").await;
    assert!(
        result["messages"][0]["text"]
            .as_str()
            .unwrap()
            .contains("0.95 USDT")
    );

    say(&app, 9, "/calc").await;
    let delete = Request::builder()
        .method(Method::DELETE)
        .uri("/api/conversations/9")
        .body(Body::empty())
        .unwrap();
    let (status, _) = call(&app, delete).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_inconsistent_snapshot_resets_to_idle() {
    let (app, _dir) = create_app(100).await;

    let (status, body) = call(
        &app,
        json_request(
            Method::PUT,
            "/api/conversations/9",
            json!({ "user_id": 9, "state": "awaiting_buy_rate", "sell_rate": 1050.5 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "idle");
}

#[tokio::test]
async fn test_mismatched_snapshot_user_rejected() {
    let (app, _dir) = create_app(100).await;

    let (status, body) = call(
        &app,
        json_request(
            Method::PUT,
            "/api/conversations/9",
            json!({ "user_id": 10, "state": "idle" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn test_invalid_user_id_path() {
    let (app, _dir) = create_app(100).await;

    let request = Request::builder()
        .uri("/api/conversations/not-a-number")
        .body(Body::empty())
        .unwrap();
    let (status, _) = call(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rate_limit_is_per_user() {
    let (app, _dir) = create_app(2).await;

    say(&app, 1, "hello").await;
    say(&app, 1, "hello").await;

    let (status, body) = call(
        &app,
        json_request(
            Method::POST,
            "/api/messages",
            json!({ "user_id": 1, "text": "hello" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["retry_after_seconds"], 60);

    // Another user is unaffected.
    say(&app, 2, "hello").await;
}

#[tokio::test]
async fn test_openapi_document() {
    let (app, _dir) = create_app(100).await;

    let request = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/messages"].is_object());
}

#[tokio::test]
async fn test_unknown_route_passes_through_layers() {
    let (app, _dir) = create_app(100).await;

    let request = Request::builder()
        .uri("/api/nothing-here")
        .body(Body::empty())
        .unwrap();
    let (status, _) = call(&app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);

    // Metrics and tracing layers leave normal routes untouched.
    let (status, body) = call(
        &app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
