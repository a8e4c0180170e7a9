//! In-process requests against the REST router.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use counters::server::router::build_router;

use common::seeded_repository;

fn app() -> Router {
    build_router(seeded_repository())
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request");

    let response = app.oneshot(request).await.expect("router responds");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = send(app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "counters");
}

#[tokio::test]
async fn test_list_counters() {
    let (status, body) = send(app(), "GET", "/api/v1/counters", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().expect("array");
    assert_eq!(list.len(), 3);
    assert_eq!(list[0]["id"], "1");
    assert_eq!(list[0]["title"], "Cups of coffee");
    assert_eq!(list[0]["count"], 3);
}

#[tokio::test]
async fn test_list_counters_with_query() {
    let (status, body) = send(app(), "GET", "/api/v1/counters?q=abc", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().expect("array");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "ABC drills");
}

#[tokio::test]
async fn test_create_then_get_counter() {
    let app = app();
    let (status, created) = send(
        app.clone(),
        "POST",
        "/api/v1/counters",
        Some(json!({ "title": "Glasses of water" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "Glasses of water");
    assert_eq!(created["count"], 0);

    let id = created["id"].as_str().expect("id");
    let (status, fetched) = send(app, "GET", &format!("/api/v1/counters/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_with_blank_title_is_rejected() {
    let (status, body) = send(
        app(),
        "POST",
        "/api/v1/counters",
        Some(json!({ "title": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request");
}

#[tokio::test]
async fn test_get_unknown_counter_is_404() {
    let (status, body) = send(app(), "GET", "/api/v1/counters/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "not_found");
    assert_eq!(body["error"]["message"], "Counter 'missing' not found");
}

#[tokio::test]
async fn test_update_counter() {
    let (status, body) = send(
        app(),
        "PUT",
        "/api/v1/counters/2",
        Some(json!({ "title": "Alphabet drills", "count": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Alphabet drills");
    assert_eq!(body["count"], 10);
}

#[tokio::test]
async fn test_update_without_fields_is_rejected() {
    let (status, body) = send(app(), "PUT", "/api/v1/counters/2", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request");
}

#[tokio::test]
async fn test_increment_and_decrement() {
    let app = app();
    let (status, body) = send(app.clone(), "POST", "/api/v1/counters/3/increment", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let (_, body) = send(app.clone(), "POST", "/api/v1/counters/3/decrement", None).await;
    assert_eq!(body["count"], 0);

    // Saturates at zero.
    let (status, body) = send(app, "POST", "/api/v1/counters/3/decrement", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_delete_counter() {
    let app = app();
    let (status, body) = send(app.clone(), "DELETE", "/api/v1/counters/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(app.clone(), "DELETE", "/api/v1/counters/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(app, "GET", "/api/v1/counters", None).await;
    assert_eq!(body.as_array().expect("array").len(), 2);
}

#[tokio::test]
async fn test_malformed_json_uses_error_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/counters")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .expect("valid request");
    let response = app().oneshot(request).await.expect("router responds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body: Value = serde_json::from_slice(&bytes).expect("JSON error body");
    assert_eq!(body["error"]["type"], "invalid_request");
    assert!(body["error"]["message"]
        .as_str()
        .expect("message")
        .starts_with("Invalid request: "));
}

#[tokio::test]
async fn test_missing_title_uses_error_body() {
    let (status, body) = send(app(), "POST", "/api/v1/counters", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request");
}

#[tokio::test]
async fn test_update_without_body_uses_error_body() {
    let (status, body) = send(app(), "PUT", "/api/v1/counters/2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request");
}
