//! End-to-end tests of the `/v1/articles` surface against the in-memory
//! repository.

use std::sync::Arc;
use std::time::Duration;

use articles_server::db::InMemoryArticleRepo;
use articles_server::http::{build_router, AppState};
use articles_server::models::Article;
use articles_server::{AppConfig, ArticleService};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

fn app_with_timeout(timeout: Duration) -> Router {
    let config = AppConfig {
        timeout,
        ..AppConfig::default()
    };
    let service = ArticleService::new(Arc::new(InMemoryArticleRepo::new()), config.timeout);
    build_router(AppState::new(service), &config)
}

fn app() -> Router {
    app_with_timeout(Duration::from_secs(2))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn message(bytes: &[u8]) -> String {
    let value: Value = serde_json::from_slice(bytes).unwrap();
    value["message"].as_str().unwrap().to_owned()
}

async fn create(app: &Router, title: &str, content: &str) -> Article {
    let (status, bytes) = send(
        app,
        Method::POST,
        "/v1/articles",
        Some(serde_json::json!({ "title": title, "content": content })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn create_then_get_returns_same_article() {
    let app = app();
    let created = create(&app, "First post", "Hello, world").await;

    let (status, bytes) = send(&app, Method::GET, &format!("/v1/articles/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);

    let fetched: Article = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.title, "First post");
    assert_eq!(fetched.content, "Hello, world");
    assert!(fetched.created_at.timestamp() > 0);
    assert!(fetched.updated_at.timestamp() > 0);
}

#[tokio::test]
async fn list_returns_all_articles() {
    let app = app();
    let (status, bytes) = send(&app, Method::GET, "/v1/articles", None).await;
    assert_eq!(status, StatusCode::OK);
    let empty: Vec<Article> = serde_json::from_slice(&bytes).unwrap();
    assert!(empty.is_empty());

    let a = create(&app, "a", "1").await;
    let b = create(&app, "b", "2").await;

    let (_, bytes) = send(&app, Method::GET, "/v1/articles", None).await;
    let all: Vec<Article> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(all, vec![a, b]);
}

#[tokio::test]
async fn duplicate_title_is_409_and_not_persisted() {
    let app = app();
    create(&app, "Unique", "one").await;

    let (status, bytes) = send(
        &app,
        Method::POST,
        "/v1/articles",
        Some(serde_json::json!({ "title": "Unique", "content": "two" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(!message(&bytes).is_empty());

    let (_, bytes) = send(&app, Method::GET, "/v1/articles", None).await;
    let all: Vec<Article> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].content, "one");
}

#[tokio::test]
async fn validation_and_decode_failures() {
    let app = app();

    let (status, bytes) = send(
        &app,
        Method::POST,
        "/v1/articles",
        Some(serde_json::json!({ "title": "", "content": "body" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&bytes).contains("title"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/v1/articles",
        Some(serde_json::json!({ "title": "t" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/v1/articles",
        Some(serde_json::json!({ "title": 42, "content": "body" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // NUL cannot be stored in a text column, so it is a validation error
    let (status, bytes) = send(
        &app,
        Method::POST,
        "/v1/articles",
        Some(serde_json::json!({ "title": "a\u{0}", "content": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&bytes).contains("NUL"));
}

#[tokio::test]
async fn delete_existing_then_get_fails() {
    let app = app();
    let created = create(&app, "Short-lived", "body").await;
    let uri = format!("/v1/articles/{}", created.id);

    let (status, bytes) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(bytes.is_empty());

    let (status, bytes) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!message(&bytes).is_empty());
}

#[tokio::test]
async fn delete_missing_is_404() {
    let app = app();
    let (status, _) = send(&app, Method::DELETE, "/v1/articles/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/v1/articles/twelve", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_404() {
    let app = app();
    let (status, bytes) = send(&app, Method::GET, "/v1/articles/not-a-number", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!message(&bytes).is_empty());
}

#[tokio::test]
async fn update_replaces_fields() {
    let app = app();
    let created = create(&app, "Before", "old").await;
    let uri = format!("/v1/articles/{}", created.id);

    let (status, bytes) = send(
        &app,
        Method::PUT,
        &uri,
        Some(serde_json::json!({ "title": "After", "content": "new" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Article = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "After");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/v1/articles/999",
        Some(serde_json::json!({ "title": "x", "content": "y" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn zero_timeout_is_500_not_a_hang() {
    let app = app_with_timeout(Duration::ZERO);

    let (status, bytes) = send(&app, Method::GET, "/v1/articles", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message(&bytes), "Internal Server Error");

    let (status, _) = send(
        &app,
        Method::POST,
        "/v1/articles",
        Some(serde_json::json!({ "title": "t", "content": "c" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
