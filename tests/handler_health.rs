mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use base62_url_shortener::api::handlers::health_handler;
use base62_url_shortener::domain::entities::{NewUrlRecord, OwnerId, UrlRecord};
use base62_url_shortener::domain::repositories::UrlRepository;
use base62_url_shortener::error::AppError;
use base62_url_shortener::infrastructure::memory::MemoryTokenRepository;
use base62_url_shortener::state::AppState;
use serde_json::json;

/// Storage that is down.
struct UnreachableUrls;

#[async_trait]
impl UrlRepository for UnreachableUrls {
    async fn insert(&self, _new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        Err(down())
    }

    async fn find_by_id(&self, _id: u64) -> Result<Option<UrlRecord>, AppError> {
        Err(down())
    }

    async fn list_by_owner(&self, _owner: OwnerId) -> Result<Vec<UrlRecord>, AppError> {
        Err(down())
    }

    async fn count(&self) -> Result<u64, AppError> {
        Err(down())
    }
}

fn down() -> AppError {
    AppError::internal("connection refused", json!({}))
}

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_reports_link_count() {
    let ctx = common::create_test_context();
    ctx.urls
        .insert(NewUrlRecord {
            url: "https://example.com".to_string(),
            owner: None,
        })
        .await
        .unwrap();

    let response = server(ctx.state.clone()).get("/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "database": { "reachable": true, "links": 1 }
    }));
}

#[tokio::test]
async fn test_health_degraded_when_storage_fails() {
    let state = AppState::new(
        Arc::new(UnreachableUrls),
        Arc::new(MemoryTokenRepository::new()),
        common::BASE_URL,
        common::SIGNING_SECRET,
    );

    let response = server(state).get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["database"]["reachable"], false);
    assert!(json["database"].get("links").is_none());
    assert!(json["database"]["error"].is_string());
}
