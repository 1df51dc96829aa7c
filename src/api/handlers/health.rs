//! Liveness and storage check.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{DatabaseCheck, Health, HealthResponse};
use crate::state::AppState;

/// `GET /health`
///
/// 200 with `"status": "healthy"` when storage answers a `count`, otherwise
/// 503 with `"status": "degraded"` and the storage error.
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": { "reachable": true, "links": 42 }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = DatabaseCheck::from(state.url_service.count().await);

    if let Some(error) = &database.error {
        tracing::warn!(error = %error, "Health check failed");
    }

    let response = HealthResponse::new(database);
    let status = match response.status {
        Health::Healthy => StatusCode::OK,
        Health::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(response))
}
