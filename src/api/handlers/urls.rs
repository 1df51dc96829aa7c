//! Handlers for looking up and listing short links.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::shorten::UrlResponse;
use crate::api::dto::urls::UrlListResponse;
use crate::domain::entities::OwnerId;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the original URL behind a short code without redirecting.
///
/// # Endpoint
///
/// `GET /api/urls/{code}`
///
/// # Errors
///
/// Returns 404 Not Found for unknown and undecodable codes alike.
pub async fn resolve_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlResponse>, AppError> {
    let record = state
        .url_service
        .resolve(&code)
        .await?
        .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

    Ok(Json(UrlResponse::from_record(state.url_service.as_ref(), record)))
}

/// Lists every link created by the authenticated owner.
///
/// # Endpoint
///
/// `GET /api/urls` (Bearer token required)
///
/// # Response
///
/// ```json
/// {
///   "owner": 1,
///   "total": 2,
///   "items": [
///     { "code": "1", "short_url": "https://s.example.com/1", "url": "https://a.com" },
///     { "code": "5", "short_url": "https://s.example.com/5", "url": "https://b.com" }
///   ]
/// }
/// ```
///
/// Items are in creation order. The list is not paginated.
pub async fn list_urls_handler(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
) -> Result<Json<UrlListResponse>, AppError> {
    let records = state.url_service.list_by_owner(owner).await?;

    let items: Vec<UrlResponse> = records
        .into_iter()
        .map(|record| UrlResponse::from_record(state.url_service.as_ref(), record))
        .collect();

    Ok(Json(UrlListResponse {
        owner,
        total: items.len(),
        items,
    }))
}
