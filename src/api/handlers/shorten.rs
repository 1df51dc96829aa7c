//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, UrlResponse};
use crate::api::middleware::auth::CurrentOwner;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a URL.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Ownership
///
/// Anonymous requests create unowned links. With a valid
/// `Authorization: Bearer <token>` header the link is attached to the
/// token's owner and later appears in `GET /api/urls`.
///
/// # Request Body
///
/// ```json
/// { "url": "https://www.google.com" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "code": "1C",
///   "short_url": "https://s.example.com/1C",
///   "url": "https://www.google.com"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is missing, malformed or longer than
/// 255 characters. Returns 401 Unauthorized if a token is sent but invalid.
pub async fn shorten_handler(
    State(state): State<AppState>,
    CurrentOwner(owner): CurrentOwner,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<UrlResponse>), AppError> {
    payload.validate()?;

    let record = state.url_service.create(&payload.url, owner).await?;

    Ok((
        StatusCode::CREATED,
        Json(UrlResponse::from_record(state.url_service.as_ref(), record)),
    ))
}
