//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}` and `GET /url/{code}`
///
/// # Request Flow
///
/// 1. Decode the code to a record id
/// 2. Fetch the record
/// 3. Return 307 Temporary Redirect to the stored URL
///
/// # Errors
///
/// Returns 404 Not Found if the code has no record, including codes with
/// characters outside the base-62 alphabet.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let record = state.url_service.resolve(&code).await?.ok_or_else(|| {
        tracing::debug!(code = %code, "Short link not found");
        AppError::not_found("Short link not found", json!({ "code": code }))
    })?;

    Ok(Redirect::temporary(&record.url))
}
