//! API route configuration.
//!
//! Routes are grouped by how callers are identified. Each group receives
//! its auth layer in [`crate::routes::app_router`].

use crate::api::handlers::{list_urls_handler, resolve_url_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes open to anyone.
///
/// # Endpoints
///
/// - `GET  /urls/{code}` - Look up the original URL behind a short code
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/urls/{code}", get(resolve_url_handler))
}

/// Routes where a Bearer token is optional and, when valid, tags the
/// created link with its owner.
///
/// # Endpoints
///
/// - `POST /urls` - Create a short link
pub fn identified_routes() -> Router<AppState> {
    Router::new().route("/urls", post(shorten_handler))
}

/// Routes requiring a valid Bearer token.
///
/// # Endpoints
///
/// - `GET  /urls` - List links created by the token's owner
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/urls", get(list_urls_handler))
}
