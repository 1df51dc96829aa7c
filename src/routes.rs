//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`           - Short link redirect (public)
//! - `GET  /url/{code}`       - Same redirect under a prefix that never
//!   collides with other top-level paths
//! - `GET  /health`           - Health check (public)
//! - `POST /api/urls`         - Create a short link (Bearer token optional)
//! - `GET  /api/urls`         - List the caller's links (Bearer token required)
//! - `GET  /api/urls/{code}`  - Look up a short link (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer token, required or optional per route group
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let identified = api::routes::identified_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), auth::optional_layer),
    );

    let redirects = Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/url/{code}", get(redirect_handler));

    let api_public = api::routes::public_routes().merge(identified);

    let (redirects, api_public, protected) = if behind_proxy {
        (
            redirects.layer(rate_limit::proxied_layer()),
            api_public.layer(rate_limit::proxied_layer()),
            protected.layer(rate_limit::proxied_secure_layer()),
        )
    } else {
        (
            redirects.layer(rate_limit::layer()),
            api_public.layer(rate_limit::layer()),
            protected.layer(rate_limit::secure_layer()),
        )
    };

    let router = Router::new()
        .merge(redirects)
        .route("/health", get(health_handler))
        .nest("/api", api_public.merge(protected))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
