//! Bearer token authentication middleware.
//!
//! Two layers are provided. [`layer`] rejects requests without a valid token.
//! [`optional_layer`] lets anonymous requests through but still rejects a
//! token that is present and wrong. Both store the resolved [`OwnerId`] in
//! the request extensions, where handlers read it with
//! `Extension<OwnerId>` or [`CurrentOwner`].

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{domain::entities::OwnerId, error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Resolve the token hash to its owner, skipping revoked tokens
/// 3. Update `last_used_at` timestamp
/// 4. Insert the [`OwnerId`] into request extensions
/// 5. Continue to next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Token is not found or revoked
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/api/urls", get(list_urls_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let owner = authenticate_parts(&st, &mut parts).await?;
    parts.extensions.insert(owner);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Identifies the caller when an Authorization header is present.
///
/// Requests without the header pass through anonymously. A header that is
/// present but malformed, unknown or revoked is still a `401`, so a client
/// never silently creates anonymous links with a broken token.
pub async fn optional_layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !req.headers().contains_key(header::AUTHORIZATION) {
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();

    let owner = authenticate_parts(&st, &mut parts).await?;
    parts.extensions.insert(owner);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

async fn authenticate_parts(st: &AppState, parts: &mut Parts) -> Result<OwnerId, AppError> {
    let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    st.auth_service.authenticate(&token).await
}

/// Owner attached by one of the auth layers, if any.
///
/// Never rejects: on routes without an auth layer it is always `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentOwner(pub Option<OwnerId>);

impl<S> FromRequestParts<S> for CurrentOwner
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<OwnerId>().copied()))
    }
}
