//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, UrlService};
use crate::domain::repositories::{TokenRepository, UrlRepository};

/// Registry service over any URL storage backend.
pub type DynUrlService = UrlService<dyn UrlRepository>;

/// Authentication service over any token storage backend.
pub type DynAuthService = AuthService<dyn TokenRepository>;

/// Services shared across handlers.
///
/// Cheap to clone: every field is reference-counted. Storage backends are
/// erased behind trait objects so the same router serves PostgreSQL in
/// production and in-memory stores in tests.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<DynUrlService>,
    pub auth_service: Arc<DynAuthService>,
}

impl AppState {
    /// Builds the state from storage backends.
    ///
    /// # Arguments
    ///
    /// - `url_repository` - storage for URL records
    /// - `token_repository` - storage for API tokens
    /// - `base_url` - public origin for full short URLs
    /// - `token_signing_secret` - HMAC key for token hashes
    pub fn new(
        url_repository: Arc<dyn UrlRepository>,
        token_repository: Arc<dyn TokenRepository>,
        base_url: impl Into<String>,
        token_signing_secret: impl Into<String>,
    ) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(url_repository, base_url)),
            auth_service: Arc::new(AuthService::new(
                token_repository,
                token_signing_secret.into(),
            )),
        }
    }
}
