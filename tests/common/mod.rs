#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::extract::ConnectInfo;
use base62_url_shortener::application::services::auth_service::hash_token;
use base62_url_shortener::domain::repositories::{TokenRepository, UserRepository};
use base62_url_shortener::infrastructure::memory::{MemoryTokenRepository, MemoryUrlRepository};
use base62_url_shortener::infrastructure::persistence::{
    PgTokenRepository, PgUrlRepository, PgUserRepository,
};
use base62_url_shortener::routes::app_router;
use base62_url_shortener::state::AppState;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::task::{Context, Poll};

pub const BASE_URL: &str = "https://s.example.com";
pub const SIGNING_SECRET: &str = "test-signing-secret";

/// State over in-memory stores, plus handles to the stores for seeding.
pub struct TestContext {
    pub state: AppState,
    pub urls: Arc<MemoryUrlRepository>,
    pub tokens: Arc<MemoryTokenRepository>,
}

impl TestContext {
    /// Stores a token for `user_id` and returns the raw bearer value.
    pub async fn issue_token(&self, user_id: i64, raw: &str) -> String {
        self.tokens
            .create_token(user_id, raw, &hash_token(SIGNING_SECRET, raw))
            .await
            .unwrap();
        raw.to_string()
    }
}

pub fn create_test_context() -> TestContext {
    create_test_context_with(MemoryUrlRepository::new())
}

pub fn create_test_context_with(urls: MemoryUrlRepository) -> TestContext {
    let urls = Arc::new(urls);
    let tokens = Arc::new(MemoryTokenRepository::new());

    let state = AppState::new(urls.clone(), tokens.clone(), BASE_URL, SIGNING_SECRET);

    TestContext {
        state,
        urls,
        tokens,
    }
}

pub const PEER_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 4000);

/// Inserts a fixed `ConnectInfo<SocketAddr>`, which the peer-IP rate
/// limiter reads from the request extensions.
#[derive(Clone)]
pub struct PeerAddrLayer;

impl<S> tower::Layer<S> for PeerAddrLayer {
    type Service = PeerAddrService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PeerAddrService { inner }
    }
}

#[derive(Clone)]
pub struct PeerAddrService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for PeerAddrService<S>
where
    S: tower::Service<axum::http::Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(PEER_ADDR)));
        self.inner.call(req)
    }
}

/// The production router, with every request arriving from [`PEER_ADDR`].
pub fn full_app(state: AppState) -> Router {
    Router::new()
        .fallback_service(app_router(state, false))
        .layer(PeerAddrLayer)
}

pub fn create_pg_state(pool: PgPool) -> AppState {
    let pool = Arc::new(pool);

    AppState::new(
        Arc::new(PgUrlRepository::new(pool.clone())),
        Arc::new(PgTokenRepository::new(pool)),
        BASE_URL,
        SIGNING_SECRET,
    )
}

/// Inserts a user and returns its id.
pub async fn create_pg_user(pool: &PgPool, name: &str) -> i64 {
    PgUserRepository::new(Arc::new(pool.clone()))
        .create(name)
        .await
        .unwrap()
        .id
}
