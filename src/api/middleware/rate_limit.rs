//! Rate limiting middleware using token bucket algorithm.
//!
//! Every limiter exists in two flavours. The default keys buckets on the
//! socket peer address. With `behind_proxy` the client IP is read from
//! `X-Forwarded-For` / `X-Real-IP` / `Forwarded` instead, which is only safe
//! when a trusted reverse proxy sets those headers.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

type Limiter<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter for public endpoints (redirects, lookups, shortening).
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/{code}", get(redirect_handler))
///     .layer(rate_limit::layer());
/// ```
pub fn layer() -> Limiter<PeerIpKeyExtractor> {
    build(PeerIpKeyExtractor, 2, 100)
}

/// [`layer`] keyed on proxy-supplied client IP headers.
pub fn proxied_layer() -> Limiter<SmartIpKeyExtractor> {
    build(SmartIpKeyExtractor, 2, 100)
}

/// Creates a stricter rate limiter for authenticated endpoints.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
///
/// Used for owner listings, which are unpaginated and read every record of
/// the caller.
pub fn secure_layer() -> Limiter<PeerIpKeyExtractor> {
    build(PeerIpKeyExtractor, 1, 10)
}

/// [`secure_layer`] keyed on proxy-supplied client IP headers.
pub fn proxied_secure_layer() -> Limiter<SmartIpKeyExtractor> {
    build(SmartIpKeyExtractor, 1, 10)
}

fn build<K>(extractor: K, per_second: u64, burst_size: u32) -> Limiter<K>
where
    K: KeyExtractor,
{
    let mut builder = GovernorConfigBuilder::default().key_extractor(extractor);
    builder.per_second(per_second).burst_size(burst_size);

    // Only a zero period or burst is rejected; both are non-zero constants here.
    let governor_conf = Arc::new(builder.finish().expect("non-zero rate limit quota"));

    GovernorLayer::new(governor_conf)
}
