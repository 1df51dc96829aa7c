//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//! Queries are checked at runtime, so the crate builds without a live
//! database; the schema lives in `migrations/`.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - URL record storage and retrieval
//! - [`PgTokenRepository`] - API token storage and validation
//! - [`PgUserRepository`] - User accounts

pub mod pg_token_repository;
pub mod pg_url_repository;
pub mod pg_user_repository;

pub use pg_token_repository::PgTokenRepository;
pub use pg_url_repository::PgUrlRepository;
pub use pg_user_repository::PgUserRepository;
