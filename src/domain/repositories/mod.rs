//! Repository trait definitions for the domain layer.
//!
//! These traits are the storage collaborator contracts. Concrete
//! implementations live in `crate::infrastructure`.
//!
//! # Available Repositories
//!
//! - [`UrlRepository`] - URL record insert and lookup
//! - [`TokenRepository`] - API token authentication
//! - [`UserRepository`] - User accounts
//!
//! # Testing
//!
//! Mock implementations are generated via `mockall` under `cfg(test)`.
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod token_repository;
pub mod url_repository;
pub mod user_repository;

pub use token_repository::{ApiToken, TokenRepository};
pub use url_repository::UrlRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
