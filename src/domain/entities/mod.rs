//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without storage concerns.
//!
//! # Entity Types
//!
//! - [`UrlRecord`] - A shortened URL; its short code is derived from its id
//! - [`OwnerId`] - Opaque owner reference attached to records
//! - [`User`] - A registered account behind an [`OwnerId`]
//!
//! Creation uses a separate `NewUrlRecord` struct without an id, since ids are
//! assigned by storage.

pub mod url_record;
pub mod user;

pub use url_record::{NewUrlRecord, UrlRecord};
pub use user::{OwnerId, User};
