//! Repository trait for URL record storage.

use crate::domain::entities::{NewUrlRecord, OwnerId, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for URL records.
///
/// Records are insert-only: there is no update, and deletion belongs to
/// whatever retention policy the deployment runs outside this service.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryUrlRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Persists a new record and returns it with its storage-assigned id.
    ///
    /// Id assignment must be atomic and never reuse a value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a record by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlRecord))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: u64) -> Result<Option<UrlRecord>, AppError>;

    /// Lists every record created by `owner`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_owner(&self, owner: OwnerId) -> Result<Vec<UrlRecord>, AppError>;

    /// Counts all stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<u64, AppError>;
}
