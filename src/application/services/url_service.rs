//! URL registry: creation, resolution and owner listing of short links.

use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, OwnerId, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::base62;
use crate::utils::url_validator::validate_url;
use serde_json::json;

/// Service owning every create and resolve of URL records.
///
/// The short code handed to callers is `base62(id)`, where `id` is assigned by
/// the repository on insert. Nothing else is generated, so there is no
/// collision handling and no retry loop.
///
/// Holds no mutable state: each operation is a single repository call.
pub struct UrlService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
    base_url: String,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    /// Creates a new URL service.
    ///
    /// # Arguments
    ///
    /// - `repository` - storage for URL records
    /// - `base_url` - public origin short codes are appended to (e.g. `https://s.example.com`)
    pub fn new(repository: Arc<R>, base_url: impl Into<String>) -> Self {
        Self {
            repository,
            base_url: base_url.into(),
        }
    }

    /// Validates and stores a URL, optionally tagged with its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty, longer than
    /// 255 characters, or not an absolute URL with a host. Nothing is stored
    /// in that case.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create(
        &self,
        raw_url: &str,
        owner: Option<OwnerId>,
    ) -> Result<UrlRecord, AppError> {
        let url = validate_url(raw_url).map_err(|e| {
            metrics::counter!("urls_validation_failed_total").increment(1);
            AppError::bad_request("Invalid URL", json!({ "url": e.to_string() }))
        })?;

        let record = self
            .repository
            .insert(NewUrlRecord {
                url: url.to_string(),
                owner,
            })
            .await?;

        metrics::counter!("urls_created_total").increment(1);
        tracing::info!(
            id = record.id,
            code = %record.short_code(),
            owner = ?record.owner,
            "Short link created"
        );

        Ok(record)
    }

    /// Looks up the record behind a short code.
    ///
    /// A code that does not decode (empty, foreign characters, too large) is
    /// reported exactly like a code with no record behind it: `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors only.
    pub async fn resolve(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let id = match base62::decode(code) {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!(code, error = %e, "Undecodable short code");
                metrics::counter!("urls_resolved_total", "outcome" => "not_found").increment(1);
                return Ok(None);
            }
        };

        let record = self.repository.find_by_id(id).await?;

        let outcome = if record.is_some() { "found" } else { "not_found" };
        metrics::counter!("urls_resolved_total", "outcome" => outcome).increment(1);

        Ok(record)
    }

    /// Lists all records created by `owner`, in creation order.
    ///
    /// Unpaginated: every record of the owner is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_by_owner(&self, owner: OwnerId) -> Result<Vec<UrlRecord>, AppError> {
        self.repository.list_by_owner(owner).await
    }

    /// Counts all stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn count(&self) -> Result<u64, AppError> {
        self.repository.count().await
    }

    /// Constructs the full short URL for a record.
    pub fn short_url(&self, record: &UrlRecord) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            record.short_code()
        )
    }
}
