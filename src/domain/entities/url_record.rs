//! URL record entity.

use crate::domain::entities::OwnerId;
use crate::utils::base62;

/// A shortened URL.
///
/// The short code is not a field: it is always derived from `id`, which
/// storage assigns once and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: u64,
    pub url: String,
    pub owner: Option<OwnerId>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(id: u64, url: String, owner: Option<OwnerId>) -> Self {
        Self { id, url, owner }
    }

    /// Returns the public short code for this record.
    pub fn short_code(&self) -> String {
        base62::encode(self.id)
    }

    /// Returns true if the record was created by `owner`.
    pub fn is_owned_by(&self, owner: OwnerId) -> bool {
        self.owner == Some(owner)
    }
}

/// Input data for persisting a new URL record.
///
/// Carries no id: storage assigns it atomically on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub url: String,
    pub owner: Option<OwnerId>,
}
