//! In-memory URL repository.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;

use super::lock;
use crate::domain::entities::{NewUrlRecord, OwnerId, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

#[derive(Debug)]
struct Inner {
    /// `None` once `u64::MAX` has been handed out.
    next_id: Option<u64>,
    records: Vec<UrlRecord>,
}

/// URL repository held in process memory.
///
/// Records are kept in insertion order, which is also id order.
#[derive(Debug)]
pub struct MemoryUrlRepository {
    inner: Mutex<Inner>,
}

impl MemoryUrlRepository {
    /// Creates an empty repository whose first id is 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Creates an empty repository whose first assigned id is `first_id`.
    pub fn starting_at(first_id: u64) -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: Some(first_id),
                records: Vec::new(),
            }),
        }
    }
}

impl Default for MemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let mut inner = lock(&self.inner)?;

        let id = inner
            .next_id
            .ok_or_else(|| AppError::internal("URL id space exhausted", json!({})))?;

        let record = UrlRecord::new(id, new_record.url, new_record.owner);
        inner.next_id = id.checked_add(1);
        inner.records.push(record.clone());

        Ok(record)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<UrlRecord>, AppError> {
        let inner = lock(&self.inner)?;

        // Ids are ascending, so the vector is sorted by id.
        Ok(inner
            .records
            .binary_search_by_key(&id, |r| r.id)
            .ok()
            .map(|idx| inner.records[idx].clone()))
    }

    async fn list_by_owner(&self, owner: OwnerId) -> Result<Vec<UrlRecord>, AppError> {
        let inner = lock(&self.inner)?;

        Ok(inner
            .records
            .iter()
            .filter(|r| r.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(lock(&self.inner)?.records.len() as u64)
    }
}
