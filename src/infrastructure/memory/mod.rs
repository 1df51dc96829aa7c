//! In-process repository implementations.
//!
//! Same contracts as the PostgreSQL repositories, backed by mutex-guarded
//! vectors. Ids start at 1 and increase by one per insert, mirroring a
//! `BIGSERIAL` sequence. Nothing is persisted across restarts.
//!
//! Used by the HTTP integration tests and by embedders that want the
//! service without a database.

pub mod token_store;
pub mod url_store;

pub use token_store::MemoryTokenRepository;
pub use url_store::MemoryUrlRepository;

use crate::error::AppError;
use serde_json::json;
use std::sync::{Mutex, MutexGuard};

/// Locks a store, turning a poisoned mutex into a storage failure.
fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, AppError> {
    mutex
        .lock()
        .map_err(|_| AppError::internal("In-memory store poisoned", json!({})))
}
