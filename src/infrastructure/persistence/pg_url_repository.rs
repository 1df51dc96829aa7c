//! PostgreSQL implementation of URL repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, OwnerId, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Row shape of the `urls` table.
#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    url: String,
    user_id: Option<i64>,
}

impl TryFrom<UrlRow> for UrlRecord {
    type Error = AppError;

    fn try_from(row: UrlRow) -> Result<Self, Self::Error> {
        let id = u64::try_from(row.id).map_err(|_| {
            AppError::internal("Corrupt URL record id", json!({ "id": row.id }))
        })?;

        Ok(UrlRecord::new(id, row.url, row.user_id.map(OwnerId::new)))
    }
}

/// PostgreSQL repository for URL records.
///
/// Ids come from the `BIGSERIAL` sequence on `urls.id`, which gives the
/// atomic, never-reused assignment the short codes depend on.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (url, user_id)
            VALUES ($1, $2)
            RETURNING id, url, user_id
            "#,
        )
        .bind(&new_record.url)
        .bind(new_record.owner.map(OwnerId::get))
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<UrlRecord>, AppError> {
        // Anything past i64::MAX was never issued by the sequence.
        let Ok(id) = i64::try_from(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, url, user_id
            FROM urls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(UrlRecord::try_from).transpose()
    }

    async fn list_by_owner(&self, owner: OwnerId) -> Result<Vec<UrlRecord>, AppError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, url, user_id
            FROM urls
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(owner.get())
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(UrlRecord::try_from).collect()
    }

    async fn count(&self) -> Result<u64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count.max(0) as u64)
    }
}
