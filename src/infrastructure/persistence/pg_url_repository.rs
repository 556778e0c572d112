//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, Owner, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

const COLUMNS: &str = "id, code, original_url, owner_id, created_at, \
                       last_accessed_at, click_count, is_active, expires_at";

/// Row shape shared by every query returning a full record.
#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    id: i64,
    code: String,
    original_url: String,
    owner_id: Option<String>,
    created_at: DateTime<Utc>,
    last_accessed_at: Option<DateTime<Utc>>,
    click_count: i64,
    is_active: bool,
    expires_at: Option<DateTime<Utc>>,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(row: ShortUrlRow) -> Self {
        ShortUrl {
            id: row.id,
            code: row.code,
            original_url: row.original_url,
            owner: Owner::from_db(row.owner_id),
            created_at: row.created_at,
            last_accessed_at: row.last_accessed_at,
            click_count: row.click_count,
            is_active: row.is_active,
            expires_at: row.expires_at,
        }
    }
}

/// PostgreSQL repository for short URL storage.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let sql = format!(
            "INSERT INTO short_urls (code, original_url, owner_id, expires_at) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        );

        let row = sqlx::query_as::<_, ShortUrlRow>(&sql)
            .bind(&new_url.code)
            .bind(&new_url.original_url)
            .bind(new_url.owner.as_db())
            .bind(new_url.expires_at)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM short_urls WHERE code = $1");

        let row = sqlx::query_as::<_, ShortUrlRow>(&sql)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM short_urls WHERE code = $1)")
                .bind(code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn record_visit(&self, code: &str) -> Result<Option<String>, AppError> {
        // Single guarded statement: the increment is atomic at the database
        // and never applies to inactive or expired rows.
        let original_url: Option<String> = sqlx::query_scalar(
            "UPDATE short_urls \
             SET click_count = click_count + 1, last_accessed_at = NOW() \
             WHERE code = $1 \
               AND is_active \
               AND (expires_at IS NULL OR expires_at > NOW()) \
             RETURNING original_url",
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(original_url)
    }

    async fn list_by_owner(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ShortUrl>, AppError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM short_urls WHERE owner_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );

        let rows = sqlx::query_as::<_, ShortUrlRow>(&sql)
            .bind(owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_by_owner(&self, owner_id: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_urls WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn delete_owned(&self, id: i64, owner_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM short_urls WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn toggle_owned(&self, id: i64, owner_id: &str) -> Result<Option<bool>, AppError> {
        let is_active: Option<bool> = sqlx::query_scalar(
            "UPDATE short_urls SET is_active = NOT is_active \
             WHERE id = $1 AND owner_id = $2 RETURNING is_active",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(is_active)
    }
}
