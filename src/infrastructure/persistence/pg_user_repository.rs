//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User, UserWithCredential};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    display_name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
    is_active: bool,
}

impl UserRow {
    fn into_credential(self) -> UserWithCredential {
        UserWithCredential {
            user: User {
                id: self.id,
                email: self.email,
                display_name: self.display_name,
                created_at: self.created_at,
                last_login_at: self.last_login_at,
                is_active: self.is_active,
            },
            password_hash: self.password_hash,
        }
    }
}

/// PostgreSQL repository for user accounts.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (id, email, display_name, password_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, email, display_name, password_hash, \
                       created_at, last_login_at, is_active",
        )
        .bind(&new_user.id)
        .bind(&new_user.email)
        .bind(&new_user.display_name)
        .bind(&new_user.password_hash)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into_credential().user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithCredential>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, display_name, password_hash, \
                    created_at, last_login_at, is_active \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UserRow::into_credential))
    }

    async fn record_login(&self, user_id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
