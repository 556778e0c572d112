//! Repository trait for bearer token storage.

use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for issued API tokens.
///
/// Only HMAC hashes of tokens are stored; the raw token exists solely in
/// the response that issued it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Stores a freshly issued token hash for a user.
    async fn insert(&self, token_hash: &str, user_id: &str) -> Result<(), AppError>;

    /// Resolves a token hash to its user id.
    ///
    /// Returns `Ok(None)` for unknown or revoked tokens.
    async fn find_user_by_hash(&self, token_hash: &str) -> Result<Option<String>, AppError>;

    /// Stamps `last_used_at` for monitoring. Best effort.
    async fn touch(&self, token_hash: &str) -> Result<(), AppError>;
}
