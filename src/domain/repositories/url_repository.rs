//! Repository trait for short URL data access.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for shortened URL records.
///
/// The unique index on `code` at the storage layer is the authoritative
/// guard against duplicate codes; [`UrlRepository::code_exists`] is advisory
/// only, and callers must tolerate a late [`AppError::Conflict`] from
/// [`UrlRepository::insert`] under concurrent creation.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Finds a record by its short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Advisory existence check used by the random allocation loop.
    async fn code_exists(&self, code: &str) -> Result<bool, AppError>;

    /// Records one successful redirect in a single atomic statement.
    ///
    /// Increments `click_count` by exactly 1 and stamps `last_accessed_at`,
    /// guarded by the active flag and expiry so concurrent redirects can
    /// neither lose updates nor count refused ones.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(original_url))` when the record was active and unexpired
    /// - `Ok(None)` when no row qualified (absent, inactive, or expired);
    ///   the caller classifies via [`UrlRepository::find_by_code`]
    async fn record_visit(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Lists a user's records, newest first.
    async fn list_by_owner(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ShortUrl>, AppError>;

    /// Counts a user's records.
    async fn count_by_owner(&self, owner_id: &str) -> Result<i64, AppError>;

    /// Deletes a record if and only if it belongs to the given user.
    ///
    /// Returns `Ok(false)` when no row matched, which covers both "absent"
    /// and "owned by someone else" without leaking which one it was.
    async fn delete_owned(&self, id: i64, owner_id: &str) -> Result<bool, AppError>;

    /// Flips the active flag of a record owned by the given user.
    ///
    /// Returns the new flag value, or `Ok(None)` when no row matched.
    async fn toggle_owned(&self, id: i64, owner_id: &str) -> Result<Option<bool>, AppError>;
}
