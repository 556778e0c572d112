//! Repository trait for user account data access.

use crate::domain::entities::{NewUser, User, UserWithCredential};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Looks up a user with their stored password hash by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithCredential>, AppError>;

    /// Stamps `last_login_at` after a successful login.
    async fn record_login(&self, user_id: &str) -> Result<(), AppError>;
}
