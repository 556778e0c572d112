//! User account entity.

use chrono::{DateTime, Utc};

/// A registered user as seen by the rest of the application.
///
/// The password credential is deliberately not part of this struct; it only
/// travels inside [`UserWithCredential`] between the repository and the
/// authentication service.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// A user together with their stored password hash, for credential checks.
#[derive(Debug, Clone)]
pub struct UserWithCredential {
    pub user: User,
    pub password_hash: String,
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
}
