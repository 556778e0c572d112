#![allow(dead_code)]

//! Shared fixtures: in-memory repositories and a fully wired test server.
//!
//! The repositories implement the same traits the PostgreSQL ones do, so
//! these tests exercise the real router, middleware, and services end to
//! end without a database.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use serde_json::json;

use shortly::application::services::{AuthService, RedirectService, UrlService};
use shortly::domain::entities::{NewShortUrl, NewUser, Owner, ShortUrl, User, UserWithCredential};
use shortly::domain::repositories::{TokenRepository, UrlRepository, UserRepository};
use shortly::error::AppError;
use shortly::routes;
use shortly::state::AppState;
use shortly::utils::code_generator::{CodeGenerator, DEFAULT_CODE_LENGTH};

pub const TEST_SIGNING_SECRET: &str = "integration-test-secret";
pub const TEST_BASE_URL: &str = "http://localhost:3000";

// ─── URL repository ──────────────────────────────────────────────────────────

/// In-memory URL store. A single lock around the row vector gives the same
/// effective guarantees the database provides: unique codes and atomic
/// visit counting.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    rows: Mutex<Vec<ShortUrl>>,
    next_id: AtomicI64,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Seeds a record directly, bypassing the service layer. Used to set up
    /// inactive or expired rows that the API cannot create.
    pub fn seed(
        &self,
        code: &str,
        original_url: &str,
        owner: Owner,
        is_active: bool,
        expires_at: Option<DateTime<Utc>>,
    ) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.rows.lock().unwrap().push(ShortUrl {
            id,
            code: code.to_string(),
            original_url: original_url.to_string(),
            owner,
            created_at: Utc::now(),
            last_accessed_at: None,
            click_count: 0,
            is_active,
            expires_at,
        });
        id
    }

    pub fn get_by_code(&self, code: &str) -> Option<ShortUrl> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.code == code)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let mut rows = self.rows.lock().unwrap();

        if rows.iter().any(|r| r.code == new_url.code) {
            return Err(AppError::conflict("Unique constraint violation", json!({})));
        }

        let record = ShortUrl {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            code: new_url.code,
            original_url: new_url.original_url,
            owner: new_url.owner,
            created_at: Utc::now(),
            last_accessed_at: None,
            click_count: 0,
            is_active: true,
            expires_at: new_url.expires_at,
        };
        rows.push(record.clone());

        Ok(record)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError> {
        Ok(self.get_by_code(code))
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.rows.lock().unwrap().iter().any(|r| r.code == code))
    }

    async fn record_visit(&self, code: &str) -> Result<Option<String>, AppError> {
        let mut rows = self.rows.lock().unwrap();

        match rows.iter_mut().find(|r| r.code == code) {
            Some(row) if row.is_redirectable() => {
                row.click_count += 1;
                row.last_accessed_at = Some(Utc::now());
                Ok(Some(row.original_url.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn list_by_owner(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ShortUrl>, AppError> {
        let rows = self.rows.lock().unwrap();

        let mut owned: Vec<ShortUrl> = rows
            .iter()
            .filter(|r| r.owner.is_user(owner_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(owned
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_by_owner(&self, owner_id: &str) -> Result<i64, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|r| r.owner.is_user(owner_id)).count() as i64)
    }

    async fn delete_owned(&self, id: i64, owner_id: &str) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !(r.id == id && r.owner.is_user(owner_id)));
        Ok(rows.len() < before)
    }

    async fn toggle_owned(&self, id: i64, owner_id: &str) -> Result<Option<bool>, AppError> {
        let mut rows = self.rows.lock().unwrap();

        match rows
            .iter_mut()
            .find(|r| r.id == id && r.owner.is_user(owner_id))
        {
            Some(row) => {
                row.is_active = !row.is_active;
                Ok(Some(row.is_active))
            }
            None => Ok(None),
        }
    }
}

// ─── User repository ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<UserWithCredential>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut rows = self.rows.lock().unwrap();

        if rows.iter().any(|r| r.user.email == new_user.email) {
            return Err(AppError::conflict("Unique constraint violation", json!({})));
        }

        let user = User {
            id: new_user.id,
            email: new_user.email,
            display_name: new_user.display_name,
            created_at: Utc::now(),
            last_login_at: None,
            is_active: true,
        };
        rows.push(UserWithCredential {
            user: user.clone(),
            password_hash: new_user.password_hash,
        });

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithCredential>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user.email == email)
            .cloned())
    }

    async fn record_login(&self, user_id: &str) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|r| r.user.id == user_id) {
            row.user.last_login_at = Some(Utc::now());
        }
        Ok(())
    }
}

// ─── Token repository ────────────────────────────────────────────────────────

struct TokenRow {
    token_hash: String,
    user_id: String,
    revoked: bool,
}

#[derive(Default)]
pub struct InMemoryTokenRepository {
    rows: Mutex<Vec<TokenRow>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every token of a user as revoked.
    pub fn revoke_all(&self, user_id: &str) {
        let mut rows = self.rows.lock().unwrap();
        for row in rows.iter_mut().filter(|r| r.user_id == user_id) {
            row.revoked = true;
        }
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn insert(&self, token_hash: &str, user_id: &str) -> Result<(), AppError> {
        self.rows.lock().unwrap().push(TokenRow {
            token_hash: token_hash.to_string(),
            user_id: user_id.to_string(),
            revoked: false,
        });
        Ok(())
    }

    async fn find_user_by_hash(&self, token_hash: &str) -> Result<Option<String>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.token_hash == token_hash && !r.revoked)
            .map(|r| r.user_id.clone()))
    }

    async fn touch(&self, _token_hash: &str) -> Result<(), AppError> {
        Ok(())
    }
}

// ─── Test server wiring ──────────────────────────────────────────────────────

pub struct TestContext {
    pub server: TestServer,
    pub urls: Arc<InMemoryUrlRepository>,
    pub tokens: Arc<InMemoryTokenRepository>,
}

pub fn create_test_state() -> (
    AppState,
    Arc<InMemoryUrlRepository>,
    Arc<InMemoryTokenRepository>,
) {
    let urls = Arc::new(InMemoryUrlRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let tokens = Arc::new(InMemoryTokenRepository::new());

    let state = AppState {
        url_service: Arc::new(UrlService::new(
            urls.clone(),
            CodeGenerator::default(),
            DEFAULT_CODE_LENGTH,
        )),
        redirect_service: Arc::new(RedirectService::new(urls.clone())),
        auth_service: Arc::new(AuthService::new(
            users,
            tokens.clone(),
            TEST_SIGNING_SECRET.to_string(),
        )),
        base_url: TEST_BASE_URL.to_string(),
    };

    (state, urls, tokens)
}

pub fn make_server() -> TestContext {
    let (state, urls, tokens) = create_test_state();

    let server = TestServer::new(routes::router(state)).unwrap();

    TestContext {
        server,
        urls,
        tokens,
    }
}

/// Registers a user through the API and returns `(user_id, bearer token)`.
pub async fn register_user(server: &TestServer, email: &str) -> (String, String) {
    let response = server
        .post("/api/users/auth/register")
        .json(&json!({ "email": email, "password": "password123" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let body = response.json::<serde_json::Value>();
    (
        body["userId"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}
