//! User registration, login, and bearer token authentication.
//!
//! Tokens are opaque random strings; only their HMAC-SHA256 (keyed by the
//! server signing secret) is stored, so read access to the database is not
//! enough to forge or replay a credential. Passwords use the same MAC with
//! a per-user random salt.

use base64::Engine as _;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Service owning the credential lifecycle.
///
/// The rest of the application only ever consumes two capabilities from
/// here: "credentials → (user, token)" and "token → user id".
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenRepository>,
    signing_secret: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenRepository>,
        signing_secret: String,
    ) -> Self {
        Self {
            users,
            tokens,
            signing_secret,
        }
    }

    /// Registers a new user and issues their first token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the email is already registered.
    pub async fn register(
        &self,
        email: &str,
        display_name: &str,
        password: &str,
    ) -> Result<(User, String), AppError> {
        let user_id = hex::encode(rand::rng().random::<[u8; 16]>());
        let password_hash = self.hash_password(password);

        let user = self
            .users
            .create(NewUser {
                id: user_id,
                email: email.to_string(),
                display_name: display_name.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => {
                    AppError::conflict("Email is already registered", json!({ "email": email }))
                }
                other => other,
            })?;

        let token = self.issue_token(&user.id).await?;
        Ok((user, token))
    }

    /// Authenticates credentials and issues a fresh token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown email, a wrong
    /// password, or a deactivated account, without distinguishing which.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let invalid =
            || AppError::unauthorized("Invalid email or password", json!({}));

        let stored = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(invalid)?;

        if !stored.user.is_active || !self.verify_password(password, &stored.password_hash) {
            return Err(invalid());
        }

        let _ = self.users.record_login(&stored.user.id).await;

        let token = self.issue_token(&stored.user.id).await?;
        Ok((stored.user, token))
    }

    /// Resolves a raw bearer token to the caller's user id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for unknown or revoked tokens.
    pub async fn authenticate(&self, token: &str) -> Result<String, AppError> {
        let token_hash = self.mac_hex(token.as_bytes());

        let user_id = self
            .tokens
            .find_user_by_hash(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid or revoked token" }),
                )
            })?;

        let _ = self.tokens.touch(&token_hash).await;

        Ok(user_id)
    }

    /// Issues a new opaque token for a user and stores its hash.
    async fn issue_token(&self, user_id: &str) -> Result<String, AppError> {
        let raw: [u8; 32] = rand::rng().random();
        let token = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(raw);

        let token_hash = self.mac_hex(token.as_bytes());
        self.tokens.insert(&token_hash, user_id).await?;

        Ok(token)
    }

    /// HMAC-SHA256 under the signing secret, hex-encoded.
    fn mac_hex(&self, data: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(data);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Salted password hash in `{salt}${mac}` form.
    fn hash_password(&self, password: &str) -> String {
        let salt = hex::encode(rand::rng().random::<[u8; 16]>());
        let mac = self.mac_hex(format!("{salt}{password}").as_bytes());
        format!("{salt}${mac}")
    }

    fn verify_password(&self, password: &str, stored: &str) -> bool {
        let Some((salt, mac)) = stored.split_once('$') else {
            return false;
        };
        self.mac_hex(format!("{salt}{password}").as_bytes()) == mac
    }
}
