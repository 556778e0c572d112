//! Short URL creation and ownership-gated management.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{NewShortUrl, Owner, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, validate_custom_code};
use crate::utils::url_normalizer::normalize_url;

/// Attempts before giving up on random allocation. The keyspace is 62^7, so
/// hitting this means either a broken random source or a nearly full table.
const MAX_ATTEMPTS: usize = 10;

/// Service for creating and managing shortened URLs.
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
    generator: CodeGenerator,
    code_length: usize,
}

impl UrlService {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        generator: CodeGenerator,
        code_length: usize,
    ) -> Self {
        Self {
            repository,
            generator,
            code_length,
        }
    }

    /// Creates a shortened URL.
    ///
    /// The raw URL is normalized first (scheme defaulting, http/https
    /// check). A custom code gets exactly one existence check and fails
    /// with a conflict when taken; otherwise random codes are drawn and
    /// retried until the store accepts one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed URL or custom code,
    /// [`AppError::Conflict`] when the custom code is taken, and
    /// [`AppError::Internal`] when random allocation exhausts its attempts.
    pub async fn create_short_url(
        &self,
        original_url: &str,
        custom_code: Option<String>,
        expires_at: Option<DateTime<Utc>>,
        owner: Owner,
    ) -> Result<ShortUrl, AppError> {
        let normalized_url = normalize_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL provided", json!({ "reason": e.to_string() }))
        })?;

        // An empty customCode means "generate one".
        let custom_code = custom_code.filter(|c| !c.is_empty());

        if let Some(custom) = custom_code {
            validate_custom_code(&custom)?;

            if self.repository.code_exists(&custom).await? {
                return Err(AppError::conflict(
                    "Custom code already in use",
                    json!({ "code": custom }),
                ));
            }

            // The existence check above is advisory; a concurrent creation
            // may still win the unique index, surfacing here as a conflict.
            return self
                .repository
                .insert(NewShortUrl {
                    code: custom,
                    original_url: normalized_url,
                    owner,
                    expires_at,
                })
                .await
                .map_err(|e| match e {
                    AppError::Conflict { .. } => AppError::conflict(
                        "Custom code already in use",
                        json!({}),
                    ),
                    other => other,
                });
        }

        self.allocate_random(normalized_url, owner, expires_at).await
    }

    /// Returns a record's metadata, enforcing owner-only visibility.
    ///
    /// Records with an owner are visible to that owner alone; anonymous
    /// records are visible to anyone.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown code and
    /// [`AppError::Forbidden`] when the caller is not the owner.
    pub async fn stats(&self, code: &str, caller: &Owner) -> Result<ShortUrl, AppError> {
        let record = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "code": code })))?;

        if let Owner::User(owner_id) = &record.owner {
            if !caller.is_user(owner_id) {
                return Err(AppError::forbidden(
                    "You can only view stats for your own URLs",
                    json!({ "code": code }),
                ));
            }
        }

        Ok(record)
    }

    /// Lists a user's records, newest first, with the total count.
    pub async fn list_owned(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<ShortUrl>, i64), AppError> {
        let total = self.repository.count_by_owner(owner_id).await?;
        let items = self.repository.list_by_owner(owner_id, offset, limit).await?;
        Ok((items, total))
    }

    /// Deletes a record owned by the given user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the record is absent or owned by
    /// someone else; ownership of foreign ids is not disclosed.
    pub async fn delete(&self, id: i64, owner_id: &str) -> Result<(), AppError> {
        let deleted = self.repository.delete_owned(id, owner_id).await?;
        if !deleted {
            return Err(AppError::not_found(
                "URL not found or you don't have permission to delete it",
                json!({ "id": id }),
            ));
        }
        Ok(())
    }

    /// Flips the active flag of a record owned by the given user.
    ///
    /// Returns the new flag value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the record is absent or owned by
    /// someone else. Anonymous records have no owner and cannot be toggled.
    pub async fn toggle(&self, id: i64, owner_id: &str) -> Result<bool, AppError> {
        self.repository
            .toggle_owned(id, owner_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "URL not found or you don't have permission to modify it",
                    json!({ "id": id }),
                )
            })
    }

    /// Draws random codes until the store accepts one.
    ///
    /// Both the advisory existence check and a late unique-violation on
    /// insert count as collisions and trigger another draw.
    async fn allocate_random(
        &self,
        original_url: String,
        owner: Owner,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<ShortUrl, AppError> {
        for _ in 0..MAX_ATTEMPTS {
            let code = self.generator.generate(self.code_length);

            if self.repository.code_exists(&code).await? {
                continue;
            }

            match self
                .repository
                .insert(NewShortUrl {
                    code,
                    original_url: original_url.clone(),
                    owner: owner.clone(),
                    expires_at,
                })
                .await
            {
                Ok(created) => return Ok(created),
                Err(AppError::Conflict { .. }) => continue,
                Err(other) => return Err(other),
            }
        }

        Err(AppError::internal(
            "Failed to allocate a unique short code",
            json!({ "attempts": MAX_ATTEMPTS }),
        ))
    }
}
