//! Redirect resolution: code → original URL, with usage accounting.

use std::sync::Arc;

use serde_json::json;

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Service resolving short codes for the public redirect endpoint.
pub struct RedirectService {
    repository: Arc<dyn UrlRepository>,
}

impl RedirectService {
    pub fn new(repository: Arc<dyn UrlRepository>) -> Self {
        Self { repository }
    }

    /// Resolves a short code to its destination URL.
    ///
    /// The happy path is a single guarded atomic update at the storage
    /// layer that increments the click counter, stamps the last-accessed
    /// time, and returns the destination. Only when no row qualifies is a
    /// second read issued to classify the refusal, so refused requests
    /// never mutate anything.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] - unknown code, or record deactivated
    /// - [`AppError::Expired`] - record past its expiry timestamp
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        if let Some(original_url) = self.repository.record_visit(code).await? {
            return Ok(original_url);
        }

        let record = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "code": code })))?;

        if !record.is_active {
            return Err(AppError::not_found(
                "Short URL is inactive",
                json!({ "code": code }),
            ));
        }

        if record.is_expired() {
            return Err(AppError::expired(
                "Short URL has expired",
                json!({ "code": code, "expired_at": record.expires_at }),
            ));
        }

        // The record became eligible between the update and the re-read
        // (e.g. reactivated concurrently). Treat as not found rather than
        // redirecting without counting.
        Err(AppError::not_found(
            "Short URL not found",
            json!({ "code": code }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Owner, ShortUrl};
    use crate::domain::repositories::MockUrlRepository;
    use chrono::{Duration, Utc};

    fn record(is_active: bool, expired: bool) -> ShortUrl {
        ShortUrl {
            id: 1,
            code: "abc1234".to_string(),
            original_url: "https://example.com/target".to_string(),
            owner: Owner::Anonymous,
            created_at: Utc::now(),
            last_accessed_at: None,
            click_count: 3,
            is_active,
            expires_at: expired.then(|| Utc::now() - Duration::hours(1)),
        }
    }

    #[tokio::test]
    async fn test_resolve_success_returns_destination() {
        let mut repo = MockUrlRepository::new();
        repo.expect_record_visit()
            .times(1)
            .returning(|_| Ok(Some("https://example.com/target".to_string())));
        repo.expect_find_by_code().times(0);

        let service = RedirectService::new(Arc::new(repo));

        let url = service.resolve("abc1234").await.unwrap();
        assert_eq!(url, "https://example.com/target");
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_is_not_found() {
        let mut repo = MockUrlRepository::new();
        repo.expect_record_visit().times(1).returning(|_| Ok(None));
        repo.expect_find_by_code().times(1).returning(|_| Ok(None));

        let service = RedirectService::new(Arc::new(repo));

        let result = service.resolve("missing").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_inactive_is_not_found() {
        let mut repo = MockUrlRepository::new();
        repo.expect_record_visit().times(1).returning(|_| Ok(None));
        repo.expect_find_by_code()
            .times(1)
            .returning(|_| Ok(Some(record(false, false))));

        let service = RedirectService::new(Arc::new(repo));

        let result = service.resolve("abc1234").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_expired_is_expired_error() {
        let mut repo = MockUrlRepository::new();
        repo.expect_record_visit().times(1).returning(|_| Ok(None));
        repo.expect_find_by_code()
            .times(1)
            .returning(|_| Ok(Some(record(true, true))));

        let service = RedirectService::new(Arc::new(repo));

        let result = service.resolve("abc1234").await;
        assert!(matches!(result.unwrap_err(), AppError::Expired { .. }));
    }

    #[tokio::test]
    async fn test_refused_resolve_never_mutates() {
        // record_visit is the only mutating call, and it already refused.
        let mut repo = MockUrlRepository::new();
        repo.expect_record_visit().times(1).returning(|_| Ok(None));
        repo.expect_find_by_code()
            .times(1)
            .returning(|_| Ok(Some(record(false, false))));

        let service = RedirectService::new(Arc::new(repo));
        let _ = service.resolve("abc1234").await;
        // Mock verifies no further repository interaction happened.
    }
}
