//! DTO for the shorten endpoint request.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

/// Request to shorten a URL.
///
/// Wire format is camelCase, matching the public API contract.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL to shorten. Scheme is optional; `https://` is
    /// assumed when missing.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub original_url: String,

    /// Optional custom short code (3-10 alphanumeric characters).
    pub custom_code: Option<String>,

    /// Optional expiry timestamp. Past this time redirects are refused.
    pub expires_at: Option<DateTime<Utc>>,
}
