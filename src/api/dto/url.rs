//! JSON representations of short URL records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::ShortUrl;

/// A short URL record as returned by shorten, stats, and listing endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

impl UrlResponse {
    /// Builds the response from an entity plus the composed public URL.
    pub fn from_entity(entity: ShortUrl, short_url: String) -> Self {
        Self {
            id: entity.id,
            original_url: entity.original_url,
            short_code: entity.code,
            short_url,
            created_at: entity.created_at,
            click_count: entity.click_count,
            last_accessed_at: entity.last_accessed_at,
            is_active: entity.is_active,
            expires_at: entity.expires_at,
        }
    }
}

/// Paginated listing of a user's records.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlListResponse {
    pub urls: Vec<UrlResponse>,
    pub total_count: i64,
    pub page: u32,
    pub page_size: u32,
}

/// Simple acknowledgment body used by delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Acknowledgment body for toggle, carrying the new state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub message: String,
    pub is_active: bool,
}
