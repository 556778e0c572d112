//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, RedirectService, UrlService};

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    pub redirect_service: Arc<RedirectService>,
    pub auth_service: Arc<AuthService>,
    /// Public base used to compose short URLs in responses.
    pub base_url: String,
}

impl AppState {
    /// Composes the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}
