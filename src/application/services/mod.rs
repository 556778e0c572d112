//! Business logic services.

mod auth_service;
mod redirect_service;
mod url_service;

pub use auth_service::AuthService;
pub use redirect_service::RedirectService;
pub use url_service::UrlService;
