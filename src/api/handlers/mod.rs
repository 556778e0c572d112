//! REST API handlers.

mod auth;
mod health;
mod manage;
mod my_urls;
mod redirect;
mod shorten;
mod stats;

pub use auth::{login_handler, register_handler};
pub use health::health_handler;
pub use manage::{delete_url_handler, toggle_url_handler};
pub use my_urls::my_urls_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use stats::stats_handler;
