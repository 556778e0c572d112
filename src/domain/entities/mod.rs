//! Core business entities.

mod short_url;
mod user;

pub use short_url::{NewShortUrl, Owner, ShortUrl};
pub use user::{NewUser, User, UserWithCredential};
