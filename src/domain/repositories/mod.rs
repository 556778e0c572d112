//! Repository traits decoupling services from the storage backend.

mod token_repository;
mod url_repository;
mod user_repository;

pub use token_repository::TokenRepository;
pub use url_repository::UrlRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
