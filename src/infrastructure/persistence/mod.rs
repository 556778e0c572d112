//! SQLx-backed repository implementations.

mod pg_token_repository;
mod pg_url_repository;
mod pg_user_repository;

pub use pg_token_repository::PgTokenRepository;
pub use pg_url_repository::PgUrlRepository;
pub use pg_user_repository::PgUserRepository;
