//! Request/response DTOs for the REST API.

pub mod auth;
pub mod pagination;
pub mod shorten;
pub mod url;
