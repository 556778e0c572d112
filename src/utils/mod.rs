//! Shared helpers for code generation and URL handling.

pub mod code_generator;
pub mod url_normalizer;
