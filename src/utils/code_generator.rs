//! Short code generation and validation.
//!
//! Codes are drawn uniformly from a 62-character alphanumeric alphabet. The
//! randomness comes through the [`RandomSource`] trait so tests can make
//! generation deterministic.

use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

/// The 62-character code alphabet: lowercase, uppercase, digits.
/// Visually similar glyphs (`0`/`O`, `1`/`l`) are intentionally kept.
pub const ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default length of generated codes.
pub const DEFAULT_CODE_LENGTH: usize = 7;

/// Bounds for caller-supplied custom codes.
pub const CUSTOM_CODE_MIN: usize = 3;
pub const CUSTOM_CODE_MAX: usize = 10;

/// A stateless source of uniform random indices.
pub trait RandomSource: Send + Sync {
    /// Returns a uniformly distributed index in `0..bound`.
    fn next_index(&self, bound: usize) -> usize;
}

/// Production source backed by the thread-local RNG.
///
/// Not cryptographically secure, and not required to be: uniqueness is
/// enforced by the storage layer, not by entropy.
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn next_index(&self, bound: usize) -> usize {
        use rand::Rng;
        rand::rng().random_range(0..bound)
    }
}

/// Generates fixed-length short codes from an injected random source.
#[derive(Clone)]
pub struct CodeGenerator {
    source: Arc<dyn RandomSource>,
}

impl CodeGenerator {
    pub fn new(source: Arc<dyn RandomSource>) -> Self {
        Self { source }
    }

    /// Produces a code of `length` characters, each drawn independently and
    /// uniformly from [`ALPHABET`].
    pub fn generate(&self, length: usize) -> String {
        (0..length)
            .map(|_| ALPHABET[self.source.next_index(ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRngSource))
    }
}

/// Validates a caller-supplied custom short code.
///
/// # Rules
///
/// - Length: 3-10 characters
/// - Allowed characters: ASCII letters and digits
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < CUSTOM_CODE_MIN || code.len() > CUSTOM_CODE_MAX {
        return Err(AppError::bad_request(
            "Custom code must be between 3 and 10 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::bad_request(
            "Custom code can only contain letters and digits",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
