//! URL normalization and validation.
//!
//! Applied identically at every creation path so that stored URLs are
//! always schemed absolute http/https URIs.

use std::borrow::Cow;
use url::Url;

/// Maximum accepted length for an original URL, after scheme defaulting.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL exceeds the maximum length of {MAX_URL_LENGTH} characters")]
    TooLong(usize),

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Prepends `https://` when the input carries no scheme at all.
///
/// An explicit non-web scheme (`ftp://`, `file://`, ...) is rejected here
/// rather than prefixed, which would otherwise smuggle it through as a
/// host name. Text before a `://` only counts as a scheme when it precedes
/// any `/`, `?`, or `#`: a scheme-less URL may embed an absolute URL in
/// its path or query (`example.com/redirect?url=https://other.com`).
pub fn ensure_scheme(raw: &str) -> Result<Cow<'_, str>, UrlNormalizationError> {
    match raw.split_once("://") {
        Some((scheme, _)) if !scheme.contains(['/', '?', '#']) => match scheme {
            "http" | "https" => Ok(Cow::Borrowed(raw)),
            _ => Err(UrlNormalizationError::UnsupportedProtocol),
        },
        _ => Ok(Cow::Owned(format!("https://{raw}"))),
    }
}

/// Normalizes a raw URL string to a schemed absolute http/https URL.
///
/// # Normalization Rules
///
/// 1. Surrounding whitespace is trimmed; blank input is rejected
/// 2. A missing scheme defaults to `https://`
/// 3. The result must parse as an absolute URI with scheme http or https
/// 4. Everything else is preserved byte-for-byte: the stored URL is exactly
///    the trimmed input plus, at most, the defaulted scheme
///
/// # Security
///
/// Rejects non-web schemes such as `javascript:`, `data:`, and `file:`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
/// assert_eq!(
///     normalize_url("http://example.com/a?b=c").unwrap(),
///     "http://example.com/a?b=c"
/// );
/// assert!(normalize_url("ftp://example.com").is_err());
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    let with_scheme = ensure_scheme(trimmed)?;
    if with_scheme.len() > MAX_URL_LENGTH {
        return Err(UrlNormalizationError::TooLong(with_scheme.len()));
    }

    let url = Url::parse(&with_scheme)
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    // Deliberately not `url.to_string()`: the parser appends a trailing
    // slash to bare hosts, and redirects must return the stored URL
    // byte-identical to what the caller submitted.
    Ok(with_scheme.into_owned())
}
