//! URL acceptance rules for link creation.
//!
//! The original URL is stored exactly as supplied; validation only decides
//! whether it may be shortened.

use std::collections::BTreeSet;
use url::Url;

/// Reasons a URL is refused.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL cannot be empty")]
    Empty,

    #[error("URL is too long (max {max} characters)")]
    TooLong { max: usize },

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Protocol '{0}' is not allowed")]
    UnsupportedScheme(String),

    #[error("URL must have a valid host")]
    MissingHost,
}

/// Checks that a URL may be shortened.
///
/// # Rules
///
/// 1. **Length**: non-blank and at most `max_length` characters
/// 2. **Format**: parses as an absolute URL
/// 3. **Scheme**: one of `allowed_schemes` (compared lower-cased)
/// 4. **Host**: present and non-empty
///
/// Out-of-range ports fail at the parse step.
///
/// # Errors
///
/// Returns the first rule that fails as a [`UrlValidationError`].
///
/// # Examples
///
/// ```ignore
/// let schemes = BTreeSet::from(["https".to_string()]);
/// assert!(validate_url("https://example.com", &schemes, 2048).is_ok());
/// assert!(validate_url("javascript:alert(1)", &schemes, 2048).is_err());
/// ```
pub fn validate_url(
    input: &str,
    allowed_schemes: &BTreeSet<String>,
    max_length: usize,
) -> Result<Url, UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if input.chars().count() > max_length {
        return Err(UrlValidationError::TooLong { max: max_length });
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    let scheme = url.scheme().to_ascii_lowercase();
    if !allowed_schemes.contains(&scheme) {
        return Err(UrlValidationError::UnsupportedScheme(scheme));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}
