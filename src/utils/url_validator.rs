//! Syntactic validation for URLs submitted for shortening.
//!
//! URLs are stored exactly as submitted (minus surrounding whitespace).
//! Parsing with [`url::Url`] is only used to decide whether the input is an
//! absolute URL; the parsed form is never persisted, so a resolved link
//! always points at the string the user typed.

use url::Url;

/// Upper bound on stored URL length, in characters.
pub const MAX_URL_LENGTH: usize = 255;

/// Reasons a submitted URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is required")]
    Empty,

    #[error("URL must not exceed {max} characters (got {length})")]
    TooLong { length: usize, max: usize },

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must have a scheme and a host")]
    MissingHost,
}

/// Validates a submitted URL and returns the string to store.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. Must not be empty
/// 3. At most [`MAX_URL_LENGTH`] characters
/// 4. Must parse as an absolute URL
/// 5. Must carry a host (rejects `mailto:`, `data:`, `file:///...`)
///
/// # Errors
///
/// Returns the first [`UrlValidationError`] rule that fails.
///
/// # Examples
///
/// ```
/// use base62_url_shortener::utils::url_validator::validate_url;
///
/// assert_eq!(validate_url(" https://www.google.com ").unwrap(), "https://www.google.com");
/// assert!(validate_url("not a url").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<&str, UrlValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let length = trimmed.chars().count();
    if length > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong {
            length,
            max: MAX_URL_LENGTH,
        });
    }

    let parsed =
        Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if parsed.host().is_none() {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(trimmed)
}
