//! Utility functions for short code encoding and URL validation.
//!
//! - [`base62`] - Id ⇄ short code conversion
//! - [`url_validator`] - Syntactic checks for submitted URLs

pub mod base62;
pub mod url_validator;
