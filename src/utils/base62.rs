//! Base-62 short code encoding.
//!
//! Short codes are never stored. They are the base-62 rendering of the
//! record's storage-assigned id, so uniqueness comes for free and no
//! collision handling is needed.
//!
//! The alphabet order is part of the public contract: codes that were
//! already handed out must keep resolving to the same ids.

/// Digit alphabet, lowest value first.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const RADIX: u64 = 62;

/// Longest code `encode` can produce for a `u64` (`u64::MAX` has 11 digits).
pub const MAX_CODE_LEN: usize = 11;

/// Invalid input passed to the codec.
///
/// Every variant is an invalid-argument condition. The registry never lets
/// these escape to callers: a code that fails to decode resolves as not found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Cannot encode negative id {0}")]
    NegativeId(i64),

    #[error("Short code is empty")]
    Empty,

    #[error("Invalid character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("Short code value does not fit in 64 bits")]
    Overflow,
}

/// Encodes an id as the shortest base-62 string, most significant digit first.
///
/// Zero encodes as `"0"`. No other input produces a leading `'0'`.
///
/// # Examples
///
/// ```
/// use base62_url_shortener::utils::base62::encode;
///
/// assert_eq!(encode(0), "0");
/// assert_eq!(encode(100), "1C");
/// ```
pub fn encode(mut n: u64) -> String {
    let mut digits = [0u8; MAX_CODE_LEN];
    let mut start = MAX_CODE_LEN;

    loop {
        start -= 1;
        digits[start] = ALPHABET[(n % RADIX) as usize];
        n /= RADIX;
        if n == 0 {
            break;
        }
    }

    digits[start..].iter().map(|&b| b as char).collect()
}

/// Encodes a signed id, rejecting negative values.
///
/// Storage hands out ids as signed 64-bit integers; this is the checked
/// entry point for callers that hold one directly.
///
/// # Errors
///
/// Returns [`CodecError::NegativeId`] if `n < 0`.
pub fn encode_signed(n: i64) -> Result<String, CodecError> {
    u64::try_from(n)
        .map(encode)
        .map_err(|_| CodecError::NegativeId(n))
}

/// Decodes a base-62 string back into its id.
///
/// Leading `'0'` characters are accepted and contribute nothing.
///
/// # Errors
///
/// - [`CodecError::Empty`] for an empty string
/// - [`CodecError::InvalidCharacter`] for anything outside [`ALPHABET`]
/// - [`CodecError::Overflow`] if the value exceeds `u64::MAX`
///
/// # Examples
///
/// ```
/// use base62_url_shortener::utils::base62::decode;
///
/// assert_eq!(decode("1C"), Ok(100));
/// assert!(decode("#@!").is_err());
/// ```
pub fn decode(code: &str) -> Result<u64, CodecError> {
    if code.is_empty() {
        return Err(CodecError::Empty);
    }

    code.chars().enumerate().try_fold(0u64, |acc, (position, character)| {
        let digit = digit_value(character).ok_or(CodecError::InvalidCharacter {
            character,
            position,
        })?;

        acc.checked_mul(RADIX)
            .and_then(|v| v.checked_add(digit))
            .ok_or(CodecError::Overflow)
    })
}

/// Position of `c` in [`ALPHABET`].
fn digit_value(c: char) -> Option<u64> {
    let value = match c {
        '0'..='9' => c as u8 - b'0',
        'a'..='z' => c as u8 - b'a' + 10,
        'A'..='Z' => c as u8 - b'A' + 36,
        _ => return None,
    };
    Some(u64::from(value))
}
