//! Form style URL decoding for identifier values.
//!
//! jgradebook writes string values with `application/x-www-form-urlencoded`
//! escaping: `+` stands for a space and `%XX` for a single byte of UTF-8.
//! Byte sequences that are not UTF-8 decode to U+FFFD, only a malformed `%`
//! escape counts as a failure.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// `%` at byte offset without two following characters
    IncompleteEscape(usize),

    /// `%` at byte offset followed by something that is not hex
    InvalidEscape(usize),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::IncompleteEscape(at) => write!(f, "Incomplete escape at offset {}", at),
            DecodeError::InvalidEscape(at) => write!(f, "Invalid escape at offset {}", at),
        }
    }
}

impl std::error::Error for DecodeError {}

fn hex_value(b: u8) -> Option<u8> {
    char::from(b).to_digit(16).map(|d| d as u8)
}

pub fn url_decode(input: &str) -> Result<String, DecodeError> {
    if !input.contains(['%', '+']) {
        return Ok(input.to_owned());
    }

    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .ok_or(DecodeError::IncompleteEscape(i))?;
                let hi = hex_value(hex[0]).ok_or(DecodeError::InvalidEscape(i))?;
                let lo = hex_value(hex[1]).ok_or(DecodeError::InvalidEscape(i))?;
                out.push(hi << 4 | lo);
                i += 3;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Decode `input`, or hand it back unchanged if it is not valid form encoding.
pub fn decode_or_raw(input: &str) -> String {
    url_decode(input).unwrap_or_else(|e| {
        tracing::debug!(text = input, error = %e, "keeping undecodable identifier as is");
        input.to_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf8_escapes_and_plus() {
        assert_eq!(url_decode("%C3%9Cbungsblatt").unwrap(), "Übungsblatt");
        assert_eq!(url_decode("Programmieren+1").unwrap(), "Programmieren 1");
        assert_eq!(url_decode("%3Cnull%3E").unwrap(), "<null>");
        assert_eq!(url_decode("plain").unwrap(), "plain");
    }

    #[test]
    fn rejects_broken_escapes() {
        assert_eq!(url_decode("100%"), Err(DecodeError::IncompleteEscape(3)));
        assert_eq!(url_decode("a%zz"), Err(DecodeError::InvalidEscape(1)));
    }

    #[test]
    fn replaces_invalid_utf8() {
        assert_eq!(url_decode("%FF").unwrap(), "\u{FFFD}");
        assert_eq!(url_decode("caf%E9").unwrap(), "caf\u{FFFD}");
        assert_eq!(url_decode("%C3+x").unwrap(), "\u{FFFD} x");
    }

    #[test]
    fn falls_back_to_raw_text() {
        assert_eq!(decode_or_raw("50%"), "50%");
        assert_eq!(decode_or_raw("%F+x"), "%F+x");
        assert_eq!(decode_or_raw("a+b"), "a b");
    }
}
