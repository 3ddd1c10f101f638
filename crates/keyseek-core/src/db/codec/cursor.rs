//! Cursor text layer: payload bytes <-> lowercase hex.
//!
//! Hex keeps tokens URL, header and path safe without escaping. Nothing here
//! knows what the bytes mean.

use thiserror::Error as ThisError;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

///
/// CursorDecodeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CursorDecodeError {
    #[error("cursor is empty")]
    Empty,

    #[error("cursor is {len} characters long, limit is {max}")]
    TooLong { len: usize, max: usize },

    #[error("cursor has odd length {len}")]
    OddLength { len: usize },

    #[error("cursor has non-hex character {found:?} at offset {offset}")]
    InvalidCharacter { offset: usize, found: char },
}

/// Render bytes as a lowercase hex token.
#[must_use]
pub(crate) fn encode_cursor(bytes: &[u8]) -> String {
    bytes
        .iter()
        .flat_map(|byte| {
            [
                char::from(HEX_DIGITS[usize::from(byte >> 4)]),
                char::from(HEX_DIGITS[usize::from(byte & 0x0f)]),
            ]
        })
        .collect()
}

/// Parse a hex token (either case, surrounding whitespace ignored) back into
/// bytes. `max_len` bounds the trimmed token in characters.
pub(crate) fn decode_cursor(token: &str, max_len: usize) -> Result<Vec<u8>, CursorDecodeError> {
    let token = token.trim();
    let len = token.len();

    if len == 0 {
        return Err(CursorDecodeError::Empty);
    }
    if len > max_len {
        return Err(CursorDecodeError::TooLong { len, max: max_len });
    }
    if !len.is_multiple_of(2) {
        return Err(CursorDecodeError::OddLength { len });
    }

    // Reject non-ASCII up front so byte offsets below are char offsets.
    if let Some((offset, found)) = token.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(CursorDecodeError::InvalidCharacter { offset, found });
    }

    Ok(token
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| (nibble(pair[0]) << 4) | nibble(pair[1]))
        .collect())
}

// Caller guarantees `digit` is an ASCII hex digit.
const fn nibble(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}
