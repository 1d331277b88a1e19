//! 8-bit text codec for the free-text fields.
//!
//! Titles, authors, clues and notes are stored as single-byte text. Decoding
//! uses Windows-1252, which assigns a character to every byte value, so any
//! byte string decodes and re-encodes to itself.

use crate::error::{Result, XwdError};
use encoding_rs::WINDOWS_1252;

/// Decode single-byte text.
pub fn decode(bytes: &[u8]) -> String {
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// Encode text back to single bytes.
///
/// Fails if the text contains a character with no single-byte form.
pub fn encode(text: &str) -> Result<Vec<u8>> {
    let (bytes, _, had_errors) = WINDOWS_1252.encode(text);
    if had_errors {
        return Err(XwdError::encoding(format!(
            "text {:?} has characters outside the 8-bit range",
            text
        )));
    }
    Ok(bytes.into_owned())
}

/// Decode a structural ASCII field, dropping trailing NUL padding.
pub fn decode_ascii(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0)
        .map(|i| i + 1)
        .unwrap_or(0);
    bytes[..end].iter().map(|&b| char::from(b)).collect()
}
