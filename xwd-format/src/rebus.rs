//! Rebus tables and the special-character codec.
//!
//! Rebus substitutions and user rebus entries are plain single-byte text,
//! except that a lone symbol is stored as a bracketed dingbat code: `[Y]`
//! stands for the symbol at code `0x59` of the Webdings symbol font. The
//! codec maps those codes to Unicode characters and back.

use std::collections::BTreeMap;
use xwd_core::error::{Result, XwdError};
use xwd_core::text;

/// Dingbat codes with a Unicode equivalent.
const GLYPHS: &[(u8, char)] = &[
    (0x21, '\u{1F577}'), // spider
    (0x22, '\u{1F578}'), // spider web
    (0x33, '\u{25C0}'),  // left-pointing triangle
    (0x34, '\u{25B6}'),  // right-pointing triangle
    (0x35, '\u{25B2}'),  // up-pointing triangle
    (0x36, '\u{25BC}'),  // down-pointing triangle
    (0x3C, '\u{1F3E0}'), // house
    (0x48, '\u{2302}'),  // house outline
    (0x4E, '\u{1F480}'), // skull
    (0x52, '\u{2600}'),  // sun
    (0x59, '\u{2665}'),  // heart
    (0x61, '\u{2714}'),  // check mark
    (0x63, '\u{2713}'),  // light check mark
    (0x67, '\u{25A0}'),  // black square
    (0x6E, '\u{25CF}'),  // black circle
    (0x72, '\u{2716}'),  // heavy multiplication x
    (0x73, '\u{2753}'),  // question mark ornament
    (0x7E, '\u{2605}'),  // black star
    (0x95, '\u{2744}'),  // snowflake
    (0xA3, '\u{2663}'),  // club
    (0xA4, '\u{2666}'),  // diamond
    (0xA8, '\u{2660}'),  // spade
];

/// Unicode character for a dingbat code.
pub fn glyph_to_char(code: u8) -> Option<char> {
    GLYPHS.iter().find(|(c, _)| *c == code).map(|(_, ch)| *ch)
}

/// Dingbat code for a Unicode character.
pub fn char_to_glyph(ch: char) -> Option<u8> {
    GLYPHS.iter().find(|(_, c)| *c == ch).map(|(code, _)| *code)
}

/// True if `ch` has a dingbat code.
pub fn is_glyph(ch: char) -> bool {
    char_to_glyph(ch).is_some()
}

/// Decode a substitution or user rebus entry.
///
/// `[c]` with a known code becomes the matching symbol; anything else is
/// decoded as single-byte text.
pub fn decode_substitution(bytes: &[u8]) -> String {
    if let [b'[', code, b']'] = *bytes {
        if let Some(ch) = glyph_to_char(code) {
            return ch.to_string();
        }
    }
    text::decode(bytes)
}

/// Encode a substitution or user rebus entry.
pub fn encode_substitution(value: &str) -> Result<Vec<u8>> {
    let mut chars = value.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if let Some(code) = char_to_glyph(ch) {
            return Ok(vec![b'[', code, b']']);
        }
    }
    text::encode(value)
}

/// The RTBL substitution table: key → text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebusTable {
    entries: BTreeMap<u8, String>,
}

impl RebusTable {
    /// Parse RTBL data: `" 1:HEART; 2:[Y];"`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut entries = BTreeMap::new();

        for item in data.split(|&b| b == b';') {
            if item.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            let colon = item
                .iter()
                .position(|&b| b == b':')
                .ok_or_else(|| XwdError::invalid_header("RTBL entry without ':'"))?;
            let key_text = text::decode_ascii(&item[..colon]);
            let key: u8 = key_text.trim().parse().map_err(|_| {
                XwdError::invalid_header(format!("RTBL key {:?} is not a number", key_text))
            })?;
            entries.insert(key, decode_substitution(&item[colon + 1..]));
        }

        Ok(Self { entries })
    }

    /// Encode in the conventional layout: two-column key, `:`, text, `;`.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for (key, value) in &self.entries {
            out.extend_from_slice(format!("{:>2}:", key).as_bytes());
            out.extend_from_slice(&encode_substitution(value)?);
            out.push(b';');
        }
        Ok(out)
    }

    /// Substitution for a key.
    pub fn get(&self, key: u8) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    /// Substitution for a GRBS byte (0 = none, N = key N-1).
    pub fn for_grid_byte(&self, byte: u8) -> Option<&str> {
        byte.checked_sub(1).and_then(|key| self.get(key))
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse RUSR data into one optional entry per cell.
pub fn parse_user_rebus(data: &[u8], cells: usize) -> Result<Vec<Option<String>>> {
    let entries: Vec<&[u8]> = data.split(|&b| b == 0).take(cells).collect();
    if entries.len() < cells {
        return Err(XwdError::length_mismatch(
            "RUSR entries",
            cells,
            entries.len(),
        ));
    }
    Ok(entries
        .into_iter()
        .map(|e| (!e.is_empty()).then(|| decode_substitution(e)))
        .collect())
}

/// Encode per-cell user rebus entries as RUSR data.
pub fn encode_user_rebus<'a, I>(entries: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut out = Vec::new();
    for entry in entries {
        if let Some(value) = entry {
            out.extend_from_slice(&encode_substitution(value)?);
        }
        out.push(0);
    }
    Ok(out)
}
