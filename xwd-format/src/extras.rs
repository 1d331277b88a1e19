//! GEXT cell flags and the LTIM timer record.

use xwd_core::error::{Result, XwdError};
use xwd_core::text;

/// GEXT flag bits.
pub mod flags {
    /// Cell is drawn shaded (or circled).
    pub const SHADED: u8 = 0x80;
    /// Cell was revealed or checked correct; it can no longer change.
    pub const GIVEN: u8 = 0x40;
    /// Cell is currently marked incorrect.
    pub const MARKED_BAD: u8 = 0x20;
    /// Cell was marked incorrect at some point.
    pub const PREVIOUSLY_BAD: u8 = 0x10;
    /// Bits the model interprets; the rest are carried through.
    pub const KNOWN: u8 = SHADED | GIVEN | MARKED_BAD | PREVIOUSLY_BAD;
}

/// Parse LTIM data (`"elapsed,running"`), returning elapsed seconds.
///
/// The running flag is read but not trusted; puzzles always open paused.
pub fn parse_timer(data: &[u8]) -> Result<u32> {
    let raw = text::decode_ascii(data);
    let elapsed = raw.split(',').next().unwrap_or_default().trim();
    elapsed
        .parse()
        .map_err(|_| XwdError::invalid_header(format!("LTIM record {:?} is malformed", raw)))
}

/// Encode LTIM data for a paused timer.
pub fn encode_timer(elapsed: u32) -> Vec<u8> {
    format!("{},1", elapsed).into_bytes()
}
