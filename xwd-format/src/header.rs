//! Fixed `.puz` header parsing and writing.

use crate::layout::{CIB_LEN, FIELDS, Field, FieldValue, HEADER_LEN};
use std::io::SeekFrom;
use xwd_core::buffer::{ByteBuffer, MAGIC};
use xwd_core::error::{Result, XwdError};
use xwd_core::text;

/// The fixed 0x34-byte header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzHeader {
    /// Whole-file chained checksum.
    pub file_checksum: u16,
    /// Magic bytes.
    pub magic: [u8; 12],
    /// Checksum of the CIB block.
    pub cib_checksum: u16,
    /// Masked low checksum bytes.
    pub masked_low: [u8; 4],
    /// Masked high checksum bytes.
    pub masked_high: [u8; 4],
    /// Version string, NUL padded.
    pub version: [u8; 4],
    /// Reserved bytes at 0x1C.
    pub reserved_1c: [u8; 2],
    /// Scrambled-solution checksum.
    pub scrambled_checksum: u16,
    /// Reserved bytes at 0x20.
    pub reserved_20: [u8; 12],
    /// Grid width.
    pub width: u8,
    /// Grid height.
    pub height: u8,
    /// Number of clues.
    pub clue_count: u16,
    /// Puzzle type bitmask.
    pub bitmask: u16,
    /// Scramble tag (0 = not scrambled).
    pub scramble_tag: u16,
}

impl Default for PuzHeader {
    fn default() -> Self {
        Self {
            file_checksum: 0,
            magic: *MAGIC,
            cib_checksum: 0,
            masked_low: [0; 4],
            masked_high: [0; 4],
            version: *b"1.3\0",
            reserved_1c: [0; 2],
            scrambled_checksum: 0,
            reserved_20: [0; 12],
            width: 0,
            height: 0,
            clue_count: 0,
            bitmask: 1,
            scramble_tag: 0,
        }
    }
}

fn fixed<const N: usize>(value: &FieldValue) -> [u8; N] {
    let mut out = [0u8; N];
    match value {
        FieldValue::Bytes(b) => {
            let n = b.len().min(N);
            out[..n].copy_from_slice(&b[..n]);
        }
        FieldValue::Int(v) => {
            let le = v.to_le_bytes();
            let n = N.min(2);
            out[..n].copy_from_slice(&le[..n]);
        }
    }
    out
}

fn int(value: &FieldValue) -> u16 {
    match value {
        FieldValue::Int(v) => *v,
        FieldValue::Bytes(b) => match b.as_slice() {
            [lo] => u16::from(*lo),
            [lo, hi, ..] => u16::from_le_bytes([*lo, *hi]),
            [] => 0,
        },
    }
}

impl PuzHeader {
    /// Read the header from the start of the puzzle data.
    pub fn read(buf: &mut ByteBuffer) -> Result<Self> {
        let mut header = Self::default();

        for spec in FIELDS.iter() {
            buf.seek(SeekFrom::Start(spec.offset as u64))?;
            let bytes = buf.read(spec.len);
            if bytes.len() < spec.len {
                return Err(XwdError::invalid_header(format!(
                    "file ends inside the fixed header ({:?} at {:#04x})",
                    spec.field, spec.offset
                )));
            }
            let value = spec.kind.decode(bytes);
            header.set(spec.field, &value);
        }

        if header.magic != *MAGIC {
            return Err(XwdError::invalid_header("magic mismatch after re-basing"));
        }

        Ok(header)
    }

    /// Append the header bytes to `out`.
    pub fn write(&self, out: &mut Vec<u8>) {
        for spec in FIELDS.iter() {
            spec.kind.encode(&self.get(spec.field), spec.len, out);
        }
    }

    /// Encode the header on its own.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN);
        self.write(&mut out);
        out
    }

    /// Store a decoded value into its field.
    pub fn set(&mut self, field: Field, value: &FieldValue) {
        match field {
            Field::FileChecksum => self.file_checksum = int(value),
            Field::Magic => self.magic = fixed(value),
            Field::CibChecksum => self.cib_checksum = int(value),
            Field::MaskedLow => self.masked_low = fixed(value),
            Field::MaskedHigh => self.masked_high = fixed(value),
            Field::Version => self.version = fixed(value),
            Field::Reserved1C => self.reserved_1c = fixed(value),
            Field::ScrambledChecksum => self.scrambled_checksum = int(value),
            Field::Reserved20 => self.reserved_20 = fixed(value),
            Field::Width => self.width = int(value) as u8,
            Field::Height => self.height = int(value) as u8,
            Field::ClueCount => self.clue_count = int(value),
            Field::Bitmask => self.bitmask = int(value),
            Field::ScrambleTag => self.scramble_tag = int(value),
        }
    }

    /// Current value of a field.
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::FileChecksum => FieldValue::Int(self.file_checksum),
            Field::Magic => FieldValue::Bytes(self.magic.to_vec()),
            Field::CibChecksum => FieldValue::Int(self.cib_checksum),
            Field::MaskedLow => FieldValue::Bytes(self.masked_low.to_vec()),
            Field::MaskedHigh => FieldValue::Bytes(self.masked_high.to_vec()),
            Field::Version => FieldValue::Bytes(self.version.to_vec()),
            Field::Reserved1C => FieldValue::Bytes(self.reserved_1c.to_vec()),
            Field::ScrambledChecksum => FieldValue::Int(self.scrambled_checksum),
            Field::Reserved20 => FieldValue::Bytes(self.reserved_20.to_vec()),
            Field::Width => FieldValue::Int(u16::from(self.width)),
            Field::Height => FieldValue::Int(u16::from(self.height)),
            Field::ClueCount => FieldValue::Int(self.clue_count),
            Field::Bitmask => FieldValue::Int(self.bitmask),
            Field::ScrambleTag => FieldValue::Int(self.scramble_tag),
        }
    }

    /// The eight CIB bytes as they appear at 0x2C.
    pub fn cib_bytes(&self) -> [u8; CIB_LEN] {
        let n = self.clue_count.to_le_bytes();
        let m = self.bitmask.to_le_bytes();
        let s = self.scramble_tag.to_le_bytes();
        [self.width, self.height, n[0], n[1], m[0], m[1], s[0], s[1]]
    }

    /// Number of cells in each grid.
    pub fn cell_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Version string without padding, e.g. `"1.3"`.
    pub fn version_str(&self) -> String {
        text::decode_ascii(&self.version)
    }

    /// Notes take part in the text checksum from version 1.3 on.
    pub fn notes_checksummed(&self) -> bool {
        self.version_str().as_str() >= "1.3"
    }

    /// True if the solution grid is scrambled.
    pub fn is_scrambled(&self) -> bool {
        self.scramble_tag != 0
    }
}
