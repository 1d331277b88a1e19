//! Fixed layout of the `.puz` header.
//!
//! Every fixed field is described by one row of [`FIELDS`]; the header codec
//! walks this table instead of handling fields one by one.

/// Length of the fixed header; the solution grid starts here.
pub const HEADER_LEN: usize = 0x34;

/// Offset of the CIB block (width, height, clue count, bitmask, scramble tag).
pub const CIB_OFFSET: usize = 0x2C;

/// Length of the CIB block.
pub const CIB_LEN: usize = 8;

/// XOR masks for the masked low checksum bytes ("ICHE").
pub const LOW_MASKS: [u8; 4] = *b"ICHE";

/// XOR masks for the masked high checksum bytes ("ATED").
pub const HIGH_MASKS: [u8; 4] = *b"ATED";

/// Grid character for a black square.
pub const BLOCK: u8 = b'.';

/// State grid character for an empty square.
pub const EMPTY: u8 = b'-';

/// Fixed header fields in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Whole-file chained checksum.
    FileChecksum,
    /// `ACROSS&DOWN\0`.
    Magic,
    /// Checksum of the CIB block.
    CibChecksum,
    /// Masked low checksum bytes.
    MaskedLow,
    /// Masked high checksum bytes.
    MaskedHigh,
    /// Format version, e.g. `1.3\0`.
    Version,
    /// Reserved, carried through unchanged.
    Reserved1C,
    /// Checksum of the unscrambled solution (scrambled puzzles only).
    ScrambledChecksum,
    /// Reserved, carried through unchanged.
    Reserved20,
    /// Grid width.
    Width,
    /// Grid height.
    Height,
    /// Number of clues.
    ClueCount,
    /// Puzzle type bitmask.
    Bitmask,
    /// Non-zero when the solution is scrambled.
    ScrambleTag,
}

/// How a field's bytes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeKind {
    /// Single unsigned byte.
    U8,
    /// Little-endian unsigned 16-bit integer.
    U16Le,
    /// Raw bytes kept as-is.
    Bytes,
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Integer fields (`U8`, `U16Le`).
    Int(u16),
    /// Byte-string fields.
    Bytes(Vec<u8>),
}

impl DecodeKind {
    /// Decode exactly `bytes` (already sliced to the field length).
    pub fn decode(self, bytes: &[u8]) -> FieldValue {
        match self {
            Self::U8 => FieldValue::Int(u16::from(bytes[0])),
            Self::U16Le => FieldValue::Int(u16::from_le_bytes([bytes[0], bytes[1]])),
            Self::Bytes => FieldValue::Bytes(bytes.to_vec()),
        }
    }

    /// Encode a value to exactly `len` bytes.
    pub fn encode(self, value: &FieldValue, len: usize, out: &mut Vec<u8>) {
        match (self, value) {
            (Self::U8, FieldValue::Int(v)) => out.push(*v as u8),
            (Self::U16Le, FieldValue::Int(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (_, FieldValue::Bytes(b)) => {
                let mut bytes = b.clone();
                bytes.resize(len, 0);
                out.extend_from_slice(&bytes);
            }
            (Self::Bytes, FieldValue::Int(v)) => {
                let mut bytes = v.to_le_bytes().to_vec();
                bytes.resize(len, 0);
                out.extend_from_slice(&bytes);
            }
        }
    }
}

/// One row of the field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Which field.
    pub field: Field,
    /// Offset from the start of the puzzle data.
    pub offset: usize,
    /// Length in bytes.
    pub len: usize,
    /// Interpretation.
    pub kind: DecodeKind,
}

const fn spec(field: Field, offset: usize, len: usize, kind: DecodeKind) -> FieldSpec {
    FieldSpec {
        field,
        offset,
        len,
        kind,
    }
}

/// The fixed header, in file order. Fields are contiguous and end at [`HEADER_LEN`].
pub const FIELDS: [FieldSpec; 14] = [
    spec(Field::FileChecksum, 0x00, 2, DecodeKind::U16Le),
    spec(Field::Magic, 0x02, 12, DecodeKind::Bytes),
    spec(Field::CibChecksum, 0x0E, 2, DecodeKind::U16Le),
    spec(Field::MaskedLow, 0x10, 4, DecodeKind::Bytes),
    spec(Field::MaskedHigh, 0x14, 4, DecodeKind::Bytes),
    spec(Field::Version, 0x18, 4, DecodeKind::Bytes),
    spec(Field::Reserved1C, 0x1C, 2, DecodeKind::Bytes),
    spec(Field::ScrambledChecksum, 0x1E, 2, DecodeKind::U16Le),
    spec(Field::Reserved20, 0x20, 12, DecodeKind::Bytes),
    spec(Field::Width, 0x2C, 1, DecodeKind::U8),
    spec(Field::Height, 0x2D, 1, DecodeKind::U8),
    spec(Field::ClueCount, 0x2E, 2, DecodeKind::U16Le),
    spec(Field::Bitmask, 0x30, 2, DecodeKind::U16Le),
    spec(Field::ScrambleTag, 0x32, 2, DecodeKind::U16Le),
];

/// Look up a field's table row.
pub fn field_spec(field: Field) -> &'static FieldSpec {
    FIELDS
        .iter()
        .find(|s| s.field == field)
        .unwrap_or(&FIELDS[0])
}
