//! Extension sections following the text block.
//!
//! Each section is laid out as:
//!
//! ```text
//! tag(4) length(2, LE) checksum(2, LE) data(length) terminator(1)
//! ```
//!
//! Sections are read until the buffer is exhausted. Unknown tags are kept
//! verbatim so they survive a save.

use std::fmt;
use tracing::{debug, warn};
use xwd_core::buffer::ByteBuffer;
use xwd_core::checksum::Cksum;
use xwd_core::error::{Result, XwdError};

/// Known section kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Per-cell rebus solution keys.
    Grbs,
    /// Rebus substitution table.
    Rtbl,
    /// Per-cell user rebus entries.
    Rusr,
    /// Elapsed timer.
    Ltim,
    /// Per-cell flags (shaded, given, marked bad).
    Gext,
    /// Anything else; preserved but never interpreted.
    Unknown,
}

impl SectionKind {
    /// Classify a tag.
    pub fn from_tag(tag: &[u8; 4]) -> Self {
        match tag {
            b"GRBS" => Self::Grbs,
            b"RTBL" => Self::Rtbl,
            b"RUSR" => Self::Rusr,
            b"LTIM" => Self::Ltim,
            b"GEXT" => Self::Gext,
            _ => Self::Unknown,
        }
    }

    /// The tag for a known kind.
    pub fn tag(self) -> Option<[u8; 4]> {
        match self {
            Self::Grbs => Some(*b"GRBS"),
            Self::Rtbl => Some(*b"RTBL"),
            Self::Rusr => Some(*b"RUSR"),
            Self::Ltim => Some(*b"LTIM"),
            Self::Gext => Some(*b"GEXT"),
            Self::Unknown => None,
        }
    }

    /// Sections holding exactly one byte per cell.
    pub fn is_per_cell(self) -> bool {
        matches!(self, Self::Grbs | Self::Gext)
    }
}

/// Order in which known sections are written on save.
pub const SAVE_ORDER: [SectionKind; 5] = [
    SectionKind::Grbs,
    SectionKind::Rtbl,
    SectionKind::Ltim,
    SectionKind::Gext,
    SectionKind::Rusr,
];

/// One extension section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Four-byte tag.
    pub tag: [u8; 4],
    /// Checksum as stored in (or written to) the file.
    pub checksum: u16,
    /// Raw section data.
    pub data: Vec<u8>,
}

impl Section {
    /// Build a section with a freshly computed checksum.
    pub fn new(tag: [u8; 4], data: Vec<u8>) -> Self {
        let checksum = Cksum::compute(&data);
        Self {
            tag,
            checksum,
            data,
        }
    }

    /// Build a known section.
    pub fn of_kind(kind: SectionKind, data: Vec<u8>) -> Option<Self> {
        kind.tag().map(|tag| Self::new(tag, data))
    }

    /// Classify this section.
    pub fn kind(&self) -> SectionKind {
        SectionKind::from_tag(&self.tag)
    }

    /// Tag as text.
    pub fn tag_str(&self) -> String {
        String::from_utf8_lossy(&self.tag).into_owned()
    }

    /// Data length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the section carries no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checksum recomputed from the data.
    pub fn computed_checksum(&self) -> u16 {
        Cksum::compute(&self.data)
    }

    /// Append the encoded section.
    pub fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        let len = u16::try_from(self.data.len()).map_err(|_| {
            XwdError::length_mismatch(
                format!("{} section", self.tag_str()),
                usize::from(u16::MAX),
                self.data.len(),
            )
        })?;
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&self.checksum.to_le_bytes());
        out.extend_from_slice(&self.data);
        out.push(0);
        Ok(())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} bytes, checksum {:#06x})",
            self.tag_str(),
            self.data.len(),
            self.checksum
        )
    }
}

/// Read sections from the cursor to the end of the buffer.
pub fn read_sections(buf: &mut ByteBuffer) -> Result<Vec<Section>> {
    let mut sections = Vec::new();

    while buf.remaining() > 0 {
        let tag_bytes = buf.read(4);
        let tag: [u8; 4] = match tag_bytes.try_into() {
            Ok(tag) => tag,
            Err(_) => {
                let partial = String::from_utf8_lossy(tag_bytes).into_owned();
                return Err(XwdError::truncated_section(partial, 4, tag_bytes.len()));
            }
        };
        let tag_name = String::from_utf8_lossy(&tag).into_owned();

        let (Some(declared), Some(checksum)) = (buf.read_u16_le(), buf.read_u16_le()) else {
            return Err(XwdError::truncated_section(tag_name, 4, 0));
        };
        let declared = usize::from(declared);

        let data = buf.read(declared).to_vec();
        if data.len() != declared {
            return Err(XwdError::truncated_section(tag_name, declared, data.len()));
        }
        if buf.read_u8().is_none() {
            warn!(tag = %tag_name, "last section has no terminator");
        }

        let section = Section {
            tag,
            checksum,
            data,
        };
        if section.kind() == SectionKind::Unknown {
            warn!(tag = %tag_name, len = declared, "preserving unrecognized section");
        } else {
            debug!(tag = %tag_name, len = declared, "read section");
        }
        sections.push(section);
    }

    Ok(sections)
}
