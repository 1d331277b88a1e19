//! Error types for xwd operations.
//!
//! Load failures (bad layout, truncated data, checksum mismatches) and save
//! precondition failures are all reported through [`XwdError`]. Recoverable
//! edit rejections live in the model crate and never reach this type.

use std::fmt;
use std::io;
use thiserror::Error;

/// The main error type for xwd operations.
#[derive(Debug, Error)]
pub enum XwdError {
    /// I/O error from the underlying file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The `ACROSS&DOWN` magic never appeared in the file.
    #[error("Not a crossword file: magic {magic:?} not found in {scanned} bytes")]
    MagicNotFound {
        /// The magic string that was searched for.
        magic: String,
        /// Number of bytes scanned.
        scanned: usize,
    },

    /// Invalid or truncated fixed header, grid, or text block.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// An extension section ends before its declared length.
    #[error("Truncated section {tag}: declared {declared} bytes, found {available}")]
    TruncatedSection {
        /// Four-character section tag.
        tag: String,
        /// Length declared in the section header.
        declared: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// A structure's length disagrees with the grid or clue count.
    #[error("Length mismatch in {what}: expected {expected}, found {found}")]
    LengthMismatch {
        /// What was being measured.
        what: String,
        /// Expected length.
        expected: usize,
        /// Actual length.
        found: usize,
    },

    /// One or more checksums disagree with their recomputation.
    #[error("Checksum mismatch: {}", join_failures(.failures))]
    Checksum {
        /// Every failing check, in validation order.
        failures: Vec<ChecksumFailure>,
    },

    /// A fixed-length section would change size on save.
    #[error("Cannot save: section {tag} was {loaded} bytes at load but regenerates to {regenerated}")]
    SectionLengthChanged {
        /// Four-character section tag.
        tag: String,
        /// Length when the file was loaded.
        loaded: usize,
        /// Length of the regenerated data.
        regenerated: usize,
    },

    /// Text that cannot be represented in the file's 8-bit encoding.
    #[error("Encoding error: {message}")]
    Encoding {
        /// Description of the encoding error.
        message: String,
    },
}

/// Result type alias for xwd operations.
pub type Result<T> = std::result::Result<T, XwdError>;

impl XwdError {
    /// Create a magic-not-found error.
    pub fn magic_not_found(magic: &[u8], scanned: usize) -> Self {
        Self::MagicNotFound {
            magic: String::from_utf8_lossy(magic)
                .trim_end_matches('\0')
                .to_string(),
            scanned,
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create a truncated section error.
    pub fn truncated_section(tag: impl Into<String>, declared: usize, available: usize) -> Self {
        Self::TruncatedSection {
            tag: tag.into(),
            declared,
            available,
        }
    }

    /// Create a length mismatch error.
    pub fn length_mismatch(what: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::LengthMismatch {
            what: what.into(),
            expected,
            found,
        }
    }

    /// Create a checksum error from the collected failures.
    pub fn checksum(failures: Vec<ChecksumFailure>) -> Self {
        Self::Checksum { failures }
    }

    /// Create a save precondition error.
    pub fn section_length_changed(tag: impl Into<String>, loaded: usize, regenerated: usize) -> Self {
        Self::SectionLengthChanged {
            tag: tag.into(),
            loaded,
            regenerated,
        }
    }

    /// Create an encoding error.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// True for errors that mean the bytes are not a usable crossword file.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::MagicNotFound { .. }
                | Self::InvalidHeader { .. }
                | Self::TruncatedSection { .. }
                | Self::LengthMismatch { .. }
                | Self::Encoding { .. }
        )
    }

    /// The failing checks, if this is a checksum error.
    pub fn checksum_failures(&self) -> &[ChecksumFailure] {
        match self {
            Self::Checksum { failures } => failures,
            _ => &[],
        }
    }
}

/// The region a checksum covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumRegion {
    /// Width, height, clue count, bitmask and scramble tag.
    Cib,
    /// The whole-file chained checksum.
    File,
    /// One byte of the masked low array.
    MaskedLow(usize),
    /// One byte of the masked high array.
    MaskedHigh(usize),
    /// An extension section, by tag.
    Section(String),
}

impl fmt::Display for ChecksumRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cib => write!(f, "CIB"),
            Self::File => write!(f, "file"),
            Self::MaskedLow(i) => write!(f, "masked low[{}]", i),
            Self::MaskedHigh(i) => write!(f, "masked high[{}]", i),
            Self::Section(tag) => write!(f, "{} section", tag),
        }
    }
}

/// A single failed checksum comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumFailure {
    /// Which check failed.
    pub region: ChecksumRegion,
    /// Value stored in the file.
    pub stored: u16,
    /// Value recomputed from the content.
    pub computed: u16,
}

impl ChecksumFailure {
    /// Create a failure record.
    pub fn new(region: ChecksumRegion, stored: u16, computed: u16) -> Self {
        Self {
            region,
            stored,
            computed,
        }
    }
}

impl fmt::Display for ChecksumFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bad {} checksum (stored {:#06x}, computed {:#06x})",
            self.region, self.stored, self.computed
        )
    }
}

fn join_failures(failures: &[ChecksumFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
