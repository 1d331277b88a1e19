//! # xwd Core
//!
//! Core components for the xwd crossword file library.
//!
//! This crate provides the building blocks the format and model crates share:
//!
//! - [`buffer`]: Cursor-based reader over a whole file, with magic detection
//! - [`checksum`]: The rolling 16-bit checksum and chaining helpers
//! - [`text`]: 8-bit text codec for free-text fields
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Front end                                           │
//! │     xwd CLI, host applications                          │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Model                                               │
//! │     Cells, words, numbering, neighbors, edits, save     │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Format                                              │
//! │     Header field table, text block, extension sections │
//! ├─────────────────────────────────────────────────────────┤
//! │ L0: Core (this crate)                                   │
//! │     ByteBuffer, Cksum, text codec, errors               │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use xwd_core::buffer::ByteBuffer;
//! use xwd_core::checksum::checksum;
//!
//! let mut buf = ByteBuffer::from_bytes(b"CAT\0DOG\0".to_vec());
//! assert_eq!(buf.read_cstr(), Some(&b"CAT"[..]));
//!
//! let seed = checksum(0, b"CAT");
//! assert_eq!(checksum(seed, b"DOG"), checksum(0, b"CATDOG"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod buffer;
pub mod checksum;
pub mod error;
pub mod text;

// Re-exports for convenience
pub use buffer::{ByteBuffer, MAGIC, MAGIC_OFFSET};
pub use checksum::{Cksum, checksum, checksum_chain};
pub use error::{ChecksumFailure, ChecksumRegion, Result, XwdError};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::buffer::ByteBuffer;
    pub use crate::checksum::{Cksum, checksum};
    pub use crate::error::{ChecksumFailure, ChecksumRegion, Result, XwdError};
}
