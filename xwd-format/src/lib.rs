//! # xwd Format
//!
//! Reader and writer for the `.puz` crossword interchange format.
//!
//! - [`layout`]: Fixed header field table
//! - [`header`]: Header codec driven by the field table
//! - [`text_block`]: Title, author, copyright, clues and notes
//! - [`section`]: Extension sections (GRBS, RTBL, RUSR, LTIM, GEXT, others)
//! - [`rebus`]: Rebus tables and the dingbat glyph codec
//! - [`extras`]: GEXT flag bits and the LTIM timer record
//! - [`checksums`]: Derived checksums and validation
//! - [`file`]: The [`PuzFile`] aggregate
//!
//! ## Example
//!
//! ```rust,no_run
//! use xwd_format::PuzFile;
//!
//! let file = PuzFile::open("daily.puz").unwrap();
//! file.validate().unwrap();
//! println!("{} ({}x{})", file.text.title, file.width(), file.height());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod checksums;
pub mod extras;
pub mod file;
pub mod header;
pub mod layout;
pub mod rebus;
pub mod section;
pub mod text_block;

// Re-exports
pub use checksums::Checksums;
pub use extras::flags;
pub use file::PuzFile;
pub use header::PuzHeader;
pub use layout::{BLOCK, EMPTY, Field, FieldValue};
pub use rebus::RebusTable;
pub use section::{Section, SectionKind};
pub use text_block::{TextBlock, TextSpan};
