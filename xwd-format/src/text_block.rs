//! The variable-length text block: title, author, copyright, clues, notes.
//!
//! Each string is NUL-terminated single-byte text. The block holds
//! `clue_count + 4` strings in a fixed order.

use xwd_core::buffer::ByteBuffer;
use xwd_core::error::{Result, XwdError};
use xwd_core::text;

/// Where a string sat in the original file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan {
    /// Offset from the start of the puzzle data.
    pub offset: usize,
    /// Length without the terminator.
    pub len: usize,
}

/// Decoded text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBlock {
    /// Puzzle title.
    pub title: String,
    /// Author line.
    pub author: String,
    /// Copyright line.
    pub copyright: String,
    /// Clues in file order (sorted-word order).
    pub clues: Vec<String>,
    /// Notes.
    pub notes: String,
    /// Spans in file order: title, author, copyright, clues..., notes.
    pub spans: Vec<TextSpan>,
}

impl TextBlock {
    /// Read `clue_count + 4` strings starting at the cursor.
    pub fn read(buf: &mut ByteBuffer, clue_count: usize) -> Result<Self> {
        let total = clue_count + 4;
        let mut strings = Vec::with_capacity(total);
        let mut spans = Vec::with_capacity(total);

        for index in 0..total {
            let offset = buf.position();
            let bytes = buf.read_cstr().ok_or_else(|| {
                XwdError::invalid_header(format!(
                    "text block truncated: string {} of {} has no terminator",
                    index + 1,
                    total
                ))
            })?;
            spans.push(TextSpan {
                offset,
                len: bytes.len(),
            });
            strings.push(text::decode(bytes));
        }

        let notes = strings.pop().unwrap_or_default();
        let mut rest = strings.into_iter();
        let title = rest.next().unwrap_or_default();
        let author = rest.next().unwrap_or_default();
        let copyright = rest.next().unwrap_or_default();
        let clues = rest.collect();

        Ok(Self {
            title,
            author,
            copyright,
            clues,
            notes,
            spans,
        })
    }

    /// Append every string with its terminator.
    pub fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        for field in self.fields() {
            out.extend_from_slice(&text::encode(field)?);
            out.push(0);
        }
        Ok(())
    }

    /// All strings in file order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        [self.title.as_str(), self.author.as_str(), self.copyright.as_str()]
            .into_iter()
            .chain(self.clues.iter().map(String::as_str))
            .chain(std::iter::once(self.notes.as_str()))
    }

    /// Encoded size including terminators.
    pub fn encoded_len(&self) -> Result<usize> {
        self.fields()
            .map(|f| text::encode(f).map(|b| b.len() + 1))
            .sum()
    }
}
