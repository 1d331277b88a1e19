//! Cursor-based byte buffer over a whole crossword file.
//!
//! The file is read into memory in one blocking call. Reads never fail: a
//! read that runs past the end returns whatever bytes remain, and callers
//! decide whether a short read is fatal.

use crate::error::{Result, XwdError};
use std::io::SeekFrom;
use std::path::Path;
use tracing::{debug, warn};

/// File magic, including its NUL terminator.
pub const MAGIC: &[u8; 12] = b"ACROSS&DOWN\0";

/// Offset of the magic relative to the start of the puzzle data.
pub const MAGIC_OFFSET: usize = 0x02;

/// In-memory file contents with a read cursor.
#[derive(Debug, Clone, Default)]
pub struct ByteBuffer {
    content: Vec<u8>,
    header_garbage: Vec<u8>,
    pos: usize,
}

impl ByteBuffer {
    /// Load an entire file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read(path.as_ref())?;
        debug!(path = %path.as_ref().display(), len = content.len(), "read file");
        Ok(Self::from_bytes(content))
    }

    /// Wrap bytes already in memory.
    pub fn from_bytes(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
            header_garbage: Vec::new(),
            pos: 0,
        }
    }

    /// Locate the magic and re-base the buffer on the puzzle data.
    ///
    /// Anything before the puzzle data is kept aside so it can be written
    /// back unchanged. The cursor is reset to the new start.
    pub fn prune_garbage(&mut self) -> Result<usize> {
        let start = self
            .content
            .get(MAGIC_OFFSET..)
            .and_then(|tail| tail.windows(MAGIC.len()).position(|w| w == MAGIC))
            .ok_or_else(|| XwdError::magic_not_found(MAGIC, self.content.len()))?;

        if start > 0 {
            warn!(bytes = start, "skipping data before puzzle header");
            let rest = self.content.split_off(start);
            self.header_garbage = std::mem::replace(&mut self.content, rest);
        }
        self.pos = 0;
        Ok(start)
    }

    /// Bytes that preceded the puzzle data.
    pub fn header_garbage(&self) -> &[u8] {
        &self.header_garbage
    }

    /// Take ownership of the leading bytes.
    pub fn take_header_garbage(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.header_garbage)
    }

    /// Move the cursor. `SeekFrom::End` offsets count from the end.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<usize> {
        let target = match pos {
            SeekFrom::Start(off) => i128::from(off),
            SeekFrom::Current(off) => self.pos as i128 + i128::from(off),
            SeekFrom::End(off) => self.content.len() as i128 + i128::from(off),
        };
        if target < 0 {
            return Err(XwdError::invalid_header(format!(
                "seek to negative offset {}",
                target
            )));
        }
        self.pos = usize::try_from(target).unwrap_or(usize::MAX);
        Ok(self.pos)
    }

    /// Read up to `n` bytes; fewer are returned at end of buffer.
    pub fn read(&mut self, n: usize) -> &[u8] {
        let start = self.pos.min(self.content.len());
        let end = start.saturating_add(n).min(self.content.len());
        self.pos = end;
        &self.content[start..end]
    }

    /// Read everything after the cursor.
    pub fn read_to_end(&mut self) -> &[u8] {
        self.read(usize::MAX)
    }

    /// Read one byte, if any remain.
    pub fn read_u8(&mut self) -> Option<u8> {
        self.read(1).first().copied()
    }

    /// Read a little-endian u16, if two bytes remain.
    pub fn read_u16_le(&mut self) -> Option<u16> {
        match *self.read(2) {
            [lo, hi] => Some(u16::from_le_bytes([lo, hi])),
            _ => None,
        }
    }

    /// Read bytes up to a NUL terminator, consuming the terminator.
    ///
    /// Returns `None` (leaving the cursor at the end) if no terminator
    /// appears before the end of the buffer.
    pub fn read_cstr(&mut self) -> Option<&[u8]> {
        let start = self.pos.min(self.content.len());
        let len = self.content[start..].iter().position(|&b| b == 0);
        match len {
            Some(len) => {
                self.pos = start + len + 1;
                Some(&self.content[start..start + len])
            }
            None => {
                self.pos = self.content.len();
                None
            }
        }
    }

    /// Cursor position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the puzzle data (excluding header garbage).
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// True if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.content.len().saturating_sub(self.pos)
    }

    /// The puzzle data.
    pub fn as_slice(&self) -> &[u8] {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_magic(prefix: &[u8]) -> Vec<u8> {
        let mut v = prefix.to_vec();
        v.extend_from_slice(&[0xAB, 0xCD]);
        v.extend_from_slice(MAGIC);
        v.extend_from_slice(b"rest");
        v
    }

    #[test]
    fn test_prune_no_garbage() {
        let mut buf = ByteBuffer::from_bytes(with_magic(b""));
        assert_eq!(buf.prune_garbage().unwrap(), 0);
        assert!(buf.header_garbage().is_empty());
        assert_eq!(buf.read(2), &[0xAB, 0xCD]);
    }

    #[test]
    fn test_prune_garbage_prefix() {
        let mut buf = ByteBuffer::from_bytes(with_magic(b"junk!"));
        assert_eq!(buf.prune_garbage().unwrap(), 5);
        assert_eq!(buf.header_garbage(), b"junk!");
        assert_eq!(buf.len(), 2 + MAGIC.len() + 4);
        buf.seek(SeekFrom::Start(MAGIC_OFFSET as u64)).unwrap();
        assert_eq!(buf.read(MAGIC.len()), MAGIC);
    }

    #[test]
    fn test_prune_missing_magic() {
        let mut buf = ByteBuffer::from_bytes(b"ACROSS&DOWN without a nul".to_vec());
        let err = buf.prune_garbage().unwrap_err();
        assert!(matches!(err, XwdError::MagicNotFound { .. }));
    }

    #[test]
    fn test_read_past_end_returns_remainder() {
        let mut buf = ByteBuffer::from_bytes(vec![1, 2, 3]);
        buf.seek(SeekFrom::Start(1)).unwrap();
        assert_eq!(buf.read(10), &[2, 3]);
        assert_eq!(buf.read(10), &[] as &[u8]);
        assert_eq!(buf.remaining(), 0);
        assert_eq!(buf.read_u16_le(), None);
    }

    #[test]
    fn test_seek_modes() {
        let mut buf = ByteBuffer::from_bytes(vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(buf.seek(SeekFrom::Start(2)).unwrap(), 2);
        assert_eq!(buf.seek(SeekFrom::Current(2)).unwrap(), 4);
        assert_eq!(buf.seek(SeekFrom::End(-1)).unwrap(), 5);
        assert_eq!(buf.read_u8(), Some(5));
        assert!(buf.seek(SeekFrom::Current(-10)).is_err());
    }

    #[test]
    fn test_read_cstr() {
        let mut buf = ByteBuffer::from_bytes(b"Title\0\0tail".to_vec());
        assert_eq!(buf.read_cstr(), Some(&b"Title"[..]));
        assert_eq!(buf.read_cstr(), Some(&b""[..]));
        assert_eq!(buf.read_cstr(), None);
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn test_read_u16_le() {
        let mut buf = ByteBuffer::from_bytes(vec![0x34, 0x12]);
        assert_eq!(buf.read_u16_le(), Some(0x1234));
    }
}
