//! The rolling 16-bit checksum used throughout the `.puz` format.
//!
//! Every checksummed region of a crossword file (the CIB block, both grids,
//! the text fields, each extension section) uses the same primitive:
//!
//! ```text
//! for each byte:
//!     acc = (acc >> 1) | ((acc & 1) << 15)    rotate right by one
//!     acc = (acc + byte) & 0xFFFF
//! ```
//!
//! Larger checksums are built by chaining: the result over one region is the
//! seed for the next. Because the update is strictly byte-sequential,
//! `checksum(checksum(seed, a), b) == checksum(seed, a ++ b)`.
//!
//! # Example
//!
//! ```
//! use xwd_core::checksum::{Cksum, checksum};
//!
//! let mut ck = Cksum::new();
//! ck.update(b"ACROSS");
//! ck.update(b"DOWN");
//! assert_eq!(ck.value(), checksum(0, b"ACROSSDOWN"));
//! ```

/// Rolling checksum accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cksum {
    acc: u16,
}

impl Cksum {
    /// Create an accumulator seeded with zero.
    pub fn new() -> Self {
        Self { acc: 0 }
    }

    /// Create an accumulator seeded with a previous result.
    pub fn with_seed(seed: u16) -> Self {
        Self { acc: seed }
    }

    /// Feed more bytes.
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.acc = checksum(self.acc, data);
    }

    /// Feed a single byte.
    #[inline(always)]
    pub fn update_byte(&mut self, byte: u8) {
        self.acc = step(self.acc, byte);
    }

    /// Current value.
    #[inline(always)]
    pub fn value(&self) -> u16 {
        self.acc
    }

    /// Compute the checksum of a slice with a zero seed.
    #[inline]
    pub fn compute(data: &[u8]) -> u16 {
        checksum(0, data)
    }
}

#[inline(always)]
fn step(acc: u16, byte: u8) -> u16 {
    // 0x8000 is added only when the low bit is set, so this is a rotate.
    acc.rotate_right(1).wrapping_add(u16::from(byte))
}

/// Checksum `data` starting from `seed`.
#[inline]
pub fn checksum(seed: u16, data: &[u8]) -> u16 {
    data.iter().fold(seed, |acc, &b| step(acc, b))
}

/// Checksum several regions in order, each seeded by the previous result.
pub fn checksum_chain<'a, I>(seed: u16, regions: I) -> u16
where
    I: IntoIterator<Item = &'a [u8]>,
{
    regions
        .into_iter()
        .fold(seed, |acc, region| checksum(acc, region))
}
