//! Derived checksums of a `.puz` file.
//!
//! Four region checksums feed everything else:
//!
//! | region   | covers                                                    |
//! |----------|-----------------------------------------------------------|
//! | CIB      | width, height, clue count, bitmask, scramble tag (8 bytes) |
//! | solution | the solution grid                                         |
//! | state    | the state grid                                            |
//! | partial  | title, author, copyright, clues, notes (see below)        |
//!
//! The file checksum chains all four (CIB → solution → state → partial). The
//! masked arrays XOR the low and high byte of each unchained region checksum
//! with the letters of "ICHEATED".

use crate::header::PuzHeader;
use crate::layout::{HIGH_MASKS, LOW_MASKS};
use crate::section::Section;
use crate::text_block::TextBlock;
use xwd_core::checksum::{Cksum, checksum};
use xwd_core::error::{ChecksumFailure, ChecksumRegion, Result};
use xwd_core::text;

/// Every checksum derivable from the file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checksums {
    /// CIB block checksum.
    pub cib: u16,
    /// Solution grid checksum.
    pub solution: u16,
    /// State grid checksum.
    pub state: u16,
    /// Text checksum.
    pub partial: u16,
    /// Chained whole-file checksum.
    pub file: u16,
    /// Masked low bytes.
    pub masked_low: [u8; 4],
    /// Masked high bytes.
    pub masked_high: [u8; 4],
}

impl Checksums {
    /// Compute from the decoded contents.
    pub fn compute(
        header: &PuzHeader,
        solution: &[u8],
        state: &[u8],
        text: &TextBlock,
    ) -> Result<Self> {
        let notes = header.notes_checksummed();

        let cib = Cksum::compute(&header.cib_bytes());
        let solution_ck = Cksum::compute(solution);
        let state_ck = Cksum::compute(state);
        let partial = partial_checksum(0, text, notes)?;

        let mut file = checksum(cib, solution);
        file = checksum(file, state);
        file = partial_checksum(file, text, notes)?;

        let (masked_low, masked_high) = mask([cib, solution_ck, state_ck, partial]);

        Ok(Self {
            cib,
            solution: solution_ck,
            state: state_ck,
            partial,
            file,
            masked_low,
            masked_high,
        })
    }

    /// Compare against stored values, collecting every mismatch.
    pub fn compare(&self, header: &PuzHeader, sections: &[Section]) -> Vec<ChecksumFailure> {
        let mut failures = Vec::new();

        if header.cib_checksum != self.cib {
            failures.push(ChecksumFailure::new(
                ChecksumRegion::Cib,
                header.cib_checksum,
                self.cib,
            ));
        }
        if header.file_checksum != self.file {
            failures.push(ChecksumFailure::new(
                ChecksumRegion::File,
                header.file_checksum,
                self.file,
            ));
        }
        for i in 0..4 {
            if header.masked_low[i] != self.masked_low[i] {
                failures.push(ChecksumFailure::new(
                    ChecksumRegion::MaskedLow(i),
                    u16::from(header.masked_low[i]),
                    u16::from(self.masked_low[i]),
                ));
            }
            if header.masked_high[i] != self.masked_high[i] {
                failures.push(ChecksumFailure::new(
                    ChecksumRegion::MaskedHigh(i),
                    u16::from(header.masked_high[i]),
                    u16::from(self.masked_high[i]),
                ));
            }
        }
        for section in sections {
            let computed = section.computed_checksum();
            if computed != section.checksum {
                failures.push(ChecksumFailure::new(
                    ChecksumRegion::Section(section.tag_str()),
                    section.checksum,
                    computed,
                ));
            }
        }

        failures
    }

    /// Write the computed values into a header.
    pub fn store(&self, header: &mut PuzHeader) {
        header.cib_checksum = self.cib;
        header.file_checksum = self.file;
        header.masked_low = self.masked_low;
        header.masked_high = self.masked_high;
    }
}

/// Checksum of the text fields, seeded with `seed`.
///
/// Title, author and copyright include their terminator and are skipped when
/// empty; clues never include one; notes count only from version 1.3 on.
pub fn partial_checksum(seed: u16, text: &TextBlock, include_notes: bool) -> Result<u16> {
    let mut ck = Cksum::with_seed(seed);

    for field in [&text.title, &text.author, &text.copyright] {
        if !field.is_empty() {
            ck.update(&text::encode(field)?);
            ck.update_byte(0);
        }
    }
    for clue in &text.clues {
        ck.update(&text::encode(clue)?);
    }
    if include_notes && !text.notes.is_empty() {
        ck.update(&text::encode(&text.notes)?);
        ck.update_byte(0);
    }

    Ok(ck.value())
}

/// Masked low/high arrays for `[cib, solution, state, partial]`.
pub fn mask(regions: [u16; 4]) -> ([u8; 4], [u8; 4]) {
    let mut low = [0u8; 4];
    let mut high = [0u8; 4];
    for (i, ck) in regions.iter().enumerate() {
        low[i] = LOW_MASKS[i] ^ (ck & 0xFF) as u8;
        high[i] = HIGH_MASKS[i] ^ (ck >> 8) as u8;
    }
    (low, high)
}
