//! The decoded `.puz` file.
//!
//! ```text
//! [garbage] header(0x34) solution(w*h) state(w*h) text-block sections...
//! ```
//!
//! [`PuzFile`] keeps every byte it needs to write the file back: the leading
//! garbage, raw header fields, both grids, the text block and all sections
//! in file order. Known sections are additionally decoded into typed fields.

use crate::checksums::Checksums;
use crate::extras;
use crate::header::PuzHeader;
use crate::layout::HEADER_LEN;
use crate::rebus::{self, RebusTable};
use crate::section::{SAVE_ORDER, Section, SectionKind, read_sections};
use crate::text_block::TextBlock;
use std::io::SeekFrom;
use std::path::Path;
use tracing::{debug, info, warn};
use xwd_core::buffer::ByteBuffer;
use xwd_core::error::{Result, XwdError};

/// A parsed puzzle file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzFile {
    /// Bytes found before the puzzle data, written back verbatim.
    pub header_garbage: Vec<u8>,
    /// Fixed header.
    pub header: PuzHeader,
    /// Solution grid, row-major, `.` for blocks.
    pub solution: Vec<u8>,
    /// State grid, row-major, `-` for empty cells.
    pub state: Vec<u8>,
    /// Title, author, copyright, clues and notes.
    pub text: TextBlock,
    /// Every extension section in file order.
    pub sections: Vec<Section>,
    /// Decoded RTBL.
    pub rebus_table: Option<RebusTable>,
    /// Decoded RUSR, one entry per cell.
    pub user_rebus: Option<Vec<Option<String>>>,
    /// Elapsed seconds from LTIM.
    pub elapsed: Option<u32>,
}

impl PuzFile {
    /// Read and parse a file without checking checksums.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::parse(ByteBuffer::open(path)?)
    }

    /// Parse bytes already in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        Self::parse(ByteBuffer::from_bytes(bytes))
    }

    /// Parse a buffer positioned anywhere; the magic is located first.
    pub fn parse(mut buf: ByteBuffer) -> Result<Self> {
        buf.prune_garbage()?;
        let header_garbage = buf.take_header_garbage();
        let header = PuzHeader::read(&mut buf)?;
        let cells = header.cell_count();
        debug!(
            width = header.width,
            height = header.height,
            clues = header.clue_count,
            version = %header.version_str(),
            "parsed header"
        );

        buf.seek(SeekFrom::Start(HEADER_LEN as u64))?;
        let solution = buf.read(cells).to_vec();
        if solution.len() != cells {
            return Err(XwdError::length_mismatch("solution grid", cells, solution.len()));
        }
        let state = buf.read(cells).to_vec();
        if state.len() != cells {
            return Err(XwdError::length_mismatch("state grid", cells, state.len()));
        }

        let text = TextBlock::read(&mut buf, usize::from(header.clue_count))?;
        let sections = read_sections(&mut buf)?;

        let mut file = Self {
            header_garbage,
            header,
            solution,
            state,
            text,
            sections,
            rebus_table: None,
            user_rebus: None,
            elapsed: None,
        };
        file.decode_sections()?;
        Ok(file)
    }

    fn decode_sections(&mut self) -> Result<()> {
        let cells = self.cell_count();

        for kind in SAVE_ORDER {
            let count = self.sections.iter().filter(|s| s.kind() == kind).count();
            if count > 1 {
                warn!(?kind, count, "duplicate section; only the last is used");
            }
        }

        for kind in [SectionKind::Grbs, SectionKind::Gext] {
            if let Some(section) = self.section(kind) {
                if section.len() != cells {
                    return Err(XwdError::length_mismatch(
                        format!("{} section", section.tag_str()),
                        cells,
                        section.len(),
                    ));
                }
            }
        }

        let rebus_table = self
            .section(SectionKind::Rtbl)
            .map(|s| RebusTable::parse(&s.data))
            .transpose()?;
        if let Some(grbs) = self.grbs() {
            if rebus_table.is_none() && grbs.iter().any(|&b| b != 0) {
                return Err(XwdError::invalid_header(
                    "GRBS references rebus entries but there is no RTBL",
                ));
            }
        }
        let user_rebus = self
            .section(SectionKind::Rusr)
            .map(|s| rebus::parse_user_rebus(&s.data, cells))
            .transpose()?;
        let elapsed = self
            .section(SectionKind::Ltim)
            .map(|s| extras::parse_timer(&s.data))
            .transpose()?;

        self.rebus_table = rebus_table;
        self.user_rebus = user_rebus;
        self.elapsed = elapsed;
        Ok(())
    }

    /// Grid width.
    pub fn width(&self) -> usize {
        usize::from(self.header.width)
    }

    /// Grid height.
    pub fn height(&self) -> usize {
        usize::from(self.header.height)
    }

    /// Cells per grid.
    pub fn cell_count(&self) -> usize {
        self.header.cell_count()
    }

    /// One row of the solution grid.
    pub fn solution_row(&self, row: usize) -> &[u8] {
        let w = self.width();
        self.solution.get(row * w..(row + 1) * w).unwrap_or_default()
    }

    /// One row of the state grid.
    pub fn state_row(&self, row: usize) -> &[u8] {
        let w = self.width();
        self.state.get(row * w..(row + 1) * w).unwrap_or_default()
    }

    /// Section of a known kind. When a tag repeats, the last copy wins.
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().rev().find(|s| s.kind() == kind)
    }

    /// Replace the last section with the same tag, or append.
    pub fn set_section(&mut self, section: Section) {
        match self.sections.iter_mut().rev().find(|s| s.tag == section.tag) {
            Some(slot) => *slot = section,
            None => self.sections.push(section),
        }
    }

    /// Raw GRBS bytes.
    pub fn grbs(&self) -> Option<&[u8]> {
        self.section(SectionKind::Grbs).map(|s| s.data.as_slice())
    }

    /// Raw GEXT bytes.
    pub fn gext(&self) -> Option<&[u8]> {
        self.section(SectionKind::Gext).map(|s| s.data.as_slice())
    }

    /// Recompute every checksum from the current contents.
    pub fn compute_checksums(&self) -> Result<Checksums> {
        Checksums::compute(&self.header, &self.solution, &self.state, &self.text)
    }

    /// Check every stored checksum, reporting all mismatches at once.
    pub fn validate(&self) -> Result<()> {
        let computed = self.compute_checksums()?;
        let failures = computed.compare(&self.header, &self.sections);
        if failures.is_empty() {
            Ok(())
        } else {
            for failure in &failures {
                debug!(%failure, "checksum mismatch");
            }
            Err(XwdError::checksum(failures))
        }
    }

    /// Store freshly computed checksums in the header and known sections.
    pub fn refresh_checksums(&mut self) -> Result<()> {
        for section in &mut self.sections {
            if section.kind() != SectionKind::Unknown {
                section.checksum = section.computed_checksum();
            }
        }
        let computed = self.compute_checksums()?;
        computed.store(&mut self.header);
        Ok(())
    }

    /// Replace the solving state: state grid, GEXT flags, user rebus
    /// entries and elapsed time.
    ///
    /// Nothing changes if any length check fails.
    pub fn apply_solving_state(
        &mut self,
        state: Vec<u8>,
        gext: Vec<u8>,
        user_rebus: Option<Vec<Option<String>>>,
        elapsed: u32,
    ) -> Result<()> {
        let cells = self.cell_count();
        if state.len() != cells {
            return Err(XwdError::length_mismatch("state grid", cells, state.len()));
        }
        match self.gext() {
            Some(loaded) if loaded.len() != gext.len() => {
                return Err(XwdError::section_length_changed(
                    "GEXT",
                    loaded.len(),
                    gext.len(),
                ));
            }
            None if gext.len() != cells => {
                return Err(XwdError::length_mismatch("GEXT section", cells, gext.len()));
            }
            _ => {}
        }
        let rusr = match &user_rebus {
            Some(entries) if entries.len() != cells => {
                return Err(XwdError::length_mismatch("RUSR entries", cells, entries.len()));
            }
            Some(entries) => Some(rebus::encode_user_rebus(
                entries.iter().map(Option::as_deref),
            )?),
            None => None,
        };

        self.state = state;
        self.set_section(Section::new(*b"GEXT", gext));
        self.set_section(Section::new(*b"LTIM", extras::encode_timer(elapsed)));
        if let Some(data) = rusr {
            self.set_section(Section::new(*b"RUSR", data));
        }
        self.user_rebus = user_rebus;
        self.elapsed = Some(elapsed);
        Ok(())
    }

    /// Sections in write order: known kinds first, then the rest as loaded.
    ///
    /// A repeated known tag is written once, from its last copy; earlier
    /// copies are dropped.
    pub fn ordered_sections(&self) -> Vec<&Section> {
        let mut out: Vec<&Section> = SAVE_ORDER
            .iter()
            .filter_map(|&kind| self.section(kind))
            .collect();
        out.extend(
            self.sections
                .iter()
                .filter(|s| s.kind() == SectionKind::Unknown),
        );
        out
    }

    /// Encode the file exactly as stored, checksums included.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(
            self.header_garbage.len() + HEADER_LEN + 2 * self.cell_count() + 256,
        );
        out.extend_from_slice(&self.header_garbage);
        self.header.write(&mut out);
        out.extend_from_slice(&self.solution);
        out.extend_from_slice(&self.state);
        self.text.write(&mut out)?;
        for section in self.ordered_sections() {
            section.write(&mut out)?;
        }
        Ok(out)
    }

    /// Write the file with one whole-file write.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!(path = %path.as_ref().display(), len = bytes.len(), "wrote puzzle");
        Ok(())
    }
}
