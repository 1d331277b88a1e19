//! A single grid cell and its edit state machine.
//!
//! ```text
//!            fill               check (match)
//!   Empty ─────────► Filled ─────────────────► Locked
//!     ▲                │  ▲                      │
//!     │ clear          │  │ fill / clear         │ (no edits)
//!     └────────────────┘  │                      ▼
//!                  check (mismatch) ──► MarkedBad
//! ```
//!
//! Blocks are terminal: every edit on a block is refused.

use crate::coord::{Coord, Direction, Step};
use crate::error::{EditError, EditResult};
use crate::word::WordId;
use xwd_core::text;
use xwd_format::{BLOCK, EMPTY, flags};
use xwd_format::rebus::is_glyph;

/// Punctuation a cell may hold besides letters and digits.
pub const EXTRA_CHARACTERS: &str = "@#$%&+?";

/// True if `ch` may appear in cell content.
pub fn is_allowed(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || EXTRA_CHARACTERS.contains(ch) || is_glyph(ch)
}

/// Where a step from a cell lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Target cell.
    pub coord: Coord,
    /// True if the walk wrapped between the two corners of the grid.
    pub looped: bool,
}

/// One grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    coord: Coord,
    solution: u8,
    rebus_solution: Option<String>,
    content: Option<String>,
    /// State grid byte the content was loaded from, until the next edit.
    loaded_state: Option<u8>,
    locked: bool,
    given: bool,
    shaded: bool,
    marked_bad: bool,
    prev_marked_bad: bool,
    spare_flags: u8,
    number: Option<u16>,
    words: [Option<WordId>; 2],
    neighbors: [Neighbor; 4],
}

impl Cell {
    /// Build a cell from its solution and state grid bytes.
    ///
    /// Loaded content keeps its case and its exact byte until edited.
    pub fn new(coord: Coord, solution: u8, state: u8) -> Self {
        let loaded_state = (solution != BLOCK && state != EMPTY && state != BLOCK).then_some(state);
        let content = loaded_state.map(|b| text::decode(&[b]));
        let here = Neighbor {
            coord,
            looped: false,
        };
        Self {
            coord,
            solution,
            rebus_solution: None,
            content,
            loaded_state,
            locked: false,
            given: false,
            shaded: false,
            marked_bad: false,
            prev_marked_bad: false,
            spare_flags: 0,
            number: None,
            words: [None, None],
            neighbors: [here; 4],
        }
    }

    /// Apply a GEXT byte. A given cell is also locked.
    pub(crate) fn apply_flags(&mut self, byte: u8) {
        self.shaded = byte & flags::SHADED != 0;
        self.given = byte & flags::GIVEN != 0;
        self.locked = self.given;
        self.marked_bad = byte & flags::MARKED_BAD != 0;
        self.prev_marked_bad = byte & flags::PREVIOUSLY_BAD != 0;
        self.spare_flags = byte & !flags::KNOWN;
    }

    pub(crate) fn set_rebus_solution(&mut self, value: Option<String>) {
        self.rebus_solution = value;
    }

    /// Restore a user rebus entry; it replaces the single state letter.
    pub(crate) fn set_user_rebus(&mut self, value: String) {
        if !self.is_block() && !value.is_empty() {
            self.content = Some(value);
            self.loaded_state = None;
        }
    }

    pub(crate) fn set_number(&mut self, number: u16) {
        self.number = Some(number);
    }

    pub(crate) fn link_word(&mut self, direction: Direction, word: WordId) {
        self.words[direction as usize] = Some(word);
    }

    pub(crate) fn link_neighbor(&mut self, step: Step, neighbor: Neighbor) {
        self.neighbors[step.slot()] = neighbor;
    }

    /// Position in the grid.
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// True for black squares.
    pub fn is_block(&self) -> bool {
        self.solution == BLOCK
    }

    /// Solution letter (`.` for blocks).
    pub fn solution(&self) -> char {
        char::from(self.solution)
    }

    /// Full rebus answer, if the cell has one.
    pub fn rebus_solution(&self) -> Option<&str> {
        self.rebus_solution.as_deref()
    }

    /// Current fill.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// True if the cell can be filled but is not.
    pub fn is_empty(&self) -> bool {
        !self.is_block() && self.content.is_none()
    }

    /// True if the cell holds content.
    pub fn is_filled(&self) -> bool {
        self.content.is_some()
    }

    /// True if edits are ignored.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// True if the cell was revealed or checked correct.
    pub fn is_given(&self) -> bool {
        self.given
    }

    /// True if the cell is drawn shaded.
    pub fn is_shaded(&self) -> bool {
        self.shaded
    }

    /// True if the last check failed and the content has not changed since.
    pub fn is_marked_bad(&self) -> bool {
        self.marked_bad
    }

    /// True if the cell was marked bad at some point.
    pub fn was_marked_bad(&self) -> bool {
        self.prev_marked_bad
    }

    /// True if any check has touched the cell.
    pub fn is_checked(&self) -> bool {
        self.given || self.marked_bad || self.prev_marked_bad
    }

    /// Clue number, on cells that start a word.
    pub fn number(&self) -> Option<u16> {
        self.number
    }

    /// The word running through this cell in a direction.
    pub fn word(&self, direction: Direction) -> Option<WordId> {
        self.words[direction as usize]
    }

    /// Where a step lands.
    pub fn neighbor(&self, step: Step) -> Neighbor {
        self.neighbors[step.slot()]
    }

    /// Fill the cell. Returns whether the content changed.
    ///
    /// Content is upper-cased. Locked cells ignore the request.
    pub fn fill(&mut self, content: &str) -> EditResult<bool> {
        if self.is_block() {
            return Err(EditError::Blocked(self.coord));
        }
        if self.locked {
            return Ok(false);
        }
        if content.is_empty() || !content.chars().all(is_allowed) {
            return Err(EditError::invalid_content(self.coord, content));
        }
        Ok(self.replace(Some(content.to_uppercase())))
    }

    /// Empty the cell. Returns whether the content changed.
    pub fn clear(&mut self) -> EditResult<bool> {
        if self.is_block() {
            return Err(EditError::Blocked(self.coord));
        }
        if self.locked {
            return Ok(false);
        }
        Ok(self.replace(None))
    }

    fn replace(&mut self, content: Option<String>) -> bool {
        if self.content == content {
            return false;
        }
        self.content = content;
        self.loaded_state = None;
        if self.marked_bad {
            self.marked_bad = false;
            self.prev_marked_bad = true;
        }
        true
    }

    /// Compare the first content character with the solution.
    ///
    /// Blocks and empty cells pass. Unless `silent`, a match locks the cell
    /// and a mismatch marks it bad.
    pub fn check(&mut self, silent: bool) -> bool {
        let ok = self.matches_solution();
        if !silent && !self.is_block() && self.content.is_some() {
            self.locked = ok;
            self.given = ok;
            self.marked_bad = !ok;
        }
        ok
    }

    /// The check result without side effects.
    pub fn matches_solution(&self) -> bool {
        match self.content.as_deref().and_then(|c| c.chars().next()) {
            _ if self.is_block() => true,
            None => true,
            Some(first) => first.to_uppercase().eq(self.solution().to_uppercase()),
        }
    }

    /// Byte for the state grid.
    ///
    /// Unedited content writes back the byte it was loaded from. Otherwise
    /// the first character, or `-` when it has no single-byte form.
    pub fn state_byte(&self) -> u8 {
        if self.is_block() {
            return BLOCK;
        }
        if let Some(byte) = self.loaded_state {
            return byte;
        }
        match self.content.as_deref().and_then(|c| c.chars().next()) {
            Some(first) => single_byte(first).unwrap_or(EMPTY),
            None => EMPTY,
        }
    }

    /// Byte for the GEXT section.
    pub fn flag_byte(&self) -> u8 {
        let mut byte = self.spare_flags;
        if self.shaded {
            byte |= flags::SHADED;
        }
        if self.given || self.locked {
            byte |= flags::GIVEN;
        }
        if self.marked_bad {
            byte |= flags::MARKED_BAD;
        }
        if self.prev_marked_bad {
            byte |= flags::PREVIOUSLY_BAD;
        }
        byte
    }

    /// Content that does not fit the state grid and is kept as a user rebus.
    pub fn rebus_entry(&self) -> Option<&str> {
        if self.loaded_state.is_some() {
            return None;
        }
        self.content.as_deref().filter(|c| {
            let mut chars = c.chars();
            match (chars.next(), chars.next()) {
                (Some(only), None) => single_byte(only).is_none(),
                _ => true,
            }
        })
    }
}

/// The 8-bit form of a character, if it has one.
fn single_byte(ch: char) -> Option<u8> {
    let mut buf = [0u8; 4];
    match text::encode(ch.encode_utf8(&mut buf)).ok()?.as_slice() {
        [byte] => Some(*byte),
        _ => None,
    }
}
