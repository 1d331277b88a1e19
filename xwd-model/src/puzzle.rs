//! The puzzle model.
//!
//! A [`Puzzle`] owns its cells (row-major) and words (sorted order) as flat
//! arrays. Cells refer to words by [`WordId`] and words refer to cells by
//! [`Coord`], so there are no ownership cycles.
//!
//! ```text
//! PuzFile ──► cells (flags, rebus, content)
//!    │
//!    └──► segment ──► number ──► words ──► solving order
//!                                   │
//!          neighbors ◄── blocks ◄───┘
//! ```

use crate::cell::Cell;
use crate::coord::{Coord, Direction, Step};
use crate::error::{EditError, EditResult};
use crate::grid;
use crate::timer::Timer;
use crate::word::{Word, WordId};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};
use xwd_core::error::{Result, XwdError};
use xwd_core::text;
use xwd_format::section::SectionKind;
use xwd_format::{PuzFile, RebusTable};

/// How a file is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    validate: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { validate: true }
    }
}

impl LoadOptions {
    /// Validate every checksum (the default).
    pub fn new() -> Self {
        Self::default()
    }

    /// Load even if checksums do not match.
    pub fn skip_validation(mut self) -> Self {
        self.validate = false;
        self
    }

    /// True if checksums are checked at load.
    pub fn validates(&self) -> bool {
        self.validate
    }
}

/// Progress counters for a host's puzzle list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Status {
    /// Non-block cells.
    pub fillable: usize,
    /// Cells holding content.
    pub filled: usize,
    /// Cells touched by a check.
    pub checked: usize,
    /// Given (revealed or checked correct) cells.
    pub given: usize,
    /// Cells currently marked bad.
    pub bad: usize,
    /// Cells marked bad at some point.
    pub prev_bad: usize,
    /// Every cell filled and correct.
    pub complete: bool,
    /// Elapsed seconds.
    pub elapsed: u32,
}

/// A loaded crossword.
#[derive(Debug, Clone)]
pub struct Puzzle {
    file: PuzFile,
    cells: Vec<Cell>,
    words: Vec<Word>,
    timer: Timer,
    complete: bool,
}

impl Puzzle {
    /// Load a file.
    pub fn open(path: impl AsRef<Path>, options: LoadOptions) -> Result<Self> {
        Self::from_file(PuzFile::open(path)?, options)
    }

    /// Load from bytes in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, options: LoadOptions) -> Result<Self> {
        Self::from_file(PuzFile::from_bytes(bytes)?, options)
    }

    /// Build the model from a parsed file.
    pub fn from_file(file: PuzFile, options: LoadOptions) -> Result<Self> {
        if options.validates() {
            file.validate()?;
        } else if let Err(err) = file.validate() {
            warn!(%err, "loading despite failed validation");
        }
        if file.header.is_scrambled() {
            warn!("solution is scrambled; checks will not match");
        }

        let (width, height) = (file.width(), file.height());
        let mut cells = Self::build_cells(&file);

        let spans = grid::segment(&file.solution, width, height);
        if spans.len() != file.text.clues.len() {
            return Err(XwdError::length_mismatch(
                "clue list",
                spans.len(),
                file.text.clues.len(),
            ));
        }

        let numbers = grid::number(&spans);
        let mut words: Vec<Word> = spans
            .iter()
            .zip(&file.text.clues)
            .zip(&numbers)
            .enumerate()
            .map(|(i, ((span, clue), &number))| {
                Word::new(
                    WordId(i),
                    span.start,
                    span.direction,
                    text::decode(&span.text),
                    clue.clone(),
                    number,
                )
            })
            .collect();

        for word in &words {
            cells[word.start().index(width)].set_number(word.number());
            for coord in word.cells() {
                cells[coord.index(width)].link_word(word.direction(), word.id());
            }
        }

        let directions: Vec<Direction> = words.iter().map(Word::direction).collect();
        let order = grid::solving_order(&directions);
        for (pos, &index) in order.iter().enumerate() {
            let prev = order[(pos + order.len() - 1) % order.len()];
            let next = order[(pos + 1) % order.len()];
            words[index].link(WordId(prev), WordId(next));
        }

        let blocks: Vec<bool> = cells.iter().map(Cell::is_block).collect();
        for (cell, table) in cells
            .iter_mut()
            .zip(grid::neighbors(&blocks, width, height))
        {
            for step in Step::ALL {
                cell.link_neighbor(step, table[step.slot()]);
            }
        }

        let mut timer = Timer::new();
        timer.set(file.elapsed.unwrap_or(0));

        let mut puzzle = Self {
            file,
            cells,
            words,
            timer,
            complete: false,
        };
        puzzle.refresh_completion();
        debug!(
            width,
            height,
            words = puzzle.words.len(),
            complete = puzzle.complete,
            "built puzzle"
        );
        Ok(puzzle)
    }

    fn build_cells(file: &PuzFile) -> Vec<Cell> {
        let width = file.width();
        let gext = file.gext();
        let grbs = file.grbs();

        (0..file.cell_count())
            .map(|i| {
                let mut cell = Cell::new(Coord::from_index(i, width), file.solution[i], file.state[i]);
                if let Some(&byte) = gext.and_then(|g| g.get(i)) {
                    cell.apply_flags(byte);
                }
                if let (Some(&key), Some(table)) = (grbs.and_then(|g| g.get(i)), &file.rebus_table) {
                    cell.set_rebus_solution(table.for_grid_byte(key).map(str::to_owned));
                }
                if let Some(Some(entry)) = file.user_rebus.as_ref().and_then(|u| u.get(i)) {
                    cell.set_user_rebus(entry.clone());
                }
                cell
            })
            .collect()
    }

    /// The underlying file as last loaded or saved.
    pub fn file(&self) -> &PuzFile {
        &self.file
    }

    /// Grid width.
    pub fn width(&self) -> usize {
        self.file.width()
    }

    /// Grid height.
    pub fn height(&self) -> usize {
        self.file.height()
    }

    /// Title.
    pub fn title(&self) -> &str {
        &self.file.text.title
    }

    /// Author.
    pub fn author(&self) -> &str {
        &self.file.text.author
    }

    /// Copyright line.
    pub fn copyright(&self) -> &str {
        &self.file.text.copyright
    }

    /// Notes.
    pub fn notes(&self) -> &str {
        &self.file.text.notes
    }

    /// Format version, e.g. `1.3`.
    pub fn version(&self) -> String {
        self.file.header.version_str()
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of cells.
    pub fn row(&self, row: usize) -> &[Cell] {
        let w = self.width();
        self.cells.get(row * w..(row + 1) * w).unwrap_or_default()
    }

    fn index(&self, coord: Coord) -> EditResult<usize> {
        if coord.row < self.height() && coord.col < self.width() {
            Ok(coord.index(self.width()))
        } else {
            Err(EditError::OutOfBounds {
                coord,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    /// A cell by position.
    pub fn cell(&self, coord: Coord) -> EditResult<&Cell> {
        let i = self.index(coord)?;
        Ok(&self.cells[i])
    }

    /// Words in sorted order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// A word by handle.
    pub fn word(&self, id: WordId) -> Option<&Word> {
        self.words.get(id.index())
    }

    /// The word through a cell in a direction.
    pub fn word_at(&self, coord: Coord, direction: Direction) -> Option<&Word> {
        self.cell(coord)
            .ok()?
            .word(direction)
            .and_then(|id| self.word(id))
    }

    /// The word with a clue number and direction, e.g. the target of a cross
    /// reference.
    pub fn find_word(&self, number: u16, direction: Direction) -> Option<&Word> {
        self.words
            .iter()
            .find(|w| w.number() == number && w.direction() == direction)
    }

    /// The cells of a word in reading order.
    pub fn word_cells(&self, id: WordId) -> Vec<&Cell> {
        let width = self.width();
        self.word(id)
            .map(|w| w.cells().iter().map(|c| &self.cells[c.index(width)]).collect())
            .unwrap_or_default()
    }

    /// Fill a cell. Returns whether its content changed.
    pub fn fill(&mut self, coord: Coord, content: &str) -> EditResult<bool> {
        let i = self.index(coord)?;
        self.cells[i].fill(content)
    }

    /// Clear a cell. Returns whether its content changed.
    pub fn clear(&mut self, coord: Coord) -> EditResult<bool> {
        let i = self.index(coord)?;
        self.cells[i].clear()
    }

    /// Check one cell, marking it locked or bad.
    pub fn check_cell(&mut self, coord: Coord) -> EditResult<bool> {
        let i = self.index(coord)?;
        Ok(self.cells[i].check(false))
    }

    /// Check every cell of a word. Returns true if all passed.
    pub fn check_word(&mut self, id: WordId) -> bool {
        let width = self.width();
        let Some(coords) = self.word(id).map(|w| w.cells().to_vec()) else {
            return false;
        };
        coords
            .iter()
            .fold(true, |ok, c| self.cells[c.index(width)].check(false) && ok)
    }

    /// Check every cell. Returns true if all passed.
    pub fn check_all(&mut self) -> bool {
        self.cells
            .iter_mut()
            .fold(true, |ok, cell| cell.check(false) && ok)
    }

    /// True if no filled cell disagrees with the solution. Changes nothing.
    pub fn is_correct(&self) -> bool {
        self.cells.iter().all(Cell::matches_solution)
    }

    /// Walk neighbors from `from` until an empty cell appears.
    ///
    /// Returns `None` once the walk comes back to the start.
    pub fn next_empty(&self, from: Coord, step: Step) -> EditResult<Option<Coord>> {
        let start = self.index(from)?;
        let width = self.width();
        let mut current = start;

        for _ in 0..self.cells.len() {
            current = self.cells[current].neighbor(step).coord.index(width);
            if self.cells[current].is_empty() {
                return Ok(Some(self.cells[current].coord()));
            }
            if current == start {
                break;
            }
        }
        Ok(None)
    }

    /// Check every stored checksum of the loaded file.
    pub fn validate(&self) -> Result<()> {
        self.file.validate()
    }

    /// Completion as of the last [`Puzzle::refresh_completion`].
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Recompute completion; a complete puzzle locks its timer.
    pub fn refresh_completion(&mut self) -> bool {
        let filled_all = self.cells.iter().all(|c| c.is_block() || c.is_filled());
        self.complete = filled_all && self.is_correct();
        if self.complete && !self.timer.is_locked() {
            info!(elapsed = self.timer.elapsed(), "puzzle complete");
            self.timer.lock();
        }
        self.complete
    }

    /// The solving timer.
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// The solving timer, mutably.
    pub fn timer_mut(&mut self) -> &mut Timer {
        &mut self.timer
    }

    /// The rebus substitution table, if the puzzle has one.
    pub fn rebus_table(&self) -> Option<&RebusTable> {
        self.file.rebus_table.as_ref()
    }

    /// Multi-character or symbol content of a cell.
    pub fn user_rebus(&self, coord: Coord) -> Option<&str> {
        self.cell(coord).ok()?.rebus_entry()
    }

    /// Current counters.
    pub fn status(&self) -> Status {
        let mut status = Status {
            complete: self.complete,
            elapsed: self.timer.elapsed(),
            ..Status::default()
        };
        for cell in self.cells.iter().filter(|c| !c.is_block()) {
            status.fillable += 1;
            status.filled += usize::from(cell.is_filled());
            status.checked += usize::from(cell.is_checked());
            status.given += usize::from(cell.is_given());
            status.bad += usize::from(cell.is_marked_bad());
            status.prev_bad += usize::from(cell.was_marked_bad());
        }
        status
    }

    /// The file as it would be saved now.
    fn encode(&self) -> Result<PuzFile> {
        let state = self.cells.iter().map(Cell::state_byte).collect();
        let gext = self.cells.iter().map(Cell::flag_byte).collect();
        let keep_rusr = self.file.section(SectionKind::Rusr).is_some()
            || self.cells.iter().any(|c| c.rebus_entry().is_some());
        let user_rebus = keep_rusr.then(|| {
            self.cells
                .iter()
                .map(|c| c.rebus_entry().map(str::to_owned))
                .collect()
        });

        let mut file = self.file.clone();
        file.apply_solving_state(state, gext, user_rebus, self.timer.elapsed())?;
        file.refresh_checksums()?;
        Ok(file)
    }

    /// Encode the current solving state.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.encode()?.to_bytes()
    }

    /// Write the current solving state to `path`.
    ///
    /// Nothing is written and the model is unchanged if encoding fails.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let file = self.encode()?;
        file.write(path)?;
        self.file = file;
        Ok(())
    }
}
