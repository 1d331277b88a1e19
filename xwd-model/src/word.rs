//! Words: numbered across/down entries with their clues.

use crate::coord::{Coord, Direction};
use crate::crossref::{CrossRef, parse_cross_refs};
use std::fmt;

/// Handle of a word inside its puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordId(pub(crate) usize);

impl WordId {
    /// Position in [`Puzzle::words`](crate::Puzzle::words).
    pub fn index(self) -> usize {
        self.0
    }
}

/// One entry of the puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    id: WordId,
    start: Coord,
    direction: Direction,
    solution: String,
    clue: String,
    number: u16,
    cells: Vec<Coord>,
    next: WordId,
    prev: WordId,
    refs: Vec<CrossRef>,
}

impl Word {
    pub(crate) fn new(
        id: WordId,
        start: Coord,
        direction: Direction,
        solution: String,
        clue: String,
        number: u16,
    ) -> Self {
        let (dy, dx) = match direction {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        };
        let cells = (0..solution.chars().count())
            .map(|i| Coord::new(start.row + i * dy, start.col + i * dx))
            .collect();
        let refs = parse_cross_refs(&clue);
        Self {
            id,
            start,
            direction,
            solution,
            clue,
            number,
            cells,
            next: id,
            prev: id,
            refs,
        }
    }

    pub(crate) fn link(&mut self, prev: WordId, next: WordId) {
        self.prev = prev;
        self.next = next;
    }

    /// This word's handle.
    pub fn id(&self) -> WordId {
        self.id
    }

    /// First cell.
    pub fn start(&self) -> Coord {
        self.start
    }

    /// Direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Answer as spelled in the solution grid.
    pub fn solution(&self) -> &str {
        &self.solution
    }

    /// Clue text.
    pub fn clue(&self) -> &str {
        &self.clue
    }

    /// Clue number.
    pub fn number(&self) -> u16 {
        self.number
    }

    /// Member cells in reading order.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; words have at least two cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True if the word passes through `coord`.
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    /// Next word in solving order.
    pub fn next(&self) -> WordId {
        self.next
    }

    /// Previous word in solving order.
    pub fn prev(&self) -> WordId {
        self.prev
    }

    /// Clues this clue refers to.
    pub fn cross_refs(&self) -> &[CrossRef] {
        &self.refs
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}: {}", self.number, self.direction, self.clue)
    }
}
