//! # xwd Model
//!
//! In-memory crossword model built on [`xwd_format`].
//!
//! - [`coord`]: Coordinates, directions and unit steps
//! - [`cell`]: Cells and the edit/check state machine
//! - [`word`]: Numbered words and their clues
//! - [`crossref`]: Cross references parsed from clue text
//! - [`grid`]: Segmentation, numbering, solving order and wraparound neighbors
//! - [`timer`]: Elapsed solving time
//! - [`puzzle`]: The [`Puzzle`] aggregate: load, edit, check, save
//! - [`session`]: Open puzzles addressed by [`PuzzleHandle`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use xwd_model::{Coord, LoadOptions, Puzzle};
//!
//! let mut puzzle = Puzzle::open("daily.puz", LoadOptions::new()).unwrap();
//! puzzle.fill(Coord::new(0, 0), "a").unwrap();
//! if puzzle.refresh_completion() {
//!     println!("solved in {}", puzzle.timer().format_hms());
//! }
//! puzzle.save("daily.puz").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cell;
pub mod coord;
pub mod crossref;
pub mod error;
pub mod grid;
pub mod puzzle;
pub mod session;
pub mod timer;
pub mod word;

// Re-exports
pub use cell::{Cell, Neighbor};
pub use coord::{Coord, Direction, Step};
pub use crossref::CrossRef;
pub use error::{EditError, EditResult};
pub use puzzle::{LoadOptions, Puzzle, Status};
pub use session::{PuzzleHandle, Session};
pub use timer::Timer;
pub use word::{Word, WordId};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::coord::{Coord, Direction, Step};
    pub use crate::error::EditError;
    pub use crate::puzzle::{LoadOptions, Puzzle};
    pub use xwd_core::error::{Result, XwdError};
}
