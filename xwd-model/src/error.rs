//! Edit rejections.
//!
//! Format and I/O failures use [`xwd_core::XwdError`]; this type only covers
//! edits the model refuses. Edits are never fatal.

use crate::coord::Coord;
use thiserror::Error;

/// Why an edit was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The target cell is a block.
    #[error("cell {0} is a block")]
    Blocked(Coord),

    /// The content is empty or holds a character cells cannot take.
    #[error("cannot fill {coord} with {content:?}")]
    InvalidContent {
        /// Target cell.
        coord: Coord,
        /// Rejected content.
        content: String,
    },

    /// The coordinate is outside the grid.
    #[error("cell {coord} is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Requested cell.
        coord: Coord,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
}

impl EditError {
    /// Create an invalid content error.
    pub fn invalid_content(coord: Coord, content: impl Into<String>) -> Self {
        Self::InvalidContent {
            coord,
            content: content.into(),
        }
    }
}

/// Result of an edit.
pub type EditResult<T> = std::result::Result<T, EditError>;
