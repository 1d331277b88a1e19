//! Open puzzles addressed by handle.

use crate::puzzle::{LoadOptions, Puzzle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use xwd_core::error::Result;

/// Handle of a puzzle inside a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PuzzleHandle(u64);

#[derive(Debug)]
struct Entry {
    path: PathBuf,
    puzzle: Puzzle,
}

/// The set of puzzles a host has open.
#[derive(Debug, Default)]
pub struct Session {
    next: u64,
    open: BTreeMap<PuzzleHandle, Entry>,
}

impl Session {
    /// An empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a file and keep it open.
    pub fn open(&mut self, path: impl AsRef<Path>, options: LoadOptions) -> Result<PuzzleHandle> {
        let puzzle = Puzzle::open(path.as_ref(), options)?;
        Ok(self.insert(path, puzzle))
    }

    /// Keep an already loaded puzzle; it saves back to `path`.
    pub fn insert(&mut self, path: impl AsRef<Path>, puzzle: Puzzle) -> PuzzleHandle {
        let handle = PuzzleHandle(self.next);
        self.next += 1;
        debug!(?handle, path = %path.as_ref().display(), "opened puzzle");
        self.open.insert(
            handle,
            Entry {
                path: path.as_ref().to_path_buf(),
                puzzle,
            },
        );
        handle
    }

    /// An open puzzle.
    pub fn get(&self, handle: PuzzleHandle) -> Option<&Puzzle> {
        self.open.get(&handle).map(|e| &e.puzzle)
    }

    /// An open puzzle, mutably.
    pub fn get_mut(&mut self, handle: PuzzleHandle) -> Option<&mut Puzzle> {
        self.open.get_mut(&handle).map(|e| &mut e.puzzle)
    }

    /// Where a puzzle saves to.
    pub fn path(&self, handle: PuzzleHandle) -> Option<&Path> {
        self.open.get(&handle).map(|e| e.path.as_path())
    }

    /// Save a puzzle to its path. Returns false for an unknown handle.
    pub fn save(&mut self, handle: PuzzleHandle) -> Result<bool> {
        match self.open.get_mut(&handle) {
            Some(entry) => {
                entry.puzzle.save(&entry.path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Forget a puzzle without saving it.
    pub fn close(&mut self, handle: PuzzleHandle) -> Option<Puzzle> {
        self.open.remove(&handle).map(|e| e.puzzle)
    }

    /// Handles of every open puzzle, oldest first.
    pub fn handles(&self) -> impl Iterator<Item = PuzzleHandle> + '_ {
        self.open.keys().copied()
    }

    /// Number of open puzzles.
    pub fn len(&self) -> usize {
        self.open.len()
    }

    /// True if nothing is open.
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}
