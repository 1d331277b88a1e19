//! Fill and clear command implementation.

use crate::utils::load_puzzle;
use std::path::Path;
use tracing::info;
use xwd_model::Coord;

/// What to do to the target cell.
#[derive(Debug, Clone, Copy)]
pub enum EditAction<'a> {
    /// Enter content.
    Fill(&'a str),
    /// Erase content.
    Clear,
}

pub fn cmd_edit(
    file: &Path,
    row: usize,
    col: usize,
    action: EditAction<'_>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut puzzle = load_puzzle(file, false)?;
    let coord = Coord::new(row, col);

    let changed = match action {
        EditAction::Fill(text) => puzzle.fill(coord, text)?,
        EditAction::Clear => puzzle.clear(coord)?,
    };

    if !changed {
        if puzzle.cell(coord)?.is_locked() {
            println!("Cell {} is locked; nothing changed", coord);
        } else {
            println!("Cell {} already holds that; nothing changed", coord);
        }
        return Ok(());
    }

    let was_complete = puzzle.is_complete();
    let complete = puzzle.refresh_completion();
    let target = output.unwrap_or(file);
    puzzle.save(target)?;
    info!(%coord, path = %target.display(), "saved edit");

    let content = puzzle.cell(coord)?.content().unwrap_or("-").to_string();
    println!("{} = {} -> {}", coord, content, target.display());
    if complete && !was_complete {
        println!("Puzzle complete in {}", puzzle.timer().format_hms().trim_start());
    }
    Ok(())
}
