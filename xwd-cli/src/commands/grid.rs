//! Grid command implementation.

use crate::utils::{load_puzzle, render_row};
use std::path::Path;

pub fn cmd_grid(file: &Path, solution: bool, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let puzzle = load_puzzle(file, force)?;

    for row in 0..puzzle.height() {
        println!("{}", render_row(puzzle.row(row), solution));
    }

    // Cells whose content does not fit one column.
    let rebus: Vec<_> = puzzle
        .cells()
        .iter()
        .filter_map(|cell| {
            let text = if solution {
                cell.rebus_solution()
            } else {
                cell.content()
            }?;
            (text.chars().count() > 1).then(|| (cell.coord(), text))
        })
        .collect();
    if !rebus.is_empty() {
        println!();
        for (coord, text) in rebus {
            println!("{}: {}", coord, text);
        }
    }

    Ok(())
}
