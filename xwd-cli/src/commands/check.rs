//! Check command implementation.

use crate::utils::{load_puzzle, print_status};
use std::path::Path;

pub fn cmd_check(file: &Path, save: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut puzzle = load_puzzle(file, false)?;

    let all_ok = puzzle.check_all();
    let complete = puzzle.refresh_completion();

    let bad: Vec<_> = puzzle
        .cells()
        .iter()
        .filter(|c| c.is_marked_bad())
        .collect();
    if bad.is_empty() {
        println!("No wrong entries");
    } else {
        println!("Wrong entries: {}", bad.len());
        for cell in &bad {
            println!(
                "  {}: {} (expected {})",
                cell.coord(),
                cell.content().unwrap_or("-"),
                cell.rebus_solution().map_or_else(|| cell.solution().to_string(), str::to_owned)
            );
        }
    }

    if verbose {
        println!();
        print_status(&puzzle.status(), &puzzle.timer().format_hms());
    }

    println!();
    match (complete, all_ok) {
        (true, _) => println!("Puzzle complete"),
        (false, true) => println!("Everything entered so far is correct"),
        (false, false) => println!("Puzzle not complete"),
    }

    if save {
        puzzle.save(file)?;
        println!("Saved check marks to {}", file.display());
    }
    Ok(())
}
