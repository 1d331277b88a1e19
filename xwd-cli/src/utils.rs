//! Utility functions for the CLI.

use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use xwd_core::error::Result;
use xwd_model::{Cell, LoadOptions, Puzzle, Status};

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░ ");
    pb.set_style(style);
    pb
}

/// Check if a filename matches the filter patterns.
/// - If include patterns are specified, the name must match at least one
/// - If exclude patterns are specified, the name must not match any
pub fn matches_filters(name: &str, include: &[String], exclude: &[String]) -> bool {
    let matches = |pattern: &String| Pattern::new(pattern).is_ok_and(|p| p.matches(name));

    if exclude.iter().any(matches) {
        return false;
    }
    include.is_empty() || include.iter().any(matches)
}

/// The final path component, for filtering and display.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load a puzzle, optionally skipping checksum validation.
pub fn load_puzzle(path: &Path, force: bool) -> Result<Puzzle> {
    let options = if force {
        LoadOptions::new().skip_validation()
    } else {
        LoadOptions::new()
    };
    Puzzle::open(path, options)
}

/// One character for a cell in a printed grid.
///
/// Blocks print as `#`, empty cells as `-`. Rebus cells show their first
/// character.
pub fn cell_glyph(cell: &Cell, solution: bool) -> char {
    if cell.is_block() {
        return '#';
    }
    let text = if solution {
        cell.rebus_solution()
    } else {
        cell.content()
    };
    match text.and_then(|t| t.chars().next()) {
        Some(ch) => ch,
        None if solution => cell.solution(),
        None => '-',
    }
}

/// Render one grid row, cells separated by a space.
pub fn render_row(cells: &[Cell], solution: bool) -> String {
    cells
        .iter()
        .map(|c| cell_glyph(c, solution).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print the counters block shared by `info` and `check`.
pub fn print_status(status: &Status, timer: &str) {
    println!("  Cells: {}/{} filled", status.filled, status.fillable);
    println!("  Checked: {}", status.checked);
    println!("  Given: {}", status.given);
    println!("  Marked wrong: {}", status.bad);
    println!("  Previously wrong: {}", status.prev_bad);
    println!("  Complete: {}", if status.complete { "yes" } else { "no" });
    println!("  Timer: {}", timer.trim_start());
}

#[cfg(test)]
mod tests {
    use super::*;
    use xwd_model::Coord;

    #[test]
    fn test_matches_filters() {
        let none: Vec<String> = Vec::new();
        let include = vec!["*.puz".to_string()];
        let exclude = vec!["draft-*".to_string()];

        assert!(matches_filters("daily.puz", &none, &none));
        assert!(matches_filters("daily.puz", &include, &exclude));
        assert!(!matches_filters("daily.txt", &include, &none));
        assert!(!matches_filters("draft-monday.puz", &include, &exclude));
    }

    #[test]
    fn test_bad_pattern_matches_nothing() {
        let bad = vec!["[".to_string()];
        assert!(!matches_filters("a.puz", &bad, &[]));
        assert!(matches_filters("a.puz", &[], &bad));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("/tmp/x/daily.puz")), "daily.puz");
    }

    #[test]
    fn test_render_row() {
        let cells = vec![
            Cell::new(Coord::new(0, 0), b'C', b'c'),
            Cell::new(Coord::new(0, 1), b'A', b'-'),
            Cell::new(Coord::new(0, 2), b'.', b'.'),
        ];
        assert_eq!(render_row(&cells, false), "c - #");
        assert_eq!(render_row(&cells, true), "C A #");
    }
}
