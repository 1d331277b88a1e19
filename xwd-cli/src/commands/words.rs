//! Words command implementation.

use crate::utils::load_puzzle;
use serde::Serialize;
use std::path::Path;
use xwd_model::{Coord, CrossRef, Direction, Puzzle, Word};

/// JSON serializable view of a numbered word.
#[derive(Debug, Serialize)]
struct WordJson<'a> {
    number: u16,
    direction: Direction,
    clue: &'a str,
    answer: &'a str,
    fill: String,
    start: Coord,
    length: usize,
    cross_refs: &'a [CrossRef],
}

impl<'a> WordJson<'a> {
    fn from_word(puzzle: &Puzzle, word: &'a Word) -> Self {
        Self {
            number: word.number(),
            direction: word.direction(),
            clue: word.clue(),
            answer: word.solution(),
            fill: current_fill(puzzle, word),
            start: word.start(),
            length: word.len(),
            cross_refs: word.cross_refs(),
        }
    }
}

/// The word as currently entered, `-` for empty cells.
fn current_fill(puzzle: &Puzzle, word: &Word) -> String {
    puzzle
        .word_cells(word.id())
        .iter()
        .map(|cell| cell.content().unwrap_or("-"))
        .collect()
}

pub fn cmd_words(file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let puzzle = load_puzzle(file, false)?;

    if json {
        let words: Vec<_> = [Direction::Across, Direction::Down]
            .into_iter()
            .flat_map(|dir| in_direction(&puzzle, dir))
            .map(|w| WordJson::from_word(&puzzle, w))
            .collect();
        println!("{}", serde_json::to_string_pretty(&words)?);
        return Ok(());
    }

    for (i, direction) in [Direction::Across, Direction::Down].into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", direction);
        for word in in_direction(&puzzle, direction) {
            println!(
                "  {:>3}. {} [{}] {}",
                word.number(),
                word.clue(),
                word.solution(),
                current_fill(&puzzle, word)
            );
            if !word.cross_refs().is_empty() {
                let refs: Vec<String> = word
                    .cross_refs()
                    .iter()
                    .map(|r| format!("{}-{}", r.number, r.direction))
                    .collect();
                println!("       see {}", refs.join(", "));
            }
        }
    }

    Ok(())
}

/// Words of one direction by clue number.
fn in_direction(puzzle: &Puzzle, direction: Direction) -> Vec<&Word> {
    let mut words: Vec<&Word> = puzzle
        .words()
        .iter()
        .filter(|w| w.direction() == direction)
        .collect();
    words.sort_by_key(|w| w.number());
    words
}
