//! Grid geometry: word segmentation, numbering, solving order and neighbor
//! links.
//!
//! These are pure functions over the solution grid; [`Puzzle`](crate::Puzzle)
//! wires their results into cells and words.

use crate::cell::Neighbor;
use crate::coord::{Coord, Direction, Step};
use xwd_format::BLOCK;

/// A maximal run of two or more non-block cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpan {
    /// First cell.
    pub start: Coord,
    /// Run direction.
    pub direction: Direction,
    /// Solution bytes of the run.
    pub text: Vec<u8>,
}

/// Find every across and down run, sorted by (row, col, direction).
pub fn segment(solution: &[u8], width: usize, height: usize) -> Vec<WordSpan> {
    let mut spans = Vec::new();

    for row in 0..height {
        let line: Vec<u8> = (0..width).map(|col| solution[row * width + col]).collect();
        for (col, text) in runs(&line) {
            spans.push(WordSpan {
                start: Coord::new(row, col),
                direction: Direction::Across,
                text,
            });
        }
    }
    for col in 0..width {
        let line: Vec<u8> = (0..height).map(|row| solution[row * width + col]).collect();
        for (row, text) in runs(&line) {
            spans.push(WordSpan {
                start: Coord::new(row, col),
                direction: Direction::Down,
                text,
            });
        }
    }

    spans.sort_by_key(|s| (s.start, s.direction));
    spans
}

fn runs(line: &[u8]) -> Vec<(usize, Vec<u8>)> {
    let mut out = Vec::new();
    let mut start = 0;
    for piece in line.split(|&b| b == BLOCK) {
        if piece.len() >= 2 {
            out.push((start, piece.to_vec()));
        }
        start += piece.len() + 1;
    }
    out
}

/// Clue number of each span: a cell takes the next number the first time a
/// span starts on it.
pub fn number(spans: &[WordSpan]) -> Vec<u16> {
    let mut numbered: Vec<(Coord, u16)> = Vec::new();
    let mut next = 0u16;

    spans
        .iter()
        .map(|span| match numbered.iter().find(|(c, _)| *c == span.start) {
            Some(&(_, n)) => n,
            None => {
                next += 1;
                numbered.push((span.start, next));
                next
            }
        })
        .collect()
}

/// Solving order: every across word in order, then every down word.
pub fn solving_order(directions: &[Direction]) -> Vec<usize> {
    let across = (0..directions.len()).filter(|&i| directions[i] == Direction::Across);
    let down = (0..directions.len()).filter(|&i| directions[i] == Direction::Down);
    across.chain(down).collect()
}

/// Neighbor table for every cell, indexed row-major then by [`Step::slot`].
///
/// A grid without fillable cells links every cell to itself.
pub fn neighbors(blocks: &[bool], width: usize, height: usize) -> Vec<[Neighbor; 4]> {
    let fillable = blocks.iter().any(|&b| !b);

    (0..width * height)
        .map(|index| {
            let coord = Coord::from_index(index, width);
            let mut table = [Neighbor {
                coord,
                looped: false,
            }; 4];
            if fillable {
                for step in Step::ALL {
                    table[step.slot()] = walk(blocks, width, height, coord, step);
                }
            }
            table
        })
        .collect()
}

/// Step from `start`, skipping blocks and wrapping at the edges.
///
/// Leaving the grid adds the transposed step and reduces both coordinates
/// modulo the grid size, so walking right continues on the next row and
/// walking down continues in the next column. `looped` is set when a single
/// move jumps between the bottom-right and top-left corners.
///
/// At least one cell must be fillable.
pub fn walk(blocks: &[bool], width: usize, height: usize, start: Coord, step: Step) -> Neighbor {
    let (h, w) = (height as isize, width as isize);
    let (dy, dx) = step.delta();
    let (ty, tx) = step.transpose();
    let origin = (0, 0);
    let corner = (h - 1, w - 1);

    let mut old = (start.row as isize, start.col as isize);
    let mut current = (old.0 + dy, old.1 + dx);
    let mut looped = false;

    loop {
        let in_bounds = (0..h).contains(&current.0) && (0..w).contains(&current.1);
        let moved = if !in_bounds {
            current = ((current.0 + ty).rem_euclid(h), (current.1 + tx).rem_euclid(w));
            true
        } else if blocks[(current.0 * w + current.1) as usize] {
            current = (current.0 + dy, current.1 + dx);
            true
        } else {
            false
        };

        if (old == corner && current == origin) || (current == corner && old == origin) {
            looped = true;
        }
        if !moved {
            break;
        }
        old = current;
    }

    Neighbor {
        coord: Coord::new(current.0 as usize, current.1 as usize),
        looped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(grid: &[u8]) -> Vec<bool> {
        grid.iter().map(|&b| b == BLOCK).collect()
    }

    #[test]
    fn test_segment_row() {
        let spans = segment(b"CAT.DOG", 7, 1);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].start, Coord::new(0, 0));
        assert_eq!(spans[0].text, b"CAT");
        assert_eq!(spans[1].start, Coord::new(0, 4));
        assert_eq!(spans[1].text, b"DOG");
    }

    #[test]
    fn test_segment_edge_cases() {
        assert!(segment(b".......", 7, 1).is_empty());
        assert!(segment(b"A.B.C", 5, 1).is_empty());
        let spans = segment(b"AB", 2, 1);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, b"AB");
    }

    #[test]
    fn test_segment_sort_order() {
        // AB.
        // CDE
        let spans = segment(b"AB.CDE", 3, 2);
        let keys: Vec<(Coord, Direction)> = spans.iter().map(|s| (s.start, s.direction)).collect();
        assert_eq!(
            keys,
            vec![
                (Coord::new(0, 0), Direction::Across),
                (Coord::new(0, 0), Direction::Down),
                (Coord::new(0, 1), Direction::Down),
                (Coord::new(1, 0), Direction::Across),
            ]
        );
    }

    #[test]
    fn test_numbering_shares_start_cells() {
        let spans = vec![
            WordSpan {
                start: Coord::new(0, 0),
                direction: Direction::Across,
                text: b"CAT".to_vec(),
            },
            WordSpan {
                start: Coord::new(0, 0),
                direction: Direction::Down,
                text: b"CO".to_vec(),
            },
            WordSpan {
                start: Coord::new(0, 4),
                direction: Direction::Across,
                text: b"DOG".to_vec(),
            },
        ];
        assert_eq!(number(&spans), vec![1, 1, 2]);
    }

    #[test]
    fn test_solving_order() {
        use Direction::{Across, Down};
        assert_eq!(solving_order(&[Across, Down, Down, Across]), vec![0, 3, 1, 2]);
        assert_eq!(solving_order(&[Down, Down]), vec![0, 1]);
    }

    #[test]
    fn test_walk_wraps_with_loop_flag() {
        let grid = blocks(b"ABCDEFGHI");
        let br = Coord::new(2, 2);
        let right = walk(&grid, 3, 3, br, Step::Right);
        assert_eq!(right, Neighbor { coord: Coord::new(0, 0), looped: true });
        let down = walk(&grid, 3, 3, br, Step::Down);
        assert_eq!(down, Neighbor { coord: Coord::new(0, 0), looped: true });

        let back = walk(&grid, 3, 3, Coord::new(0, 0), Step::Left);
        assert_eq!(back, Neighbor { coord: br, looped: true });
    }

    #[test]
    fn test_walk_interior_and_row_wrap() {
        let grid = blocks(b"ABCDEFGHI");
        let step = walk(&grid, 3, 3, Coord::new(1, 1), Step::Right);
        assert_eq!(step, Neighbor { coord: Coord::new(1, 2), looped: false });

        let wrap = walk(&grid, 3, 3, Coord::new(0, 2), Step::Right);
        assert_eq!(wrap, Neighbor { coord: Coord::new(1, 0), looped: false });

        let col = walk(&grid, 3, 3, Coord::new(2, 0), Step::Down);
        assert_eq!(col, Neighbor { coord: Coord::new(0, 1), looped: false });
    }

    #[test]
    fn test_walk_skips_blocks() {
        // AB.
        // .CD
        let grid = blocks(b"AB..CD");
        let n = walk(&grid, 3, 2, Coord::new(0, 1), Step::Right);
        assert_eq!(n, Neighbor { coord: Coord::new(1, 1), looped: false });

        let up = walk(&grid, 3, 2, Coord::new(1, 1), Step::Up);
        assert_eq!(up.coord, Coord::new(0, 1));
    }

    #[test]
    fn test_corner_block_suppresses_loop_flag() {
        // Bottom-right is a block, so no move lands on or leaves it.
        let grid = blocks(b"ABCDEFGH.");
        let n = walk(&grid, 3, 3, Coord::new(2, 1), Step::Right);
        assert_eq!(n, Neighbor { coord: Coord::new(0, 0), looped: false });
    }

    #[test]
    fn test_all_block_grid_links_to_self() {
        let table = neighbors(&[true; 4], 2, 2);
        for (i, cell) in table.iter().enumerate() {
            for n in cell {
                assert_eq!(n.coord, Coord::from_index(i, 2));
                assert!(!n.looped);
            }
        }
    }
}
