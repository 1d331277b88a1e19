//! Builders for small `.puz` images.

#![allow(dead_code)]

use xwd_format::{PuzFile, PuzHeader, Section, TextBlock};

/// ```text
/// CAT
/// O.O
/// WAG
/// ```
pub const SOLUTION: &[u8] = b"CATO.OWAG";

/// Clues in sorted-word order: 1A, 1D, 2D, 3A.
pub const CLUES: [&str; 4] = ["Pet", "Milker", "See 1-Across", "Shake"];

/// A 3x3 puzzle with the given state grid and sections, checksums filled in.
pub fn puzzle_file(state: &[u8], sections: Vec<Section>) -> PuzFile {
    let mut file = PuzFile {
        header_garbage: Vec::new(),
        header: PuzHeader {
            width: 3,
            height: 3,
            clue_count: CLUES.len() as u16,
            ..PuzHeader::default()
        },
        solution: SOLUTION.to_vec(),
        state: state.to_vec(),
        text: TextBlock {
            title: "Tiny".into(),
            author: "Setter".into(),
            copyright: "\u{a9} 2024".into(),
            clues: CLUES.map(String::from).to_vec(),
            notes: "Warm-up".into(),
            spans: Vec::new(),
        },
        sections,
        rebus_table: None,
        user_rebus: None,
        elapsed: None,
    };
    file.refresh_checksums().unwrap();
    file
}

/// Encoded bytes of [`puzzle_file`].
pub fn puzzle_bytes(state: &[u8], sections: Vec<Section>) -> Vec<u8> {
    puzzle_file(state, sections).to_bytes().unwrap()
}

/// An empty 3x3 image.
pub fn empty_puzzle() -> Vec<u8> {
    puzzle_bytes(b"----.----", Vec::new())
}
