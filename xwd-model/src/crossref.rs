//! Cross references between clues ("See 17-Across").
//!
//! A reference is a run of hyphenated numbers followed by a direction:
//!
//! ```text
//! 17-Across          -> 17A
//! 23- and 40-Down    -> 23D 40D
//! 17-, 23-, 40-Across -> 17A 23A 40A
//! 3-/4-down          -> 3D 4D
//! ```
//!
//! Each number carries its own hyphen and may be followed, in this order, by
//! an optional `/`, `,`, space and `" and "`. Matching ignores case and scans
//! left to right without overlap.

use crate::coord::Direction;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Compiled cross-reference pattern: a number list, then a direction.
static CROSS_REF_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Digit runs inside a matched number list.
static NUMBER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn cross_ref_regex() -> &'static Regex {
    CROSS_REF_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(?P<nums>(?:\d+-/?,? ?(?: and )?)+)(?P<direction>across|down)")
            .expect("Invalid cross reference regex pattern")
    })
}

fn number_regex() -> &'static Regex {
    NUMBER_PATTERN.get_or_init(|| Regex::new(r"\d+").expect("Invalid number regex pattern"))
}

/// A clue referenced from another clue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CrossRef {
    /// Referenced clue number.
    pub number: u16,
    /// Referenced direction.
    pub direction: Direction,
}

/// Extract every cross reference from clue text.
pub fn parse_cross_refs(clue: &str) -> Vec<CrossRef> {
    let mut refs = Vec::new();

    for caps in cross_ref_regex().captures_iter(clue) {
        let direction = if caps["direction"].eq_ignore_ascii_case("across") {
            Direction::Across
        } else {
            Direction::Down
        };
        refs.extend(
            number_regex()
                .find_iter(&caps["nums"])
                .filter_map(|m| m.as_str().parse().ok())
                .map(|number| CrossRef { number, direction }),
        );
    }

    refs
}
