//! Info command implementation.

use crate::utils::{load_puzzle, print_status};
use serde::Serialize;
use std::path::Path;
use xwd_format::SectionKind;
use xwd_model::{Puzzle, Status};

/// JSON view of one extension section.
#[derive(Debug, Serialize)]
struct SectionJson {
    tag: String,
    len: usize,
    checksum: u16,
    known: bool,
}

/// JSON output for `xwd info`.
#[derive(Debug, Serialize)]
struct InfoJson<'a> {
    file: String,
    version: String,
    title: &'a str,
    author: &'a str,
    copyright: &'a str,
    notes: &'a str,
    width: usize,
    height: usize,
    clues: usize,
    scrambled: bool,
    checksums_ok: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    checksum_failures: Vec<String>,
    sections: Vec<SectionJson>,
    status: Status,
    timer: String,
}

pub fn cmd_info(file: &Path, json: bool, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let puzzle = load_puzzle(file, force)?;
    let failures: Vec<String> = match puzzle.validate() {
        Ok(()) => Vec::new(),
        Err(e) if !e.checksum_failures().is_empty() => {
            e.checksum_failures().iter().map(ToString::to_string).collect()
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        let output = info_json(file, &puzzle, failures);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let header = &puzzle.file().header;
    println!("Puzzle Information");
    println!("==================");
    println!("File: {}", file.display());
    println!("Version: {}", puzzle.version());
    println!("Title: {}", puzzle.title());
    println!("Author: {}", puzzle.author());
    println!("Copyright: {}", puzzle.copyright());
    println!("Size: {}x{}", puzzle.width(), puzzle.height());
    println!("Clues: {}", header.clue_count);
    if header.is_scrambled() {
        println!("Scrambled: yes (tag {:#06x})", header.scramble_tag);
    }
    if !puzzle.notes().is_empty() {
        println!("Notes: {}", puzzle.notes());
    }
    if !puzzle.file().header_garbage.is_empty() {
        println!(
            "Leading bytes: {} (kept on save)",
            puzzle.file().header_garbage.len()
        );
    }

    println!();
    if failures.is_empty() {
        println!("Checksums: OK");
    } else {
        println!("Checksums: {} failed", failures.len());
        for failure in &failures {
            println!("  {}", failure);
        }
    }

    let sections = puzzle.file().ordered_sections();
    if !sections.is_empty() {
        println!();
        println!("Sections:");
        for section in sections {
            let note = if section.kind() == SectionKind::Unknown {
                " (opaque)"
            } else {
                ""
            };
            println!(
                "  {} {:>6} bytes  checksum {:#06x}{}",
                section.tag_str(),
                section.len(),
                section.checksum,
                note
            );
        }
    }

    if let Some(table) = puzzle.rebus_table() {
        println!();
        println!("Rebus table:");
        for (key, value) in table.iter() {
            println!("  {:>2}: {}", key, value);
        }
    }

    println!();
    println!("Progress:");
    print_status(&puzzle.status(), &puzzle.timer().format_hms());

    Ok(())
}

fn info_json<'a>(file: &Path, puzzle: &'a Puzzle, failures: Vec<String>) -> InfoJson<'a> {
    let header = &puzzle.file().header;
    InfoJson {
        file: file.display().to_string(),
        version: puzzle.version(),
        title: puzzle.title(),
        author: puzzle.author(),
        copyright: puzzle.copyright(),
        notes: puzzle.notes(),
        width: puzzle.width(),
        height: puzzle.height(),
        clues: usize::from(header.clue_count),
        scrambled: header.is_scrambled(),
        checksums_ok: failures.is_empty(),
        checksum_failures: failures,
        sections: puzzle
            .file()
            .ordered_sections()
            .into_iter()
            .map(|s| SectionJson {
                tag: s.tag_str(),
                len: s.len(),
                checksum: s.checksum,
                known: s.kind() != SectionKind::Unknown,
            })
            .collect(),
        status: puzzle.status(),
        timer: puzzle.timer().format_hms().trim_start().to_string(),
    }
}
