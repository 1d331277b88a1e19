mod common;

use common::{empty_puzzle, puzzle_bytes, puzzle_file};
use xwd_core::error::XwdError;
use xwd_format::{PuzFile, Section, SectionKind};
use xwd_model::{Coord, Direction, LoadOptions, Puzzle, Session, Step};

fn load(bytes: Vec<u8>) -> Puzzle {
    Puzzle::from_bytes(bytes, LoadOptions::new()).unwrap()
}

#[test]
fn test_load_save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny.puz");

    let mut puzzle = load(empty_puzzle());
    puzzle.fill(Coord::new(0, 0), "c").unwrap();
    puzzle.fill(Coord::new(2, 2), "G").unwrap();
    puzzle.check_cell(Coord::new(0, 0)).unwrap();
    puzzle.save(&path).unwrap();

    let reloaded = Puzzle::open(&path, LoadOptions::new()).unwrap();
    reloaded.validate().unwrap();
    assert_eq!(reloaded.file().state, b"C---.---G");
    assert_eq!(reloaded.title(), "Tiny");
    assert_eq!(reloaded.copyright(), "\u{a9} 2024");
    assert_eq!(reloaded.notes(), "Warm-up");
    assert!(reloaded.cell(Coord::new(0, 0)).unwrap().is_locked());
    assert_eq!(reloaded.status(), puzzle.status());

    // A second save of the reloaded puzzle is byte-identical.
    let again = reloaded.to_bytes().unwrap();
    assert_eq!(again, std::fs::read(&path).unwrap());
    assert_eq!(
        PuzFile::from_bytes(again).unwrap().compute_checksums().unwrap(),
        puzzle.file().compute_checksums().unwrap()
    );
}

#[test]
fn test_save_emits_gext_and_ltim() {
    let mut puzzle = load(empty_puzzle());
    puzzle.timer_mut().resume();
    puzzle.timer_mut().advance(75);

    let file = PuzFile::from_bytes(puzzle.to_bytes().unwrap()).unwrap();
    file.validate().unwrap();
    assert_eq!(file.section(SectionKind::Ltim).unwrap().data, b"75,1");
    assert_eq!(file.gext(), Some(&[0u8; 9][..]));
    assert!(file.section(SectionKind::Rusr).is_none());

    let reloaded = Puzzle::from_file(file, LoadOptions::new()).unwrap();
    assert_eq!(reloaded.timer().elapsed(), 75);
    assert!(!reloaded.timer().is_running());
}

#[test]
fn test_flags_survive_with_spare_bits() {
    let gext = vec![0x80, 0, 0x0F, 0, 0, 0, 0, 0, 0];
    let bytes = puzzle_bytes(b"----.----", vec![Section::new(*b"GEXT", gext.clone())]);

    let puzzle = load(bytes);
    assert!(puzzle.cell(Coord::new(0, 0)).unwrap().is_shaded());
    let saved = PuzFile::from_bytes(puzzle.to_bytes().unwrap()).unwrap();
    assert_eq!(saved.gext(), Some(gext.as_slice()));
}

#[test]
fn test_given_cells_load_locked() {
    let mut gext = vec![0; 9];
    gext[1] = 0x40;
    let bytes = puzzle_bytes(b"-A--.----", vec![Section::new(*b"GEXT", gext)]);

    let mut puzzle = load(bytes);
    assert_eq!(puzzle.fill(Coord::new(0, 1), "Z"), Ok(false));
    assert_eq!(puzzle.cell(Coord::new(0, 1)).unwrap().content(), Some("A"));
    assert_eq!(puzzle.status().given, 1);
}

#[test]
fn test_loaded_state_bytes_survive_save() {
    let puzzle = load(puzzle_bytes(b"c\xC9--.----", Vec::new()));
    assert_eq!(puzzle.cell(Coord::new(0, 0)).unwrap().content(), Some("c"));
    assert_eq!(puzzle.cell(Coord::new(0, 1)).unwrap().content(), Some("\u{c9}"));

    let saved = PuzFile::from_bytes(puzzle.to_bytes().unwrap()).unwrap();
    assert_eq!(saved.state, b"c\xC9--.----");
    assert!(saved.section(SectionKind::Rusr).is_none());
    assert_eq!(puzzle.status().filled, 2);
}

#[test]
fn test_edit_replaces_loaded_state_byte() {
    let mut puzzle = load(puzzle_bytes(b"c\xC9--.----", Vec::new()));
    puzzle.fill(Coord::new(0, 1), "a").unwrap();
    assert!(puzzle.check_cell(Coord::new(0, 0)).unwrap());

    let saved = PuzFile::from_bytes(puzzle.to_bytes().unwrap()).unwrap();
    assert_eq!(saved.state, b"cA--.----");
}

#[test]
fn test_unknown_section_survives_save() {
    let opaque = Section::new(*b"XTRA", b"\x00\xffkeep me".to_vec());
    let bytes = puzzle_bytes(b"----.----", vec![opaque.clone()]);

    let mut puzzle = load(bytes);
    puzzle.fill(Coord::new(1, 0), "O").unwrap();
    let saved = PuzFile::from_bytes(puzzle.to_bytes().unwrap()).unwrap();
    saved.validate().unwrap();

    let tags: Vec<String> = saved.sections.iter().map(Section::tag_str).collect();
    assert_eq!(tags, vec!["LTIM", "GEXT", "XTRA"]);
    assert_eq!(saved.sections[2], opaque);
}

#[test]
fn test_garbage_prefix_survives_save() {
    let mut bytes = b"#!leading bytes\n".to_vec();
    bytes.extend_from_slice(&empty_puzzle());

    let puzzle = load(bytes);
    let saved = puzzle.to_bytes().unwrap();
    assert!(saved.starts_with(b"#!leading bytes\n"));
    assert_eq!(&saved[16 + 2..16 + 14], b"ACROSS&DOWN\0");
}

#[test]
fn test_changed_gext_length_blocks_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.puz");

    let mut file = puzzle_file(b"----.----", vec![Section::new(*b"GEXT", vec![0; 9])]);
    file.sections[0] = Section::new(*b"GEXT", vec![0; 4]);
    let mut puzzle = Puzzle::from_file(file, LoadOptions::new().skip_validation()).unwrap();
    puzzle.fill(Coord::new(0, 0), "C").unwrap();

    let err = puzzle.save(&path).unwrap_err();
    assert!(matches!(err, XwdError::SectionLengthChanged { loaded: 4, regenerated: 9, .. }));
    assert!(!path.exists());
    assert_eq!(puzzle.file().state, b"----.----");
}

#[test]
fn test_checksum_failures_block_load() {
    let mut bytes = empty_puzzle();
    bytes[0] ^= 0xFF;
    bytes[0x10] ^= 0xFF;

    let err = Puzzle::from_bytes(bytes.clone(), LoadOptions::new()).unwrap_err();
    assert_eq!(err.checksum_failures().len(), 2);

    let puzzle = Puzzle::from_bytes(bytes, LoadOptions::new().skip_validation()).unwrap();
    assert!(puzzle.validate().is_err());
    PuzFile::from_bytes(puzzle.to_bytes().unwrap())
        .unwrap()
        .validate()
        .unwrap();
}

#[test]
fn test_user_rebus_round_trip() {
    let mut puzzle = load(empty_puzzle());
    puzzle.fill(Coord::new(0, 0), "cat").unwrap();
    puzzle.fill(Coord::new(2, 2), "\u{2665}").unwrap();
    assert_eq!(puzzle.user_rebus(Coord::new(0, 0)), Some("CAT"));

    let file = PuzFile::from_bytes(puzzle.to_bytes().unwrap()).unwrap();
    let rusr = &file.section(SectionKind::Rusr).unwrap().data;
    assert_eq!(rusr.as_slice(), b"CAT\0\0\0\0\0\0\0\0[Y]\0");
    assert_eq!(file.state, b"C---.----");

    let reloaded = Puzzle::from_file(file, LoadOptions::new()).unwrap();
    assert_eq!(reloaded.cell(Coord::new(0, 0)).unwrap().content(), Some("CAT"));
    assert_eq!(reloaded.user_rebus(Coord::new(2, 2)), Some("\u{2665}"));
}

#[test]
fn test_rebus_solution_from_table() {
    let mut grbs = vec![0; 9];
    grbs[8] = 1;
    let bytes = puzzle_bytes(
        b"----.----",
        vec![
            Section::new(*b"GRBS", grbs),
            Section::new(*b"RTBL", b" 0:GAG;".to_vec()),
        ],
    );
    let puzzle = load(bytes);
    assert_eq!(puzzle.rebus_table().unwrap().get(0), Some("GAG"));
    assert_eq!(
        puzzle.cell(Coord::new(2, 2)).unwrap().rebus_solution(),
        Some("GAG")
    );
    assert_eq!(puzzle.cell(Coord::new(0, 0)).unwrap().rebus_solution(), None);
}

#[test]
fn test_wraparound_neighbors() {
    let puzzle = load(empty_puzzle());
    let corner = puzzle.cell(Coord::new(2, 2)).unwrap();
    for step in [Step::Right, Step::Down] {
        let n = corner.neighbor(step);
        assert_eq!(n.coord, Coord::new(0, 0));
        assert!(n.looped);
    }
    let centre_left = puzzle.cell(Coord::new(1, 0)).unwrap().neighbor(Step::Right);
    assert_eq!(centre_left.coord, Coord::new(1, 2));
    assert!(!centre_left.looped);
    let top = puzzle.cell(Coord::new(0, 1)).unwrap().neighbor(Step::Down);
    assert_eq!(top.coord, Coord::new(2, 1));
    assert!(!top.looped);
}

#[test]
fn test_loaded_complete_puzzle_locks_timer() {
    let bytes = puzzle_bytes(
        b"CATO.OWAG",
        vec![Section::new(*b"LTIM", b"300,0".to_vec())],
    );
    let mut puzzle = load(bytes);
    assert!(puzzle.is_complete());
    assert!(puzzle.timer().is_locked());
    puzzle.timer_mut().resume();
    puzzle.timer_mut().advance(10);
    assert_eq!(puzzle.timer().elapsed(), 300);
    assert_eq!(puzzle.word_at(Coord::new(1, 2), Direction::Down).unwrap().number(), 2);
}

#[test]
fn test_session() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.puz");
    let b = dir.path().join("b.puz");
    std::fs::write(&a, empty_puzzle()).unwrap();
    std::fs::write(&b, empty_puzzle()).unwrap();

    let mut session = Session::new();
    let ha = session.open(&a, LoadOptions::new()).unwrap();
    let hb = session.open(&b, LoadOptions::new()).unwrap();
    assert_ne!(ha, hb);
    assert_eq!(session.handles().collect::<Vec<_>>(), vec![ha, hb]);

    session.get_mut(hb).unwrap().fill(Coord::new(0, 2), "T").unwrap();
    assert!(session.save(hb).unwrap());
    assert_eq!(session.get(ha).unwrap().status().filled, 0);

    let closed = session.close(hb).unwrap();
    assert_eq!(closed.status().filled, 1);
    assert!(session.get(hb).is_none());
    assert!(!session.save(hb).unwrap());
    assert_eq!(session.len(), 1);

    let reopened = Puzzle::open(&b, LoadOptions::new()).unwrap();
    assert_eq!(reopened.cell(Coord::new(0, 2)).unwrap().content(), Some("T"));
    assert_eq!(session.path(ha), Some(a.as_path()));
}
