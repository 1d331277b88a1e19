use xwd_core::checksum::checksum;
use xwd_core::error::{ChecksumRegion, XwdError};
use xwd_format::{PuzFile, SectionKind};

/// Build a `.puz` image by hand: 3x3, ABC / D.E / FGH, four clues.
fn image(sections: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
    let solution = b"ABCD.EFGH";
    let state = b"A---.----";
    let cib: [u8; 8] = [3, 3, 4, 0, 1, 0, 0, 0];
    let strings: [&[u8]; 8] = [
        b"Title",
        b"Author",
        b"",
        b"Across one",
        b"Down one",
        b"Down two",
        b"Across three",
        b"Notes",
    ];

    let c_cib = checksum(0, &cib);
    let c_sol = checksum(0, solution);
    let c_state = checksum(0, state);
    let mut text_ck = Vec::new();
    for s in &strings[..2] {
        text_ck.extend_from_slice(s);
        text_ck.push(0);
    }
    for s in &strings[3..7] {
        text_ck.extend_from_slice(s);
    }
    text_ck.extend_from_slice(b"Notes\0");
    let c_part = checksum(0, &text_ck);
    let mut file_ck = checksum(c_cib, solution);
    file_ck = checksum(file_ck, state);
    file_ck = checksum(file_ck, &text_ck);

    let mut out = Vec::new();
    out.extend_from_slice(&file_ck.to_le_bytes());
    out.extend_from_slice(b"ACROSS&DOWN\0");
    out.extend_from_slice(&c_cib.to_le_bytes());
    let sums = [c_cib, c_sol, c_state, c_part];
    for (i, m) in b"ICHE".iter().enumerate() {
        out.push(m ^ (sums[i] & 0xFF) as u8);
    }
    for (i, m) in b"ATED".iter().enumerate() {
        out.push(m ^ (sums[i] >> 8) as u8);
    }
    out.extend_from_slice(b"1.3\0");
    out.extend_from_slice(&[0; 2]);
    out.extend_from_slice(&[0; 2]);
    out.extend_from_slice(&[0; 12]);
    out.extend_from_slice(&cib);
    assert_eq!(out.len(), 0x34);

    out.extend_from_slice(solution);
    out.extend_from_slice(state);
    for s in strings {
        out.extend_from_slice(s);
        out.push(0);
    }
    for (tag, data) in sections {
        out.extend_from_slice(*tag);
        out.extend_from_slice(&(data.len() as u16).to_le_bytes());
        out.extend_from_slice(&checksum(0, data).to_le_bytes());
        out.extend_from_slice(data);
        out.push(0);
    }
    out
}

#[test]
fn test_hand_built_image_validates() {
    let file = PuzFile::from_bytes(image(&[])).unwrap();
    file.validate().unwrap();
    assert_eq!(file.width(), 3);
    assert_eq!(file.text.clues.len(), 4);
    assert_eq!(file.text.notes, "Notes");
    assert_eq!(file.text.copyright, "");
}

#[test]
fn test_round_trip_is_byte_exact() {
    let gext = [0x80u8, 0, 0, 0, 0, 0, 0, 0x0F, 0];
    let bytes = image(&[
        (b"LTIM", &b"61,0"[..]),
        (b"GEXT", &gext[..]),
        (b"XTRA", &b"opaque"[..]),
    ]);
    let file = PuzFile::from_bytes(bytes.clone()).unwrap();
    file.validate().unwrap();
    assert_eq!(file.elapsed, Some(61));
    assert_eq!(file.to_bytes().unwrap(), bytes);
}

#[test]
fn test_garbage_prefix_survives() {
    let mut bytes = b"\x00\x01garbage".to_vec();
    bytes.extend_from_slice(&image(&[]));

    let file = PuzFile::from_bytes(bytes.clone()).unwrap();
    file.validate().unwrap();
    assert_eq!(file.header_garbage, b"\x00\x01garbage");
    assert_eq!(file.to_bytes().unwrap(), bytes);
}

#[test]
fn test_repeated_known_section_keeps_last_copy() {
    let bytes = image(&[(b"LTIM", &b"10,0"[..]), (b"LTIM", &b"20,1"[..])]);
    let file = PuzFile::from_bytes(bytes).unwrap();
    file.validate().unwrap();
    assert_eq!(file.elapsed, Some(20));
    assert_eq!(file.section(SectionKind::Ltim).unwrap().data, b"20,1");

    let saved = PuzFile::from_bytes(file.to_bytes().unwrap()).unwrap();
    assert_eq!(saved.sections.len(), 1);
    assert_eq!(saved.sections[0].data, b"20,1");
    saved.validate().unwrap();
}

#[test]
fn test_unknown_section_survives_in_order() {
    let bytes = image(&[(b"ZZZZ", &b"\x01\x02\x03"[..]), (b"LTIM", &b"5,1"[..])]);
    let file = PuzFile::from_bytes(bytes).unwrap();
    assert_eq!(file.sections.len(), 2);
    assert_eq!(file.sections[0].kind(), SectionKind::Unknown);

    let rewritten = PuzFile::from_bytes(file.to_bytes().unwrap()).unwrap();
    let tags: Vec<String> = rewritten.sections.iter().map(|s| s.tag_str()).collect();
    assert_eq!(tags, vec!["LTIM", "ZZZZ"]);
    assert_eq!(rewritten.sections[1].data, b"\x01\x02\x03");
    rewritten.validate().unwrap();
}

#[test]
fn test_every_checksum_failure_reported() {
    let mut bytes = image(&[(b"LTIM", &b"5,1"[..])]);
    // Corrupt the stored CIB checksum, one masked byte and the section checksum.
    bytes[0x0E] ^= 0xFF;
    bytes[0x15] ^= 0xFF;
    let ltim = bytes.len() - (4 + 2 + 2 + 3 + 1);
    bytes[ltim + 6] ^= 0xFF;

    let file = PuzFile::from_bytes(bytes).unwrap();
    let err = file.validate().unwrap_err();
    let regions: Vec<&ChecksumRegion> = err.checksum_failures().iter().map(|f| &f.region).collect();
    assert_eq!(
        regions,
        vec![
            &ChecksumRegion::Cib,
            &ChecksumRegion::MaskedHigh(1),
            &ChecksumRegion::Section("LTIM".into()),
        ]
    );
}

#[test]
fn test_grid_edit_breaks_file_checksum_only() {
    let mut bytes = image(&[]);
    // State grid starts after the solution.
    bytes[0x34 + 9 + 1] = b'B';
    let err = PuzFile::from_bytes(bytes).unwrap().validate().unwrap_err();
    let regions: Vec<ChecksumRegion> = err
        .checksum_failures()
        .iter()
        .map(|f| f.region.clone())
        .collect();
    assert!(regions.contains(&ChecksumRegion::File));
    assert!(regions.contains(&ChecksumRegion::MaskedLow(2)));
    assert!(!regions.contains(&ChecksumRegion::Cib));
}

#[test]
fn test_truncations_are_format_errors() {
    let bytes = image(&[(b"GEXT", &[0u8; 9][..])]);

    // Inside the header, inside the grids, inside the text, inside a section.
    for cut in [0x20, 0x34 + 4, 0x34 + 18 + 3, bytes.len() - 5] {
        let err = PuzFile::from_bytes(bytes[..cut].to_vec()).unwrap_err();
        assert!(err.is_format_error(), "cut at {cut}: {err}");
    }
}

#[test]
fn test_missing_magic() {
    let err = PuzFile::from_bytes(b"not a crossword at all".to_vec()).unwrap_err();
    assert!(matches!(err, XwdError::MagicNotFound { .. }));
}

#[test]
fn test_rebus_sections_decode() {
    let mut grbs = [0u8; 9];
    grbs[0] = 2;
    let mut rusr = Vec::new();
    for i in 0..9 {
        if i == 3 {
            rusr.extend_from_slice(b"[Y]");
        }
        rusr.push(0);
    }
    let bytes = image(&[
        (b"GRBS", &grbs[..]),
        (b"RTBL", &b" 0:CAT; 1:DOG;"[..]),
        (b"RUSR", &rusr[..]),
    ]);
    let file = PuzFile::from_bytes(bytes.clone()).unwrap();
    file.validate().unwrap();

    let table = file.rebus_table.as_ref().unwrap();
    assert_eq!(table.for_grid_byte(grbs[0]), Some("DOG"));
    let user = file.user_rebus.as_ref().unwrap();
    assert_eq!(user[3].as_deref(), Some("\u{2665}"));
    assert_eq!(user.iter().flatten().count(), 1);
    assert_eq!(file.to_bytes().unwrap(), bytes);
}

#[test]
fn test_write_to_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("copy.puz");
    let bytes = image(&[(b"LTIM", &b"0,1"[..])]);

    PuzFile::from_bytes(bytes.clone()).unwrap().write(&path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), bytes);
    PuzFile::open(&path).unwrap().validate().unwrap();
}
