mod common;

use std::io::Cursor;

use common::{FaBuilder, words};
use fa_reader::{FaError, FaFile, FieldLocation, ReadOnly};

#[test]
fn read_field_returns_exact_bytes_and_is_idempotent() {
    let payload: Vec<u8> = (0u8..40).collect();
    let image = FaBuilder::new(64, 32)
        .field("FIRST", words(&[11, 12]))
        .field("PAYLOAD", payload.clone())
        .field("LAST", words(&[13]))
        .build();
    let mut fa = image.open();
    let catalog = fa.catalog().expect("catalog");
    let location = catalog.get("PAYLOAD").expect("payload").location;

    let first = fa.read_field(&location).expect("first read");
    let second = fa.read_field(&location).expect("second read");
    assert_eq!(first.len() as u64, location.length);
    assert_eq!(first, payload);
    assert_eq!(first, second);
}

#[test]
fn read_named_builds_its_own_catalog() {
    let image = FaBuilder::new(64, 32).field("ONLY", words(&[5, 6])).build();
    let mut fa = image.open();
    assert_eq!(fa.read_named("ONLY", None).expect("read"), words(&[5, 6]));

    let err = fa.read_named("OTHER", None).unwrap_err();
    assert!(matches!(err, FaError::FieldNotFound(ref name) if name == "OTHER"));
}

#[test]
fn short_file_is_a_truncated_read() {
    let image = FaBuilder::new(64, 32).field("A", words(&[1])).build();
    let (offset, _) = image.locations[0];
    let mut bytes = image.bytes.clone();
    bytes.truncate(offset as usize + 3);

    let mut fa = FaFile::<ReadOnly, _>::from_handle(Cursor::new(bytes)).expect("header");
    let location = FieldLocation { offset, length: 8 };
    let err = fa.read_field(&location).unwrap_err();
    assert!(
        matches!(err, FaError::Truncated { expected: 8, found: 3, .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn read_past_end_finds_nothing() {
    let image = FaBuilder::new(64, 32).field("A", words(&[1])).build();
    let end = image.bytes.len() as u64;
    let mut fa = image.open();
    let err = fa
        .read_field(&FieldLocation { offset: end + 64, length: 16 })
        .unwrap_err();
    assert!(matches!(err, FaError::Truncated { found: 0, .. }));
}
