use std::io::Cursor;

use super::{INDEX_ENTRY_SIZE, IndexEntry, IndexTable};
use crate::error::{Error, FormatError};

fn table_bytes(entries: &[IndexEntry]) -> Vec<u8> {
    let mut out = Vec::new();
    for e in entries {
        e.write_to(&mut out).unwrap();
    }
    out
}

fn sample() -> Vec<IndexEntry> {
    vec![
        IndexEntry {
            unicode: 0x30,
            offset: 100,
        },
        IndexEntry {
            unicode: 0x41,
            offset: 140,
        },
        IndexEntry {
            unicode: 0x738B,
            offset: 140,
        },
    ]
}

#[test]
fn entry_is_six_bytes() {
    let bytes = table_bytes(&sample()[..1]);
    assert_eq!(bytes.len(), INDEX_ENTRY_SIZE);
    assert_eq!(bytes, [0x30, 0x00, 100, 0, 0, 0]);
}

#[test]
fn stream_and_slice_tables_agree() {
    let mut bytes = vec![0xAA; 3];
    bytes.extend(table_bytes(&sample()));

    let from_slice = IndexTable::parse(&bytes, 3, 3).unwrap();
    let mut cursor = Cursor::new(&bytes[3..]);
    let from_stream = IndexTable::read_from(&mut cursor, 3).unwrap();

    assert_eq!(from_slice, from_stream);
    assert_eq!(from_slice.entries(), sample().as_slice());
    assert!(from_slice.is_sorted_unique());
}

#[test]
fn find_hits_and_misses() {
    let table = IndexTable::new(sample());
    assert_eq!(table.find(0x30), Some(100));
    assert_eq!(table.find(0x738B), Some(140));
    assert_eq!(table.find(0x42), None);
    assert_eq!(IndexTable::default().find(0x30), None);
}

#[test]
fn truncated_table_is_rejected_before_parsing() {
    let bytes = table_bytes(&sample());
    assert!(matches!(
        IndexTable::parse(&bytes, 0, 4),
        Err(Error::Format(FormatError::Truncated { .. }))
    ));
    let mut cursor = Cursor::new(&bytes);
    assert!(IndexTable::read_from(&mut cursor, 4).is_err());
}

#[test]
fn duplicate_codes_are_not_sorted_unique() {
    let mut entries = sample();
    entries[1].unicode = 0x30;
    assert!(!IndexTable::new(entries).is_sorted_unique());
}
