use std::io::Cursor;

use super::{RecordSpan, decode_outline, lookup_in_file, lookup_in_memory, lookup_in_path};
use crate::encoder::encode;
use crate::error::{Error, FormatError};
use crate::fixture::{FixtureEngine, template};
use crate::header::FontSetHeader;
use crate::reader::FontSet;

fn sample() -> Vec<u8> {
    let mut engine = FixtureEngine::with_a();
    for cp in [0x30u16, 0x31, 0x4E00, 0x738B] {
        engine.insert(cp, vec![vec![(0.0, 0.0), (f32::from(cp % 97), 3.0)]]);
    }
    encode(&engine, "01一王ABZ", template()).unwrap()
}

#[test]
fn file_and_memory_lookups_agree() {
    let bytes = sample();
    let set = FontSet::parse(&bytes).unwrap();
    let entries: Vec<_> = set.entries().collect();
    for (i, entry) in entries.iter().enumerate() {
        let expected = RecordSpan {
            offset: entry.offset,
            end: entries.get(i + 1).map(|next| next.offset),
        };
        let in_memory = lookup_in_memory(entry.unicode, &bytes).unwrap();
        let in_file = lookup_in_file(entry.unicode, &mut Cursor::new(&bytes)).unwrap();
        assert_eq!(in_memory, Some(expected));
        assert_eq!(in_file, Some(expected));
    }
}

#[test]
fn absent_code_points_are_none() {
    let bytes = sample();
    for cp in [0x00, 0x29, 0x32, 0x43, 0xFFFF] {
        assert_eq!(lookup_in_memory(cp, &bytes).unwrap(), None);
        assert_eq!(lookup_in_file(cp, &mut Cursor::new(&bytes)).unwrap(), None);
    }
}

#[test]
fn memory_lookup_then_decode() {
    let bytes = sample();
    let span = lookup_in_memory(0x738B, &bytes).unwrap().unwrap();
    let record = decode_outline(&bytes, span).unwrap();
    assert_eq!(record.contour_lengths, [2]);
    assert_eq!(record.points[1].x, (0x738B % 97) as i16);
}

#[test]
fn missing_last_glyph_decodes_empty() {
    let bytes = encode(&FixtureEngine::with_a(), "ZA", template()).unwrap();
    let span = lookup_in_memory(u16::from(b'Z'), &bytes).unwrap().unwrap();
    assert_eq!(span.offset as usize, bytes.len());
    assert_eq!(span.end, None);
    let record = decode_outline(&bytes, span).unwrap();
    assert_eq!(record.contour_count(), 0);
}

#[test]
fn missing_middle_glyph_decodes_empty() {
    let mut engine = FixtureEngine::with_a();
    engine.insert(0x43, vec![vec![(0.0, 0.0), (4.0, 0.0), (2.0, 3.0)]]);
    let bytes = encode(&engine, "ABC", template()).unwrap();

    let b = lookup_in_memory(0x42, &bytes).unwrap().unwrap();
    let c = lookup_in_memory(0x43, &bytes).unwrap().unwrap();
    assert_eq!(b.offset, c.offset);
    assert!(b.is_empty());
    assert_eq!(lookup_in_file(0x42, &mut Cursor::new(&bytes)).unwrap(), Some(b));

    assert_eq!(decode_outline(&bytes, b).unwrap().contour_count(), 0);
    assert_eq!(decode_outline(&bytes, c).unwrap().contour_lengths, [3]);
}

#[test]
fn span_past_the_end_is_rejected() {
    let bytes = sample();
    let len = bytes.len() as u32;
    let past = RecordSpan {
        offset: len - 4,
        end: Some(len + 1),
    };
    assert!(matches!(
        decode_outline(&bytes, past),
        Err(Error::Format(FormatError::OffsetOutOfRange { .. }))
    ));
    let inverted = RecordSpan {
        offset: len - 1,
        end: Some(len - 2),
    };
    assert!(decode_outline(&bytes, inverted).is_err());
}

#[test]
fn record_overrunning_its_span_is_truncated() {
    let bytes = sample();
    let span = lookup_in_memory(0x30, &bytes).unwrap().unwrap();
    let short = RecordSpan {
        end: Some(span.offset + 4),
        ..span
    };
    assert!(matches!(
        decode_outline(&bytes, short),
        Err(Error::Format(FormatError::Truncated { .. }))
    ));
}

#[test]
fn lookup_on_disk() {
    let bytes = sample();
    let path = std::env::temp_dir().join(format!("fontset_lookup_{}.bin", std::process::id()));
    std::fs::write(&path, &bytes).unwrap();
    let found = lookup_in_path(0x4E00, &path).unwrap();
    let missing = lookup_in_path(0x4E01, &path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(found, lookup_in_memory(0x4E00, &bytes).unwrap());
    assert!(found.is_some());
    assert_eq!(missing, None);
}

#[test]
fn missing_file_is_io_error() {
    let path = std::env::temp_dir().join("fontset_lookup_does_not_exist.bin");
    assert!(matches!(lookup_in_path(0x41, &path), Err(Error::Io(_))));
}

#[test]
fn truncated_index_is_a_format_error() {
    let bytes = sample();
    let end = FontSetHeader::parse(&bytes).unwrap().index_end();
    let cut = &bytes[..end - 3];

    assert!(matches!(
        lookup_in_memory(0x41, cut),
        Err(Error::Format(FormatError::IndexAreaSize { .. }))
    ));
    // The stream scan only notices once it reaches the cut.
    assert_eq!(
        lookup_in_file(0x30, &mut Cursor::new(cut)).unwrap(),
        lookup_in_memory(0x30, &bytes).unwrap()
    );
    assert!(matches!(
        lookup_in_file(0xFFFF, &mut Cursor::new(cut)),
        Err(Error::Format(FormatError::Truncated { .. }))
    ));
}

#[test]
fn garbage_header_is_rejected() {
    let garbage = [0xFFu8; 64];
    assert!(lookup_in_memory(0x41, &garbage).is_err());
    assert!(lookup_in_file(0x41, &mut Cursor::new(&garbage[..])).is_err());
    assert!(lookup_in_memory(0x41, &[]).is_err());
}
