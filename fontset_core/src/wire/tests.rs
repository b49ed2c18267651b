use std::io::Cursor;

use super::{ByteReader, read_u32, skip, write_i16, write_u32};
use crate::error::{Error, FormatError};

#[test]
fn slice_reads_are_little_endian() {
    let data = [0x34, 0x12, 0xFE, 0xFF, 0x78, 0x56, 0x34, 0x12];
    let mut r = ByteReader::new(&data);
    assert_eq!(r.u16().unwrap(), 0x1234);
    assert_eq!(r.i16().unwrap(), -2);
    assert_eq!(r.u32().unwrap(), 0x1234_5678);
    assert_eq!(r.remaining(), 0);
}

#[test]
fn slice_read_past_end_is_truncated() {
    let data = [1, 2, 3];
    let mut r = ByteReader::new(&data);
    r.u16().unwrap();
    match r.u16() {
        Err(Error::Format(FormatError::Truncated { needed, available })) => {
            assert_eq!(needed, 4);
            assert_eq!(available, 3);
        }
        other => panic!("expected truncation, got {other:?}"),
    }
    // A failed read does not move the cursor.
    assert_eq!(r.position(), 2);
    assert_eq!(r.u8().unwrap(), 3);
}

#[test]
fn reader_at_rejects_start_past_end() {
    let data = [0u8; 4];
    assert!(ByteReader::at(&data, 4).is_ok());
    assert!(ByteReader::at(&data, 5).is_err());
}

#[test]
fn stream_short_read_maps_to_format_error() {
    let mut src = Cursor::new(vec![1u8, 2]);
    assert!(matches!(
        read_u32(&mut src),
        Err(Error::Format(FormatError::Truncated { .. }))
    ));
}

#[test]
fn stream_skip_reports_missing_bytes() {
    let mut src = Cursor::new(vec![0u8; 3]);
    assert!(skip(&mut src, 3).is_ok());
    let mut src = Cursor::new(vec![0u8; 3]);
    assert!(skip(&mut src, 4).is_err());
}

#[test]
fn writes_are_little_endian() {
    let mut out = Vec::new();
    write_i16(&mut out, -2).unwrap();
    write_u32(&mut out, 0x0102_0304).unwrap();
    assert_eq!(out, [0xFE, 0xFF, 0x04, 0x03, 0x02, 0x01]);
}
