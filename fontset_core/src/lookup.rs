//! Code point to record offset resolution, from a stream or from memory.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{FormatError, Result};
use crate::header::HeaderSkip;
use crate::index::{INDEX_ENTRY_SIZE, IndexEntry};
use crate::outline::OutlineRecord;
use crate::wire::ByteReader;

/// Where a glyph's record sits in a container.
///
/// A glyph the font lacked has a zero-byte record that shares its offset
/// with the following record, so the offset alone is not enough to decode
/// it: `end` bounds the record at the next entry's offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSpan {
    /// Absolute container offset of the record.
    pub offset: u32,
    /// Offset of the next record; `None` for the last entry, whose record
    /// runs to the end of the container.
    pub end: Option<u32>,
}

impl RecordSpan {
    /// Whether the record is zero bytes long (a glyph the font lacked).
    pub fn is_empty(self) -> bool {
        self.end == Some(self.offset)
    }
}

/// Find the record of `unicode` by scanning a container stream.
///
/// Reads only the header fields needed to reach the index, then walks the
/// entries front to back. Stops one entry past the first match. Unbuffered
/// sources (a bare `File`) should be wrapped in a `BufReader`.
pub fn lookup_in_file<R: Read>(unicode: u16, src: &mut R) -> Result<Option<RecordSpan>> {
    let skip = HeaderSkip::read_from(src)?;
    let count = skip.entry_count();
    for i in 0..count {
        let entry = IndexEntry::read_from(src)?;
        if entry.unicode == unicode {
            let end = if i + 1 < count {
                Some(IndexEntry::read_from(src)?.offset)
            } else {
                None
            };
            return Ok(Some(RecordSpan {
                offset: entry.offset,
                end,
            }));
        }
    }
    Ok(None)
}

/// Open `path` and run [`lookup_in_file`] over it.
pub fn lookup_in_path(unicode: u16, path: impl AsRef<Path>) -> Result<Option<RecordSpan>> {
    let mut src = BufReader::new(File::open(path)?);
    lookup_in_file(unicode, &mut src)
}

/// Find the record of `unicode` in an in-memory container.
///
/// Binary search over the index in place; nothing is copied.
pub fn lookup_in_memory(unicode: u16, data: &[u8]) -> Result<Option<RecordSpan>> {
    let (skip, start) = HeaderSkip::parse(data)?;
    let count = skip.entry_count();
    let entry_at = |i: usize| -> Result<IndexEntry> {
        let mut r = ByteReader::at(data, start + i * INDEX_ENTRY_SIZE)?;
        IndexEntry::parse(&mut r)
    };
    let (mut lo, mut hi) = (0, count);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let entry = entry_at(mid)?;
        match entry.unicode.cmp(&unicode) {
            std::cmp::Ordering::Less => lo = mid + 1,
            std::cmp::Ordering::Greater => hi = mid,
            std::cmp::Ordering::Equal => {
                let end = if mid + 1 < count {
                    Some(entry_at(mid + 1)?.offset)
                } else {
                    None
                };
                return Ok(Some(RecordSpan {
                    offset: entry.offset,
                    end,
                }));
            }
        }
    }
    Ok(None)
}

/// Decode the outline record located by `span` in `data`.
///
/// The record may not extend past `span.end`; an empty span is the empty
/// record of a glyph the font did not have. See [`OutlineRecord::parse`].
pub fn decode_outline(data: &[u8], span: RecordSpan) -> Result<OutlineRecord> {
    let len = data.len();
    let end = span.end.map_or(len, |e| e as usize);
    if end > len {
        return Err(FormatError::OffsetOutOfRange {
            offset: span.end.unwrap_or_default(),
            len,
        }
        .into());
    }
    if span.offset as usize > end {
        return Err(FormatError::OffsetOutOfRange {
            offset: span.offset,
            len,
        }
        .into());
    }
    OutlineRecord::parse(&data[..end], span.offset as usize)
}

#[cfg(test)]
mod tests;
