//! Container reading: header plus index from a stream, or a zero-copy
//! [`FontSet`] view over an in-memory container.

use std::io::Read;

use crate::error::{FormatError, Result};
use crate::header::FontSetHeader;
use crate::index::{INDEX_ENTRY_SIZE, IndexEntry, IndexTable};
use crate::outline::OutlineRecord;
use crate::wire::ByteReader;

/// Read the header from the start of a stream.
pub fn read_header<R: Read>(src: &mut R) -> Result<FontSetHeader> {
    FontSetHeader::read_from(src)
}

/// Read the index table that follows `header` in the stream.
pub fn read_index<R: Read>(src: &mut R, header: &FontSetHeader) -> Result<IndexTable> {
    IndexTable::read_from(src, header.entry_count())
}

/// Read header and index from the start of a stream.
pub fn read_container<R: Read>(src: &mut R) -> Result<(FontSetHeader, IndexTable)> {
    let header = read_header(src)?;
    let index = read_index(src, &header)?;
    Ok((header, index))
}

/// Read-only view of a container held in memory.
///
/// Index entries and records are decoded on demand straight from the
/// borrowed bytes; decoded records are owned and outlive the view.
#[derive(Debug, Clone)]
pub struct FontSet<'a> {
    data: &'a [u8],
    header: FontSetHeader,
}

impl<'a> FontSet<'a> {
    /// Parse the header and check that the index table fits in `data`.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let header = FontSetHeader::parse(data)?;
        Ok(Self { data, header })
    }

    pub fn header(&self) -> &FontSetHeader {
        &self.header
    }

    /// The whole container.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Number of index entries.
    pub fn len(&self) -> usize {
        self.header.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`th index entry in file order.
    pub fn entry(&self, i: usize) -> Option<IndexEntry> {
        if i >= self.len() {
            return None;
        }
        let mut r = ByteReader::at(self.data, self.header.index_start() + i * INDEX_ENTRY_SIZE).ok()?;
        IndexEntry::parse(&mut r).ok()
    }

    pub fn entries(&self) -> impl Iterator<Item = IndexEntry> + '_ {
        (0..self.len()).filter_map(|i| self.entry(i))
    }

    /// Copy the index into an owned table.
    pub fn index(&self) -> Result<IndexTable> {
        IndexTable::parse(self.data, self.header.index_start(), self.len())
    }

    /// Position of `unicode` in the index.
    fn position(&self, unicode: u16) -> Option<usize> {
        let (mut lo, mut hi) = (0, self.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let entry = self.entry(mid)?;
            match entry.unicode.cmp(&unicode) {
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
                std::cmp::Ordering::Equal => return Some(mid),
            }
        }
        None
    }

    /// Record offset for `unicode`, if indexed.
    pub fn lookup(&self, unicode: u16) -> Option<u32> {
        self.position(unicode)
            .and_then(|i| self.entry(i))
            .map(|e| e.offset)
    }

    /// Decode the outline for `unicode`; `None` if it is not indexed.
    ///
    /// Glyphs the font lacked decode to an empty record.
    pub fn glyph(&self, unicode: u16) -> Option<Result<OutlineRecord>> {
        self.position(unicode).map(|i| self.decode_entry(i))
    }

    /// Decode the record of the `i`th index entry.
    pub fn decode_entry(&self, i: usize) -> Result<OutlineRecord> {
        let (start, end) = self.record_span(i)?;
        OutlineRecord::parse(&self.data[..end], start)
    }

    /// Byte span `[start, end)` reserved for the `i`th record: from its own
    /// offset to the next entry's offset, or to the end of the container.
    fn record_span(&self, i: usize) -> Result<(usize, usize)> {
        let len = self.data.len();
        let out_of_range = |offset: u32| FormatError::OffsetOutOfRange { offset, len };
        let entry = self.entry(i).ok_or(out_of_range(0))?;
        let start = entry.offset as usize;
        if start < self.header.index_end() || start > len {
            return Err(out_of_range(entry.offset).into());
        }
        let end = match self.entry(i + 1) {
            Some(next) if (next.offset as usize) < start || next.offset as usize > len => {
                return Err(out_of_range(next.offset).into());
            }
            Some(next) => next.offset as usize,
            None => len,
        };
        Ok((start, end))
    }

    /// Check the whole container: ascending unique code points, and every
    /// record decoding to exactly the bytes between its offset and the next.
    pub fn validate(&self) -> Result<()> {
        let mut prev: Option<u16> = None;
        for i in 0..self.len() {
            let entry = self.entry(i).ok_or(FormatError::IndexAreaSize {
                size: self.header.index_area_size,
            })?;
            if prev.is_some_and(|p| p >= entry.unicode) {
                return Err(FormatError::IndexOrder {
                    unicode: entry.unicode,
                }
                .into());
            }
            prev = Some(entry.unicode);

            let (start, end) = self.record_span(i)?;
            let record = OutlineRecord::parse(&self.data[..end], start)?;
            let actual = if start == end { 0 } else { record.encoded_len() };
            if actual != end - start {
                return Err(FormatError::RecordSize {
                    unicode: entry.unicode,
                    actual,
                    slot: end - start,
                }
                .into());
            }
        }
        Ok(())
    }
}
