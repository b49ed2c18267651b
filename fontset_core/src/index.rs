//! Index table: one `(code point, record offset)` pair per glyph.
//!
//! Entries are six bytes (`u16` code point, `u32` absolute offset) and are
//! stored in ascending code point order.

use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::wire::{self, ByteReader};

/// Bytes per index entry on disk.
pub const INDEX_ENTRY_SIZE: usize = 2 + 4;

/// Upper bound on entries reserved before any are read from a stream.
const STREAM_RESERVE_CAP: usize = 4096;

/// One index table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexEntry {
    pub unicode: u16,
    /// Absolute container offset of this glyph's outline record.
    pub offset: u32,
}

impl IndexEntry {
    pub fn write_to<W: Write>(self, dst: &mut W) -> Result<()> {
        wire::write_u16(dst, self.unicode)?;
        wire::write_u32(dst, self.offset)
    }

    pub(crate) fn read_from<R: Read>(src: &mut R) -> Result<Self> {
        Ok(Self {
            unicode: wire::read_u16(src)?,
            offset: wire::read_u32(src)?,
        })
    }

    pub(crate) fn parse(r: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            unicode: r.u16()?,
            offset: r.u32()?,
        })
    }
}

/// Owned copy of a container's index table, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexTable {
    entries: Vec<IndexEntry>,
}

impl IndexTable {
    pub fn new(entries: Vec<IndexEntry>) -> Self {
        Self { entries }
    }

    /// Read `count` entries from a stream positioned at the table.
    pub fn read_from<R: Read>(src: &mut R, count: usize) -> Result<Self> {
        let mut entries = Vec::new();
        let reserve = count.min(STREAM_RESERVE_CAP);
        entries
            .try_reserve_exact(reserve)
            .map_err(|_| Error::Allocation {
                requested: reserve * size_of::<IndexEntry>(),
            })?;
        for _ in 0..count {
            entries.push(IndexEntry::read_from(src)?);
        }
        Ok(Self { entries })
    }

    /// Parse `count` entries from a slice starting at `start`.
    pub fn parse(data: &[u8], start: usize, count: usize) -> Result<Self> {
        let mut r = ByteReader::at(data, start)?;
        // Bounds-check the whole table before reserving for it.
        r.clone().skip(count.saturating_mul(INDEX_ENTRY_SIZE))?;
        let entries = (0..count)
            .map(|_| IndexEntry::parse(&mut r))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    /// Offset of the record for `unicode`, if indexed.
    ///
    /// Binary search, relying on the ascending order the encoder guarantees.
    pub fn find(&self, unicode: u16) -> Option<u32> {
        self.entries
            .binary_search_by_key(&unicode, |e| e.unicode)
            .ok()
            .map(|i| self.entries[i].offset)
    }

    /// Whether entries are strictly ascending by code point.
    pub fn is_sorted_unique(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].unicode < w[1].unicode)
    }
}

impl<'a> IntoIterator for &'a IndexTable {
    type Item = &'a IndexEntry;
    type IntoIter = std::slice::Iter<'a, IndexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests;
