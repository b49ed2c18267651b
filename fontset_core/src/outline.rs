//! Per-glyph outline records.
//!
//! ```text
//! i16 x0, y0, x1, y1        bounding box
//! i16 advance
//! u8  contour count C
//! u8  contour lengths[C]    points per contour
//! i16 points[2 * sum]       (x, y) pairs, contour by contour
//! ```
//!
//! A glyph the font cannot supply has a zero-byte record: its offset equals
//! the next record's offset (or the container end for the last glyph).

use std::io::Write;

use crate::error::{Error, Result};
use crate::wire::{self, ByteReader};

/// Bytes before the contour length array.
pub const RECORD_FIXED_LEN: usize = 5 * 2 + 1;

/// One polyline vertex in font units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

impl From<(i16, i16)> for Point {
    fn from((x, y): (i16, i16)) -> Self {
        Self { x, y }
    }
}

/// Integer glyph bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x0: i16,
    pub y0: i16,
    pub x1: i16,
    pub y1: i16,
}

impl BoundingBox {
    pub fn new(x0: i16, y0: i16, x1: i16, y1: i16) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(self) -> i32 {
        i32::from(self.x1) - i32::from(self.x0)
    }

    pub fn height(self) -> i32 {
        i32::from(self.y1) - i32::from(self.y0)
    }
}

/// Decoded (or to-be-encoded) outline of a single glyph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineRecord {
    pub bbox: BoundingBox,
    pub advance: i16,
    /// Point count of each contour.
    pub contour_lengths: Vec<u8>,
    /// All contour points, concatenated in contour order.
    pub points: Vec<Point>,
}

impl OutlineRecord {
    /// The record of a glyph that occupies no bytes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a record from per-contour point lists.
    ///
    /// Counts that do not fit the one-byte fields are rejected rather than
    /// truncated. `code_point` only labels the error.
    pub fn from_contours(
        code_point: u16,
        bbox: BoundingBox,
        advance: i16,
        contours: &[Vec<Point>],
    ) -> Result<Self> {
        if contours.len() > u8::MAX as usize {
            return Err(Error::TooManyContours {
                code_point,
                contours: contours.len(),
            });
        }
        let mut contour_lengths = Vec::with_capacity(contours.len());
        for (i, contour) in contours.iter().enumerate() {
            let len = u8::try_from(contour.len()).map_err(|_| Error::ContourTooLong {
                code_point,
                contour: i,
                points: contour.len(),
            })?;
            contour_lengths.push(len);
        }
        Ok(Self {
            bbox,
            advance,
            contour_lengths,
            points: contours.concat(),
        })
    }

    pub fn contour_count(&self) -> usize {
        self.contour_lengths.len()
    }

    /// Total points across all contours.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contour_lengths.is_empty()
    }

    /// Iterate contours as point slices.
    pub fn contours(&self) -> Contours<'_> {
        Contours {
            lengths: self.contour_lengths.iter(),
            points: &self.points,
        }
    }

    /// Bytes this record occupies when encoded.
    pub fn encoded_len(&self) -> usize {
        RECORD_FIXED_LEN + self.contour_lengths.len() + self.points.len() * 4
    }

    pub fn write_to<W: Write>(&self, dst: &mut W) -> Result<()> {
        debug_assert_eq!(
            self.contour_lengths.iter().map(|&l| l as usize).sum::<usize>(),
            self.points.len()
        );
        wire::write_i16(dst, self.bbox.x0)?;
        wire::write_i16(dst, self.bbox.y0)?;
        wire::write_i16(dst, self.bbox.x1)?;
        wire::write_i16(dst, self.bbox.y1)?;
        wire::write_i16(dst, self.advance)?;
        wire::write_u8(dst, self.contour_lengths.len() as u8)?;
        dst.write_all(&self.contour_lengths)?;
        for p in &self.points {
            wire::write_i16(dst, p.x)?;
            wire::write_i16(dst, p.y)?;
        }
        Ok(())
    }

    /// Decode the record starting at `offset` in `data`.
    ///
    /// An offset equal to `data.len()` is a zero-byte record and decodes to
    /// [`OutlineRecord::empty`]. Pass a slice cut at the record's end to get
    /// the same treatment for empty records in the middle of a container.
    /// Any count that would read past the end of `data` is a format error.
    /// The result owns its arrays and does not borrow `data`.
    pub fn parse(data: &[u8], offset: usize) -> Result<Self> {
        if offset == data.len() {
            return Ok(Self::empty());
        }
        let mut r = ByteReader::at(data, offset)?;
        let bbox = BoundingBox {
            x0: r.i16()?,
            y0: r.i16()?,
            x1: r.i16()?,
            y1: r.i16()?,
        };
        let advance = r.i16()?;
        let count = r.u8()? as usize;
        let contour_lengths = r.take(count)?.to_vec();
        let total: usize = contour_lengths.iter().map(|&l| l as usize).sum();
        let raw = r.take(total * 4)?;
        let points = raw
            .chunks_exact(4)
            .map(|c| Point {
                x: i16::from_le_bytes([c[0], c[1]]),
                y: i16::from_le_bytes([c[2], c[3]]),
            })
            .collect();

        Ok(Self {
            bbox,
            advance,
            contour_lengths,
            points,
        })
    }
}

/// Iterator over the contours of an [`OutlineRecord`].
#[derive(Debug, Clone)]
pub struct Contours<'a> {
    lengths: std::slice::Iter<'a, u8>,
    points: &'a [Point],
}

impl<'a> Iterator for Contours<'a> {
    type Item = &'a [Point];

    fn next(&mut self) -> Option<Self::Item> {
        let len = *self.lengths.next()? as usize;
        let (head, rest) = self.points.split_at(len.min(self.points.len()));
        self.points = rest;
        Some(head)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lengths.size_hint()
    }
}

impl ExactSizeIterator for Contours<'_> {}
