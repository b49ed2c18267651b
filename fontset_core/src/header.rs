//! Container header: fixed fields, packed flag byte, and font name.
//!
//! On-disk layout (little-endian):
//!
//! ```text
//! 0   u8      length (header bytes including the name)
//! 1   u8      file flag
//! 2   [u8;4]  version
//! 6   u8      font size (px)
//! 7   u8      render mode (flattening scale divisor, non-zero)
//! 8   u8      flags (bit7 bold, bit6 italic, bit5 scan mode, bit4 index method)
//! 9   u32     index area size (entries * 6)
//! 13  u8      font name length N
//! 14  i16     ascent
//! 16  i16     descent
//! 18  i16     line gap
//! 20  [u8;N]  font name (not NUL-terminated)
//! ```

use std::borrow::Cow;
use std::io::{Read, Write};

use bitflags::bitflags;

use crate::error::{Error, FormatError, Result};
use crate::index::INDEX_ENTRY_SIZE;
use crate::wire::{self, ByteReader};

/// Bytes occupied by the fixed header fields, before the font name.
pub const FIXED_HEADER_LEN: usize = 20;

/// Longest font name that keeps the one-byte `length` field in range.
pub const MAX_FONT_NAME_LEN: usize = u8::MAX as usize - FIXED_HEADER_LEN;

/// Name written when the font has no usable display name.
pub const DEFAULT_FONT_NAME: &str = "font";

/// Mask of the four low bits that carry no meaning yet.
const RESERVED_MASK: u8 = 0x0F;

bitflags! {
    /// Style and layout bits packed into header byte 8.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HeaderFlags: u8 {
        const BOLD         = 1 << 7;
        const ITALIC       = 1 << 6;
        const SCAN_MODE    = 1 << 5;
        const INDEX_METHOD = 1 << 4;
    }
}

impl Default for HeaderFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl HeaderFlags {
    /// Decode a raw flag byte, keeping reserved bits intact.
    pub fn from_byte(byte: u8) -> Self {
        Self::from_bits_retain(byte)
    }

    pub fn to_byte(self) -> u8 {
        self.bits()
    }

    pub fn bold(self) -> bool {
        self.contains(Self::BOLD)
    }

    pub fn italic(self) -> bool {
        self.contains(Self::ITALIC)
    }

    pub fn scan_mode(self) -> bool {
        self.contains(Self::SCAN_MODE)
    }

    pub fn index_method(self) -> bool {
        self.contains(Self::INDEX_METHOD)
    }

    /// The four reserved low bits (always zero when written by the encoder).
    pub fn reserved(self) -> u8 {
        self.bits() & RESERVED_MASK
    }
}

/// Caller-chosen header fields; the encoder fills in the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
    pub file_flag: u8,
    pub version: [u8; 4],
    /// Pixel height the outlines are flattened for.
    pub font_size: u8,
    /// Divisor applied to the flattening tolerance. Must be non-zero.
    pub render_mode: u8,
    pub flags: HeaderFlags,
}

impl HeaderTemplate {
    /// Reject templates the encoder cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.render_mode == 0 {
            return Err(Error::InvalidConfig("render mode must be non-zero".into()));
        }
        if self.font_size == 0 {
            return Err(Error::InvalidConfig("font size must be non-zero".into()));
        }
        if self.flags.reserved() != 0 {
            return Err(Error::InvalidConfig(format!(
                "reserved flag bits must be zero, got {:#06b}",
                self.flags.reserved()
            )));
        }
        Ok(())
    }
}

/// Font-wide vertical metrics in font units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerticalMetrics {
    pub ascent: i16,
    pub descent: i16,
    pub line_gap: i16,
}

/// Decoded container header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSetHeader {
    /// Total header bytes including the name.
    pub length: u8,
    pub file_flag: u8,
    pub version: [u8; 4],
    pub font_size: u8,
    pub render_mode: u8,
    pub flags: HeaderFlags,
    /// Byte length of the index table.
    pub index_area_size: u32,
    pub metrics: VerticalMetrics,
    /// Raw name bytes as stored; `font_name_len()` is their count.
    pub font_name: Vec<u8>,
}

impl FontSetHeader {
    /// Assemble a header for `entry_count` index entries.
    ///
    /// Names longer than [`MAX_FONT_NAME_LEN`] are cut at a UTF-8 boundary.
    /// An empty name is replaced with [`DEFAULT_FONT_NAME`].
    pub fn new(
        template: &HeaderTemplate,
        name: &str,
        metrics: VerticalMetrics,
        entry_count: usize,
    ) -> Result<Self> {
        let index_area_size = entry_count
            .checked_mul(INDEX_ENTRY_SIZE)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| {
                Error::InvalidConfig(format!("{entry_count} index entries do not fit a container"))
            })?;

        let name = if name.is_empty() { DEFAULT_FONT_NAME } else { name };
        let name = truncate_name(name);
        let length = (FIXED_HEADER_LEN + name.len()) as u8;

        Ok(Self {
            length,
            file_flag: template.file_flag,
            version: template.version,
            font_size: template.font_size,
            render_mode: template.render_mode,
            flags: template.flags,
            index_area_size,
            metrics,
            font_name: name.as_bytes().to_vec(),
        })
    }

    pub fn font_name_len(&self) -> u8 {
        self.font_name.len() as u8
    }

    /// Font name for display; invalid UTF-8 is replaced.
    pub fn name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.font_name)
    }

    /// Version tag rendered as text (e.g. `"1004"`).
    pub fn version_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.version)
    }

    /// Number of entries in the index table.
    pub fn entry_count(&self) -> usize {
        self.index_area_size as usize / INDEX_ENTRY_SIZE
    }

    /// Offset of the first index entry.
    pub fn index_start(&self) -> usize {
        self.length as usize
    }

    /// Offset of the first byte after the index table.
    pub fn index_end(&self) -> usize {
        self.index_start() + self.index_area_size as usize
    }

    /// Serialize field by field.
    pub fn write_to<W: Write>(&self, dst: &mut W) -> Result<()> {
        wire::write_u8(dst, self.length)?;
        wire::write_u8(dst, self.file_flag)?;
        dst.write_all(&self.version)?;
        wire::write_u8(dst, self.font_size)?;
        wire::write_u8(dst, self.render_mode)?;
        wire::write_u8(dst, self.flags.to_byte())?;
        wire::write_u32(dst, self.index_area_size)?;
        wire::write_u8(dst, self.font_name_len())?;
        wire::write_i16(dst, self.metrics.ascent)?;
        wire::write_i16(dst, self.metrics.descent)?;
        wire::write_i16(dst, self.metrics.line_gap)?;
        dst.write_all(&self.font_name)?;
        Ok(())
    }

    /// Read a header from the start of a stream.
    pub fn read_from<R: Read>(src: &mut R) -> Result<Self> {
        let length = wire::read_u8(src)?;
        let file_flag = wire::read_u8(src)?;
        let version = wire::read_bytes::<R, 4>(src)?;
        let font_size = wire::read_u8(src)?;
        let render_mode = wire::read_u8(src)?;
        let flags = HeaderFlags::from_byte(wire::read_u8(src)?);
        let index_area_size = wire::read_u32(src)?;
        let name_len = wire::read_u8(src)?;
        let metrics = VerticalMetrics {
            ascent: wire::read_i16(src)?,
            descent: wire::read_i16(src)?,
            line_gap: wire::read_i16(src)?,
        };
        check_sizes(length, name_len, index_area_size)?;
        let font_name = wire::read_vec(src, name_len as usize)?;

        Ok(Self {
            length,
            file_flag,
            version,
            font_size,
            render_mode,
            flags,
            index_area_size,
            metrics,
            font_name,
        })
    }

    /// Parse a header from the start of a byte slice.
    ///
    /// Unlike [`read_from`](Self::read_from) the whole source is visible, so
    /// an index area larger than the remaining bytes is rejected up front.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut r = ByteReader::new(data);
        let length = r.u8()?;
        let file_flag = r.u8()?;
        let version = r.bytes::<4>()?;
        let font_size = r.u8()?;
        let render_mode = r.u8()?;
        let flags = HeaderFlags::from_byte(r.u8()?);
        let index_area_size = r.u32()?;
        let name_len = r.u8()?;
        let metrics = VerticalMetrics {
            ascent: r.i16()?,
            descent: r.i16()?,
            line_gap: r.i16()?,
        };
        check_sizes(length, name_len, index_area_size)?;
        let font_name = r.take(name_len as usize)?.to_vec();
        if index_area_size as usize > r.remaining() {
            return Err(FormatError::IndexAreaSize {
                size: index_area_size,
            }
            .into());
        }

        Ok(Self {
            length,
            file_flag,
            version,
            font_size,
            render_mode,
            flags,
            index_area_size,
            metrics,
            font_name,
        })
    }
}

/// Fields needed to walk past the header without decoding the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HeaderSkip {
    pub(crate) index_area_size: u32,
}

impl HeaderSkip {
    /// Read just enough of a stream header to locate the index table,
    /// leaving the stream positioned at its first entry.
    pub(crate) fn read_from<R: Read>(src: &mut R) -> Result<Self> {
        let length = wire::read_u8(src)?;
        // file flag, version, font size, render mode, flags
        wire::skip(src, 8)?;
        let index_area_size = wire::read_u32(src)?;
        let name_len = wire::read_u8(src)?;
        check_sizes(length, name_len, index_area_size)?;
        // ascent, descent, line gap, then the name itself
        wire::skip(src, 6 + u64::from(name_len))?;
        Ok(Self { index_area_size })
    }

    /// Same as [`read_from`](Self::read_from) over a slice; returns the
    /// offset of the first index entry alongside.
    pub(crate) fn parse(data: &[u8]) -> Result<(Self, usize)> {
        let mut r = ByteReader::new(data);
        let length = r.u8()?;
        r.skip(8)?;
        let index_area_size = r.u32()?;
        let name_len = r.u8()?;
        check_sizes(length, name_len, index_area_size)?;
        r.skip(6 + name_len as usize)?;
        if index_area_size as usize > r.remaining() {
            return Err(FormatError::IndexAreaSize {
                size: index_area_size,
            }
            .into());
        }
        Ok((Self { index_area_size }, r.position()))
    }

    pub(crate) fn entry_count(self) -> usize {
        self.index_area_size as usize / INDEX_ENTRY_SIZE
    }
}

/// Cross-check the self-describing sizes read from a header.
fn check_sizes(length: u8, name_len: u8, index_area_size: u32) -> Result<()> {
    let expected = FIXED_HEADER_LEN + name_len as usize;
    if length as usize != expected {
        return Err(FormatError::HeaderLength {
            declared: length,
            expected,
        }
        .into());
    }
    // Sizes with the sign bit set are negative to signed readers.
    if index_area_size as usize % INDEX_ENTRY_SIZE != 0 || index_area_size > i32::MAX as u32 {
        return Err(FormatError::IndexAreaSize {
            size: index_area_size,
        }
        .into());
    }
    Ok(())
}

/// Cut `name` to at most [`MAX_FONT_NAME_LEN`] bytes on a char boundary.
fn truncate_name(name: &str) -> &str {
    if name.len() <= MAX_FONT_NAME_LEN {
        return name;
    }
    let mut end = MAX_FONT_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    log::warn!(
        "font name is {} bytes, truncating to {end}: {:?}",
        name.len(),
        &name[..end]
    );
    &name[..end]
}
