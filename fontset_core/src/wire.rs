//! Little-endian primitives shared by every record codec.
//!
//! All multi-byte integers in a container are little-endian. Slice reads go
//! through `ByteReader`, stream reads through the `read_*` helpers, and
//! writes through the `write_*` helpers.

use std::io::{Read, Write};

use crate::error::{Error, FormatError, Result};

/// Bounds-checked forward cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Start reading at `pos`. Fails if `pos` is past the end.
    pub(crate) fn at(data: &'a [u8], pos: usize) -> Result<Self> {
        if pos > data.len() {
            return Err(FormatError::Truncated {
                needed: pos,
                available: data.len(),
            }
            .into());
        }
        Ok(Self { data, pos })
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Borrow the next `n` bytes and advance past them.
    pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(FormatError::Truncated {
                needed: self.pos.saturating_add(n),
                available: self.data.len(),
            }
            .into());
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n).map(|_| ())
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub(crate) fn u8(&mut self) -> Result<u8> {
        Ok(self.array::<1>()?[0])
    }

    pub(crate) fn u16(&mut self) -> Result<u16> {
        self.array().map(u16::from_le_bytes)
    }

    pub(crate) fn i16(&mut self) -> Result<i16> {
        self.array().map(i16::from_le_bytes)
    }

    pub(crate) fn u32(&mut self) -> Result<u32> {
        self.array().map(u32::from_le_bytes)
    }

    pub(crate) fn bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.array()
    }
}

fn read_array<R: Read, const N: usize>(src: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    src.read_exact(&mut buf).map_err(|e| Error::from_read(e, N))?;
    Ok(buf)
}

pub(crate) fn read_u8<R: Read>(src: &mut R) -> Result<u8> {
    Ok(read_array::<R, 1>(src)?[0])
}

pub(crate) fn read_u16<R: Read>(src: &mut R) -> Result<u16> {
    read_array(src).map(u16::from_le_bytes)
}

pub(crate) fn read_i16<R: Read>(src: &mut R) -> Result<i16> {
    read_array(src).map(i16::from_le_bytes)
}

pub(crate) fn read_u32<R: Read>(src: &mut R) -> Result<u32> {
    read_array(src).map(u32::from_le_bytes)
}

pub(crate) fn read_bytes<R: Read, const N: usize>(src: &mut R) -> Result<[u8; N]> {
    read_array(src)
}

/// Read `n` bytes into a freshly reserved buffer.
pub(crate) fn read_vec<R: Read>(src: &mut R, n: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(n)
        .map_err(|_| Error::Allocation { requested: n })?;
    buf.resize(n, 0);
    src.read_exact(&mut buf).map_err(|e| Error::from_read(e, n))?;
    Ok(buf)
}

/// Discard `n` bytes from a stream without buffering them.
pub(crate) fn skip<R: Read>(src: &mut R, n: u64) -> Result<()> {
    let copied = std::io::copy(&mut src.take(n), &mut std::io::sink())?;
    if copied < n {
        return Err(FormatError::Truncated {
            needed: n as usize,
            available: copied as usize,
        }
        .into());
    }
    Ok(())
}

pub(crate) fn write_u8<W: Write>(dst: &mut W, v: u8) -> Result<()> {
    dst.write_all(&[v])?;
    Ok(())
}

pub(crate) fn write_u16<W: Write>(dst: &mut W, v: u16) -> Result<()> {
    dst.write_all(&v.to_le_bytes())?;
    Ok(())
}

pub(crate) fn write_i16<W: Write>(dst: &mut W, v: i16) -> Result<()> {
    dst.write_all(&v.to_le_bytes())?;
    Ok(())
}

pub(crate) fn write_u32<W: Write>(dst: &mut W, v: u32) -> Result<()> {
    dst.write_all(&v.to_le_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests;
