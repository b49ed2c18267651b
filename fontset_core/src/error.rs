//! Error taxonomy for encoding and decoding containers.

use std::io;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for every encode, read, lookup, and decode operation.
#[derive(Error, Debug)]
pub enum Error {
    /// Open/read/write/seek failure on the underlying file or stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A buffer of the requested size could not be reserved.
    #[error("failed to allocate {requested} bytes")]
    Allocation { requested: usize },

    /// The container is malformed or truncated.
    #[error("malformed container: {0}")]
    Format(#[from] FormatError),

    /// The font engine failed to initialize or resolve a glyph.
    #[error("font engine error: {0}")]
    FontEngine(String),

    /// Header template or build parameters are unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A flattened contour does not fit the one-byte point count.
    #[error("glyph U+{code_point:04X}: contour {contour} has {points} points (max 255)")]
    ContourTooLong {
        code_point: u16,
        contour: usize,
        points: usize,
    },

    /// A glyph flattened into more contours than the one-byte count allows.
    #[error("glyph U+{code_point:04X}: {contours} contours (max 255)")]
    TooManyContours { code_point: u16, contours: usize },

    /// The horizontal advance does not fit the record's 16-bit field.
    #[error("glyph U+{code_point:04X}: advance {advance} out of 16-bit range")]
    AdvanceOutOfRange { code_point: u16, advance: i32 },
}

/// Specific ways a container can be malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A field or array extends past the end of the source.
    #[error("needed {needed} bytes, only {available} available")]
    Truncated { needed: usize, available: usize },

    /// The self-described header length disagrees with its fields.
    #[error("header declares {declared} bytes, fields require {expected}")]
    HeaderLength { declared: u8, expected: usize },

    /// The index area is not a whole number of entries or exceeds the source.
    #[error("index area size {size} is invalid")]
    IndexAreaSize { size: u32 },

    /// Index entries are not strictly ascending by code point.
    #[error("index entry U+{unicode:04X} is out of order")]
    IndexOrder { unicode: u16 },

    /// A glyph offset points outside the container.
    #[error("offset {offset} outside container of {len} bytes")]
    OffsetOutOfRange { offset: u32, len: usize },

    /// A record does not fill the span between its offset and the next one.
    #[error("record for U+{unicode:04X} is {actual} bytes, its slot is {slot}")]
    RecordSize {
        unicode: u16,
        actual: usize,
        slot: usize,
    },
}

impl Error {
    /// Map a stream read failure, turning a short read into `Truncated`.
    pub(crate) fn from_read(err: io::Error, needed: usize) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::Format(FormatError::Truncated {
                needed,
                available: 0,
            })
        } else {
            Self::Io(err)
        }
    }
}
