//! Compact glyph-outline containers for low-memory renderers.
//!
//! A container holds a header, an index of `(code point, offset)` pairs
//! sorted by code point, and one flattened-outline record per glyph. This
//! crate builds containers through the [`FontEngine`] seam and reads them
//! back from streams or memory. It parses no font files and rasterizes
//! nothing.

#![deny(unsafe_code)]

pub mod charset;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod header;
pub mod index;
pub mod lookup;
pub mod outline;
pub mod reader;
mod wire;

#[cfg(test)]
mod fixture;

pub use charset::CodePointSet;
pub use encoder::{EncodeSummary, Encoder, encode};
pub use engine::{FontEngine, GlyphIndex, HMetrics, Polyline};
pub use error::{Error, FormatError, Result};
pub use header::{FontSetHeader, HeaderFlags, HeaderTemplate, VerticalMetrics};
pub use index::{IndexEntry, IndexTable};
pub use lookup::{RecordSpan, decode_outline, lookup_in_file, lookup_in_memory, lookup_in_path};
pub use outline::{BoundingBox, OutlineRecord, Point};
pub use reader::{FontSet, read_container, read_header, read_index};
