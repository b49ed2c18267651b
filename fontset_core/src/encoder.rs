//! Container encoder.
//!
//! Writes the header, an index table of placeholder offsets, and one outline
//! record per code point, then seeks back and patches each placeholder with
//! the real record offset. Record offsets are only known once every record
//! before them is written, and the index has to come first so readers can
//! find entries with a single forward scan.

use std::io::{self, Cursor, Seek, SeekFrom, Write};

use crate::charset::CodePointSet;
use crate::engine::FontEngine;
use crate::error::{Error, Result};
use crate::header::{DEFAULT_FONT_NAME, FontSetHeader, HeaderTemplate};
use crate::outline::{OutlineRecord, Point};
use crate::wire;

/// What a finished build produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeSummary {
    /// Index entries written (distinct code points).
    pub entries: usize,
    /// Code points the font had no glyph for (written as empty records).
    pub missing: Vec<u16>,
    /// Total points across all records.
    pub points: usize,
    /// Container size in bytes.
    pub bytes: u64,
}

/// Builds containers from a font engine and a header template.
pub struct Encoder<'e, E: FontEngine> {
    engine: &'e E,
    template: HeaderTemplate,
}

impl<'e, E: FontEngine> Encoder<'e, E> {
    /// Create an encoder. Fails with `InvalidConfig` for unusable templates
    /// (zero render mode, zero font size, reserved flag bits set).
    pub fn new(engine: &'e E, template: HeaderTemplate) -> Result<Self> {
        template.validate()?;
        Ok(Self { engine, template })
    }

    pub fn template(&self) -> &HeaderTemplate {
        &self.template
    }

    /// Encode the glyphs of `text` into a fresh buffer.
    ///
    /// Use this when the destination cannot seek; write the buffer out in
    /// one go afterwards.
    pub fn encode_to_vec(&self, text: &str) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.encode(text, &mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Encode the glyphs of `text` into `dst`, starting at its current
    /// position. Offsets are relative to that position.
    ///
    /// On error the bytes already written are garbage and must be discarded.
    pub fn encode<W: Write + Seek>(&self, text: &str, dst: &mut W) -> Result<EncodeSummary> {
        let code_points = CodePointSet::from_text(text);
        self.encode_code_points(&code_points, dst)
    }

    /// Encode an already-built code point set.
    pub fn encode_code_points<W: Write + Seek>(
        &self,
        code_points: &CodePointSet,
        dst: &mut W,
    ) -> Result<EncodeSummary> {
        let header = self.build_header(code_points.len())?;
        let scale = self
            .engine
            .scale_for_pixel_height(f32::from(self.template.font_size));
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::FontEngine(format!(
                "unusable scale {scale} for {}px",
                self.template.font_size
            )));
        }
        let tolerance = 1.0 / scale / f32::from(self.template.render_mode);

        let base = dst.stream_position()?;
        header.write_to(dst)?;

        // Pass 1: index table with zeroed offsets.
        let mut placeholders = Vec::new();
        placeholders
            .try_reserve_exact(code_points.len())
            .map_err(|_| Error::Allocation {
                requested: code_points.len() * size_of::<u64>(),
            })?;
        for unicode in code_points.iter() {
            wire::write_u16(dst, unicode)?;
            placeholders.push(dst.stream_position()? - base);
            wire::write_u32(dst, 0)?;
        }

        // Pass 2: outline records.
        let mut summary = EncodeSummary {
            entries: code_points.len(),
            ..EncodeSummary::default()
        };
        let mut record_starts = Vec::with_capacity(code_points.len());
        for unicode in code_points.iter() {
            record_starts.push(container_offset(dst.stream_position()? - base)?);
            match self.glyph_record(unicode, tolerance)? {
                Some(record) => {
                    log::debug!(
                        "glyph U+{unicode:04X}: {} contours, {} points",
                        record.contour_count(),
                        record.point_count()
                    );
                    summary.points += record.point_count();
                    record.write_to(dst)?;
                }
                None => {
                    log::debug!("glyph U+{unicode:04X}: not in font, empty record");
                    summary.missing.push(unicode);
                }
            }
        }
        let end = dst.stream_position()?;
        summary.bytes = end - base;
        container_offset(summary.bytes)?;

        // Pass 3: patch the placeholders.
        for (&slot, &offset) in placeholders.iter().zip(&record_starts) {
            dst.seek(SeekFrom::Start(base + slot))?;
            wire::write_u32(dst, offset)?;
        }
        dst.seek(SeekFrom::Start(end))?;
        dst.flush()?;

        log::info!(
            "encoded {} glyphs ({} missing, {} points) into {} bytes",
            summary.entries,
            summary.missing.len(),
            summary.points,
            summary.bytes
        );
        Ok(summary)
    }

    fn build_header(&self, entries: usize) -> Result<FontSetHeader> {
        let name = self
            .engine
            .display_name()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_FONT_NAME.to_owned());
        let metrics = self.engine.vertical_metrics();
        FontSetHeader::new(&self.template, &name, metrics, entries)
    }

    /// Outline record for one code point, `None` if the font lacks it.
    fn glyph_record(&self, unicode: u16, tolerance: f32) -> Result<Option<OutlineRecord>> {
        let Some(glyph) = self.engine.glyph_index(unicode) else {
            return Ok(None);
        };
        let bbox = self.engine.glyph_box(glyph);
        let advance = self.engine.h_metrics(glyph).advance;
        let advance = i16::try_from(advance).map_err(|_| Error::AdvanceOutOfRange {
            code_point: unicode,
            advance,
        })?;
        let contours: Vec<Vec<Point>> = self
            .engine
            .flatten_glyph(glyph, tolerance)?
            .into_iter()
            .map(|polyline| {
                polyline
                    .into_iter()
                    .map(|(x, y)| Point::new(x as i16, y as i16))
                    .collect()
            })
            .collect();
        OutlineRecord::from_contours(unicode, bbox, advance, &contours).map(Some)
    }
}

/// Encode `text` with `engine` into an in-memory container.
pub fn encode<E: FontEngine>(engine: &E, text: &str, template: HeaderTemplate) -> Result<Vec<u8>> {
    Encoder::new(engine, template)?.encode_to_vec(text)
}

fn container_offset(pos: u64) -> Result<u32> {
    u32::try_from(pos)
        .map_err(|_| Error::Io(io::Error::other(format!("container offset {pos} exceeds 4 GiB"))))
}
