//! TrueType/OpenType font engine backed by `ttf_parser` (via `rustybuzz`).
//!
//! `FontFile` owns the raw bytes; `TtfEngine` borrows them for the duration
//! of a build and implements [`FontEngine`] for the container encoder.

mod flatten;

use std::path::{Path, PathBuf};

use fontset_core::{
    BoundingBox, Error, FontEngine, GlyphIndex, HMetrics, Polyline, Result, VerticalMetrics,
};
use rustybuzz::ttf_parser::{self, Face, GlyphId, PlatformId, name_id};

pub use flatten::PolylineBuilder;

/// Windows platform language id for English (United States).
const WINDOWS_EN_US: u16 = 0x0409;

/// Raw font file bytes plus the face to use within a collection.
pub struct FontFile {
    bytes: Vec<u8>,
    face_index: u32,
    path: Option<PathBuf>,
}

impl FontFile {
    /// Read a font file from disk.
    pub fn load(path: &Path, face_index: u32) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        log::info!(
            "font: loaded {} ({} bytes, face {face_index})",
            path.display(),
            bytes.len()
        );
        Ok(Self {
            bytes,
            face_index,
            path: Some(path.to_owned()),
        })
    }

    pub fn from_bytes(bytes: Vec<u8>, face_index: u32) -> Self {
        Self {
            bytes,
            face_index,
            path: None,
        }
    }

    /// Parse the face. Fails with `FontEngine` if the bytes are not a font.
    pub fn engine(&self) -> Result<TtfEngine<'_>> {
        let face = Face::parse(&self.bytes, self.face_index).map_err(|e| {
            let source = self
                .path
                .as_ref()
                .map_or_else(|| "<memory>".to_owned(), |p| p.display().to_string());
            Error::FontEngine(format!("{source}: {e}"))
        })?;
        Ok(TtfEngine { face })
    }
}

/// A parsed face ready to answer encoder queries.
pub struct TtfEngine<'a> {
    face: Face<'a>,
}

impl<'a> TtfEngine<'a> {
    pub fn face(&self) -> &Face<'a> {
        &self.face
    }

    pub fn units_per_em(&self) -> u16 {
        self.face.units_per_em()
    }
}

impl FontEngine for TtfEngine<'_> {
    fn display_name(&self) -> Option<String> {
        family_name(&self.face)
    }

    fn vertical_metrics(&self) -> VerticalMetrics {
        let hhea = self.face.tables().hhea;
        VerticalMetrics {
            ascent: hhea.ascender,
            descent: hhea.descender,
            line_gap: hhea.line_gap,
        }
    }

    fn scale_for_pixel_height(&self, pixels: f32) -> f32 {
        let hhea = self.face.tables().hhea;
        let height = i32::from(hhea.ascender) - i32::from(hhea.descender);
        if height == 0 {
            log::warn!("font: ascender equals descender, cannot scale");
            return 0.0;
        }
        pixels / height as f32
    }

    fn glyph_index(&self, code_point: u16) -> Option<GlyphIndex> {
        let ch = char::from_u32(u32::from(code_point))?;
        self.face
            .glyph_index(ch)
            .filter(|id| id.0 != 0)
            .map(|id| GlyphIndex(id.0))
    }

    fn glyph_box(&self, glyph: GlyphIndex) -> BoundingBox {
        // Y flipped so the box reads top-down, as a bitmap box would.
        self.face
            .glyph_bounding_box(GlyphId(glyph.0))
            .map(|r| BoundingBox {
                x0: r.x_min,
                y0: r.y_max.saturating_neg(),
                x1: r.x_max,
                y1: r.y_min.saturating_neg(),
            })
            .unwrap_or_default()
    }

    fn h_metrics(&self, glyph: GlyphIndex) -> HMetrics {
        let id = GlyphId(glyph.0);
        HMetrics {
            advance: self.face.glyph_hor_advance(id).map_or(0, i32::from),
            left_side_bearing: self.face.glyph_hor_side_bearing(id).map_or(0, i32::from),
        }
    }

    fn flatten_glyph(&self, glyph: GlyphIndex, tolerance: f32) -> Result<Vec<Polyline>> {
        let mut builder = PolylineBuilder::new(tolerance);
        if self
            .face
            .outline_glyph(GlyphId(glyph.0), &mut builder)
            .is_none()
        {
            // No outline (space, control glyph): nothing to draw.
            return Ok(Vec::new());
        }
        Ok(builder.finish())
    }
}

/// Pick the font family name.
///
/// Prefers the Macintosh Roman English record, then Windows English (US),
/// then any decodable family record.
pub fn family_name(face: &Face<'_>) -> Option<String> {
    let family: Vec<ttf_parser::name::Name<'_>> = face
        .names()
        .into_iter()
        .filter(|n| n.name_id == name_id::FAMILY)
        .collect();

    let mac_roman = |n: &&ttf_parser::name::Name<'_>| {
        n.platform_id == PlatformId::Macintosh && n.encoding_id == 0 && n.language_id == 0
    };
    let windows_en = |n: &&ttf_parser::name::Name<'_>| {
        n.platform_id == PlatformId::Windows && n.language_id == WINDOWS_EN_US
    };

    family
        .iter()
        .filter(mac_roman)
        .chain(family.iter().filter(windows_en))
        .chain(family.iter())
        .find_map(|n| n.to_string().filter(|s| !s.is_empty()))
}
