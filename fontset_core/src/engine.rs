//! Font engine seam.
//!
//! The encoder never parses font files itself. Everything it needs about a
//! font comes through [`FontEngine`]: names, metrics, cmap lookups, glyph
//! boxes, and polyline-flattened outlines.

use crate::error::Result;
use crate::header::VerticalMetrics;
use crate::outline::BoundingBox;

/// Glyph identifier inside a font. Never zero: zero means "no glyph".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphIndex(pub u16);

/// Horizontal metrics of one glyph, in font units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HMetrics {
    pub advance: i32,
    pub left_side_bearing: i32,
}

/// A flattened contour: polyline vertices in font units.
pub type Polyline = Vec<(f32, f32)>;

/// Source of per-font and per-glyph data for the encoder.
pub trait FontEngine {
    /// Display name of the font, if it has one.
    fn display_name(&self) -> Option<String>;

    fn vertical_metrics(&self) -> VerticalMetrics;

    /// Scale factor mapping font units to `pixels` of ascent-to-descent height.
    fn scale_for_pixel_height(&self, pixels: f32) -> f32;

    /// Glyph for a code point, or `None` when the font has none.
    fn glyph_index(&self, code_point: u16) -> Option<GlyphIndex>;

    /// Integer glyph bounds in font units, Y pointing down.
    fn glyph_box(&self, glyph: GlyphIndex) -> BoundingBox;

    fn h_metrics(&self, glyph: GlyphIndex) -> HMetrics;

    /// Flatten the glyph outline into polylines.
    ///
    /// `tolerance` is the maximum deviation from the true curve, in font
    /// units. Glyphs without an outline return no contours.
    fn flatten_glyph(&self, glyph: GlyphIndex, tolerance: f32) -> Result<Vec<Polyline>>;
}
