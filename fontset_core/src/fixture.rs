//! In-memory font engine for tests.

use std::cell::Cell;
use std::collections::HashMap;

use crate::engine::{FontEngine, GlyphIndex, HMetrics, Polyline};
use crate::error::{Error, Result};
use crate::header::{HeaderFlags, HeaderTemplate, VerticalMetrics};
use crate::outline::BoundingBox;

pub(crate) struct FixtureGlyph {
    pub(crate) bbox: BoundingBox,
    pub(crate) advance: i32,
    pub(crate) contours: Vec<Polyline>,
}

pub(crate) struct FixtureEngine {
    pub(crate) name: Option<String>,
    pub(crate) metrics: VerticalMetrics,
    /// Font units per pixel of height is `1 / scale`.
    pub(crate) scale: f32,
    pub(crate) glyphs: HashMap<u16, FixtureGlyph>,
    /// Code points whose flattening reports an engine failure.
    pub(crate) failing: Vec<u16>,
    /// Tolerance passed to the most recent `flatten_glyph` call.
    pub(crate) last_tolerance: Cell<Option<f32>>,
}

impl FixtureEngine {
    pub(crate) fn new() -> Self {
        Self {
            name: Some("Fixture Sans".to_owned()),
            metrics: VerticalMetrics {
                ascent: 800,
                descent: -200,
                line_gap: 90,
            },
            scale: 0.032,
            glyphs: HashMap::new(),
            failing: Vec::new(),
            last_tolerance: Cell::new(None),
        }
    }

    /// 'A' is a 4-point square, 'B' is absent.
    pub(crate) fn with_a() -> Self {
        let mut engine = Self::new();
        engine.glyphs.insert(
            u16::from(b'A'),
            FixtureGlyph {
                bbox: BoundingBox::new(0, 0, 10, 12),
                advance: 11,
                contours: vec![vec![(0.0, 0.0), (10.0, 0.0), (10.0, 12.0), (0.0, 12.0)]],
            },
        );
        engine
    }

    pub(crate) fn insert(&mut self, unicode: u16, contours: Vec<Polyline>) {
        self.glyphs.insert(
            unicode,
            FixtureGlyph {
                bbox: BoundingBox::new(-1, -20, 30, 4),
                advance: 500 + i32::from(unicode),
                contours,
            },
        );
    }
}

pub(crate) fn template() -> HeaderTemplate {
    HeaderTemplate {
        file_flag: 2,
        version: *b"1004",
        font_size: 32,
        render_mode: 2,
        flags: HeaderFlags::INDEX_METHOD,
    }
}

impl FontEngine for FixtureEngine {
    fn display_name(&self) -> Option<String> {
        self.name.clone()
    }

    fn vertical_metrics(&self) -> VerticalMetrics {
        self.metrics
    }

    fn scale_for_pixel_height(&self, pixels: f32) -> f32 {
        self.scale * pixels / 32.0
    }

    fn glyph_index(&self, code_point: u16) -> Option<GlyphIndex> {
        self.glyphs
            .contains_key(&code_point)
            .then_some(GlyphIndex(code_point))
    }

    fn glyph_box(&self, glyph: GlyphIndex) -> BoundingBox {
        self.glyphs.get(&glyph.0).map(|g| g.bbox).unwrap_or_default()
    }

    fn h_metrics(&self, glyph: GlyphIndex) -> HMetrics {
        HMetrics {
            advance: self.glyphs.get(&glyph.0).map_or(0, |g| g.advance),
            left_side_bearing: 0,
        }
    }

    fn flatten_glyph(&self, glyph: GlyphIndex, tolerance: f32) -> Result<Vec<Polyline>> {
        self.last_tolerance.set(Some(tolerance));
        if self.failing.contains(&glyph.0) {
            return Err(Error::FontEngine(format!("cannot outline glyph {}", glyph.0)));
        }
        Ok(self
            .glyphs
            .get(&glyph.0)
            .map(|g| g.contours.clone())
            .unwrap_or_default())
    }
}
