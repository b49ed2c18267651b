//! Outline flattening: turns move/line/quad/cubic commands into polylines.
//!
//! Curves are split at their midpoint until flat enough. Quadratic flatness
//! is the distance between the curve midpoint and the chord midpoint; cubic
//! flatness compares the control polygon length against the chord. Points
//! stay in font units.

use fontset_core::Polyline;
use rustybuzz::ttf_parser::OutlineBuilder;

/// Maximum subdivision depth for a single curve segment.
const MAX_DEPTH: u32 = 16;

/// Collects flattened contours from outline drawing commands.
pub struct PolylineBuilder {
    tolerance_sq: f32,
    contours: Vec<Polyline>,
    current: Polyline,
    start: (f32, f32),
    pen: (f32, f32),
}

impl PolylineBuilder {
    /// `tolerance` is the largest allowed deviation from the true curve.
    pub fn new(tolerance: f32) -> Self {
        Self {
            tolerance_sq: tolerance * tolerance,
            contours: Vec::new(),
            current: Vec::new(),
            start: (0.0, 0.0),
            pen: (0.0, 0.0),
        }
    }

    /// Consume the builder and return every contour seen.
    pub fn finish(mut self) -> Vec<Polyline> {
        self.end_contour();
        self.contours
    }

    fn end_contour(&mut self) {
        if !self.current.is_empty() {
            self.contours.push(std::mem::take(&mut self.current));
        }
    }

    fn push(&mut self, p: (f32, f32)) {
        self.current.push(p);
        self.pen = p;
    }

    fn quad(&mut self, p0: (f32, f32), p1: (f32, f32), p2: (f32, f32), depth: u32) {
        // Curve midpoint vs chord midpoint.
        let mx = (p0.0 + 2.0 * p1.0 + p2.0) / 4.0;
        let my = (p0.1 + 2.0 * p1.1 + p2.1) / 4.0;
        let dx = (p0.0 + p2.0) / 2.0 - mx;
        let dy = (p0.1 + p2.1) / 2.0 - my;

        if depth < MAX_DEPTH && dx * dx + dy * dy > self.tolerance_sq {
            let m = (mx, my);
            self.quad(p0, mid(p0, p1), m, depth + 1);
            self.quad(m, mid(p1, p2), p2, depth + 1);
        } else {
            self.push(p2);
        }
    }

    fn cubic(&mut self, p0: (f32, f32), p1: (f32, f32), p2: (f32, f32), p3: (f32, f32), depth: u32) {
        let long = dist(p0, p1) + dist(p1, p2) + dist(p2, p3);
        let short = dist(p0, p3);
        let flatness_sq = long * long - short * short;

        if depth < MAX_DEPTH && flatness_sq > self.tolerance_sq {
            let p01 = mid(p0, p1);
            let p12 = mid(p1, p2);
            let p23 = mid(p2, p3);
            let a = mid(p01, p12);
            let b = mid(p12, p23);
            let m = mid(a, b);
            self.cubic(p0, p01, a, m, depth + 1);
            self.cubic(m, b, p23, p3, depth + 1);
        } else {
            self.push(p3);
        }
    }
}

impl OutlineBuilder for PolylineBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.end_contour();
        self.start = (x, y);
        self.push((x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push((x, y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.quad(self.pen, (x1, y1), (x, y), 0);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.cubic(self.pen, (x1, y1), (x2, y2), (x, y), 0);
    }

    fn close(&mut self) {
        if !self.current.is_empty() && self.pen != self.start {
            self.push(self.start);
        }
        self.end_contour();
    }
}

fn mid(a: (f32, f32), b: (f32, f32)) -> (f32, f32) {
    ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

fn dist(a: (f32, f32), b: (f32, f32)) -> f32 {
    (b.0 - a.0).hypot(b.1 - a.1)
}
