//! Edge building and clipping for the scanline rasterizer.
//!
//! Device-space line segments are turned into [`Edge`]s clipped to the
//! `[0, width] x [0, height]` box of the destination:
//!
//! - above/below the box, a segment is cut at `y = 0` / `y = height` by
//!   interpolation;
//! - left/right of the box, the outside part is replaced by its projection
//!   onto `x = 0` / `x = width`, a vertical edge with the same winding, so
//!   the winding count of the pixels inside stays correct.
//!
//! An edge covers the half-open scanline range `[iround(y_top),
//! iround(y_bottom))` and is sampled at pixel centers. Two edges that meet
//! at a vertex therefore hand over at exactly one row, and a shared vertex
//! is never counted twice.

use crate::basics::{iround, Point};
use crate::curves::{flatten_cubic, flatten_quad};
use crate::path_storage::{Path, Segment};
use crate::trans_affine::AffineTransform;

// ============================================================================
// Edge
// ============================================================================

/// A y-monotonic line segment in device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// `dx / dy`.
    pub m: f32,
    /// x where the line crosses `y = 0`.
    pub b: f32,
    /// First covered scanline.
    pub top: i32,
    /// One past the last covered scanline.
    pub bottom: i32,
    /// +1 when the input segment runs downward, -1 when upward.
    pub winding: i32,
}

impl Edge {
    /// Edge between two points in either order. `None` when the segment
    /// covers no scanline.
    pub fn new(p0: Point, p1: Point, winding: i32) -> Option<Edge> {
        let (top, bot) = if p0.y <= p1.y { (p0, p1) } else { (p1, p0) };
        let top_row = iround(top.y);
        let bottom_row = iround(bot.y);
        if top_row == bottom_row {
            return None;
        }
        let m = (bot.x - top.x) / (bot.y - top.y);
        Some(Edge {
            m,
            b: top.x - m * top.y,
            top: top_row,
            bottom: bottom_row,
            winding,
        })
    }

    /// Pixel column where the edge crosses the center of scanline `y`.
    #[inline]
    pub fn x_at(&self, y: i32) -> i32 {
        iround(self.m * (y as f32 + 0.5) + self.b)
    }

    /// True when scanline `y` is covered.
    #[inline]
    pub fn covers(&self, y: i32) -> bool {
        self.top <= y && y < self.bottom
    }
}

// ============================================================================
// EdgeList
// ============================================================================

/// Clipped edges of one draw call.
#[derive(Debug, Clone, Default)]
pub struct EdgeList {
    width: f32,
    height: f32,
    edges: Vec<Edge>,
    flat: Vec<Point>,
}

impl EdgeList {
    /// Empty list clipping to a `width` x `height` device.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            edges: Vec::new(),
            flat: Vec::new(),
        }
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Drop all edges, keeping the allocation.
    pub fn clear(&mut self) {
        self.edges.clear();
    }

    /// One past the lowest covered scanline, 0 when empty.
    pub fn bottom(&self) -> i32 {
        self.edges.iter().map(|e| e.bottom).max().unwrap_or(0)
    }

    /// Sort by first scanline, then by x on that scanline.
    pub fn sort(&mut self) {
        self.edges.sort_by_key(|e| (e.top, e.x_at(e.top)));
    }

    /// Closed polygon through `pts` (already in device space).
    pub fn add_polygon(&mut self, pts: &[Point]) {
        if pts.len() < 2 {
            return;
        }
        for w in pts.windows(2) {
            self.add_line(w[0], w[1]);
        }
        self.add_line(pts[pts.len() - 1], pts[0]);
    }

    /// Every contour of `path`, mapped by `ctm` and flattened with
    /// `tolerance`.
    pub fn add_path(&mut self, path: &Path, ctm: &AffineTransform, tolerance: f32) {
        let mut flat = std::mem::take(&mut self.flat);
        for seg in path.edges() {
            flat.clear();
            let start = match seg {
                Segment::Line(p) => {
                    flat.push(ctm.map_point(p[1]));
                    ctm.map_point(p[0])
                }
                Segment::Quad(mut p) => {
                    ctm.map_points(&mut p);
                    flatten_quad(&p, tolerance, &mut flat);
                    p[0]
                }
                Segment::Cubic(mut p) => {
                    ctm.map_points(&mut p);
                    flatten_cubic(&p, tolerance, &mut flat);
                    p[0]
                }
            };
            let mut prev = start;
            for &p in flat.iter() {
                self.add_line(prev, p);
                prev = p;
            }
        }
        self.flat = flat;
    }

    /// Clip one segment and append the resulting edges.
    pub fn add_line(&mut self, p0: Point, p1: Point) {
        if p0.y == p1.y || !(p0.y.is_finite() && p1.y.is_finite() && p0.x.is_finite() && p1.x.is_finite()) {
            return;
        }
        let winding = if p0.y < p1.y { 1 } else { -1 };
        let (mut a, mut b) = if p0.y < p1.y { (p0, p1) } else { (p1, p0) };

        // vertical clipping
        if b.y <= 0.0 || a.y >= self.height {
            return;
        }
        if a.y < 0.0 {
            a = Point::new(x_at_y(a, b, 0.0), 0.0);
        }
        if b.y > self.height {
            b = Point::new(x_at_y(a, b, self.height), self.height);
        }

        // horizontal clipping by projection
        let (mut l, mut r) = if a.x <= b.x { (a, b) } else { (b, a) };
        if r.x <= 0.0 {
            self.push(Point::new(0.0, l.y), Point::new(0.0, r.y), winding);
            return;
        }
        if l.x >= self.width {
            self.push(Point::new(self.width, l.y), Point::new(self.width, r.y), winding);
            return;
        }
        if l.x < 0.0 {
            let y = y_at_x(l, r, 0.0);
            self.push(Point::new(0.0, l.y), Point::new(0.0, y), winding);
            l = Point::new(0.0, y);
        }
        if r.x > self.width {
            let y = y_at_x(l, r, self.width);
            self.push(Point::new(self.width, y), Point::new(self.width, r.y), winding);
            r = Point::new(self.width, y);
        }
        self.push(l, r, winding);
    }

    #[inline]
    fn push(&mut self, p0: Point, p1: Point, winding: i32) {
        if let Some(e) = Edge::new(p0, p1, winding) {
            self.edges.push(e);
        }
    }
}

/// x of the line through `a` and `b` at height `y`.
#[inline]
fn x_at_y(a: Point, b: Point, y: f32) -> f32 {
    a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y)
}

/// y of the line through `a` and `b` at column `x`.
#[inline]
fn y_at_x(a: Point, b: Point, x: f32) -> f32 {
    a.y + (x - a.x) * (b.y - a.y) / (b.x - a.x)
}

// ============================================================================
// Tests
// ============================================================================
