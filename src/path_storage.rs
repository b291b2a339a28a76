//! Path storage: verbs plus points in cumulative-endpoint form.
//!
//! A [`Path`] is an immutable list of [`PathVerb`]s. Each verb after a
//! `Move` starts at the previous verb's last point, which is stored only
//! once, so `Line` adds one point, `Quad` two and `Cubic` three.
//!
//! Two walks are provided:
//!
//! - [`Path::iter`] yields every verb, `Move` included, with the full point
//!   slice of its segment.
//! - [`Path::edges`] yields only drawable [`Segment`]s and closes every
//!   contour with a synthesized line back to its start.

use crate::basics::{Point, Rect};
use crate::bounding_rect::path_bounds;
use crate::trans_affine::AffineTransform;

// ============================================================================
// Verbs and segments
// ============================================================================

/// Path command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathVerb {
    Move,
    Line,
    Quad,
    Cubic,
}

impl PathVerb {
    /// Number of new points the verb appends to the point list.
    #[inline]
    pub fn new_points(self) -> usize {
        match self {
            PathVerb::Move | PathVerb::Line => 1,
            PathVerb::Quad => 2,
            PathVerb::Cubic => 3,
        }
    }

    /// Number of points describing the full segment, shared start included.
    #[inline]
    pub fn segment_points(self) -> usize {
        match self {
            PathVerb::Move => 1,
            PathVerb::Line => 2,
            PathVerb::Quad => 3,
            PathVerb::Cubic => 4,
        }
    }
}

/// A drawable piece of a contour with all of its control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line([Point; 2]),
    Quad([Point; 3]),
    Cubic([Point; 4]),
}

impl Segment {
    /// First point of the segment.
    pub fn start(&self) -> Point {
        match self {
            Segment::Line(p) => p[0],
            Segment::Quad(p) => p[0],
            Segment::Cubic(p) => p[0],
        }
    }

    /// Last point of the segment.
    pub fn end(&self) -> Point {
        match self {
            Segment::Line(p) => p[1],
            Segment::Quad(p) => p[2],
            Segment::Cubic(p) => p[3],
        }
    }
}

/// Winding direction for the shape helpers of [`PathBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

// ============================================================================
// Path
// ============================================================================

/// Immutable sequence of contours. The first verb is always `Move`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    verbs: Vec<PathVerb>,
    points: Vec<Point>,
}

impl Path {
    /// An empty path.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn verbs(&self) -> &[PathVerb] {
        &self.verbs
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Walk every verb with its segment points.
    pub fn iter(&self) -> PathIter<'_> {
        PathIter {
            path: self,
            verb: 0,
            pt: 0,
        }
    }

    /// Walk the drawable segments, closing each contour.
    pub fn edges(&self) -> Edges<'_> {
        Edges {
            path: self,
            verb: 0,
            pt: 0,
            start: Point::default(),
            last: Point::default(),
            open: false,
        }
    }

    /// Tight bounds including curve extrema.
    pub fn bounds(&self) -> Rect {
        path_bounds(self)
    }

    /// A copy of this path with every point mapped through `m`.
    pub fn transform(&self, m: &AffineTransform) -> Path {
        let mut points = self.points.clone();
        m.map_points(&mut points);
        Path {
            verbs: self.verbs.clone(),
            points,
        }
    }
}

// ============================================================================
// Raw verb iterator
// ============================================================================

/// Iterator over `(verb, segment points)`, `Move` included.
pub struct PathIter<'a> {
    path: &'a Path,
    verb: usize,
    pt: usize,
}

impl<'a> Iterator for PathIter<'a> {
    type Item = (PathVerb, &'a [Point]);

    fn next(&mut self) -> Option<Self::Item> {
        let verb = *self.path.verbs.get(self.verb)?;
        self.verb += 1;
        let n = verb.new_points();
        let end = self.pt + n;
        let start = if verb == PathVerb::Move {
            self.pt
        } else {
            self.pt - 1
        };
        self.pt = end;
        Some((verb, &self.path.points[start..end]))
    }
}

// ============================================================================
// Edge iterator
// ============================================================================

/// Single-pass iterator over drawable segments. Every contour is closed
/// by a line from its last point back to its `Move` point unless the two
/// already coincide. Once exhausted it stays exhausted.
pub struct Edges<'a> {
    path: &'a Path,
    verb: usize,
    pt: usize,
    start: Point,
    last: Point,
    open: bool,
}

impl Edges<'_> {
    fn close_contour(&mut self) -> Option<Segment> {
        self.open = false;
        if self.last != self.start {
            Some(Segment::Line([self.last, self.start]))
        } else {
            None
        }
    }
}

impl Iterator for Edges<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        loop {
            let Some(&verb) = self.path.verbs.get(self.verb) else {
                if self.open {
                    if let Some(seg) = self.close_contour() {
                        return Some(seg);
                    }
                }
                return None;
            };

            let path = self.path;
            let pts = &path.points;
            let p0 = self.last;
            let seg = match verb {
                PathVerb::Move => {
                    if self.open {
                        if let Some(seg) = self.close_contour() {
                            // the move is consumed on the next call
                            return Some(seg);
                        }
                    }
                    self.start = pts[self.pt];
                    self.last = self.start;
                    self.pt += 1;
                    self.verb += 1;
                    continue;
                }
                PathVerb::Line => Segment::Line([p0, pts[self.pt]]),
                PathVerb::Quad => Segment::Quad([p0, pts[self.pt], pts[self.pt + 1]]),
                PathVerb::Cubic => {
                    Segment::Cubic([p0, pts[self.pt], pts[self.pt + 1], pts[self.pt + 2]])
                }
            };
            self.pt += verb.new_points();
            self.verb += 1;
            self.last = seg.end();
            self.open = true;
            return Some(seg);
        }
    }
}

// ============================================================================
// PathBuilder
// ============================================================================

/// Fluent construction of a [`Path`].
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    path: Path,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new contour at `(x, y)`.
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.path.verbs.push(PathVerb::Move);
        self.path.points.push(Point::new(x, y));
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.ensure_move();
        self.path.verbs.push(PathVerb::Line);
        self.path.points.push(Point::new(x, y));
        self
    }

    /// Quadratic Bezier through control point `(cx, cy)` to `(x, y)`.
    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) -> &mut Self {
        self.ensure_move();
        self.path.verbs.push(PathVerb::Quad);
        self.path
            .points
            .extend_from_slice(&[Point::new(cx, cy), Point::new(x, y)]);
        self
    }

    /// Cubic Bezier with control points `c1`, `c2` ending at `(x, y)`.
    #[allow(clippy::too_many_arguments)]
    pub fn cubic_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) -> &mut Self {
        self.ensure_move();
        self.path.verbs.push(PathVerb::Cubic);
        self.path.points.extend_from_slice(&[
            Point::new(c1x, c1y),
            Point::new(c2x, c2y),
            Point::new(x, y),
        ]);
        self
    }

    /// Append a four-point rectangle contour starting at the top-left.
    pub fn add_rect(&mut self, r: Rect, dir: PathDirection) -> &mut Self {
        self.move_to(r.left, r.top);
        match dir {
            PathDirection::Clockwise => {
                self.line_to(r.right, r.top)
                    .line_to(r.right, r.bottom)
                    .line_to(r.left, r.bottom);
            }
            PathDirection::CounterClockwise => {
                self.line_to(r.left, r.bottom)
                    .line_to(r.right, r.bottom)
                    .line_to(r.right, r.top);
            }
        }
        self
    }

    /// Append a contour through `pts`. Empty input appends nothing.
    pub fn add_polygon(&mut self, pts: &[Point]) -> &mut Self {
        if let Some((first, rest)) = pts.split_first() {
            self.move_to(first.x, first.y);
            for p in rest {
                self.line_to(p.x, p.y);
            }
        }
        self
    }

    /// Append a circle made of four cubic quarter arcs, starting at the top.
    pub fn add_circle(&mut self, center: Point, radius: f32, dir: PathDirection) -> &mut Self {
        let (x, y) = (center.x, center.y);
        let top = y - radius;
        let bottom = y + radius;
        let left = x - radius;
        let right = x + radius;
        let k = radius * 4.0 * (std::f32::consts::SQRT_2 - 1.0) / 3.0;

        self.move_to(x, top);
        match dir {
            PathDirection::Clockwise => {
                self.cubic_to(x + k, top, right, y - k, right, y)
                    .cubic_to(right, y + k, x + k, bottom, x, bottom)
                    .cubic_to(x - k, bottom, left, y + k, left, y)
                    .cubic_to(left, y - k, x - k, top, x, top);
            }
            PathDirection::CounterClockwise => {
                self.cubic_to(x - k, top, left, y - k, left, y)
                    .cubic_to(left, y + k, x - k, bottom, x, bottom)
                    .cubic_to(x + k, bottom, right, y + k, right, y)
                    .cubic_to(right, y - k, x + k, top, x, top);
            }
        }
        self
    }

    /// Take the finished path, leaving the builder empty.
    pub fn build(&mut self) -> Path {
        std::mem::take(&mut self.path)
    }

    fn ensure_move(&mut self) {
        if self.path.verbs.is_empty() {
            self.move_to(0.0, 0.0);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_builder_storage() {
        let path = PathBuilder::new()
            .move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .quad_to(20.0, 0.0, 20.0, 10.0)
            .cubic_to(20.0, 20.0, 10.0, 20.0, 0.0, 20.0)
            .build();
        assert_eq!(
            path.verbs(),
            &[PathVerb::Move, PathVerb::Line, PathVerb::Quad, PathVerb::Cubic]
        );
        assert_eq!(path.points().len(), 7);
    }

    #[test]
    fn test_line_without_move_starts_at_origin() {
        let path = PathBuilder::new().line_to(5.0, 5.0).build();
        assert_eq!(path.verbs()[0], PathVerb::Move);
        assert_eq!(path.points()[0], p(0.0, 0.0));
    }

    #[test]
    fn test_raw_iter_segments() {
        let path = PathBuilder::new()
            .move_to(1.0, 1.0)
            .line_to(2.0, 1.0)
            .quad_to(3.0, 1.0, 3.0, 2.0)
            .build();
        let items: Vec<_> = path.iter().collect();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], (PathVerb::Move, &[p(1.0, 1.0)][..]));
        assert_eq!(items[1], (PathVerb::Line, &[p(1.0, 1.0), p(2.0, 1.0)][..]));
        assert_eq!(
            items[2],
            (PathVerb::Quad, &[p(2.0, 1.0), p(3.0, 1.0), p(3.0, 2.0)][..])
        );
    }

    #[test]
    fn test_edges_close_contours() {
        let path = PathBuilder::new()
            .add_polygon(&[p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0)])
            .add_polygon(&[p(10.0, 10.0), p(12.0, 10.0), p(12.0, 12.0)])
            .build();
        let segs: Vec<_> = path.edges().collect();
        assert_eq!(segs.len(), 6);
        assert_eq!(segs[2], Segment::Line([p(4.0, 4.0), p(0.0, 0.0)]));
        assert_eq!(segs[3], Segment::Line([p(10.0, 10.0), p(12.0, 10.0)]));
        assert_eq!(segs[5], Segment::Line([p(12.0, 12.0), p(10.0, 10.0)]));
    }

    #[test]
    fn test_edges_skip_close_when_already_closed() {
        let path = PathBuilder::new()
            .move_to(0.0, 0.0)
            .line_to(5.0, 0.0)
            .line_to(5.0, 5.0)
            .line_to(0.0, 0.0)
            .build();
        assert_eq!(path.edges().count(), 3);
    }

    #[test]
    fn test_edges_single_pass() {
        let path = PathBuilder::new()
            .add_rect(Rect::from_ltrb(0.0, 0.0, 1.0, 1.0), PathDirection::Clockwise)
            .build();
        let mut it = path.edges();
        assert_eq!(it.by_ref().count(), 4);
        assert!(it.next().is_none());
        assert!(it.next().is_none());
        // a fresh iterator walks again
        assert_eq!(path.edges().count(), 4);
    }

    #[test]
    fn test_lone_move_yields_nothing() {
        let path = PathBuilder::new().move_to(3.0, 3.0).build();
        assert_eq!(path.edges().count(), 0);
        assert_eq!(Path::new().edges().count(), 0);
    }

    #[test]
    fn test_add_rect_directions() {
        let r = Rect::from_ltrb(1.0, 2.0, 3.0, 4.0);
        let cw = PathBuilder::new().add_rect(r, PathDirection::Clockwise).build();
        assert_eq!(cw.points(), &[p(1.0, 2.0), p(3.0, 2.0), p(3.0, 4.0), p(1.0, 4.0)]);
        let ccw = PathBuilder::new()
            .add_rect(r, PathDirection::CounterClockwise)
            .build();
        assert_eq!(ccw.points(), &[p(1.0, 2.0), p(1.0, 4.0), p(3.0, 4.0), p(3.0, 2.0)]);
    }

    #[test]
    fn test_add_circle_shape() {
        let path = PathBuilder::new()
            .add_circle(p(10.0, 10.0), 5.0, PathDirection::Clockwise)
            .build();
        assert_eq!(path.verbs().len(), 5);
        assert_eq!(path.points()[0], p(10.0, 5.0));
        assert_eq!(*path.points().last().unwrap(), p(10.0, 5.0));
        // closed on its own: only the four arcs come out
        assert!(path
            .edges()
            .all(|s| matches!(s, Segment::Cubic(_))));
    }

    #[test]
    fn test_transform_maps_points() {
        let path = PathBuilder::new()
            .move_to(1.0, 1.0)
            .line_to(2.0, 3.0)
            .build();
        let moved = path.transform(&AffineTransform::translation(10.0, 0.0));
        assert_eq!(moved.points(), &[p(11.0, 1.0), p(12.0, 3.0)]);
        assert_eq!(moved.verbs(), path.verbs());
    }

    #[test]
    fn test_builder_is_reusable_after_build() {
        let mut b = PathBuilder::new();
        b.move_to(0.0, 0.0).line_to(1.0, 1.0);
        let first = b.build();
        assert!(!first.is_empty());
        assert!(b.build().is_empty());
    }
}
