//! Bounding rectangle calculation.
//!
//! Computes the tight axis-aligned bounds of a [`Path`]: every on-curve
//! point plus the interior extrema of each quadratic and cubic segment.
//! Control points that the curve never reaches do not widen the result.

use crate::basics::{Point, Rect};
use crate::curves::{cubic_extrema, eval_cubic, eval_quad, quad_extremum};
use crate::path_storage::{Path, PathVerb};

/// Tight bounds of `path`. An empty path yields an all-zero rectangle.
pub fn path_bounds(path: &Path) -> Rect {
    let Some(&first) = path.points().first() else {
        return Rect::default();
    };
    let mut r = Rect::from_ltrb(first.x, first.y, first.x, first.y);

    for (verb, pts) in path.iter() {
        match verb {
            PathVerb::Move => r.include(pts[0]),
            PathVerb::Line => r.include(pts[1]),
            PathVerb::Quad => {
                let q = [pts[0], pts[1], pts[2]];
                if let Some(t) = quad_extremum(q[0].x, q[1].x, q[2].x) {
                    r.include(eval_quad(&q, t));
                }
                if let Some(t) = quad_extremum(q[0].y, q[1].y, q[2].y) {
                    r.include(eval_quad(&q, t));
                }
                r.include(q[2]);
            }
            PathVerb::Cubic => {
                let c = [pts[0], pts[1], pts[2], pts[3]];
                let tx = cubic_extrema(c[0].x, c[1].x, c[2].x, c[3].x);
                let ty = cubic_extrema(c[0].y, c[1].y, c[2].y, c[3].y);
                for t in tx.iter().chain(ty.iter()).flatten() {
                    r.include(eval_cubic(&c, *t));
                }
                r.include(c[3]);
            }
        }
    }
    r
}

/// Bounds of a plain point list, `None` when it is empty.
pub fn points_bounds(pts: &[Point]) -> Option<Rect> {
    let (first, rest) = pts.split_first()?;
    let mut r = Rect::from_ltrb(first.x, first.y, first.x, first.y);
    for p in rest {
        r.include(*p);
    }
    Some(r)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_storage::{PathBuilder, PathDirection};

    const EPS: f32 = 1e-3;

    fn rect_close(a: Rect, b: Rect) -> bool {
        (a.left - b.left).abs() < EPS
            && (a.top - b.top).abs() < EPS
            && (a.right - b.right).abs() < EPS
            && (a.bottom - b.bottom).abs() < EPS
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(path_bounds(&Path::new()), Rect::default());
    }

    #[test]
    fn test_polygon_bounds() {
        let path = PathBuilder::new()
            .add_polygon(&[
                Point::new(3.0, 4.0),
                Point::new(-2.0, 9.0),
                Point::new(7.0, 1.0),
            ])
            .build();
        assert_eq!(path_bounds(&path), Rect::from_ltrb(-2.0, 1.0, 7.0, 9.0));
    }

    #[test]
    fn test_quad_bounds_are_tight() {
        // control point at y = 10, curve peaks at y = 5
        let path = PathBuilder::new()
            .move_to(0.0, 0.0)
            .quad_to(5.0, 10.0, 10.0, 0.0)
            .build();
        assert!(rect_close(path_bounds(&path), Rect::from_ltrb(0.0, 0.0, 10.0, 5.0)));
    }

    #[test]
    fn test_cubic_bounds_are_tight() {
        let path = PathBuilder::new()
            .move_to(0.0, 0.0)
            .cubic_to(0.0, 10.0, 10.0, 10.0, 10.0, 0.0)
            .build();
        assert!(rect_close(path_bounds(&path), Rect::from_ltrb(0.0, 0.0, 10.0, 7.5)));
    }

    #[test]
    fn test_circle_bounds() {
        let path = PathBuilder::new()
            .add_circle(Point::new(50.0, 40.0), 10.0, PathDirection::Clockwise)
            .build();
        assert!(rect_close(
            path.bounds(),
            Rect::from_ltrb(40.0, 30.0, 60.0, 50.0)
        ));
    }

    #[test]
    fn test_points_bounds() {
        assert_eq!(points_bounds(&[]), None);
        assert_eq!(
            points_bounds(&[Point::new(1.0, 5.0), Point::new(4.0, 2.0)]),
            Some(Rect::from_ltrb(1.0, 2.0, 4.0, 5.0))
        );
    }
}
