//! Bezier curve helpers (quadratic and cubic).
//!
//! - Evaluation in power-basis form.
//! - De Casteljau chopping at a parameter `t`.
//! - Per-axis extrema, used for tight path bounds.
//! - Uniform flattening with a segment count taken from the curve's second
//!   difference, which bounds the distance between curve and chord. Each
//!   line is cut off the remaining curve by De Casteljau chopping.

use crate::basics::Point;

// ============================================================================
// Constants
// ============================================================================

/// Default maximum distance, in pixels, between a curve and its polyline.
pub const DEFAULT_CURVE_TOLERANCE: f32 = 0.25;

/// Upper bound on the lines emitted for a single curve.
pub const MAX_CURVE_SEGMENTS: u32 = 1 << 12;

// ============================================================================
// Evaluation
// ============================================================================

/// Point on the quadratic at `t`: `(A*t + 2B)*t + P0` with `A = P0 - 2P1 + P2`
/// and `B = P1 - P0`.
#[inline]
pub fn eval_quad(src: &[Point; 3], t: f32) -> Point {
    let a = src[0] - src[1] * 2.0 + src[2];
    let b = src[1] - src[0];
    (a * t + b * 2.0) * t + src[0]
}

/// Point on the cubic at `t`, Horner form of the power basis.
#[inline]
pub fn eval_cubic(src: &[Point; 4], t: f32) -> Point {
    let c1 = (src[1] - src[0]) * 3.0;
    let c2 = (src[0] - src[1] * 2.0 + src[2]) * 3.0;
    let c3 = src[1] * 3.0 - src[0] - src[2] * 3.0 + src[3];
    ((c3 * t + c2) * t + c1) * t + src[0]
}

// ============================================================================
// De Casteljau subdivision
// ============================================================================

/// Split a quadratic at `t`. The halves are `dst[0..3]` and `dst[2..5]`.
pub fn chop_quad_at(src: &[Point; 3], t: f32) -> [Point; 5] {
    let ab = src[0].lerp(src[1], t);
    let bc = src[1].lerp(src[2], t);
    let abc = ab.lerp(bc, t);
    [src[0], ab, abc, bc, src[2]]
}

/// Split a cubic at `t`. The halves are `dst[0..4]` and `dst[3..7]`.
pub fn chop_cubic_at(src: &[Point; 4], t: f32) -> [Point; 7] {
    let ab = src[0].lerp(src[1], t);
    let bc = src[1].lerp(src[2], t);
    let cd = src[2].lerp(src[3], t);
    let abc = ab.lerp(bc, t);
    let bcd = bc.lerp(cd, t);
    let abcd = abc.lerp(bcd, t);
    [src[0], ab, abc, abcd, bcd, cd, src[3]]
}

// ============================================================================
// Extrema
// ============================================================================

#[inline]
fn in_unit_open(t: f32) -> Option<f32> {
    if t > 0.0 && t < 1.0 {
        Some(t)
    } else {
        None
    }
}

/// Parameter of the interior extremum of a 1-D quadratic, if any.
///
/// The derivative of `(a - 2b + c)t^2 + 2(b - a)t + a` vanishes at
/// `t = (a - b) / (a - 2b + c)`.
pub fn quad_extremum(a: f32, b: f32, c: f32) -> Option<f32> {
    let n = a - 2.0 * b + c;
    if n == 0.0 {
        return None;
    }
    in_unit_open((a - b) / n)
}

/// Parameters of the interior extrema of a 1-D cubic (zero, one or two).
///
/// The derivative is `3(m t^2 + 2n t + o)` with `m = -a + 3b - 3c + d`,
/// `n = a - 2b + c`, `o = b - a`.
pub fn cubic_extrema(a: f32, b: f32, c: f32, d: f32) -> [Option<f32>; 2] {
    let m = -a + 3.0 * b - 3.0 * c + d;
    let n = a - 2.0 * b + c;
    let o = b - a;
    if m == 0.0 {
        if n == 0.0 {
            return [None, None];
        }
        return [in_unit_open(-o / (2.0 * n)), None];
    }
    let disc = n * n - m * o;
    if disc < 0.0 {
        return [None, None];
    }
    let root = disc.sqrt();
    [
        in_unit_open((-n + root) / m),
        in_unit_open((-n - root) / m),
    ]
}

// ============================================================================
// Flattening
// ============================================================================

#[inline]
fn segments_for_deviation(deviation: f32, tolerance: f32) -> u32 {
    let n = (deviation / tolerance).sqrt().ceil();
    if n.is_nan() || n < 1.0 {
        1
    } else if n > MAX_CURVE_SEGMENTS as f32 {
        MAX_CURVE_SEGMENTS
    } else {
        n as u32
    }
}

/// Line count for a quadratic: the chord distance is at most
/// `|P0 - 2P1 + P2| / 4`.
pub fn quad_segment_count(src: &[Point; 3], tolerance: f32) -> u32 {
    let dev = (src[0] - src[1] * 2.0 + src[2]).length() * 0.25;
    segments_for_deviation(dev, tolerance)
}

/// Line count for a cubic: the chord distance is at most
/// `3/4 * max(|P0 - 2P1 + P2|, |P1 - 2P2 + P3|)`.
pub fn cubic_segment_count(src: &[Point; 4], tolerance: f32) -> u32 {
    let d0 = (src[0] - src[1] * 2.0 + src[2]).length();
    let d1 = (src[1] - src[2] * 2.0 + src[3]).length();
    segments_for_deviation(d0.max(d1) * 0.75, tolerance)
}

/// Append the polyline of a quadratic to `out`, excluding `src[0]` and
/// ending exactly on `src[2]`.
pub fn flatten_quad(src: &[Point; 3], tolerance: f32, out: &mut Vec<Point>) {
    let n = quad_segment_count(src, tolerance);
    let mut rest = *src;
    for i in 0..n - 1 {
        // split off 1/(segments left) of what remains
        let d = chop_quad_at(&rest, 1.0 / (n - i) as f32);
        out.push(d[2]);
        rest = [d[2], d[3], d[4]];
    }
    out.push(src[2]);
}

/// Append the polyline of a cubic to `out`, excluding `src[0]` and ending
/// exactly on `src[3]`.
pub fn flatten_cubic(src: &[Point; 4], tolerance: f32, out: &mut Vec<Point>) {
    let n = cubic_segment_count(src, tolerance);
    let mut rest = *src;
    for i in 0..n - 1 {
        let d = chop_cubic_at(&rest, 1.0 / (n - i) as f32);
        out.push(d[3]);
        rest = [d[3], d[4], d[5], d[6]];
    }
    out.push(src[3]);
}

// ============================================================================
// Tests
// ============================================================================
