//! Quad subdivision into a triangle mesh.
//!
//! A quad `v0 v1 v2 v3` (clockwise, `v0` top-left) at subdivision level `L`
//! becomes a grid of `(L + 2)²` vertices: row `i` runs from
//! `lerp(v0, v3, s)` to `lerp(v1, v2, s)` with `s = i / (L + 1)`. Each grid
//! cell yields two triangles, so the mesh has `2 (L + 1)²` of them.

use crate::basics::Point;
use crate::color::Color;

/// Vertices per grid side at subdivision `level`.
#[inline]
pub fn grid_side(level: u32) -> usize {
    level as usize + 2
}

/// `a*(1 - t) + b*t`, exact at both ends.
#[inline]
pub fn lerp_point(a: Point, b: Point, t: f32) -> Point {
    Point::new(a.x * (1.0 - t) + b.x * t, a.y * (1.0 - t) + b.y * t)
}

/// Channel-wise `a*(1 - t) + b*t`.
#[inline]
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color::new(
        a.r * (1.0 - t) + b.r * t,
        a.g * (1.0 - t) + b.g * t,
        a.b * (1.0 - t) + b.b * t,
        a.a * (1.0 - t) + b.a * t,
    )
}

/// Bilinear grid over a quad, row-major.
///
/// `lerp` interpolates one attribute; it is used for positions, texture
/// coordinates and colors alike.
pub fn quad_grid<T: Copy>(corners: &[T; 4], level: u32, lerp: impl Fn(T, T, f32) -> T) -> Vec<T> {
    let n = grid_side(level);
    let step = 1.0 / (n - 1) as f32;
    let mut out = Vec::with_capacity(n * n);
    for i in 0..n {
        let s = i as f32 * step;
        let left = lerp(corners[0], corners[3], s);
        let right = lerp(corners[1], corners[2], s);
        for j in 0..n {
            out.push(lerp(left, right, j as f32 * step));
        }
    }
    out
}

/// Triangle indices for the grid produced by [`quad_grid`].
///
/// Cell with top-left vertex `p` and bottom-left vertex `c` yields
/// `(p, p + 1, c)` and `(p + 1, c, c + 1)`.
pub fn grid_indices(level: u32) -> Vec<usize> {
    let n = grid_side(level);
    let cells = n - 1;
    let mut out = Vec::with_capacity(cells * cells * 6);
    for i in 0..cells {
        for j in 0..cells {
            let p = i * n + j;
            let c = p + n;
            out.extend_from_slice(&[p, p + 1, c, p + 1, c, c + 1]);
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
