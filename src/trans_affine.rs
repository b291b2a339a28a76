//! Affine transformation matrix.
//!
//! A 2D affine map stored as six floats `(a, b, c, d, e, f)`:
//!
//! ```text
//!   | a  c  e |
//!   | b  d  f |
//!   | 0  0  1 |
//! ```
//!
//! Transform: `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
//!
//! Composition convention: [`AffineTransform::concat`]`(A, B)` (also written
//! `A * B`) applies `B` first and then `A`.

use crate::basics::{is_equal_eps, Point};

/// Epsilon for approximate matrix comparisons.
pub const AFFINE_EPSILON: f32 = 1e-5;

/// 2D affine transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl AffineTransform {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Identity matrix.
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Matrix from its six components, in `(a, b, c, d, e, f)` order.
    pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Translation matrix.
    pub fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Non-uniform scaling matrix.
    pub fn scaling(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `radians` (positive turns +x toward +y).
    pub fn rotation(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    /// Matrix whose columns are the basis vectors `u`, `v` and the origin.
    ///
    /// Maps `(1,0)` to `origin + u`, `(0,1)` to `origin + v` and `(0,0)` to
    /// `origin`. Used to map the unit triangle onto an arbitrary one.
    pub fn from_basis(u: Point, v: Point, origin: Point) -> Self {
        Self::new(u.x, u.y, v.x, v.y, origin.x, origin.y)
    }

    // ====================================================================
    // Composition
    // ====================================================================

    /// The transform that applies `second` first and then `first`.
    pub fn concat(first: &AffineTransform, second: &AffineTransform) -> Self {
        Self::new(
            first.a * second.a + first.c * second.b,
            first.b * second.a + first.d * second.b,
            first.a * second.c + first.c * second.d,
            first.b * second.c + first.d * second.d,
            first.a * second.e + first.c * second.f + first.e,
            first.b * second.e + first.d * second.f + first.f,
        )
    }

    /// Replace `self` with `self * m`, so `m` is applied before `self`.
    pub fn pre_concat(&mut self, m: &AffineTransform) -> &mut Self {
        *self = Self::concat(self, m);
        self
    }

    /// Replace `self` with `m * self`, so `m` is applied after `self`.
    pub fn post_concat(&mut self, m: &AffineTransform) -> &mut Self {
        *self = Self::concat(m, self);
        self
    }

    /// Determinant of the 2x2 linear part.
    #[inline]
    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    /// Closed-form inverse. `None` exactly when the determinant is zero.
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self::new(
            self.d * inv,
            -self.b * inv,
            -self.c * inv,
            self.a * inv,
            (self.c * self.f - self.d * self.e) * inv,
            (self.b * self.e - self.a * self.f) * inv,
        ))
    }

    // ====================================================================
    // Mapping
    // ====================================================================

    /// Map one point.
    #[inline]
    pub fn map_point(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Map a slice of points in place. The identity leaves them untouched.
    pub fn map_points(&self, pts: &mut [Point]) {
        if self.is_identity() {
            return;
        }
        for p in pts.iter_mut() {
            *p = self.map_point(*p);
        }
    }

    /// Map `src` into `dst`; only the common prefix is written.
    pub fn map_points_into(&self, src: &[Point], dst: &mut [Point]) {
        if self.is_identity() {
            let n = src.len().min(dst.len());
            dst[..n].copy_from_slice(&src[..n]);
            return;
        }
        for (d, s) in dst.iter_mut().zip(src) {
            *d = self.map_point(*s);
        }
    }

    // ====================================================================
    // Queries
    // ====================================================================

    /// Exact identity check.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// True when the matrix only scales and translates, so axis-aligned
    /// rectangles stay axis-aligned.
    #[inline]
    pub fn is_scale_translate(&self) -> bool {
        self.b == 0.0 && self.c == 0.0
    }

    /// Component-wise comparison within `epsilon`.
    pub fn is_equal(&self, m: &AffineTransform, epsilon: f32) -> bool {
        is_equal_eps(self.a, m.a, epsilon)
            && is_equal_eps(self.b, m.b, epsilon)
            && is_equal_eps(self.c, m.c, epsilon)
            && is_equal_eps(self.d, m.d, epsilon)
            && is_equal_eps(self.e, m.e, epsilon)
            && is_equal_eps(self.f, m.f, epsilon)
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// `A * B` applies `B` first, then `A`.
impl std::ops::Mul for AffineTransform {
    type Output = AffineTransform;
    fn mul(self, rhs: AffineTransform) -> AffineTransform {
        AffineTransform::concat(&self, &rhs)
    }
}

impl std::ops::MulAssign for AffineTransform {
    fn mul_assign(&mut self, rhs: AffineTransform) {
        self.pre_concat(&rhs);
    }
}

// ============================================================================
// Tests
// ============================================================================
