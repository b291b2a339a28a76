//! Foundation types and numeric helpers.
//!
//! Points, rectangles and the rounding conventions that every stage of the
//! pipeline agrees on. Device coordinates are `f32`; pixel indices are `i32`.

use core::ops::{Add, Mul, Neg, Sub};

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Round to the nearest integer, halves rounding up (`floor(v + 0.5)`).
///
/// This is the rounding used for every geometric decision in the rasterizer,
/// so that a vertex shared by two edges always lands on the same row.
#[inline]
pub fn iround(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

/// Floor toward negative infinity.
#[inline]
pub fn ifloor(v: f32) -> i32 {
    v.floor() as i32
}

/// Ceiling as a signed integer.
#[inline]
pub fn iceil(v: f32) -> i32 {
    v.ceil() as i32
}

/// Round a unit float (`[0, 1]`) to a byte, clamping out-of-range input.
#[inline]
pub fn unit_to_byte(v: f32) -> u32 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u32
}

/// Linear interpolation `a*(1-t) + b*t`; exact at both ends.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Check if two floats are equal within epsilon.
#[inline]
pub fn is_equal_eps(v1: f32, v2: f32, epsilon: f32) -> bool {
    (v1 - v2).abs() <= epsilon
}

// ============================================================================
// Point
// ============================================================================

/// A 2D point (or vector) in user or device space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the point seen as a vector.
    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Squared distance to `other`.
    #[inline]
    pub fn distance_sq(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Interpolate between `self` and `other` at `t`.
    #[inline]
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(lerp(self.x, other.x, t), lerp(self.y, other.y, t))
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

// ============================================================================
// Rect
// ============================================================================

/// Axis-aligned rectangle stored as left/top/right/bottom.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::from_ltrb(x, y, x + w, y + h)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// True when the rectangle encloses no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    /// Swap edges so that `left <= right` and `top <= bottom`.
    pub fn normalize(&mut self) -> &Self {
        if self.left > self.right {
            core::mem::swap(&mut self.left, &mut self.right);
        }
        if self.top > self.bottom {
            core::mem::swap(&mut self.top, &mut self.bottom);
        }
        self
    }

    /// The four corners, clockwise from top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
        ]
    }

    /// Grow the rectangle to include `p`.
    #[inline]
    pub fn include(&mut self, p: Point) {
        self.left = self.left.min(p.x);
        self.top = self.top.min(p.y);
        self.right = self.right.max(p.x);
        self.bottom = self.bottom.max(p.y);
    }
}

// ============================================================================
// Tests
// ============================================================================
