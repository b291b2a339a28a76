//! Color types and operations.
//!
//! - [`Color`]: unpremultiplied `f32` RGBA, the color a caller asks for.
//! - [`Pixel`]: packed premultiplied 8-bit ARGB, what a [`Bitmap`] stores.
//!
//! [`Bitmap`]: crate::rendering_buffer::Bitmap

use crate::basics::unit_to_byte;
use core::ops::{Add, Mul, Sub};

// ============================================================================
// Fixed-point helpers
// ============================================================================

/// `v / 255` rounded to nearest, exact for `v` in `0..=255*255`.
#[inline]
pub fn div255(v: u32) -> u32 {
    let t = v + 128;
    ((t >> 8) + t) >> 8
}

/// Fixed-point multiply of two 0..255 values with rounding.
#[inline]
pub fn mul255(a: u32, b: u32) -> u32 {
    div255(a * b)
}

// ============================================================================
// Color
// ============================================================================

/// Unpremultiplied floating point RGBA color. Channels are nominally in
/// `[0, 1]`; out-of-range values are clamped when converted to a [`Pixel`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from three channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Clamp every channel to `[0, 1]`.
    pub fn pinned(&self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    /// True when the alpha channel is exactly 1.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Premultiply and pack: `A = round(a*255)`, `R = round(r*a*255)`, ...
    #[inline]
    pub fn to_pixel(&self) -> Pixel {
        let a = self.a.clamp(0.0, 1.0);
        Pixel::pack(
            unit_to_byte(a),
            unit_to_byte(self.r * a),
            unit_to_byte(self.g * a),
            unit_to_byte(self.b * a),
        )
    }
}

impl Add for Color {
    type Output = Color;
    #[inline]
    fn add(self, o: Color) -> Color {
        Color::new(self.r + o.r, self.g + o.g, self.b + o.b, self.a + o.a)
    }
}

impl Sub for Color {
    type Output = Color;
    #[inline]
    fn sub(self, o: Color) -> Color {
        Color::new(self.r - o.r, self.g - o.g, self.b - o.b, self.a - o.a)
    }
}

impl Mul<f32> for Color {
    type Output = Color;
    #[inline]
    fn mul(self, k: f32) -> Color {
        Color::new(self.r * k, self.g * k, self.b * k, self.a * k)
    }
}

// ============================================================================
// Pixel
// ============================================================================

/// Packed premultiplied ARGB: `A << 24 | R << 16 | G << 8 | B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Pixel(pub u32);

impl Pixel {
    pub const TRANSPARENT: Pixel = Pixel(0);

    /// Pack four 0..255 channels. Values above 255 saturate.
    #[inline]
    pub fn pack(a: u32, r: u32, g: u32, b: u32) -> Self {
        Pixel(a.min(255) << 24 | r.min(255) << 16 | g.min(255) << 8 | b.min(255))
    }

    #[inline]
    pub fn a(self) -> u32 {
        self.0 >> 24
    }

    #[inline]
    pub fn r(self) -> u32 {
        (self.0 >> 16) & 0xFF
    }

    #[inline]
    pub fn g(self) -> u32 {
        (self.0 >> 8) & 0xFF
    }

    #[inline]
    pub fn b(self) -> u32 {
        self.0 & 0xFF
    }

    /// Channels as `[a, r, g, b]`.
    #[inline]
    pub fn argb(self) -> [u32; 4] {
        [self.a(), self.r(), self.g(), self.b()]
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a() == 255
    }

    /// Channel-wise product of two premultiplied pixels, rounded.
    #[inline]
    pub fn modulate(self, other: Pixel) -> Pixel {
        Pixel::pack(
            mul255(self.a(), other.a()),
            mul255(self.r(), other.r()),
            mul255(self.g(), other.g()),
            mul255(self.b(), other.b()),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
