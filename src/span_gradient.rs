//! Linear gradient shaders.
//!
//! A gradient is split in two halves, as in a classic span generator:
//!
//! - the geometry, shared by every gradient: a unit space in which `p0` is
//!   `(0, 0)` and `p1` is `(1, 0)`, so the gradient parameter of a pixel is
//!   the x coordinate of its center mapped into that space, folded by the
//!   [`TileMode`];
//! - the color function ([`ColorRamp`]) turning that parameter into a color.
//!
//! Three ramps exist: [`UniformStops`] (N evenly spaced colors),
//! [`PositionedStops`] (N colors at explicit positions) and [`TwoStops`].

use crate::basics::Point;
use crate::color::{Color, Pixel};
use crate::error::RenderError;
use crate::shader::{Shader, ShaderContext, TileMode};
use crate::trans_affine::AffineTransform;

// ============================================================================
// ColorRamp trait
// ============================================================================

/// Maps a tiled gradient parameter in `[0, 1)` to an unpremultiplied color.
pub trait ColorRamp {
    fn color_at(&self, t: f32) -> Color;

    /// True when every color of the ramp is opaque.
    fn is_opaque(&self) -> bool;
}

fn all_opaque(colors: &[Color]) -> bool {
    colors.iter().all(|c| c.is_opaque())
}

fn deltas(colors: &[Color]) -> Vec<Color> {
    colors.windows(2).map(|w| w[1] - w[0]).collect()
}

// ============================================================================
// Ramps
// ============================================================================

/// Two colors: `c0 + (c1 - c0) * t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoStops {
    c0: Color,
    delta: Color,
    opaque: bool,
}

impl TwoStops {
    pub fn new(c0: Color, c1: Color) -> Self {
        Self {
            c0,
            delta: c1 - c0,
            opaque: c0.is_opaque() && c1.is_opaque(),
        }
    }
}

impl ColorRamp for TwoStops {
    #[inline]
    fn color_at(&self, t: f32) -> Color {
        self.c0 + self.delta * t
    }

    fn is_opaque(&self) -> bool {
        self.opaque
    }
}

/// N colors spread evenly over `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformStops {
    colors: Vec<Color>,
    deltas: Vec<Color>,
    opaque: bool,
}

impl UniformStops {
    pub fn new(colors: &[Color]) -> Result<Self, RenderError> {
        if colors.is_empty() {
            return Err(RenderError::EmptyGradient);
        }
        let mut d = deltas(colors);
        if d.is_empty() {
            d.push(Color::TRANSPARENT);
        }
        Ok(Self {
            colors: colors.to_vec(),
            deltas: d,
            opaque: all_opaque(colors),
        })
    }
}

impl ColorRamp for UniformStops {
    #[inline]
    fn color_at(&self, t: f32) -> Color {
        let x = t * (self.colors.len() - 1) as f32;
        let i = (x as usize).min(self.deltas.len() - 1);
        self.colors[i] + self.deltas[i] * (x - i as f32)
    }

    fn is_opaque(&self) -> bool {
        self.opaque
    }
}

/// N colors at explicit, non-decreasing positions.
///
/// Parameters before the first position take the first color and those past
/// the last position take the last color.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedStops {
    colors: Vec<Color>,
    deltas: Vec<Color>,
    positions: Vec<f32>,
    /// `1 / (pos[i+1] - pos[i])`, or 0 for a zero-width segment.
    recips: Vec<f32>,
    opaque: bool,
}

impl PositionedStops {
    pub fn new(colors: &[Color], positions: &[f32]) -> Result<Self, RenderError> {
        if colors.len() != positions.len() {
            return Err(RenderError::PositionCountMismatch {
                colors: colors.len(),
                positions: positions.len(),
            });
        }
        if colors.len() < 2 {
            return Err(RenderError::EmptyGradient);
        }
        let sorted = positions.windows(2).all(|w| w[0] <= w[1]);
        if !sorted {
            return Err(RenderError::InvalidPositions);
        }
        let recips = positions
            .windows(2)
            .map(|w| {
                let width = w[1] - w[0];
                if width > 0.0 {
                    1.0 / width
                } else {
                    0.0
                }
            })
            .collect();
        Ok(Self {
            colors: colors.to_vec(),
            deltas: deltas(colors),
            positions: positions.to_vec(),
            recips,
            opaque: all_opaque(colors),
        })
    }

    /// Index of the last segment whose start is at or before `t`.
    #[inline]
    fn segment(&self, t: f32) -> usize {
        let interior = &self.positions[1..self.positions.len() - 1];
        interior.partition_point(|&p| p <= t)
    }
}

impl ColorRamp for PositionedStops {
    #[inline]
    fn color_at(&self, t: f32) -> Color {
        let last = self.positions.len() - 1;
        if t <= self.positions[0] {
            return self.colors[0];
        }
        if t >= self.positions[last] {
            return self.colors[last];
        }
        let i = self.segment(t);
        let local = (t - self.positions[i]) * self.recips[i];
        self.colors[i] + self.deltas[i] * local
    }

    fn is_opaque(&self) -> bool {
        self.opaque
    }
}

// ============================================================================
// LinearGradient
// ============================================================================

/// Matrix mapping the gradient unit space onto user space:
/// `(0,0) -> p0`, `(1,0) -> p1`, and `(0,1)` a quarter turn from `p1`.
pub fn gradient_matrix(p0: Point, p1: Point) -> AffineTransform {
    let d = p1 - p0;
    AffineTransform::from_basis(d, Point::new(-d.y, d.x), p0)
}

/// Linear gradient from `p0` to `p1` with color function `R`.
#[derive(Debug, Clone)]
pub struct LinearGradient<R> {
    ctx: ShaderContext,
    ramp: R,
    tile: TileMode,
}

/// N evenly spaced stops.
pub type UniformGradient = LinearGradient<UniformStops>;
/// N stops at explicit positions.
pub type PositionedGradient = LinearGradient<PositionedStops>;
/// Two stops.
pub type TwoStopGradient = LinearGradient<TwoStops>;

impl<R: ColorRamp> LinearGradient<R> {
    /// Fails with `SingularTransform` when `p0 == p1`.
    pub fn with_ramp(p0: Point, p1: Point, ramp: R, tile: TileMode) -> Result<Self, RenderError> {
        let ctx = ShaderContext::new(gradient_matrix(p0, p1)).ok_or(RenderError::SingularTransform)?;
        Ok(Self { ctx, ramp, tile })
    }

    pub fn ramp(&self) -> &R {
        &self.ramp
    }

    pub fn tile_mode(&self) -> TileMode {
        self.tile
    }
}

impl UniformGradient {
    pub fn new(p0: Point, p1: Point, colors: &[Color], tile: TileMode) -> Result<Self, RenderError> {
        Self::with_ramp(p0, p1, UniformStops::new(colors)?, tile)
    }
}

impl PositionedGradient {
    pub fn new(
        p0: Point,
        p1: Point,
        colors: &[Color],
        positions: &[f32],
        tile: TileMode,
    ) -> Result<Self, RenderError> {
        Self::with_ramp(p0, p1, PositionedStops::new(colors, positions)?, tile)
    }
}

impl TwoStopGradient {
    pub fn new(p0: Point, p1: Point, c0: Color, c1: Color, tile: TileMode) -> Result<Self, RenderError> {
        Self::with_ramp(p0, p1, TwoStops::new(c0, c1), tile)
    }
}

impl<R: ColorRamp> Shader for LinearGradient<R> {
    fn is_opaque(&self) -> bool {
        self.ramp.is_opaque()
    }

    fn set_context(&mut self, ctm: &AffineTransform) -> bool {
        self.ctx.update(ctm)
    }

    fn shade_row(&mut self, x: i32, y: i32, row: &mut [Pixel]) {
        let tile = self.tile;
        let ramp = &self.ramp;
        let n = row.len();
        for (px, p) in row.iter_mut().zip(self.ctx.row_centers(x, y, n)) {
            *px = ramp.color_at(tile.tile_unit(p.x)).to_pixel();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
