//! Shader interface: per-pixel color sources.
//!
//! A [`Shader`] is bound to a device transform with [`Shader::set_context`]
//! once per draw and then asked for whole rows of premultiplied pixels.
//! Concrete shaders live in the `span_*` modules.
//!
//! [`ShaderContext`] is the shared cache most shaders keep: the inverse of
//! `device ∘ local`, recomputed only when the device transform changes.

use crate::basics::{ifloor, Point};
use crate::color::Pixel;
use crate::trans_affine::AffineTransform;

// ============================================================================
// Shader trait
// ============================================================================

/// A stateful per-pixel color source.
pub trait Shader {
    /// True when every pixel this shader can produce has alpha 255.
    fn is_opaque(&self) -> bool;

    /// Bind the shader to the device transform `ctm` of the coming draw.
    ///
    /// Returns `false` when the composed transform is singular; the previous
    /// context is then kept and the draw should paint nothing.
    fn set_context(&mut self, ctm: &AffineTransform) -> bool;

    /// Fill `row` with the pixels of device row `y`, starting at column `x`.
    /// Pixel `i` samples the device point `(x + i + 0.5, y + 0.5)`.
    fn shade_row(&mut self, x: i32, y: i32, row: &mut [Pixel]);
}

impl<S: Shader + ?Sized> Shader for &mut S {
    fn is_opaque(&self) -> bool {
        (**self).is_opaque()
    }

    fn set_context(&mut self, ctm: &AffineTransform) -> bool {
        (**self).set_context(ctm)
    }

    fn shade_row(&mut self, x: i32, y: i32, row: &mut [Pixel]) {
        (**self).shade_row(x, y, row)
    }
}

impl<S: Shader + ?Sized> Shader for Box<S> {
    fn is_opaque(&self) -> bool {
        (**self).is_opaque()
    }

    fn set_context(&mut self, ctm: &AffineTransform) -> bool {
        (**self).set_context(ctm)
    }

    fn shade_row(&mut self, x: i32, y: i32, row: &mut [Pixel]) {
        (**self).shade_row(x, y, row)
    }
}

// ============================================================================
// Tiling
// ============================================================================

/// Largest parameter a clamped gradient may reach; keeps `floor(t*(n-1))`
/// strictly below the last stop.
pub const GRADIENT_CLAMP_MAX: f32 = 0.9999;

/// Policy for coordinates outside a shader's natural range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileMode {
    #[default]
    Clamp,
    Repeat,
    Mirror,
}

impl TileMode {
    /// Fold a gradient parameter into `[0, GRADIENT_CLAMP_MAX]`.
    #[inline]
    pub fn tile_unit(self, t: f32) -> f32 {
        let t = match self {
            TileMode::Clamp => t,
            TileMode::Repeat => {
                let f = t % 1.0;
                if f < 0.0 {
                    f + 1.0
                } else {
                    f
                }
            }
            TileMode::Mirror => {
                let fl = t.floor();
                let frac = t - fl;
                if (fl as i64) & 1 != 0 {
                    1.0 - frac
                } else {
                    frac
                }
            }
        };
        // NaN falls through to 0
        if t > 0.0 {
            t.min(GRADIENT_CLAMP_MAX)
        } else {
            0.0
        }
    }

    /// Map a texel coordinate to a column or row index in `0..dim`.
    ///
    /// - `Clamp` pins to `[0, dim - 1]`.
    /// - `Repeat` wraps `floor(u)` modulo `dim`.
    /// - `Mirror` folds `floor(u)` over tiles of `dim - 1` texels, reversing
    ///   odd tiles, so the edge texel is not repeated: `dim` maps to `dim - 2`.
    #[inline]
    pub fn tile_index(self, u: f32, dim: u32) -> u32 {
        if dim <= 1 {
            return 0;
        }
        let last = dim as i64 - 1;
        let i = ifloor(u.clamp(i32::MIN as f32, i32::MAX as f32)) as i64;
        let idx = match self {
            TileMode::Clamp => i.clamp(0, last),
            TileMode::Repeat => i.rem_euclid(dim as i64),
            TileMode::Mirror => {
                let tile = i.div_euclid(last);
                let local = i.rem_euclid(last);
                if tile & 1 != 0 {
                    last - local
                } else {
                    local
                }
            }
        };
        idx as u32
    }
}

// ============================================================================
// ShaderContext
// ============================================================================

/// Cached inverse of `device ∘ local` for a shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderContext {
    local: AffineTransform,
    ctm: AffineTransform,
    inverse: AffineTransform,
}

impl ShaderContext {
    /// Start bound to the identity device transform. `None` when `local`
    /// itself is singular.
    pub fn new(local: AffineTransform) -> Option<Self> {
        Some(Self {
            local,
            ctm: AffineTransform::identity(),
            inverse: local.invert()?,
        })
    }

    /// Rebind to `ctm`. Unchanged transforms are free; a singular
    /// composition returns `false` and leaves the cache as it was.
    pub fn update(&mut self, ctm: &AffineTransform) -> bool {
        if *ctm == self.ctm {
            return true;
        }
        match (*ctm * self.local).invert() {
            Some(inverse) => {
                self.ctm = *ctm;
                self.inverse = inverse;
                true
            }
            None => false,
        }
    }

    /// The shader-local transform.
    #[inline]
    pub fn local(&self) -> &AffineTransform {
        &self.local
    }

    /// Device space to shader space.
    #[inline]
    pub fn inverse(&self) -> &AffineTransform {
        &self.inverse
    }

    /// Shader-space position of the center of device pixel `(x, y)`.
    #[inline]
    pub fn map_center(&self, x: i32, y: i32) -> Point {
        self.inverse
            .map_point(Point::new(x as f32 + 0.5, y as f32 + 0.5))
    }

    /// Shader-space positions of `len` consecutive pixel centers on row `y`.
    pub fn row_centers(&self, x: i32, y: i32, len: usize) -> impl Iterator<Item = Point> + '_ {
        let cy = y as f32 + 0.5;
        (0..len).map(move |i| {
            self.inverse
                .map_point(Point::new(x as f32 + i as f32 + 0.5, cy))
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
