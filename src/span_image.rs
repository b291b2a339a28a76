//! Bitmap shader with nearest-neighbor sampling.
//!
//! Device pixel centers are mapped through the inverse of
//! `device ∘ local` into texel space, each axis is folded by the
//! [`TileMode`] on its own, and the texel at the floored position is
//! returned as is. No filtering.

use crate::color::Pixel;
use crate::error::RenderError;
use crate::rendering_buffer::Bitmap;
use crate::shader::{Shader, ShaderContext, TileMode};
use crate::trans_affine::AffineTransform;

// ============================================================================
// BitmapShader
// ============================================================================

/// Samples a borrowed [`Bitmap`]. `local` maps texel space to user space.
#[derive(Debug, Clone)]
pub struct BitmapShader<'a> {
    bitmap: &'a Bitmap,
    ctx: ShaderContext,
    tile: TileMode,
    opaque: bool,
}

impl<'a> BitmapShader<'a> {
    pub fn new(bitmap: &'a Bitmap, local: AffineTransform, tile: TileMode) -> Result<Self, RenderError> {
        let ctx = ShaderContext::new(local).ok_or(RenderError::SingularTransform)?;
        Ok(Self {
            bitmap,
            ctx,
            tile,
            opaque: !bitmap.is_empty() && bitmap.is_opaque(),
        })
    }

    pub fn bitmap(&self) -> &Bitmap {
        self.bitmap
    }

    pub fn tile_mode(&self) -> TileMode {
        self.tile
    }

    /// Texel for a texel-space position. An empty bitmap yields transparent.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Pixel {
        if self.bitmap.is_empty() {
            return Pixel::TRANSPARENT;
        }
        let ix = self.tile.tile_index(u, self.bitmap.width());
        let iy = self.tile.tile_index(v, self.bitmap.height());
        self.bitmap.pixel(ix, iy)
    }
}

impl Shader for BitmapShader<'_> {
    fn is_opaque(&self) -> bool {
        self.opaque
    }

    fn set_context(&mut self, ctm: &AffineTransform) -> bool {
        self.ctx.update(ctm)
    }

    fn shade_row(&mut self, x: i32, y: i32, row: &mut [Pixel]) {
        let n = row.len();
        for (px, p) in row.iter_mut().zip(self.ctx.row_centers(x, y, n)) {
            *px = self.sample(p.x, p.y);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x2 bitmap whose pixel value encodes its column and row.
    fn checker() -> Bitmap {
        let mut px = Vec::new();
        for y in 0..2u32 {
            for x in 0..4u32 {
                px.push(Pixel(0xFF00_0000 | (y << 8) | x));
            }
        }
        Bitmap::from_pixels(4, 2, px).unwrap()
    }

    fn col(p: Pixel) -> u32 {
        p.0 & 0xFF
    }

    fn row_idx(p: Pixel) -> u32 {
        (p.0 >> 8) & 0xFF
    }

    #[test]
    fn test_identity_sampling() {
        let bm = checker();
        let mut s = BitmapShader::new(&bm, AffineTransform::identity(), TileMode::Clamp).unwrap();
        assert!(s.set_context(&AffineTransform::identity()));
        let mut row = [Pixel(0); 4];
        s.shade_row(0, 1, &mut row);
        assert_eq!(row.map(col), [0, 1, 2, 3]);
        assert!(row.iter().all(|p| row_idx(*p) == 1));
        assert!(s.is_opaque());
    }

    #[test]
    fn test_boundary_columns() {
        let bm = checker();
        let w = bm.width() as f32;
        let clamp = BitmapShader::new(&bm, AffineTransform::identity(), TileMode::Clamp).unwrap();
        let repeat = BitmapShader::new(&bm, AffineTransform::identity(), TileMode::Repeat).unwrap();
        let mirror = BitmapShader::new(&bm, AffineTransform::identity(), TileMode::Mirror).unwrap();
        assert_eq!(col(clamp.sample(w, 0.0)), 3);
        assert_eq!(col(repeat.sample(w, 0.0)), 0);
        assert_eq!(col(mirror.sample(w, 0.0)), 2);
    }

    #[test]
    fn test_axes_tile_independently() {
        let bm = checker();
        let s = BitmapShader::new(&bm, AffineTransform::identity(), TileMode::Repeat).unwrap();
        let p = s.sample(5.5, -0.5);
        assert_eq!(col(p), 1);
        assert_eq!(row_idx(p), 1);
    }

    #[test]
    fn test_local_scale() {
        let bm = checker();
        let mut s = BitmapShader::new(&bm, AffineTransform::scaling(2.0, 2.0), TileMode::Clamp).unwrap();
        assert!(s.set_context(&AffineTransform::identity()));
        let mut row = [Pixel(0); 8];
        s.shade_row(0, 0, &mut row);
        assert_eq!(row.map(col), [0, 0, 1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn test_ctm_composes_with_local() {
        let bm = checker();
        let mut s = BitmapShader::new(&bm, AffineTransform::translation(10.0, 0.0), TileMode::Clamp).unwrap();
        assert!(s.set_context(&AffineTransform::translation(0.0, 5.0)));
        let mut row = [Pixel(0); 2];
        s.shade_row(11, 6, &mut row);
        assert_eq!(row.map(col), [1, 2]);
        assert!(row.iter().all(|p| row_idx(*p) == 1));
    }

    #[test]
    fn test_singular_and_translucent() {
        let bm = checker();
        assert!(BitmapShader::new(&bm, AffineTransform::scaling(0.0, 1.0), TileMode::Clamp).is_err());

        let see_through = Bitmap::new(2, 2);
        let s = BitmapShader::new(&see_through, AffineTransform::identity(), TileMode::Clamp).unwrap();
        assert!(!s.is_opaque());
    }

    #[test]
    fn test_empty_bitmap_shades_transparent() {
        let empty = Bitmap::new(0, 0);
        let mut s = BitmapShader::new(&empty, AffineTransform::identity(), TileMode::Repeat).unwrap();
        let mut row = [Pixel(5); 3];
        s.shade_row(0, 0, &mut row);
        assert_eq!(row, [Pixel::TRANSPARENT; 3]);
        assert!(!s.is_opaque());
    }
}
