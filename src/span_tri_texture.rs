//! Texture mapping of a triangle.
//!
//! Three texture coordinates are pinned to three destination points. The
//! affine map between the two triangles is `P ∘ T⁻¹`, where `P` and `T`
//! map the unit triangle onto the destination and texture triangles. The
//! wrapped shader (usually a bitmap) is then bound with
//! `device ∘ P ∘ T⁻¹` so it samples in its own texel space.

use crate::basics::Point;
use crate::color::Pixel;
use crate::shader::Shader;
use crate::trans_affine::AffineTransform;

/// Maps the unit triangle onto `pts`, anchored at `pts[2]`.
pub fn triangle_basis(pts: &[Point; 3]) -> AffineTransform {
    AffineTransform::from_basis(pts[0] - pts[2], pts[1] - pts[2], pts[2])
}

// ============================================================================
// TriTextureShader
// ============================================================================

/// Sticks a region of a wrapped shader onto a destination triangle.
pub struct TriTextureShader<'s> {
    inner: &'s mut dyn Shader,
    /// Texture space to user space; `None` when the texture triangle has no
    /// area.
    texture_matrix: Option<AffineTransform>,
}

impl<'s> TriTextureShader<'s> {
    pub fn new(inner: &'s mut dyn Shader, pts: [Point; 3], texs: [Point; 3]) -> Self {
        let texture_matrix = triangle_basis(&texs)
            .invert()
            .map(|tex_inv| triangle_basis(&pts) * tex_inv);
        Self {
            inner,
            texture_matrix,
        }
    }

    /// The texture-to-user map, if the texture triangle is not degenerate.
    pub fn texture_matrix(&self) -> Option<&AffineTransform> {
        self.texture_matrix.as_ref()
    }
}

impl Shader for TriTextureShader<'_> {
    fn is_opaque(&self) -> bool {
        self.inner.is_opaque()
    }

    fn set_context(&mut self, ctm: &AffineTransform) -> bool {
        match self.texture_matrix {
            Some(m) => self.inner.set_context(&(*ctm * m)),
            None => false,
        }
    }

    fn shade_row(&mut self, x: i32, y: i32, row: &mut [Pixel]) {
        self.inner.shade_row(x, y, row);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering_buffer::Bitmap;
    use crate::shader::TileMode;
    use crate::span_image::BitmapShader;

    fn gradient_bitmap() -> Bitmap {
        let mut px = Vec::new();
        for y in 0..4u32 {
            for x in 0..4u32 {
                px.push(Pixel(0xFF00_0000 | (y << 8) | x));
            }
        }
        Bitmap::from_pixels(4, 4, px).unwrap()
    }

    #[test]
    fn test_identity_mapping() {
        let bm = gradient_bitmap();
        let mut inner = BitmapShader::new(&bm, AffineTransform::identity(), TileMode::Clamp).unwrap();
        let tri = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
        ];
        let mut s = TriTextureShader::new(&mut inner, tri, tri);
        assert!(s.texture_matrix().unwrap().is_equal(&AffineTransform::identity(), 1e-6));
        assert!(s.set_context(&AffineTransform::identity()));
        assert!(s.is_opaque());
        let mut row = [Pixel(0); 4];
        s.shade_row(0, 2, &mut row);
        assert_eq!(row.map(|p| p.0 & 0xFFFF), [0x200, 0x201, 0x202, 0x203]);
    }

    #[test]
    fn test_stretches_texture() {
        let bm = gradient_bitmap();
        let mut inner = BitmapShader::new(&bm, AffineTransform::identity(), TileMode::Clamp).unwrap();
        let tex = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
        ];
        let dst = [
            Point::new(10.0, 10.0),
            Point::new(18.0, 10.0),
            Point::new(10.0, 18.0),
        ];
        let mut s = TriTextureShader::new(&mut inner, dst, tex);
        assert!(s.set_context(&AffineTransform::identity()));
        let mut row = [Pixel(0); 8];
        s.shade_row(10, 10, &mut row);
        assert_eq!(row.map(|p| p.0 & 0xFF), [0, 0, 1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn test_degenerate_texture_triangle() {
        let bm = gradient_bitmap();
        let mut inner = BitmapShader::new(&bm, AffineTransform::identity(), TileMode::Clamp).unwrap();
        let flat = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        ];
        let dst = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
        ];
        let mut s = TriTextureShader::new(&mut inner, dst, flat);
        assert!(s.texture_matrix().is_none());
        assert!(!s.set_context(&AffineTransform::identity()));
    }
}
