//! Gouraud shading: a triangle with one color per vertex.
//!
//! The triangle is described by the basis `(P0 - P2, P1 - P2)` anchored at
//! `P2`. Mapping a pixel center into that basis gives barycentric weights
//! `(u, v)`, and the color is `C2 + (C0 - C2)*u + (C1 - C2)*v`.
//!
//! Along a row `u` and `v` change by the constant amounts `inv.a` and
//! `inv.b`, so the row is produced by adding one color derivative per pixel
//! instead of evaluating the map again. This relies on the context staying
//! fixed while a row is shaded, which holds because a draw binds the
//! context once before scanning begins.

use crate::basics::Point;
use crate::color::{Color, Pixel};
use crate::shader::{Shader, ShaderContext};
use crate::trans_affine::AffineTransform;

// ============================================================================
// TriGradientShader
// ============================================================================

/// Barycentric color interpolation over a triangle.
#[derive(Debug, Clone)]
pub struct TriGradientShader {
    /// `None` for a zero-area triangle; such a shader never binds.
    ctx: Option<ShaderContext>,
    base: Color,
    d0: Color,
    d1: Color,
    opaque: bool,
}

impl TriGradientShader {
    pub fn new(pts: [Point; 3], colors: [Color; 3]) -> Self {
        let basis = AffineTransform::from_basis(pts[0] - pts[2], pts[1] - pts[2], pts[2]);
        Self {
            ctx: ShaderContext::new(basis),
            base: colors[2],
            d0: colors[0] - colors[2],
            d1: colors[1] - colors[2],
            opaque: colors.iter().all(Color::is_opaque),
        }
    }
}

impl Shader for TriGradientShader {
    fn is_opaque(&self) -> bool {
        self.opaque
    }

    fn set_context(&mut self, ctm: &AffineTransform) -> bool {
        match self.ctx.as_mut() {
            Some(ctx) => ctx.update(ctm),
            None => false,
        }
    }

    fn shade_row(&mut self, x: i32, y: i32, row: &mut [Pixel]) {
        let Some(ctx) = self.ctx.as_ref() else {
            row.fill(Pixel::TRANSPARENT);
            return;
        };
        let inv = ctx.inverse();
        let uv = ctx.map_center(x, y);
        let mut color = self.base + self.d0 * uv.x + self.d1 * uv.y;
        let step = self.d0 * inv.a + self.d1 * inv.b;
        for px in row.iter_mut() {
            *px = color.pinned().to_pixel();
            color = color + step;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
