//! Nearest-site (Voronoi) shader.
//!
//! Each pixel takes the color of the registered site closest to its center
//! in user space. The lookup is a linear scan, so cost per pixel grows with
//! the number of sites.

use crate::basics::Point;
use crate::color::{Color, Pixel};
use crate::error::RenderError;
use crate::shader::{Shader, ShaderContext};
use crate::trans_affine::AffineTransform;

// ============================================================================
// VoronoiShader
// ============================================================================

/// Colors each pixel by its nearest site. Ties go to the earlier site.
#[derive(Debug, Clone)]
pub struct VoronoiShader {
    ctx: ShaderContext,
    sites: Vec<Point>,
    pixels: Vec<Pixel>,
    opaque: bool,
}

impl VoronoiShader {
    /// `sites` and `colors` are paired by index; extra entries of the longer
    /// slice are ignored.
    pub fn new(sites: &[Point], colors: &[Color]) -> Result<Self, RenderError> {
        let n = sites.len().min(colors.len());
        if n == 0 {
            return Err(RenderError::NoSites);
        }
        let ctx = ShaderContext::new(AffineTransform::identity()).ok_or(RenderError::SingularTransform)?;
        Ok(Self {
            ctx,
            sites: sites[..n].to_vec(),
            pixels: colors[..n].iter().map(Color::to_pixel).collect(),
            opaque: colors[..n].iter().all(Color::is_opaque),
        })
    }

    /// Index of the site nearest to `p`.
    pub fn nearest(&self, p: Point) -> usize {
        let mut best = 0;
        let mut best_d = f32::INFINITY;
        for (i, s) in self.sites.iter().enumerate() {
            let d = p.distance_sq(*s);
            if d < best_d {
                best_d = d;
                best = i;
            }
        }
        best
    }
}

impl Shader for VoronoiShader {
    fn is_opaque(&self) -> bool {
        self.opaque
    }

    fn set_context(&mut self, ctm: &AffineTransform) -> bool {
        self.ctx.update(ctm)
    }

    fn shade_row(&mut self, x: i32, y: i32, row: &mut [Pixel]) {
        let n = row.len();
        for (px, p) in row.iter_mut().zip(self.ctx.row_centers(x, y, n)) {
            *px = self.pixels[self.nearest(p)];
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
