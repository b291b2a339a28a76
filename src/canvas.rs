//! Drawing surface: draw calls over a borrowed bitmap.
//!
//! A [`Canvas`] owns the current transform and its save stack. Every draw
//! maps its geometry by the current transform, builds clipped edges, and
//! sweeps them into a [`SpanRenderer`] resolved from the paint.
//!
//! Draw calls never fail. Degenerate geometry, singular shader contexts and
//! blend modes that keep the destination simply paint nothing.

use crate::basics::{iround, Point, Rect};
use crate::color::Color;
use crate::curves::DEFAULT_CURVE_TOLERANCE;
use crate::mesh::{grid_indices, lerp_color, lerp_point, quad_grid};
use crate::paint::Paint;
use crate::path_storage::Path;
use crate::rasterizer_scanline::{sweep_convex, sweep_nonzero};
use crate::rasterizer_sl_clip::EdgeList;
use crate::renderer_base::SpanRenderer;
use crate::rendering_buffer::Bitmap;
use crate::span_compose::ComposeShader;
use crate::span_gouraud::TriGradientShader;
use crate::span_tri_texture::TriTextureShader;
use crate::trans_affine::AffineTransform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FillRule {
    Convex,
    NonZero,
}

// ============================================================================
// Canvas
// ============================================================================

/// Draws into a bitmap it borrows for its whole lifetime.
pub struct Canvas<'a> {
    device: &'a mut Bitmap,
    ctm: AffineTransform,
    saved: Vec<AffineTransform>,
    tolerance: f32,
    edges: EdgeList,
}

impl<'a> Canvas<'a> {
    pub fn new(device: &'a mut Bitmap) -> Self {
        let edges = EdgeList::new(device.width(), device.height());
        Self {
            device,
            ctm: AffineTransform::identity(),
            saved: Vec::new(),
            tolerance: DEFAULT_CURVE_TOLERANCE,
            edges,
        }
    }

    pub fn device(&self) -> &Bitmap {
        self.device
    }

    pub fn width(&self) -> u32 {
        self.device.width()
    }

    pub fn height(&self) -> u32 {
        self.device.height()
    }

    // ------------------------------------------------------------------------
    // Transform stack
    // ------------------------------------------------------------------------

    /// The current transform.
    pub fn transform(&self) -> &AffineTransform {
        &self.ctm
    }

    /// Replace the current transform.
    pub fn set_transform(&mut self, m: AffineTransform) {
        self.ctm = m;
    }

    /// Push the current transform. Returns the depth before the push.
    pub fn save(&mut self) -> usize {
        self.saved.push(self.ctm);
        self.saved.len() - 1
    }

    /// Pop the last saved transform. Does nothing on an empty stack.
    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(m) => self.ctm = m,
            None => log::debug!("restore called with nothing saved"),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saved.len()
    }

    /// `ctm = ctm * m`: `m` applies to geometry before the current transform.
    pub fn concat(&mut self, m: &AffineTransform) {
        self.ctm = self.ctm * *m;
    }

    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.concat(&AffineTransform::translation(tx, ty));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.concat(&AffineTransform::scaling(sx, sy));
    }

    pub fn rotate(&mut self, radians: f32) {
        self.concat(&AffineTransform::rotation(radians));
    }

    /// Maximum distance, in device pixels, between a curve and its
    /// flattened polyline. Non-positive values are ignored.
    pub fn set_curve_tolerance(&mut self, tolerance: f32) {
        if tolerance > 0.0 {
            self.tolerance = tolerance;
        }
    }

    pub fn curve_tolerance(&self) -> f32 {
        self.tolerance
    }

    // ------------------------------------------------------------------------
    // Draw calls
    // ------------------------------------------------------------------------

    /// Overwrite every pixel with `color`. Ignores the transform.
    pub fn clear(&mut self, color: Color) {
        self.device.fill(color.to_pixel());
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, rect: &Rect, paint: &mut Paint<'_>) {
        let mut r = *rect;
        r.normalize();
        if r.is_empty() {
            return;
        }
        if !self.ctm.is_scale_translate() {
            self.fill_convex_polygon(&r.corners(), paint);
            return;
        }

        let p0 = self.ctm.map_point(Point::new(r.left, r.top));
        let p1 = self.ctm.map_point(Point::new(r.right, r.bottom));
        let x0 = iround(p0.x.min(p1.x));
        let x1 = iround(p0.x.max(p1.x));
        let y0 = iround(p0.y.min(p1.y));
        let y1 = iround(p0.y.max(p1.y));
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        if let Some(mut ren) = SpanRenderer::new(&mut *self.device, paint, &self.ctm) {
            ren.blit_rect(x0, y0, x1, y1);
        }
    }

    /// Fill a convex polygon. Fewer than three points paint nothing.
    pub fn fill_convex_polygon(&mut self, pts: &[Point], paint: &mut Paint<'_>) {
        if pts.len() < 3 {
            return;
        }
        let mut device = pts.to_vec();
        self.ctm.map_points(&mut device);
        self.edges.clear();
        self.edges.add_polygon(&device);
        self.scan(paint, FillRule::Convex);
    }

    /// Fill a path with the nonzero winding rule.
    pub fn fill_path(&mut self, path: &Path, paint: &mut Paint<'_>) {
        self.edges.clear();
        self.edges.add_path(path, &self.ctm, self.tolerance);
        self.scan(paint, FillRule::NonZero);
    }

    /// Draw indexed triangles.
    ///
    /// With `colors` each triangle is Gouraud shaded. With `texs` the
    /// paint's shader is stuck onto each triangle; with both, the two are
    /// multiplied. Otherwise the triangle is filled with the paint itself.
    /// The paint's blend mode applies throughout.
    pub fn draw_mesh(
        &mut self,
        verts: &[Point],
        colors: Option<&[Color]>,
        texs: Option<&[Point]>,
        indices: &[usize],
        paint: &mut Paint<'_>,
    ) {
        for tri in indices.chunks_exact(3) {
            let idx = [tri[0], tri[1], tri[2]];
            let Some(pts) = gather(verts, idx) else {
                log::debug!("mesh triangle {:?} skipped: vertex index out of range", idx);
                continue;
            };
            let cs = match colors.map(|c| gather(c, idx)) {
                Some(None) => {
                    log::debug!("mesh triangle {:?} skipped: color index out of range", idx);
                    continue;
                }
                Some(cs) => cs,
                None => None,
            };
            let ts = match texs.map(|t| gather(t, idx)) {
                Some(None) => {
                    log::debug!("mesh triangle {:?} skipped: texture index out of range", idx);
                    continue;
                }
                Some(ts) => ts,
                None => None,
            };
            self.draw_triangle(pts, cs, ts, paint);
        }
    }

    /// Subdivide a quad `level` times per side and draw it as a mesh.
    pub fn draw_quad(
        &mut self,
        verts: &[Point; 4],
        colors: Option<&[Color; 4]>,
        texs: Option<&[Point; 4]>,
        level: u32,
        paint: &mut Paint<'_>,
    ) {
        let pts = quad_grid(verts, level, lerp_point);
        let cs = colors.map(|c| quad_grid(c, level, lerp_color));
        let ts = texs.map(|t| quad_grid(t, level, lerp_point));
        let indices = grid_indices(level);
        self.draw_mesh(&pts, cs.as_deref(), ts.as_deref(), &indices, paint);
    }

    fn draw_triangle(
        &mut self,
        pts: [Point; 3],
        colors: Option<[Color; 3]>,
        texs: Option<[Point; 3]>,
        paint: &mut Paint<'_>,
    ) {
        let mode = paint.blend_mode();
        let has_shader = paint.color().is_none();
        match (colors, texs) {
            (Some(cs), Some(ts)) if has_shader => {
                let Some(shader) = paint.shader_mut() else { return };
                let mut grad = TriGradientShader::new(pts, cs);
                let mut stick = TriTextureShader::new(shader, pts, ts);
                let mut both = ComposeShader::new(&mut grad, &mut stick);
                let mut p = Paint::from_shader(&mut both).with_blend_mode(mode);
                self.fill_convex_polygon(&pts, &mut p);
            }
            (None, Some(ts)) if has_shader => {
                let Some(shader) = paint.shader_mut() else { return };
                let mut stick = TriTextureShader::new(shader, pts, ts);
                let mut p = Paint::from_shader(&mut stick).with_blend_mode(mode);
                self.fill_convex_polygon(&pts, &mut p);
            }
            (Some(cs), _) => {
                let mut grad = TriGradientShader::new(pts, cs);
                let mut p = Paint::from_shader(&mut grad).with_blend_mode(mode);
                self.fill_convex_polygon(&pts, &mut p);
            }
            (None, _) => self.fill_convex_polygon(&pts, paint),
        }
    }

    fn scan(&mut self, paint: &mut Paint<'_>, rule: FillRule) {
        if self.edges.is_empty() {
            return;
        }
        self.edges.sort();
        log::trace!(
            "{:?} fill: {} edges down to row {}",
            rule,
            self.edges.len(),
            self.edges.bottom()
        );
        let Some(mut ren) = SpanRenderer::new(&mut *self.device, paint, &self.ctm) else {
            return;
        };
        match rule {
            FillRule::Convex => sweep_convex(self.edges.edges(), &mut ren),
            FillRule::NonZero => sweep_nonzero(self.edges.edges(), &mut ren),
        }
    }
}

#[inline]
fn gather<T: Copy>(src: &[T], idx: [usize; 3]) -> Option<[T; 3]> {
    Some([*src.get(idx[0])?, *src.get(idx[1])?, *src.get(idx[2])?])
}

// ============================================================================
// Tests
// ============================================================================
