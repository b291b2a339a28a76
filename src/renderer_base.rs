//! Span renderer: turns covered spans into pixel writes.
//!
//! A [`SpanRenderer`] is built once per draw. Construction resolves the
//! paint into a [`RowFill`]: the shader is bound to the current transform,
//! the blend mode is collapsed using what is known about source alpha, and
//! draws that cannot change the destination are rejected up front.

use crate::color::Pixel;
use crate::comp_op::{BlendMode, BlendProc, SourceAlpha};
use crate::paint::{Paint, PaintSource};
use crate::rasterizer_scanline::SpanSink;
use crate::rendering_buffer::Bitmap;
use crate::shader::Shader;
use crate::trans_affine::AffineTransform;

// ============================================================================
// RowFill
// ============================================================================

/// How the pixels of one span are produced.
#[derive(Clone, Copy)]
pub enum RowFill {
    /// Write transparent black.
    Clear,
    /// Write a precomputed pixel.
    Copy(Pixel),
    /// Blend a precomputed pixel.
    Blend(Pixel, BlendProc),
    /// Write shader output.
    ShaderCopy,
    /// Blend shader output.
    ShaderBlend(BlendProc),
}

impl std::fmt::Debug for RowFill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowFill::Clear => write!(f, "Clear"),
            RowFill::Copy(p) => write!(f, "Copy({:#010x})", p.0),
            RowFill::Blend(p, _) => write!(f, "Blend({:#010x})", p.0),
            RowFill::ShaderCopy => write!(f, "ShaderCopy"),
            RowFill::ShaderBlend(_) => write!(f, "ShaderBlend"),
        }
    }
}

/// Pick the row fill for a mode already simplified against source alpha.
/// `None` when the destination is kept.
fn row_fill(mode: BlendMode, pixel: Option<Pixel>) -> Option<RowFill> {
    let fill = match (mode, pixel) {
        (BlendMode::Dst, _) => return None,
        (BlendMode::Clear, _) => RowFill::Clear,
        (BlendMode::Src, Some(p)) => RowFill::Copy(p),
        (BlendMode::Src, None) => RowFill::ShaderCopy,
        (m, Some(p)) => RowFill::Blend(p, m.proc()),
        (m, None) => RowFill::ShaderBlend(m.proc()),
    };
    Some(fill)
}

// ============================================================================
// SpanRenderer
// ============================================================================

/// Writes spans into a bitmap according to a resolved paint.
pub struct SpanRenderer<'d, 'p, 's> {
    device: &'d mut Bitmap,
    fill: RowFill,
    shader: Option<&'p mut (dyn Shader + 's)>,
    row: Vec<Pixel>,
}

impl<'d, 'p, 's> SpanRenderer<'d, 'p, 's> {
    /// Resolve `paint` for a draw under `ctm`.
    ///
    /// Returns `None` when the draw cannot change any pixel: the shader
    /// could not be bound or the blend mode keeps the destination.
    pub fn new(device: &'d mut Bitmap, paint: &'p mut Paint<'s>, ctm: &AffineTransform) -> Option<Self> {
        let requested = paint.blend_mode();
        let (alpha, pixel, shader) = match paint.source_mut() {
            PaintSource::Color(c) => (SourceAlpha::from_alpha(c.a), Some(c.to_pixel()), None),
            PaintSource::Shader(s) => {
                if !s.set_context(ctm) {
                    log::debug!("draw skipped: shader context is singular");
                    return None;
                }
                let alpha = if s.is_opaque() {
                    SourceAlpha::Opaque
                } else {
                    SourceAlpha::Partial
                };
                (alpha, None, Some(&mut **s))
            }
        };

        let mode = requested.simplify(alpha);
        let Some(fill) = row_fill(mode, pixel) else {
            log::debug!("draw skipped: {:?} keeps the destination", requested);
            return None;
        };
        Some(Self {
            device,
            fill,
            shader,
            row: Vec::new(),
        })
    }

    pub fn fill(&self) -> RowFill {
        self.fill
    }

    pub fn width(&self) -> u32 {
        self.device.width()
    }

    pub fn height(&self) -> u32 {
        self.device.height()
    }

    /// Fill the device rectangle `[x0, x1) x [y0, y1)`, clamped.
    pub fn blit_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let y0 = y0.max(0);
        let y1 = y1.min(self.device.height() as i32);
        for y in y0..y1 {
            self.blit_span(y, x0, x1);
        }
    }
}

impl SpanSink for SpanRenderer<'_, '_, '_> {
    fn blit_span(&mut self, y: i32, x0: i32, x1: i32) {
        if y < 0 || y >= self.device.height() as i32 {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(self.device.width() as i32);
        if x0 >= x1 {
            return;
        }
        let dst = &mut self.device.row_mut(y as u32)[x0 as usize..x1 as usize];

        match self.fill {
            RowFill::Clear => dst.fill(Pixel::TRANSPARENT),
            RowFill::Copy(p) => dst.fill(p),
            RowFill::Blend(p, f) => {
                let [a, r, g, b] = p.argb();
                for d in dst.iter_mut() {
                    *d = f(*d, a, r, g, b);
                }
            }
            RowFill::ShaderCopy => {
                if let Some(shader) = self.shader.as_deref_mut() {
                    shader.shade_row(x0, y, dst);
                }
            }
            RowFill::ShaderBlend(f) => {
                let Some(shader) = self.shader.as_deref_mut() else {
                    return;
                };
                self.row.resize(dst.len(), Pixel::TRANSPARENT);
                shader.shade_row(x0, y, &mut self.row);
                for (d, s) in dst.iter_mut().zip(&self.row) {
                    let [a, r, g, b] = s.argb();
                    *d = f(*d, a, r, g, b);
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::span_solid::SolidShader;

    struct Unbindable;

    impl Shader for Unbindable {
        fn is_opaque(&self) -> bool {
            true
        }
        fn set_context(&mut self, _ctm: &AffineTransform) -> bool {
            false
        }
        fn shade_row(&mut self, _x: i32, _y: i32, row: &mut [Pixel]) {
            row.fill(Pixel(0xFFFF_FFFF));
        }
    }

    /// Writes the column index into the blue channel.
    struct Columns;

    impl Shader for Columns {
        fn is_opaque(&self) -> bool {
            true
        }
        fn set_context(&mut self, _ctm: &AffineTransform) -> bool {
            true
        }
        fn shade_row(&mut self, x: i32, _y: i32, row: &mut [Pixel]) {
            for (i, p) in row.iter_mut().enumerate() {
                *p = Pixel(0xFF00_0000 | (x as u32 + i as u32));
            }
        }
    }

    fn id() -> AffineTransform {
        AffineTransform::identity()
    }

    #[test]
    fn test_opaque_color_copies() {
        let mut bm = Bitmap::new(8, 8);
        let mut paint = Paint::from_color(Color::rgb(1.0, 0.0, 0.0));
        let mut r = SpanRenderer::new(&mut bm, &mut paint, &id()).unwrap();
        assert!(matches!(r.fill(), RowFill::Copy(Pixel(0xFFFF_0000))));
        r.blit_span(2, 1, 4);
        drop(r);
        assert_eq!(bm.pixel(0, 2), Pixel::TRANSPARENT);
        assert_eq!(bm.pixel(1, 2), Pixel(0xFFFF_0000));
        assert_eq!(bm.pixel(3, 2), Pixel(0xFFFF_0000));
        assert_eq!(bm.pixel(4, 2), Pixel::TRANSPARENT);
    }

    #[test]
    fn test_translucent_color_blends() {
        let mut bm = Bitmap::new(4, 1);
        bm.fill(Pixel(0xFF00_0000));
        let mut paint = Paint::from_color(Color::new(1.0, 1.0, 1.0, 0.5));
        let mut r = SpanRenderer::new(&mut bm, &mut paint, &id()).unwrap();
        assert!(matches!(r.fill(), RowFill::Blend(..)));
        r.blit_span(0, 0, 4);
        drop(r);
        assert_eq!(bm.pixel(0, 0).argb(), [255, 128, 128, 128]);
    }

    #[test]
    fn test_transparent_over_is_rejected() {
        let mut bm = Bitmap::new(4, 4);
        let mut paint = Paint::from_color(Color::TRANSPARENT);
        assert!(SpanRenderer::new(&mut bm, &mut paint, &id()).is_none());
    }

    #[test]
    fn test_transparent_src_clears() {
        let mut bm = Bitmap::new(4, 1);
        bm.fill(Pixel(0xFFFF_FFFF));
        let mut paint = Paint::from_color(Color::TRANSPARENT).with_blend_mode(BlendMode::Src);
        let mut r = SpanRenderer::new(&mut bm, &mut paint, &id()).unwrap();
        assert!(matches!(r.fill(), RowFill::Clear));
        r.blit_span(0, 1, 3);
        drop(r);
        assert_eq!(bm.row(0), &[Pixel(0xFFFF_FFFF), Pixel(0), Pixel(0), Pixel(0xFFFF_FFFF)]);
    }

    #[test]
    fn test_unbindable_shader_is_rejected() {
        let mut bm = Bitmap::new(4, 4);
        let mut s = Unbindable;
        let mut paint = Paint::from_shader(&mut s);
        assert!(SpanRenderer::new(&mut bm, &mut paint, &id()).is_none());
    }

    #[test]
    fn test_opaque_shader_copies_at_span_origin() {
        let mut bm = Bitmap::new(8, 2);
        let mut s = Columns;
        let mut paint = Paint::from_shader(&mut s);
        let mut r = SpanRenderer::new(&mut bm, &mut paint, &id()).unwrap();
        assert!(matches!(r.fill(), RowFill::ShaderCopy));
        r.blit_span(1, -3, 5);
        drop(r);
        let blues: Vec<u32> = bm.row(1).iter().map(|p| p.b()).collect();
        assert_eq!(blues, vec![0, 1, 2, 3, 4, 0, 0, 0]);
        assert_eq!(bm.pixel(5, 1), Pixel::TRANSPARENT);
    }

    #[test]
    fn test_shader_blend() {
        let mut bm = Bitmap::new(2, 1);
        bm.fill(Pixel(0xFF00_0000));
        let mut s = SolidShader::new(Color::new(1.0, 1.0, 1.0, 0.5));
        let mut paint = Paint::from_shader(&mut s);
        let mut r = SpanRenderer::new(&mut bm, &mut paint, &id()).unwrap();
        assert!(matches!(r.fill(), RowFill::ShaderBlend(_)));
        r.blit_span(0, 0, 2);
        drop(r);
        assert_eq!(bm.pixel(1, 0).argb(), [255, 128, 128, 128]);
    }

    #[test]
    fn test_spans_are_clamped() {
        let mut bm = Bitmap::new(4, 4);
        let mut paint = Paint::from_color(Color::WHITE);
        let mut r = SpanRenderer::new(&mut bm, &mut paint, &id()).unwrap();
        r.blit_span(-1, 0, 4);
        r.blit_span(4, 0, 4);
        r.blit_span(0, 4, 9);
        r.blit_span(0, -5, 0);
        r.blit_rect(-10, -10, 20, 2);
        drop(r);
        assert!(bm.pixels()[..8].iter().all(|p| *p == Pixel(0xFFFF_FFFF)));
        assert!(bm.pixels()[8..].iter().all(|p| *p == Pixel::TRANSPARENT));
    }

    #[test]
    fn test_dst_mode_is_rejected() {
        let mut bm = Bitmap::new(4, 4);
        let mut paint = Paint::from_color(Color::WHITE).with_blend_mode(BlendMode::Dst);
        assert!(SpanRenderer::new(&mut bm, &mut paint, &id()).is_none());
        let mut paint = Paint::from_color(Color::WHITE).with_blend_mode(BlendMode::DstIn);
        assert!(SpanRenderer::new(&mut bm, &mut paint, &id()).is_none());
    }
}
