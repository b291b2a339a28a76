//! Construction entry points.
//!
//! Shader factories return boxed trait objects so callers can pick a shader
//! at run time and hand it to a [`Paint`](crate::paint::Paint). Optional
//! extensions that this renderer does not implement return
//! [`RenderError::Unsupported`]; callers usually turn that into `None` with
//! `.ok()` and carry on without the feature.

use crate::basics::Point;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::{RenderError, Result};
use crate::paint::Paint;
use crate::rendering_buffer::Bitmap;
use crate::shader::{Shader, TileMode};
use crate::span_gradient::{PositionedGradient, TwoStopGradient, UniformGradient};
use crate::span_image::BitmapShader;
use crate::span_solid::SolidShader;
use crate::span_voronoi::VoronoiShader;
use crate::trans_affine::AffineTransform;

/// A canvas drawing into `device`.
pub fn create_canvas(device: &mut Bitmap) -> Canvas<'_> {
    Canvas::new(device)
}

/// Flat color shader.
pub fn create_color_shader(color: Color) -> Box<dyn Shader> {
    Box::new(SolidShader::new(color))
}

/// Shader sampling `bitmap` through `local`, tiled with `tile` on both axes.
pub fn create_bitmap_shader<'a>(
    bitmap: &'a Bitmap,
    local: AffineTransform,
    tile: TileMode,
) -> Result<Box<dyn Shader + 'a>> {
    Ok(Box::new(BitmapShader::new(bitmap, local, tile)?))
}

/// Linear gradient with evenly spaced stops.
///
/// One color yields a solid shader and two colors the two-stop
/// specialization.
pub fn create_linear_gradient(p0: Point, p1: Point, colors: &[Color], tile: TileMode) -> Result<Box<dyn Shader>> {
    match colors {
        [] => Err(RenderError::EmptyGradient),
        [c] => Ok(Box::new(SolidShader::new(*c))),
        [c0, c1] => Ok(Box::new(TwoStopGradient::new(p0, p1, *c0, *c1, tile)?)),
        _ => Ok(Box::new(UniformGradient::new(p0, p1, colors, tile)?)),
    }
}

/// Linear gradient with stops at explicit positions in `[0, 1]`.
///
/// One color yields a solid shader whatever its position.
pub fn create_linear_pos_gradient(
    p0: Point,
    p1: Point,
    colors: &[Color],
    positions: &[f32],
    tile: TileMode,
) -> Result<Box<dyn Shader>> {
    if colors.len() != positions.len() {
        return Err(RenderError::PositionCountMismatch {
            colors: colors.len(),
            positions: positions.len(),
        });
    }
    match colors {
        [] => Err(RenderError::EmptyGradient),
        [c] => Ok(Box::new(SolidShader::new(*c))),
        _ => Ok(Box::new(PositionedGradient::new(p0, p1, colors, positions, tile)?)),
    }
}

/// Nearest-site shader.
pub fn create_voronoi_shader(sites: &[Point], colors: &[Color]) -> Result<Box<dyn Shader>> {
    Ok(Box::new(VoronoiShader::new(sites, colors)?))
}

// ============================================================================
// Unsupported extensions
// ============================================================================

/// Angular gradient around `center`. Not provided.
pub fn create_sweep_gradient(center: Point, colors: &[Color]) -> Result<Box<dyn Shader>> {
    log::debug!("sweep gradient at {:?} with {} colors declined", center, colors.len());
    Err(RenderError::Unsupported("sweep gradient"))
}

/// 4x5 color matrix applied to another shader. Not provided.
pub fn create_color_matrix_shader<'s>(
    _inner: Box<dyn Shader + 's>,
    _matrix: &[f32; 20],
) -> Result<Box<dyn Shader + 's>> {
    Err(RenderError::Unsupported("color matrix shader"))
}

/// Stroke the outline of a polygon. Not provided.
pub fn stroke_polygon(
    _canvas: &mut Canvas<'_>,
    _pts: &[Point],
    _width: f32,
    _paint: &mut Paint<'_>,
) -> Result<()> {
    Err(RenderError::Unsupported("polygon stroking"))
}

/// Quadratic Coons patch through eight control points. Not provided.
pub fn draw_quadratic_coons(
    _canvas: &mut Canvas<'_>,
    _pts: &[Point; 8],
    _level: u32,
    _paint: &mut Paint<'_>,
) -> Result<()> {
    Err(RenderError::Unsupported("quadratic coons patch"))
}

// ============================================================================
// Tests
// ============================================================================
