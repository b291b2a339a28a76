//! Solid color shader.
//!
//! The simplest shader: every pixel is the same premultiplied color. A
//! one-stop gradient is built as one of these.

use crate::color::{Color, Pixel};
use crate::shader::Shader;
use crate::trans_affine::AffineTransform;

// ============================================================================
// SolidShader
// ============================================================================

/// Fills every pixel with one precomputed pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidShader {
    pixel: Pixel,
}

impl SolidShader {
    pub fn new(color: Color) -> Self {
        Self {
            pixel: color.to_pixel(),
        }
    }

    pub fn pixel(&self) -> Pixel {
        self.pixel
    }
}

impl Shader for SolidShader {
    fn is_opaque(&self) -> bool {
        self.pixel.is_opaque()
    }

    fn set_context(&mut self, _ctm: &AffineTransform) -> bool {
        true
    }

    fn shade_row(&mut self, _x: i32, _y: i32, row: &mut [Pixel]) {
        row.fill(self.pixel);
    }
}

// ============================================================================
// Tests
// ============================================================================
