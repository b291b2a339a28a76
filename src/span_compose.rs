//! Multiplicative composition of two shaders.
//!
//! Both children shade the same row and the results are multiplied channel
//! by channel on the 0..255 scale. The product of two premultiplied pixels
//! is itself premultiplied, so the output feeds the compositor directly.

use crate::color::Pixel;
use crate::shader::Shader;
use crate::trans_affine::AffineTransform;

// ============================================================================
// ComposeShader
// ============================================================================

/// `first * second`, per channel, rounded.
pub struct ComposeShader<'s> {
    first: &'s mut dyn Shader,
    second: &'s mut dyn Shader,
    scratch: Vec<Pixel>,
}

impl<'s> ComposeShader<'s> {
    pub fn new(first: &'s mut dyn Shader, second: &'s mut dyn Shader) -> Self {
        Self {
            first,
            second,
            scratch: Vec::new(),
        }
    }
}

impl Shader for ComposeShader<'_> {
    fn is_opaque(&self) -> bool {
        self.first.is_opaque() && self.second.is_opaque()
    }

    fn set_context(&mut self, ctm: &AffineTransform) -> bool {
        // bind both children even when the first one fails
        let a = self.first.set_context(ctm);
        let b = self.second.set_context(ctm);
        a && b
    }

    fn shade_row(&mut self, x: i32, y: i32, row: &mut [Pixel]) {
        self.first.shade_row(x, y, row);
        self.scratch.resize(row.len(), Pixel::TRANSPARENT);
        self.second.shade_row(x, y, &mut self.scratch);
        for (dst, other) in row.iter_mut().zip(&self.scratch) {
            *dst = dst.modulate(*other);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
