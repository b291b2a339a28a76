//! Paint: where a draw gets its color and how it composites.

use crate::color::Color;
use crate::comp_op::BlendMode;
use crate::shader::Shader;

/// Color source of a [`Paint`]. A shader is borrowed mutably for the
/// duration of the paint, so only one draw can use it at a time.
pub enum PaintSource<'s> {
    Color(Color),
    Shader(&'s mut dyn Shader),
}

/// A flat color or a shader, plus a blend mode (`SrcOver` by default).
pub struct Paint<'s> {
    source: PaintSource<'s>,
    blend_mode: BlendMode,
}

impl<'s> Paint<'s> {
    pub fn from_color(color: Color) -> Self {
        Self {
            source: PaintSource::Color(color),
            blend_mode: BlendMode::default(),
        }
    }

    pub fn from_shader(shader: &'s mut dyn Shader) -> Self {
        Self {
            source: PaintSource::Shader(shader),
            blend_mode: BlendMode::default(),
        }
    }

    /// Builder-style blend mode override.
    pub fn with_blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = mode;
        self
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) -> &mut Self {
        self.blend_mode = mode;
        self
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    pub fn source_mut(&mut self) -> &mut PaintSource<'s> {
        &mut self.source
    }

    /// The flat color, if this paint has no shader.
    pub fn color(&self) -> Option<Color> {
        match self.source {
            PaintSource::Color(c) => Some(c),
            PaintSource::Shader(_) => None,
        }
    }

    /// The shader, if any.
    pub fn shader_mut(&mut self) -> Option<&mut (dyn Shader + 's)> {
        match &mut self.source {
            PaintSource::Shader(s) => Some(&mut **s),
            PaintSource::Color(_) => None,
        }
    }
}

impl Default for Paint<'_> {
    fn default() -> Self {
        Self::from_color(Color::BLACK)
    }
}

// ============================================================================
// Tests
// ============================================================================
