//! Rendering buffer: row-oriented access to packed pixels.
//!
//! [`Bitmap`] owns a tightly packed, top-down array of premultiplied
//! [`Pixel`]s. Drawing only ever reads and writes through [`Bitmap::row`] /
//! [`Bitmap::row_mut`]; allocation and decoding belong to the caller.

use crate::color::Pixel;
use crate::error::RenderError;

// ============================================================================
// Bitmap
// ============================================================================

/// A width x height grid of premultiplied pixels, row-major, top-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Bitmap {
    /// A transparent bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::TRANSPARENT; width as usize * height as usize],
        }
    }

    /// Wrap existing pixels. `pixels.len()` must equal `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(RenderError::BitmapSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True for a bitmap with no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// One row of pixels.
    #[inline]
    pub fn row(&self, y: u32) -> &[Pixel] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// One row of pixels, mutable.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [Pixel] {
        let start = y as usize * self.width as usize;
        let w = self.width as usize;
        &mut self.pixels[start..start + w]
    }

    /// The pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, p: Pixel) {
        let w = self.width as usize;
        self.pixels[y as usize * w + x as usize] = p;
    }

    /// All pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Overwrite every pixel with `p`.
    pub fn fill(&mut self, p: Pixel) {
        self.pixels.fill(p);
    }

    /// True when every pixel has full alpha.
    pub fn is_opaque(&self) -> bool {
        self.pixels.iter().all(|p| p.is_opaque())
    }
}

// ============================================================================
// Tests
// ============================================================================
