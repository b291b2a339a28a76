//! Error types for shader and buffer construction.
//!
//! Draw calls never fail: bad geometry or a singular context simply paints
//! nothing. Errors only come out of constructors and factory functions.

use thiserror::Error;

/// Result type for construction operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors reported while building shaders, buffers and paths.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// An optional extension that this renderer does not provide.
    /// Callers are expected to treat this as "feature absent".
    #[error("{0} is not supported")]
    Unsupported(&'static str),

    /// A transform that had to be inverted has a zero determinant.
    #[error("transform is not invertible")]
    SingularTransform,

    /// A gradient was requested with no color stops.
    #[error("gradient needs at least one color")]
    EmptyGradient,

    /// Stop positions and colors disagree in length.
    #[error("{colors} colors but {positions} stop positions")]
    PositionCountMismatch { colors: usize, positions: usize },

    /// Stop positions must be non-decreasing and span exactly `[0, 1]`.
    #[error("gradient positions must increase from 0 to 1")]
    InvalidPositions,

    /// A nearest-site shader needs at least one site.
    #[error("nearest-site shader needs at least one site")]
    NoSites,

    /// Pixel storage does not match the requested dimensions.
    #[error("bitmap expects {expected} pixels, got {actual}")]
    BitmapSizeMismatch { expected: usize, actual: usize },
}

impl RenderError {
    /// True for [`RenderError::Unsupported`].
    pub fn is_unsupported(&self) -> bool {
        matches!(self, RenderError::Unsupported(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
