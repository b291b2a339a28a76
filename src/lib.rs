//! # softraster
//!
//! A software 2D rasterizer. It fills rectangles, convex polygons, paths,
//! triangle meshes and subdivided quads into an in-memory bitmap of
//! premultiplied ARGB pixels.
//!
//! - Aliased scan conversion with the nonzero winding rule
//! - Affine transforms with a save/restore stack
//! - Quadratic and cubic curves, flattened adaptively
//! - Shaders: solid, linear gradients, bitmaps with tiling, nearest-site,
//!   Gouraud triangles, texture-mapped triangles, and products of two shaders
//! - Twelve Porter-Duff blend modes, simplified by source opacity
//!
//! ## Architecture
//!
//! Each draw runs through the same stages:
//!
//! 1. **Setup**: the [`paint::Paint`] is resolved into a row fill; shaders
//!    are bound to the current transform
//! 2. **Edge building**: geometry is mapped, flattened and clipped to the
//!    device
//! 3. **Sweep**: edges are sorted and swept row by row into spans
//! 4. **Span fill**: each span is written or blended into the bitmap
//!
//! ```
//! use softraster::basics::Rect;
//! use softraster::color::{Color, Pixel};
//! use softraster::paint::Paint;
//! use softraster::rendering_buffer::Bitmap;
//!
//! let mut bitmap = Bitmap::new(8, 8);
//! let mut canvas = softraster::factory::create_canvas(&mut bitmap);
//! let mut paint = Paint::from_color(Color::rgb(1.0, 0.0, 0.0));
//! canvas.fill_rect(&Rect::from_ltrb(2.0, 2.0, 6.0, 6.0), &mut paint);
//! assert_eq!(bitmap.pixel(3, 3), Pixel(0xFFFF_0000));
//! ```

// Phase 1: Foundation types & math
pub mod basics;
pub mod color;
pub mod error;
pub mod trans_affine;

// Phase 2: Geometry
pub mod bounding_rect;
pub mod curves;
pub mod path_storage;
pub mod rendering_buffer;

// Phase 3: Compositing
pub mod comp_op;

// Phase 4: Shaders
pub mod shader;
pub mod span_compose;
pub mod span_gouraud;
pub mod span_gradient;
pub mod span_image;
pub mod span_solid;
pub mod span_tri_texture;
pub mod span_voronoi;

// Phase 5: Rasterizer & renderer
pub mod paint;
pub mod rasterizer_scanline;
pub mod rasterizer_sl_clip;
pub mod renderer_base;

// Phase 6: Drawing surface
pub mod canvas;
pub mod factory;
pub mod mesh;

pub use basics::{Point, Rect};
pub use canvas::Canvas;
pub use color::{Color, Pixel};
pub use comp_op::BlendMode;
pub use error::{RenderError, Result};
pub use paint::Paint;
pub use path_storage::{Path, PathBuilder};
pub use rendering_buffer::Bitmap;
pub use shader::{Shader, TileMode};
pub use trans_affine::AffineTransform;
