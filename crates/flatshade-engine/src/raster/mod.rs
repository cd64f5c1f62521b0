//! CPU reference rasterizer.
//!
//! Runs the Rust mirrors of both stages through a fixed-function triangle
//! rasterizer equivalent to the GPU pipeline's state (triangle list, CCW
//! front face, back-face culling). Used to check coverage and color without
//! a GPU.
//!
//! Work is data-parallel the same way a GPU schedules it: every vertex
//! invocation is independent, and the target is split into row bands that
//! are shaded concurrently. Bands never share pixels.

mod buffer;
mod pipeline;
mod triangle;

pub use buffer::ColorBuffer;
pub use pipeline::{RasterState, RasterStats, rasterize, run_vertex_stage};
