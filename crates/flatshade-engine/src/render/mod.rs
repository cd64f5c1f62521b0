//! GPU rendering subsystem.
//!
//! The renderer owns its GPU resources (pipeline, vertex buffer) and records
//! into a [`RenderTarget`] supplied by the frame loop.
//!
//! Convention: vertex positions are already clip-space x/y (+Y up, origin at
//! the center of the target). No viewport transform happens in the shader.

mod ctx;
mod flat;
mod shape;

pub use ctx::{RenderCtx, RenderTarget};
pub use flat::FlatRenderer;
pub use shape::TRIANGLE;
