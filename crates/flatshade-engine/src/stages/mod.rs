//! The two programmable stages and the records passed between them.
//!
//! The GPU runs the WGSL versions in `render/shaders/flat.wgsl`. The functions
//! here are the CPU mirrors with identical semantics; the reference rasterizer
//! and the tests execute them directly.

mod fragment;
mod interface;
mod vertex;

pub use fragment::{FILL_COLOR, fragment_stage};
pub use interface::{FragmentOutput, VertexInput, VertexOutput};
pub use vertex::vertex_stage;

/// Name of the vertex entry point in the WGSL module.
pub const VS_ENTRY: &str = "vs_main";

/// Name of the fragment entry point in the WGSL module.
pub const FS_ENTRY: &str = "fs_main";

/// WGSL source for both stages.
pub const SHADER_SOURCE: &str = include_str!("../render/shaders/flat.wgsl");
