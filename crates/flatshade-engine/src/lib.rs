//! flatshade engine crate.
//!
//! A two-stage flat-color pipeline (WGSL vertex + fragment stage) together
//! with the wgpu/winit host that drives it and a CPU reference rasterizer.

pub mod core;
pub mod device;
pub mod window;

pub mod logging;
pub mod raster;
pub mod render;
pub mod stages;
