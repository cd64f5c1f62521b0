use bytemuck::{Pod, Zeroable};

/// Per-vertex input, read from vertex buffer slot 0.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct VertexInput {
    pub position: [f32; 2], // clip-space x/y
}

impl VertexInput {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }

    /// Buffer layout matching `@location(0) position: vec2<f32>`.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VertexInput>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Vertex stage output; also the fragment stage input after interpolation.
///
/// `position` is the homogeneous clip-space coordinate. `w` is never zero for
/// outputs of [`super::vertex_stage`], so the perspective divide is defined.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct VertexOutput {
    pub position: [f32; 4],
}

/// Fragment stage output, written to color attachment 0.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct FragmentOutput {
    pub color: [f32; 4], // RGBA
}
