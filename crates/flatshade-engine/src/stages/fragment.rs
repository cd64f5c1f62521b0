use super::{FragmentOutput, VertexOutput};

/// Opaque green, linear RGBA.
pub const FILL_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

/// Emits [`FILL_COLOR`] for every covered sample.
///
/// The interpolated position is part of the stage interface but does not
/// affect the result.
#[inline]
pub fn fragment_stage(_input: VertexOutput) -> FragmentOutput {
    FragmentOutput { color: FILL_COLOR }
}
