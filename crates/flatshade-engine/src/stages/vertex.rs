use super::{VertexInput, VertexOutput};

/// Lifts a 2D position into clip space as `(x, y, 0.0, 1.0)`.
///
/// No transform is applied. Non-finite inputs pass through unchanged.
#[inline]
pub fn vertex_stage(input: VertexInput) -> VertexOutput {
    let [x, y] = input.position;
    VertexOutput {
        position: [x, y, 0.0, 1.0],
    }
}
