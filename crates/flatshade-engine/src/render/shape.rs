use crate::stages::VertexInput;

/// The shape this pipeline draws: one counter-clockwise triangle in clip space.
pub const TRIANGLE: [VertexInput; 3] = [
    VertexInput::new(0.0, 0.5),
    VertexInput::new(-0.5, -0.5),
    VertexInput::new(0.5, -0.5),
];
