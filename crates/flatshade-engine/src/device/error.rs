/// What the frame loop should do after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next frame may proceed.
    Reconfigured,
    /// Transient error; drop this frame.
    SkipFrame,
    /// Unrecoverable (out of memory); stop the loop.
    Fatal,
}
