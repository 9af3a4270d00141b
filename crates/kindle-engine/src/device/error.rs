/// What the caller should do after a surface acquisition failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was reconfigured; the next frame may render normally.
    Reconfigured,
    /// Transient failure; skip this frame.
    SkipFrame,
    /// Unrecoverable (commonly out of memory); the loop should stop.
    Fatal,
}
