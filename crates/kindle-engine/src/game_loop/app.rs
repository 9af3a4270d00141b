use crate::window::Window;

use super::ctx::{FrameCtx, TickTime};

/// Control directive returned by loop callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopControl {
    Continue,
    /// Equivalent to `GameLoop::freeze()`.
    Exit,
}

/// Simulation step, run on the update thread.
///
/// Receives exclusive access to the shared state for the duration of the call.
pub trait Update<S>: Send + 'static {
    fn update(&mut self, state: &mut S, time: TickTime) -> LoopControl;
}

impl<S, F> Update<S> for F
where
    F: FnMut(&mut S, TickTime) -> LoopControl + Send + 'static,
{
    fn update(&mut self, state: &mut S, time: TickTime) -> LoopControl {
        self(state, time)
    }
}

/// Render step, run on the calling thread once per frame.
///
/// Window events for this pass have already been polled; `swap_buffers` is called
/// by the loop after this returns.
pub trait Render<S, W: Window> {
    fn render(&mut self, frame: &mut FrameCtx<'_, S, W>) -> LoopControl;
}

impl<S, W, F> Render<S, W> for F
where
    W: Window,
    F: FnMut(&mut FrameCtx<'_, S, W>) -> LoopControl,
{
    fn render(&mut self, frame: &mut FrameCtx<'_, S, W>) -> LoopControl {
        self(frame)
    }
}
