use std::time::Duration;

use crate::window::Window;

use super::flags::LoopHandle;

/// Timing of one simulation tick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TickTime {
    /// Simulated time covered by this tick.
    ///
    /// Scaled by `LoopConfig::time_scale`. In lockstep this is the fixed interval, so
    /// consecutive ticks are identical regardless of jitter. Otherwise, and whenever
    /// the update rate is uncapped, it is the measured wall time since the previous
    /// tick.
    pub dt: Duration,

    /// 1-based tick counter.
    pub tick_index: u64,
}

/// Timing of one rendered frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Wall time since the previous frame was rendered.
    pub dt: Duration,

    /// 1-based frame counter.
    pub frame_index: u64,
}

/// Per-frame context passed to `Render::render`.
///
/// `state` is borrowed through the shared state's read lock; it is released as soon
/// as the callback returns.
pub struct FrameCtx<'a, S, W: Window> {
    pub state: &'a S,
    pub window: &'a mut W,
    pub time: FrameTime,
    pub handle: &'a LoopHandle,
}

impl<'a, S, W: Window> FrameCtx<'a, S, W> {
    /// Requests a cooperative stop of both loops.
    pub fn freeze(&self) {
        self.handle.freeze();
    }
}
