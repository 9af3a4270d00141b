//! Dual-rate game loop.
//!
//! `GameLoop::run` drives two independently timed loops:
//! - the update loop, on a dedicated background thread, stepping the simulation at
//!   `update_tick_rate`
//! - the render loop, on the calling thread, polling window events every pass and
//!   rendering at `render_frame_rate`
//!
//! Simulation state is shared through `SharedState<S>`: the update thread writes
//! under the write lock, render callbacks read under the read lock. The only other
//! data crossing threads are the loop flags behind `LoopHandle`.
//!
//! Shutdown is cooperative: a window close request, `freeze()`, or a callback
//! returning `LoopControl::Exit` makes both loops exit at their next opportunity;
//! `run` returns once both have stopped and the update thread has been joined.

mod app;
mod config;
mod ctx;
mod error;
mod flags;
mod scheduler;
mod shared;

pub use app::{LoopControl, Render, Update};
pub use config::LoopConfig;
pub use ctx::{FrameCtx, FrameTime, TickTime};
pub use error::LoopError;
pub use flags::LoopHandle;
pub use scheduler::{GameLoop, LoopStats};
pub use shared::SharedState;
