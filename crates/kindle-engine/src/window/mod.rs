//! Window abstraction consumed by the game loop.
//!
//! The loop only needs three operations from a window: pump pending events, ask
//! whether a close was requested, and present the finished frame. Backends:
//! - `HeadlessWindow`: no platform window, driven by counters (tests, servers)
//! - `WinitWindow`: desktop window backed by winit + a wgpu surface

mod headless;
mod runtime;

pub use headless::HeadlessWindow;
pub use runtime::{WindowConfig, WinitWindow};

/// Narrow window contract used by `GameLoop`.
///
/// All methods are called from the render thread only.
pub trait Window {
    /// Returns `true` once the platform (or user code) asked the window to close.
    fn should_close(&self) -> bool;

    /// Processes pending platform events without blocking.
    fn poll_events(&mut self);

    /// Presents the frame produced by the last render step.
    fn swap_buffers(&mut self);
}
