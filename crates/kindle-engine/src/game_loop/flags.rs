use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Run state shared between the render thread, the update thread and handles.
///
/// Every access is `SeqCst`: these flags are the only synchronization between the
/// two loops, and shutdown relies on each side observing the other's writes in order.
#[derive(Debug, Default)]
pub(crate) struct LoopFlags {
    running: AtomicBool,
    window_open: AtomicBool,
    render_loop_running: AtomicBool,
    update_loop_running: AtomicBool,
}

impl LoopFlags {
    /// Claims the loop. Returns `false` if it is already running.
    pub(crate) fn try_start(&self) -> bool {
        self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub(crate) fn open_window(&self) {
        self.window_open.store(true, Ordering::SeqCst);
    }

    pub(crate) fn freeze(&self) {
        self.window_open.store(false, Ordering::SeqCst);
    }

    pub(crate) fn finish(&self) {
        debug_assert!(!self.render_loop_running() && !self.update_loop_running());
        self.running.store(false, Ordering::SeqCst);
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub(crate) fn is_window_open(&self) -> bool {
        self.window_open.load(Ordering::SeqCst)
    }

    pub(crate) fn set_render_loop_running(&self, v: bool) {
        self.render_loop_running.store(v, Ordering::SeqCst);
    }

    pub(crate) fn set_update_loop_running(&self, v: bool) {
        self.update_loop_running.store(v, Ordering::SeqCst);
    }

    pub(crate) fn render_loop_running(&self) -> bool {
        self.render_loop_running.load(Ordering::SeqCst)
    }

    pub(crate) fn update_loop_running(&self) -> bool {
        self.update_loop_running.load(Ordering::SeqCst)
    }
}

/// Cloneable, thread-safe view of a `GameLoop`'s run state.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    flags: Arc<LoopFlags>,
}

impl LoopHandle {
    pub(crate) fn new(flags: Arc<LoopFlags>) -> Self {
        Self { flags }
    }

    /// Asks both loops to stop at their next opportunity.
    ///
    /// In-flight update or render steps are not interrupted. Has no effect when the
    /// loop is not running.
    #[inline]
    pub fn freeze(&self) {
        self.flags.freeze();
    }

    /// `true` from the start of `run()` until both loops have stopped.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.flags.is_running()
    }

    /// `false` once a stop was requested.
    #[inline]
    pub fn is_window_open(&self) -> bool {
        self.flags.is_window_open()
    }
}
