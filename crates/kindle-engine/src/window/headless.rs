use super::Window;

/// Window without a platform surface.
///
/// Counts polls and presented frames, and reports `should_close()` either after a
/// configured number of polls or once `request_close()` was called.
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    close_after_polls: Option<u64>,
    close_requested: bool,
    polls: u64,
    swaps: u64,
}

impl HeadlessWindow {
    /// Creates a window that stays open until `request_close()`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a window that requests close on its `polls`-th event poll.
    pub fn close_after_polls(polls: u64) -> Self {
        Self {
            close_after_polls: Some(polls),
            ..Self::default()
        }
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }

    pub fn swaps(&self) -> u64 {
        self.swaps
    }
}

impl Window for HeadlessWindow {
    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn poll_events(&mut self) {
        self.polls += 1;
        if self.close_after_polls.is_some_and(|limit| self.polls >= limit) {
            self.close_requested = true;
        }
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }
}
