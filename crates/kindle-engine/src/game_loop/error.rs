use thiserror::Error;

/// Errors reported by `GameLoop`.
#[derive(Debug, Error)]
pub enum LoopError {
    /// A rate setter was called between `run()` and full shutdown.
    #[error("loop rates cannot change while the loop is running")]
    Running,

    /// `run()` was called on a loop that is already running.
    #[error("game loop is already running")]
    AlreadyRunning,

    #[error("failed to spawn the update thread")]
    Spawn(#[source] std::io::Error),

    /// The update callback panicked; the render loop was stopped and the thread joined.
    #[error("update thread panicked: {0}")]
    UpdatePanicked(String),
}
