use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Simulation state shared between the update and render threads.
///
/// Locking discipline:
/// - the update thread takes the write lock once per pass and holds it across that
///   pass's ticks
/// - the render thread takes the read lock for exactly one render callback
/// - neither lock is held while a loop waits for its next interval
///
/// The lock is task-fair, so an uncapped update loop that re-locks immediately
/// cannot starve the render thread. Callers outside `run()` may lock freely; while
/// the loop runs, holding a guard stalls whichever loop needs the lock next.
pub struct SharedState<S>(Arc<RwLock<S>>);

impl<S> SharedState<S> {
    #[inline]
    pub fn new(state: S) -> Self {
        Self(Arc::new(RwLock::new(state)))
    }

    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, S> {
        self.0.read()
    }

    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, S> {
        self.0.write()
    }
}

impl<S> Clone for SharedState<S> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<S: Default> Default for SharedState<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
