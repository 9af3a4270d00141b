//! Time subsystem.
//!
//! Provides monotonic timing utilities that the game loop builds on without coupling
//! to any platform layer.
//! Intended usage:
//! - one `Clock` per loop, `lap()` once per pass
//! - one `FixedStep` per loop, fed with the lapped durations

mod clock;
mod fixed_step;

pub use clock::Clock;
pub use fixed_step::{FixedStep, StepPlan};
