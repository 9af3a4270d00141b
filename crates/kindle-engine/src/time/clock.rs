use std::time::{Duration, Instant};

/// Monotonic stopwatch.
///
/// Queries report the time elapsed since the last reset and never mutate the clock;
/// only `reset()` and `lap()` move the reference point.
#[derive(Debug, Copy, Clone)]
pub struct Clock {
    reset_at: Instant,
}

impl Clock {
    /// Creates a clock whose reference point is "now".
    pub fn new() -> Self {
        Self {
            reset_at: Instant::now(),
        }
    }

    /// Moves the reference point to "now".
    pub fn reset(&mut self) {
        self.reset_at = Instant::now();
    }

    /// Returns the current reference point.
    pub fn reset_time(&self) -> Instant {
        self.reset_at
    }

    /// Returns the elapsed time and resets the clock in one step.
    ///
    /// Both values come from the same `Instant::now()` sample, so no time is lost
    /// between consecutive laps.
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.reset_at);
        self.reset_at = now;
        elapsed
    }

    pub fn elapsed(&self) -> Duration {
        self.reset_at.elapsed()
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    pub fn elapsed_millis(&self) -> u64 {
        saturate(self.elapsed().as_millis())
    }

    pub fn elapsed_micros(&self) -> u64 {
        saturate(self.elapsed().as_micros())
    }

    pub fn elapsed_nanos(&self) -> u64 {
        saturate(self.elapsed().as_nanos())
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn saturate(v: u128) -> u64 {
    u64::try_from(v).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_do_not_reset() {
        let clock = Clock::new();
        let start = clock.reset_time();
        std::thread::sleep(Duration::from_millis(2));
        let _ = clock.elapsed_nanos();
        let _ = clock.elapsed_seconds();
        assert_eq!(clock.reset_time(), start);
        assert!(clock.elapsed() >= Duration::from_millis(2));
    }

    #[test]
    fn units_agree() {
        let clock = Clock::new();
        std::thread::sleep(Duration::from_millis(3));
        let ms = clock.elapsed_millis();
        let us = clock.elapsed_micros();
        let ns = clock.elapsed_nanos();
        assert!(ms >= 3);
        // Later samples can only be larger.
        assert!(us >= ms * 1_000);
        assert!(ns >= us * 1_000);
    }

    #[test]
    fn reset_moves_reference_point() {
        let mut clock = Clock::new();
        let before = clock.reset_time();
        std::thread::sleep(Duration::from_millis(5));
        clock.reset();
        assert!(clock.reset_time() >= before + Duration::from_millis(5));
    }

    #[test]
    fn lap_returns_elapsed_and_restarts() {
        let mut clock = Clock::new();
        std::thread::sleep(Duration::from_millis(4));
        let first = clock.lap();
        assert!(first >= Duration::from_millis(4));
        assert!(clock.elapsed() < first);
    }
}
