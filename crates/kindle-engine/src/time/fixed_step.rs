use std::time::Duration;

/// Result of feeding one pass worth of elapsed time into a [`FixedStep`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct StepPlan {
    /// Steps to execute this pass.
    pub steps: u32,

    /// Whole intervals discarded because they exceeded the catch-up cap.
    pub dropped: u32,

    /// Time left until the next interval boundary.
    ///
    /// Always zero when uncapped.
    pub wait: Duration,
}

/// Fixed-interval accumulator.
///
/// Elapsed wall time is accumulated across passes; every whole interval in the
/// accumulator yields one step and is subtracted, so lag is caught up without drift.
/// An interval of zero means "uncapped": exactly one step per pass.
///
/// `max_catch_up` bounds the steps returned by a single `advance`. Surplus whole
/// intervals are dropped and reported in `StepPlan::dropped`; the fractional
/// remainder is kept so phase is preserved.
#[derive(Debug, Clone)]
pub struct FixedStep {
    interval: Duration,
    accumulated: Duration,
    max_catch_up: Option<u32>,
}

impl FixedStep {
    /// Creates an accumulator from a frequency in Hz. `0` disables capping.
    pub fn from_rate(hz: u32) -> Self {
        Self::from_interval(interval_for_rate(hz))
    }

    pub fn from_interval(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
            max_catch_up: None,
        }
    }

    /// Sets the per-pass step cap. `None` lets a stalled loop catch up fully.
    pub fn with_max_catch_up(mut self, max: Option<u32>) -> Self {
        debug_assert!(max != Some(0), "a catch-up cap of zero would never step");
        self.max_catch_up = max;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_uncapped(&self) -> bool {
        self.interval.is_zero()
    }

    /// Time accumulated but not yet consumed by a step.
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// Discards any accumulated time.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }

    /// Accumulates `elapsed` and returns the steps due this pass.
    pub fn advance(&mut self, elapsed: Duration) -> StepPlan {
        if self.is_uncapped() {
            return StepPlan {
                steps: 1,
                dropped: 0,
                wait: Duration::ZERO,
            };
        }

        self.accumulated = self.accumulated.saturating_add(elapsed);

        let interval_ns = self.interval.as_nanos();
        let acc_ns = self.accumulated.as_nanos();
        let due = acc_ns / interval_ns;
        let remainder = acc_ns % interval_ns;

        let due = u32::try_from(due).unwrap_or(u32::MAX);
        let (steps, dropped) = match self.max_catch_up {
            Some(max) if due > max => (max, due - max),
            _ => (due, 0),
        };

        // Every due interval is consumed, whether it is executed or dropped.
        // remainder < interval, so it always fits in u64 nanoseconds.
        self.accumulated = Duration::from_nanos(remainder as u64);

        StepPlan {
            steps,
            dropped,
            wait: self.interval - self.accumulated,
        }
    }
}

/// Converts a frequency into a period. `0` Hz maps to a zero (uncapped) interval.
pub(crate) fn interval_for_rate(hz: u32) -> Duration {
    if hz == 0 {
        Duration::ZERO
    } else {
        Duration::from_nanos(1_000_000_000 / u64::from(hz))
    }
}
