/// Game loop configuration.
///
/// Rates are in Hz; `0` means uncapped (the loop steps on every pass without
/// waiting). The rates can also be changed through the `GameLoop` setters while the
/// loop is stopped.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub render_frame_rate: u32,
    pub update_tick_rate: u32,

    /// Upper bound on update ticks executed back-to-back in one pass.
    ///
    /// After a stall (debugger pause, window drag, swapped-out process) the
    /// accumulator may hold many intervals. Ticks beyond the cap are dropped and the
    /// simulation slips behind wall time instead of running a burst. `None` keeps
    /// every tick.
    pub max_catch_up_ticks: Option<u32>,

    /// Ratio of simulated time to wall time reported in `TickTime::dt`.
    pub time_scale: f64,

    /// When set, every tick reports the fixed interval as its `dt`, so runs are
    /// reproducible regardless of jitter. When cleared, ticks report the wall time
    /// measured since the previous tick (split evenly across a catch-up burst).
    /// Uncapped update loops always report measured time.
    pub lockstep: bool,

    /// Name given to the background update thread.
    pub update_thread_name: String,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            render_frame_rate: 60,
            update_tick_rate: 60,
            max_catch_up_ticks: Some(8),
            time_scale: 1.0,
            lockstep: true,
            update_thread_name: "kindle-update".to_string(),
        }
    }
}
