use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::time::{Clock, FixedStep};
use crate::window::Window;

use super::app::{LoopControl, Render, Update};
use super::config::LoopConfig;
use super::ctx::{FrameCtx, FrameTime, TickTime};
use super::error::LoopError;
use super::flags::{LoopFlags, LoopHandle};
use super::shared::SharedState;

/// Counters collected over one `run()`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct LoopStats {
    /// Update ticks executed.
    pub ticks: u64,
    /// Update ticks skipped by the catch-up cap.
    pub dropped_ticks: u64,
    /// Frames rendered (and swapped).
    pub frames: u64,
    /// Render-loop passes, each of which polled window events once.
    pub polls: u64,
}

/// Dual-rate scheduler: fixed-tick updates on a background thread, rendering and
/// event polling on the calling thread.
///
/// Every method takes `&self`, so a loop can be shared (e.g. behind an `Arc`) with
/// code running inside its own callbacks.
pub struct GameLoop {
    render_frame_rate: AtomicU32,
    update_tick_rate: AtomicU32,
    max_catch_up_ticks: Option<u32>,
    time_scale: f64,
    lockstep: bool,
    update_thread_name: String,
    flags: Arc<LoopFlags>,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::with_config(LoopConfig::default())
    }

    pub fn with_config(config: LoopConfig) -> Self {
        let time_scale = if !config.time_scale.is_finite() || config.time_scale < 0.0 {
            log::warn!("invalid time scale {}; using 1.0", config.time_scale);
            1.0
        } else if config.time_scale > MAX_TIME_SCALE {
            log::warn!(
                "time scale {} exceeds {MAX_TIME_SCALE}; clamping",
                config.time_scale
            );
            MAX_TIME_SCALE
        } else {
            config.time_scale
        };

        let max_catch_up_ticks = match config.max_catch_up_ticks {
            Some(0) => {
                log::warn!("catch-up cap of 0 would never tick; using 1");
                Some(1)
            }
            other => other,
        };

        Self {
            render_frame_rate: AtomicU32::new(config.render_frame_rate),
            update_tick_rate: AtomicU32::new(config.update_tick_rate),
            max_catch_up_ticks,
            time_scale,
            lockstep: config.lockstep,
            update_thread_name: config.update_thread_name,
            flags: Arc::new(LoopFlags::default()),
        }
    }

    pub fn render_frame_rate(&self) -> u32 {
        self.render_frame_rate.load(Ordering::Relaxed)
    }

    pub fn update_tick_rate(&self) -> u32 {
        self.update_tick_rate.load(Ordering::Relaxed)
    }

    /// Sets the render rate in Hz (`0` = uncapped).
    ///
    /// Rates are read once when `run()` starts, so changing them mid-run is rejected.
    pub fn set_render_frame_rate(&self, hz: u32) -> Result<(), LoopError> {
        if self.flags.is_running() {
            return Err(LoopError::Running);
        }
        self.render_frame_rate.store(hz, Ordering::Relaxed);
        Ok(())
    }

    /// Sets the update rate in Hz (`0` = uncapped).
    pub fn set_update_tick_rate(&self, hz: u32) -> Result<(), LoopError> {
        if self.flags.is_running() {
            return Err(LoopError::Running);
        }
        self.update_tick_rate.store(hz, Ordering::Relaxed);
        Ok(())
    }

    /// `true` from the start of `run()` until both loops have stopped.
    pub fn is_running(&self) -> bool {
        self.flags.is_running()
    }

    /// Requests a cooperative stop; both loops exit at their next opportunity.
    pub fn freeze(&self) {
        self.flags.freeze();
    }

    pub fn handle(&self) -> LoopHandle {
        LoopHandle::new(Arc::clone(&self.flags))
    }

    /// Runs both loops until the window closes or a stop is requested.
    ///
    /// Blocks the calling thread, which becomes the render thread: `window` is polled
    /// and `render` is called here. `update` moves to a new background thread.
    /// Returns after the update thread has been joined.
    pub fn run<W, S, U, R>(
        &self,
        window: &mut W,
        state: &SharedState<S>,
        update: U,
        mut render: R,
    ) -> Result<LoopStats, LoopError>
    where
        W: Window,
        S: Send + Sync + 'static,
        U: Update<S>,
        R: Render<S, W>,
    {
        if !self.flags.try_start() {
            return Err(LoopError::AlreadyRunning);
        }
        self.flags.open_window();

        let render_rate = self.render_frame_rate();
        let update_rate = self.update_tick_rate();
        log::info!(
            "game loop starting (render {}, update {})",
            describe_rate(render_rate),
            describe_rate(update_rate)
        );

        let worker = match self.spawn_update_loop(state.clone(), update, update_rate) {
            Ok(worker) => worker,
            Err(e) => {
                self.flags.freeze();
                self.flags.finish();
                return Err(LoopError::Spawn(e));
            }
        };

        // If rendering unwinds, dropping `worker` stops and joins the update thread.
        let render_report = self.render_loop(window, state, &mut render, render_rate);
        let update_report = worker.join();

        log::info!(
            "game loop stopped after {} frames / {} ticks",
            render_report.frames,
            update_report.as_ref().map_or(0, |r| r.ticks)
        );

        let update_report = update_report.map_err(|payload| {
            let msg = panic_message(payload.as_ref());
            log::error!("update thread panicked: {msg}");
            LoopError::UpdatePanicked(msg)
        })?;

        Ok(LoopStats {
            ticks: update_report.ticks,
            dropped_ticks: update_report.dropped,
            frames: render_report.frames,
            polls: render_report.polls,
        })
    }

    fn spawn_update_loop<S, U>(
        &self,
        state: SharedState<S>,
        update: U,
        rate: u32,
    ) -> std::io::Result<UpdateWorker>
    where
        S: Send + Sync + 'static,
        U: Update<S>,
    {
        let stepper = FixedStep::from_rate(rate).with_max_catch_up(self.max_catch_up_ticks);
        let pacing = TickPacing {
            time_scale: self.time_scale,
            lockstep: self.lockstep,
        };
        let flags = Arc::clone(&self.flags);

        // Marked live before the thread exists so shutdown cannot mistake a loop that
        // has not started yet for one that already stopped.
        flags.set_update_loop_running(true);

        let thread_flags = Arc::clone(&flags);
        let spawned = thread::Builder::new()
            .name(self.update_thread_name.clone())
            .spawn(move || update_loop(update, state, &thread_flags, stepper, pacing));

        match spawned {
            Ok(handle) => Ok(UpdateWorker {
                handle: Some(handle),
                flags,
            }),
            Err(e) => {
                flags.set_update_loop_running(false);
                Err(e)
            }
        }
    }

    fn render_loop<W, S, R>(
        &self,
        window: &mut W,
        state: &SharedState<S>,
        render: &mut R,
        rate: u32,
    ) -> RenderReport
    where
        W: Window,
        R: Render<S, W>,
    {
        let _live = LiveGuard::enter(&self.flags, Side::Render);
        let handle = self.handle();

        // Frames never catch up: at most one per pass.
        let mut stepper = FixedStep::from_rate(rate).with_max_catch_up(Some(1));
        let mut clock = Clock::new();
        let mut since_frame = Duration::ZERO;
        let mut report = RenderReport::default();

        while self.flags.is_window_open() {
            window.poll_events();
            report.polls += 1;

            if window.should_close() {
                log::debug!("window requested close");
                self.flags.freeze();
                break;
            }

            let elapsed = clock.lap();
            since_frame += elapsed;
            let plan = stepper.advance(elapsed);

            if plan.steps > 0 {
                let guard = state.read();
                report.frames += 1;
                let mut frame = FrameCtx {
                    state: &*guard,
                    window: &mut *window,
                    time: FrameTime {
                        dt: since_frame,
                        frame_index: report.frames,
                    },
                    handle: &handle,
                };
                let control = render.render(&mut frame);
                drop(guard);

                since_frame = Duration::ZERO;
                window.swap_buffers();

                if control == LoopControl::Exit {
                    log::debug!("render requested exit at frame {}", report.frames);
                    self.flags.freeze();
                }
            }

            let wait = plan.wait.saturating_sub(clock.elapsed());
            if !wait.is_zero() && self.flags.is_window_open() {
                thread::sleep(wait);
            }
        }

        report
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

fn update_loop<S, U>(
    mut update: U,
    state: SharedState<S>,
    flags: &LoopFlags,
    mut stepper: FixedStep,
    pacing: TickPacing,
) -> UpdateReport
where
    U: Update<S>,
{
    let _live = LiveGuard::enter(flags, Side::Update);
    let mut clock = Clock::new();
    let mut since_tick = Duration::ZERO;
    let mut report = UpdateReport::default();

    'pass: while flags.is_window_open() {
        let elapsed = clock.lap();
        since_tick += elapsed;
        let plan = stepper.advance(elapsed);

        if plan.dropped > 0 {
            report.dropped += u64::from(plan.dropped);
            log::warn!(
                "update loop fell behind by {} ticks; skipping them",
                plan.dropped
            );
        }

        if plan.steps > 0 {
            let mut guard = state.write();
            let dt = pacing.tick_dt(&stepper, since_tick, plan.steps);
            since_tick = Duration::ZERO;

            for _ in 0..plan.steps {
                if !flags.is_window_open() {
                    break 'pass;
                }

                report.ticks += 1;
                let time = TickTime {
                    dt,
                    tick_index: report.ticks,
                };
                if update.update(&mut guard, time) == LoopControl::Exit {
                    log::debug!("update requested exit at tick {}", report.ticks);
                    flags.freeze();
                    break 'pass;
                }
            }
        }

        // Parked rather than slept so shutdown can wake the thread immediately.
        let wait = plan.wait.saturating_sub(clock.elapsed());
        if !wait.is_zero() {
            thread::park_timeout(wait);
        }
    }

    report
}

/// Largest accepted `LoopConfig::time_scale`.
const MAX_TIME_SCALE: f64 = 1_000.0;

#[derive(Debug, Copy, Clone)]
struct TickPacing {
    time_scale: f64,
    lockstep: bool,
}

impl TickPacing {
    /// Simulated duration of each of the `steps` ticks run this pass.
    fn tick_dt(&self, stepper: &FixedStep, since_tick: Duration, steps: u32) -> Duration {
        let base = if self.lockstep && !stepper.is_uncapped() {
            stepper.interval()
        } else {
            since_tick / steps.max(1)
        };

        Duration::try_from_secs_f64(base.as_secs_f64() * self.time_scale).unwrap_or(Duration::MAX)
    }
}

#[derive(Debug, Default)]
struct RenderReport {
    frames: u64,
    polls: u64,
}

#[derive(Debug, Default)]
struct UpdateReport {
    ticks: u64,
    dropped: u64,
}

#[derive(Debug, Copy, Clone)]
enum Side {
    Render,
    Update,
}

/// Marks one loop live for the guard's lifetime.
///
/// On exit, including unwinding out of a callback, the loop's flag is cleared and a
/// stop is requested so the other loop follows.
struct LiveGuard<'a> {
    flags: &'a LoopFlags,
    side: Side,
}

impl<'a> LiveGuard<'a> {
    fn enter(flags: &'a LoopFlags, side: Side) -> Self {
        Self::set(flags, side, true);
        Self { flags, side }
    }

    fn set(flags: &LoopFlags, side: Side, live: bool) {
        match side {
            Side::Render => flags.set_render_loop_running(live),
            Side::Update => flags.set_update_loop_running(live),
        }
    }
}

impl Drop for LiveGuard<'_> {
    fn drop(&mut self) {
        self.flags.freeze();
        Self::set(self.flags, self.side, false);
    }
}

/// Owns the update thread for the duration of `run()`.
///
/// Dropping it (normally or while unwinding) stops and joins the thread, then marks
/// the loop as no longer running.
struct UpdateWorker {
    handle: Option<JoinHandle<UpdateReport>>,
    flags: Arc<LoopFlags>,
}

impl UpdateWorker {
    fn stop(&mut self) -> Option<thread::Result<UpdateReport>> {
        self.flags.freeze();
        let handle = self.handle.take()?;
        handle.thread().unpark();
        Some(handle.join())
    }

    fn join(mut self) -> thread::Result<UpdateReport> {
        self.stop().unwrap_or_else(|| Ok(UpdateReport::default()))
    }
}

impl Drop for UpdateWorker {
    fn drop(&mut self) {
        if let Some(Err(_)) = self.stop() {
            log::error!("update thread panicked during shutdown");
        }

        if self.flags.render_loop_running() || self.flags.update_loop_running() {
            log::error!("loop flags still live after shutdown");
        }
        self.flags.finish();
    }
}

fn describe_rate(hz: u32) -> String {
    if hz == 0 {
        "uncapped".to_string()
    } else {
        format!("{hz} Hz")
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};
    use std::time::Instant;

    use super::*;
    use crate::window::HeadlessWindow;

    #[derive(Debug, Default)]
    struct Counter {
        ticks: u64,
        last_dt: Option<Duration>,
    }

    fn render_fn<S, W, F>(f: F) -> F
    where
        W: Window,
        F: FnMut(&mut FrameCtx<'_, S, W>) -> LoopControl,
    {
        f
    }

    fn count_ticks(state: &mut Counter, time: TickTime) -> LoopControl {
        state.ticks += 1;
        state.last_dt = Some(time.dt);
        LoopControl::Continue
    }

    fn assert_close(actual: Duration, expected: Duration) {
        assert!(
            actual.abs_diff(expected) < Duration::from_micros(1),
            "{actual:?} != {expected:?}"
        );
    }

    fn fast_loop() -> GameLoop {
        GameLoop::with_config(LoopConfig {
            render_frame_rate: 1000,
            update_tick_rate: 1000,
            ..LoopConfig::default()
        })
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn runs_until_window_closes() {
        let game_loop = GameLoop::with_config(LoopConfig {
            render_frame_rate: 0,
            update_tick_rate: 1000,
            ..LoopConfig::default()
        });
        let state = SharedState::new(Counter::default());
        let mut window = HeadlessWindow::close_after_polls(50);

        let stats = game_loop
            .run(
                &mut window,
                &state,
                count_ticks,
                render_fn(|_: &mut FrameCtx<'_, Counter, HeadlessWindow>| LoopControl::Continue),
            )
            .unwrap();

        // The 50th poll observes the close request before rendering.
        assert_eq!(stats.polls, 50);
        assert_eq!(stats.frames, 49);
        assert_eq!(window.swaps(), 49);
        assert!(!game_loop.is_running());
    }

    #[test]
    fn freeze_from_render_returns_promptly() {
        let game_loop = fast_loop();
        let state = SharedState::new(Counter::default());
        let mut window = HeadlessWindow::new();

        let mut running_inside = false;
        let started = Instant::now();
        let stats = game_loop
            .run(
                &mut window,
                &state,
                count_ticks,
                render_fn(|frame: &mut FrameCtx<'_, Counter, HeadlessWindow>| {
                    running_inside = frame.handle.is_running();
                    if frame.time.frame_index == 10 {
                        frame.freeze();
                    }
                    LoopControl::Continue
                }),
            )
            .unwrap();
        let elapsed = started.elapsed();

        assert!(running_inside);
        assert_eq!(stats.frames, 10);
        assert!(elapsed < Duration::from_secs(1), "shutdown took {elapsed:?}");
        assert!(!game_loop.is_running());
        assert!(!game_loop.handle().is_window_open());
    }

    #[test]
    fn render_exit_stops_both_loops() {
        let game_loop = fast_loop();
        let state = SharedState::new(Counter::default());
        let mut window = HeadlessWindow::new();

        let stats = game_loop
            .run(
                &mut window,
                &state,
                count_ticks,
                render_fn(|frame: &mut FrameCtx<'_, Counter, HeadlessWindow>| {
                    if frame.time.frame_index == 3 {
                        LoopControl::Exit
                    } else {
                        LoopControl::Continue
                    }
                }),
            )
            .unwrap();

        assert_eq!(stats.frames, 3);
        assert!(!game_loop.is_running());
    }

    #[test]
    fn update_exit_stops_render_loop() {
        let game_loop = GameLoop::with_config(LoopConfig {
            render_frame_rate: 0,
            update_tick_rate: 0,
            ..LoopConfig::default()
        });
        let state = SharedState::new(Counter::default());
        // Never closes on its own.
        let mut window = HeadlessWindow::new();

        let stats = game_loop
            .run(
                &mut window,
                &state,
                |s: &mut Counter, _: TickTime| {
                    s.ticks += 1;
                    if s.ticks == 5 {
                        LoopControl::Exit
                    } else {
                        LoopControl::Continue
                    }
                },
                render_fn(|_: &mut FrameCtx<'_, Counter, HeadlessWindow>| LoopControl::Continue),
            )
            .unwrap();

        assert_eq!(stats.ticks, 5);
        assert_eq!(state.read().ticks, 5);
        assert!(!game_loop.is_running());
    }

    #[test]
    fn run_can_be_repeated() {
        let game_loop = fast_loop();
        let state = SharedState::new(Counter::default());

        for _ in 0..2 {
            let mut window = HeadlessWindow::close_after_polls(5);
            game_loop
                .run(
                    &mut window,
                    &state,
                    count_ticks,
                    render_fn(|_: &mut FrameCtx<'_, Counter, HeadlessWindow>| LoopControl::Continue),
                )
                .unwrap();
            assert!(!game_loop.is_running());
        }
    }

    // ── state sharing ─────────────────────────────────────────────────────

    #[test]
    fn render_observes_update_progress() {
        let game_loop = fast_loop();
        let state = SharedState::new(Counter::default());
        let mut window = HeadlessWindow::new();

        let stats = game_loop
            .run(
                &mut window,
                &state,
                count_ticks,
                render_fn(|frame: &mut FrameCtx<'_, Counter, HeadlessWindow>| {
                    if frame.state.ticks >= 20 {
                        frame.freeze();
                    }
                    LoopControl::Continue
                }),
            )
            .unwrap();

        assert!(stats.ticks >= 20);
        assert_eq!(state.read().ticks, stats.ticks);
    }

    #[test]
    fn uncapped_update_ticks_every_pass() {
        let game_loop = GameLoop::with_config(LoopConfig {
            render_frame_rate: 100,
            update_tick_rate: 0,
            ..LoopConfig::default()
        });
        let state = SharedState::new(Counter::default());
        let mut window = HeadlessWindow::close_after_polls(5);

        let stats = game_loop
            .run(
                &mut window,
                &state,
                count_ticks,
                render_fn(|_: &mut FrameCtx<'_, Counter, HeadlessWindow>| LoopControl::Continue),
            )
            .unwrap();

        // A busy update thread easily outpaces five 10 ms render passes.
        assert!(stats.ticks > 5, "only {} ticks", stats.ticks);
        assert_eq!(stats.dropped_ticks, 0);
    }

    #[test]
    fn tick_dt_is_scaled_interval() {
        let game_loop = GameLoop::with_config(LoopConfig {
            render_frame_rate: 1000,
            update_tick_rate: 100,
            time_scale: 0.5,
            ..LoopConfig::default()
        });
        let state = SharedState::new(Counter::default());
        let mut window = HeadlessWindow::new();

        game_loop
            .run(
                &mut window,
                &state,
                count_ticks,
                render_fn(|frame: &mut FrameCtx<'_, Counter, HeadlessWindow>| {
                    if frame.state.ticks > 0 {
                        frame.freeze();
                    }
                    LoopControl::Continue
                }),
            )
            .unwrap();

        assert_close(state.read().last_dt.unwrap(), Duration::from_millis(5));
    }

    // ── misuse ────────────────────────────────────────────────────────────

    #[test]
    fn rate_changes_rejected_while_running() {
        let game_loop = Arc::new(fast_loop());
        let state = SharedState::new(Counter::default());
        let mut window = HeadlessWindow::new();

        let inner = Arc::clone(&game_loop);
        let mut results = Vec::new();
        game_loop
            .run(
                &mut window,
                &state,
                count_ticks,
                render_fn(|frame: &mut FrameCtx<'_, Counter, HeadlessWindow>| {
                    results.push(inner.set_update_tick_rate(10));
                    results.push(inner.set_render_frame_rate(10));
                    frame.freeze();
                    LoopControl::Continue
                }),
            )
            .unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| matches!(r, Err(LoopError::Running))));
        assert_eq!(game_loop.update_tick_rate(), 1000);

        game_loop.set_update_tick_rate(10).unwrap();
        game_loop.set_render_frame_rate(0).unwrap();
        assert_eq!(game_loop.update_tick_rate(), 10);
        assert_eq!(game_loop.render_frame_rate(), 0);
    }

    #[test]
    fn nested_run_is_rejected() {
        let game_loop = Arc::new(fast_loop());
        let state = SharedState::new(Counter::default());
        let mut window = HeadlessWindow::new();

        let inner = Arc::clone(&game_loop);
        let mut nested = None;
        game_loop
            .run(
                &mut window,
                &state,
                count_ticks,
                render_fn(|frame: &mut FrameCtx<'_, Counter, HeadlessWindow>| {
                    let other_state = SharedState::new(Counter::default());
                    let result = inner.run(
                        &mut HeadlessWindow::new(),
                        &other_state,
                        count_ticks,
                        render_fn(|_: &mut FrameCtx<'_, Counter, HeadlessWindow>| {
                            LoopControl::Continue
                        }),
                    );
                    nested = Some(result);
                    frame.freeze();
                    LoopControl::Continue
                }),
            )
            .unwrap();

        assert!(matches!(nested, Some(Err(LoopError::AlreadyRunning))));
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn update_panic_is_reported() {
        let game_loop = fast_loop();
        let state = SharedState::new(Counter::default());
        let mut window = HeadlessWindow::new();

        let result = game_loop.run(
            &mut window,
            &state,
            |s: &mut Counter, _: TickTime| {
                s.ticks += 1;
                if s.ticks == 3 {
                    panic!("simulation exploded");
                }
                LoopControl::Continue
            },
            render_fn(|_: &mut FrameCtx<'_, Counter, HeadlessWindow>| LoopControl::Continue),
        );

        match result {
            Err(LoopError::UpdatePanicked(msg)) => assert!(msg.contains("simulation exploded")),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(state.read().ticks, 3);
        assert!(!game_loop.is_running());
    }

    #[test]
    fn render_panic_still_joins_update_thread() {
        let game_loop = fast_loop();
        let state = SharedState::new(Counter::default());
        let mut window = HeadlessWindow::new();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            game_loop.run(
                &mut window,
                &state,
                count_ticks,
                render_fn(|frame: &mut FrameCtx<'_, Counter, HeadlessWindow>| {
                    if frame.time.frame_index == 2 {
                        panic!("render exploded");
                    }
                    LoopControl::Continue
                }),
            )
        }));

        assert!(outcome.is_err());
        assert!(!game_loop.is_running());
        assert!(!game_loop.flags.update_loop_running());
        assert!(!game_loop.flags.render_loop_running());
        // The read guard was released while unwinding.
        state.write().ticks = 0;
    }

    #[test]
    fn invalid_config_is_sanitized() {
        let game_loop = GameLoop::with_config(LoopConfig {
            time_scale: f64::NAN,
            max_catch_up_ticks: Some(0),
            ..LoopConfig::default()
        });
        assert_eq!(game_loop.time_scale, 1.0);
        assert_eq!(game_loop.max_catch_up_ticks, Some(1));
    }

    #[test]
    fn huge_time_scale_is_clamped_and_runs() {
        let game_loop = GameLoop::with_config(LoopConfig {
            render_frame_rate: 1000,
            update_tick_rate: 1000,
            time_scale: 1e300,
            ..LoopConfig::default()
        });
        assert_eq!(game_loop.time_scale, MAX_TIME_SCALE);

        let state = SharedState::new(Counter::default());
        let mut window = HeadlessWindow::new();
        let stats = game_loop
            .run(
                &mut window,
                &state,
                count_ticks,
                render_fn(|frame: &mut FrameCtx<'_, Counter, HeadlessWindow>| {
                    if frame.state.ticks > 0 {
                        frame.freeze();
                    }
                    LoopControl::Continue
                }),
            )
            .unwrap();

        assert!(stats.ticks > 0);
        assert_close(state.read().last_dt.unwrap(), Duration::from_secs(1));
    }

    // ── tick pacing ───────────────────────────────────────────────────────

    #[test]
    fn lockstep_reports_scaled_interval() {
        let pacing = TickPacing {
            time_scale: 2.0,
            lockstep: true,
        };
        let stepper = FixedStep::from_rate(100);
        let dt = pacing.tick_dt(&stepper, Duration::from_millis(37), 3);
        assert_close(dt, Duration::from_millis(20));
    }

    #[test]
    fn measured_time_is_split_across_steps() {
        let pacing = TickPacing {
            time_scale: 1.0,
            lockstep: false,
        };
        let stepper = FixedStep::from_rate(100);
        let dt = pacing.tick_dt(&stepper, Duration::from_millis(30), 3);
        assert_close(dt, Duration::from_millis(10));
    }

    #[test]
    fn uncapped_reports_measured_time_even_in_lockstep() {
        let pacing = TickPacing {
            time_scale: 1.0,
            lockstep: true,
        };
        let stepper = FixedStep::from_rate(0);
        let dt = pacing.tick_dt(&stepper, Duration::from_millis(4), 1);
        assert_close(dt, Duration::from_millis(4));
    }

    #[test]
    fn oversized_dt_saturates() {
        let pacing = TickPacing {
            time_scale: f64::MAX,
            lockstep: true,
        };
        let stepper = FixedStep::from_rate(1);
        assert_eq!(pacing.tick_dt(&stepper, Duration::ZERO, 1), Duration::MAX);
    }

    #[test]
    fn measured_dt_tracks_wall_time() {
        let game_loop = GameLoop::with_config(LoopConfig {
            render_frame_rate: 1000,
            update_tick_rate: 100,
            lockstep: false,
            ..LoopConfig::default()
        });
        let state = SharedState::new(Vec::<Duration>::new());
        let mut window = HeadlessWindow::new();

        let started = Instant::now();
        let stats = game_loop
            .run(
                &mut window,
                &state,
                |dts: &mut Vec<Duration>, time: TickTime| {
                    dts.push(time.dt);
                    LoopControl::Continue
                },
                render_fn(|frame: &mut FrameCtx<'_, Vec<Duration>, HeadlessWindow>| {
                    if frame.state.len() >= 5 {
                        frame.freeze();
                    }
                    LoopControl::Continue
                }),
            )
            .unwrap();
        let wall = started.elapsed();

        let dts = state.read();
        let total: Duration = dts.iter().sum();
        let consumed = Duration::from_millis(10) * (stats.ticks + stats.dropped_ticks) as u32;
        // Ticks report measured time: about one interval each, never more than elapsed.
        assert!(total + Duration::from_millis(10) >= consumed, "{total:?} < {consumed:?}");
        assert!(total <= wall, "{total:?} > {wall:?}");
    }

    // ── input polling ─────────────────────────────────────────────────────

    #[test]
    fn polls_on_passes_without_a_frame() {
        let game_loop = GameLoop::with_config(LoopConfig {
            render_frame_rate: 20,
            update_tick_rate: 1000,
            ..LoopConfig::default()
        });
        let state = SharedState::new(Counter::default());
        let mut window = HeadlessWindow::close_after_polls(3);

        let stats = game_loop
            .run(
                &mut window,
                &state,
                count_ticks,
                render_fn(|_: &mut FrameCtx<'_, Counter, HeadlessWindow>| LoopControl::Continue),
            )
            .unwrap();

        // The first pass finds no frame due, the third observes the close request.
        assert_eq!(stats.polls, 3);
        assert!(stats.frames <= 1, "{} frames", stats.frames);
        assert!(stats.polls > stats.frames);
        assert_eq!(window.swaps(), stats.frames);
    }
}
