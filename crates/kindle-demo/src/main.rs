//! Kindle demo: a triangle spun by a 60 Hz simulation and drawn at the display's
//! pace through the dual-rate game loop. Escape or the close button quits.

mod sim;
mod triangle;

use anyhow::Result;

use kindle_engine::game_loop::{GameLoop, LoopConfig, SharedState};
use kindle_engine::logging::{LoggingConfig, init_logging};
use kindle_engine::window::{WindowConfig, WinitWindow};

use sim::Spin;
use triangle::TriangleRenderer;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut window = WinitWindow::new(WindowConfig {
        title: "kindle demo".to_string(),
        ..WindowConfig::default()
    })?;

    let size = window.inner_size();
    if let Some(adapter) = window.adapter_info() {
        log::info!(
            "rendering {}x{} on {} ({:?})",
            size.width,
            size.height,
            adapter.name,
            adapter.backend
        );
    }

    let game_loop = GameLoop::with_config(LoopConfig {
        render_frame_rate: 120,
        update_tick_rate: 60,
        ..LoopConfig::default()
    });
    let state = SharedState::new(Spin::default());

    let stats = game_loop.run(
        &mut window,
        &state,
        |spin: &mut Spin, time| spin.step(time),
        TriangleRenderer::new(),
    )?;

    log::info!(
        "exited after {} frames, {} ticks ({} dropped), {:.1}s simulated",
        stats.frames,
        stats.ticks,
        stats.dropped_ticks,
        state.read().elapsed
    );
    Ok(())
}
