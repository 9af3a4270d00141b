use std::time::Duration;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window as PlatformWindow, WindowId};

use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::game_loop::LoopControl;
use crate::render::{RenderCtx, RenderTarget};

use super::Window;

/// Upper bound on pumps spent waiting for the platform to resume the app.
const STARTUP_PUMPS: usize = 16;

/// Desktop window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Treat a press of Escape like the close button.
    pub close_on_escape: bool,
    pub gpu: GpuInit,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "kindle".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            close_on_escape: true,
            gpu: GpuInit::default(),
        }
    }
}

/// Platform window and the surface that borrows it.
#[self_referencing]
struct SurfacedWindow {
    window: PlatformWindow,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// State mutated by winit callbacks during a pump.
struct PlatformState {
    config: WindowConfig,
    entry: Option<SurfacedWindow>,
    init_error: Option<anyhow::Error>,
    close_requested: bool,
}

impl PlatformState {
    fn create_entry(&self, event_loop: &ActiveEventLoop) -> Result<SurfacedWindow> {
        let attrs = PlatformWindow::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.config.gpu.clone();

        SurfacedWindowTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if let Some(entry) = self.entry.as_mut() {
            entry.with_gpu_mut(|gpu| gpu.resize(size));
        }
    }
}

impl ApplicationHandler for PlatformState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match self.create_entry(event_loop) {
            Ok(entry) => self.entry = Some(entry),
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.init_error = Some(e);
                self.close_requested = true;
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested by platform");
                self.close_requested = true;
            }

            WindowEvent::Resized(size) => self.resize(size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = self
                    .entry
                    .as_ref()
                    .map(|e| e.with_window(|w| w.inner_size()));
                if let Some(size) = size {
                    self.resize(size);
                }
            }

            WindowEvent::KeyboardInput { event, .. }
                if self.config.close_on_escape
                    && event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                self.close_requested = true;
            }

            _ => {}
        }
    }
}

/// Desktop window driven by polling.
///
/// `poll_events` pumps the winit event loop with a zero timeout, so the game loop
/// keeps ownership of pacing. Rendering goes through [`WinitWindow::draw`]; the frame
/// it records is presented by `swap_buffers`.
///
/// Must be created and used on the main thread.
pub struct WinitWindow {
    // Field order is drop order: the pending texture, then the surface and window,
    // then the event loop.
    pending_present: Option<wgpu::SurfaceTexture>,
    state: PlatformState,
    event_loop: EventLoop<()>,
}

impl WinitWindow {
    /// Opens the window and creates its GPU surface.
    pub fn new(config: WindowConfig) -> Result<Self> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        let mut this = Self {
            pending_present: None,
            state: PlatformState {
                config,
                entry: None,
                init_error: None,
                close_requested: false,
            },
            event_loop,
        };

        // The window is created from `resumed`, which arrives during the first pumps.
        for _ in 0..STARTUP_PUMPS {
            this.pump();
            if this.state.entry.is_some() || this.state.init_error.is_some() {
                break;
            }
        }

        if let Some(err) = this.state.init_error.take() {
            return Err(err);
        }
        anyhow::ensure!(
            this.state.entry.is_some(),
            "platform did not resume the application"
        );

        Ok(this)
    }

    fn pump(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.state);

        if let PumpStatus::Exit(code) = status {
            log::debug!("event loop exited with code {code}");
            self.state.close_requested = true;
        }
    }

    /// Adapter the surface was created on.
    pub fn adapter_info(&self) -> Option<wgpu::AdapterInfo> {
        self.state.entry.as_ref().map(|e| e.with_gpu(|gpu| gpu.adapter_info()))
    }

    /// Current drawable size in physical pixels.
    pub fn inner_size(&self) -> PhysicalSize<u32> {
        self.state
            .entry
            .as_ref()
            .map(|e| e.with_gpu(|gpu| gpu.size()))
            .unwrap_or_default()
    }

    /// Clears the next surface texture to `clear`, lets `draw` record passes into it
    /// and submits. The frame is presented on the next `swap_buffers`.
    ///
    /// Returns `Exit` only when the surface failed fatally.
    pub fn draw<F>(&mut self, clear: wgpu::Color, draw: F) -> LoopControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        if let Some(stale) = self.pending_present.take() {
            log::debug!("draw called twice without swap_buffers; presenting the older frame");
            stale.present();
        }

        let Some(entry) = self.state.entry.as_mut() else {
            return LoopControl::Continue;
        };

        let outcome = entry.with_mut(|fields| {
            let gpu = fields.gpu;
            let size = gpu.size();
            if size.width == 0 || size.height == 0 {
                return Ok(None);
            }

            let mut frame = match gpu.begin_frame() {
                Ok(f) => f,
                Err(err) => return Err(gpu.handle_surface_error(err)),
            };

            // Clear pass, dropped before the encoder is reused.
            {
                let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("kindle clear"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &frame.view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(clear),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                    multiview_mask: None,
                });
            }

            {
                let rctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), size);
                let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
                draw(&rctx, &mut target);
            }

            fields.window.pre_present_notify();
            Ok(Some(gpu.submit(frame)))
        });

        match outcome {
            Ok(texture) => {
                self.pending_present = texture;
                LoopControl::Continue
            }
            Err(SurfaceErrorAction::Fatal) => {
                log::error!("surface failed fatally; stopping");
                LoopControl::Exit
            }
            Err(_) => LoopControl::Continue,
        }
    }
}

impl Window for WinitWindow {
    fn should_close(&self) -> bool {
        self.state.close_requested
    }

    fn poll_events(&mut self) {
        self.pump();
    }

    fn swap_buffers(&mut self) {
        if let Some(texture) = self.pending_present.take() {
            texture.present();
        }
    }
}
