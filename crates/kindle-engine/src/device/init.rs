/// Initialization parameters for [`Gpu`](super::Gpu).
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when the surface offers one.
    pub prefer_srgb: bool,

    /// Swap behavior. `Fifo` is universally supported and vsync-locked; the game
    /// loop's render rate then acts as an upper bound.
    pub present_mode: wgpu::PresentMode,

    /// Requested alpha mode; falls back to the first supported mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub power_preference: wgpu::PowerPreference,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Hint only; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
