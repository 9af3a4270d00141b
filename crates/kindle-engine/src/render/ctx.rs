use winit::dpi::PhysicalSize;

/// Device access for one frame.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Drawable size in physical pixels.
    pub size: PhysicalSize<u32>,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        size: PhysicalSize<u32>,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            size,
        }
    }

    /// Width over height; 1.0 while the surface is empty.
    pub fn aspect_ratio(&self) -> f32 {
        if self.size.width == 0 || self.size.height == 0 {
            1.0
        } else {
            self.size.width as f32 / self.size.height as f32
        }
    }
}

/// Destination of the current frame's passes.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}
