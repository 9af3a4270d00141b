/// A surface texture acquired for one frame, plus the encoder recording into it.
///
/// Short-lived: while it is held no other frame can be acquired from the surface.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
