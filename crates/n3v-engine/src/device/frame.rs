/// A single acquired frame.
///
/// Short-lived: holding the surface texture blocks acquisition of the next one.
/// Hand it back to [`GraphicsDevice::present`](super::GraphicsDevice::present)
/// once recorded.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub color_view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
