use super::surface::SurfaceExtent;

/// 24-bit depth + 8-bit stencil.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// Depth-stencil texture sized to the surface, plus its view.
///
/// Recreated on every resize; the old one is dropped before the surface is
/// reconfigured.
pub struct DepthTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    extent: SurfaceExtent,
}

impl DepthTarget {
    pub fn new(device: &wgpu::Device, extent: SurfaceExtent) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("n3v depth-stencil"),
            size: wgpu::Extent3d {
                width: extent.width,
                height: extent.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { _texture: texture, view, extent }
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[inline]
    pub fn extent(&self) -> SurfaceExtent {
        self.extent
    }
}
