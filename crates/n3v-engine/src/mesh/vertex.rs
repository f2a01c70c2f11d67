use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Position + color vertex.
///
/// Layout is fixed and tightly packed: position at byte 0, color at byte 12,
/// 28 bytes total. The same layout is used on disk and in the GPU vertex buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4], // straight RGBA
}

impl Vertex {
    /// Size of one vertex record in bytes.
    pub const SIZE: usize = std::mem::size_of::<Vertex>();

    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x4  // color
    ];

    #[inline]
    pub const fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Vertex buffer layout binding this struct to shader locations 0 and 1.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::SIZE as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
