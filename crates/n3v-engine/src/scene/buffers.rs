use wgpu::util::DeviceExt;

use crate::mesh::MeshAsset;

use super::state::DrawRange;

/// Immutable GPU copies of a mesh's vertices and indices.
///
/// Created together, dropped together; never written after creation.
pub struct MeshBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
}

impl MeshBuffers {
    /// Uploads `mesh`. Returns `None` for a mesh with nothing to draw.
    pub fn upload(device: &wgpu::Device, mesh: &MeshAsset) -> Option<Self> {
        if mesh.is_empty() {
            return None;
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("n3v mesh vbo"),
            contents: bytemuck::cast_slice(mesh.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // wgpu pads the index data up to COPY_BUFFER_ALIGNMENT.
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("n3v mesh ibo"),
            contents: bytemuck::cast_slice(mesh.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "uploaded mesh buffers: {} vertex bytes, {} index bytes",
            vertex_buffer.size(),
            index_buffer.size()
        );

        Some(Self { vertex_buffer, index_buffer })
    }

    /// Binds both buffers and issues one indexed draw over `range`.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: DrawRange) {
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..range.index_count, 0, 0..1);
    }
}
