use glam::{Mat4, Vec3};

use crate::device::{ResizeOutcome, SurfaceExtent};
use crate::mesh::MeshAsset;
use crate::pipeline::TransformUniforms;

use super::camera::Camera;
use super::projection::Projection;
use super::transform::WorldTransform;

/// Indexed draw over the whole index buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawRange {
    pub index_count: u32,
}

/// CPU-side scene state: camera, world transform, projection and index count.
///
/// Kept free of GPU handles so every transition the renderer performs can be
/// exercised without a device.
#[derive(Debug, Clone)]
pub struct SceneState {
    camera: Camera,
    world: WorldTransform,
    projection: Projection,
    extent: SurfaceExtent,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    index_count: u32,
}

impl SceneState {
    pub fn new(projection: Projection, extent: SurfaceExtent) -> Self {
        let mut state = Self {
            camera: Camera::default(),
            world: WorldTransform::default(),
            projection,
            extent,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            index_count: 0,
        };
        state.update_matrices();
        state
    }

    /// Records the index count of a freshly uploaded mesh and frames the camera on it.
    ///
    /// An empty mesh zeroes the count and leaves the camera where it was.
    /// Returns whether there is now something to draw.
    pub fn apply_mesh(&mut self, mesh: &MeshAsset) -> bool {
        if mesh.is_empty() {
            self.index_count = 0;
            return false;
        }

        self.index_count = mesh.index_count() as u32;

        let bounds = mesh.bounds();
        self.camera.frame_sphere(bounds.center, bounds.radius);
        self.update_matrices();
        true
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.world.translate(offset);
    }

    /// Stores the new surface size and recomputes the projection.
    ///
    /// A zero-sized surface keeps the previous projection.
    pub fn set_extent(&mut self, extent: SurfaceExtent) {
        self.extent = extent;
        self.update_matrices();
    }

    /// Follows a surface resize. An `Unchanged` outcome leaves the projection alone.
    pub fn apply_resize(&mut self, outcome: ResizeOutcome, extent: SurfaceExtent) {
        if outcome != ResizeOutcome::Unchanged {
            self.set_extent(extent);
        }
    }

    /// `Some` while a non-empty mesh is recorded.
    pub fn draw_range(&self) -> Option<DrawRange> {
        (self.index_count > 0).then_some(DrawRange { index_count: self.index_count })
    }

    /// Pairs uploaded `buffers` with the recorded range. `None` means no draw this frame.
    pub fn draw_target<'a, B>(&self, buffers: Option<&'a B>) -> Option<(&'a B, DrawRange)> {
        Some((buffers?, self.draw_range()?))
    }

    /// Constant buffer contents for the current frame.
    pub fn uniforms(&self) -> TransformUniforms {
        TransformUniforms::new(self.world.matrix(), self.view_matrix, self.projection_matrix)
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn world(&self) -> &WorldTransform {
        &self.world
    }

    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    #[inline]
    pub fn extent(&self) -> SurfaceExtent {
        self.extent
    }

    fn update_matrices(&mut self) {
        self.view_matrix = self.camera.view_matrix();
        if let Some(m) = self.projection.matrix(self.extent) {
            self.projection_matrix = m;
        }
    }
}
