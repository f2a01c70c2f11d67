use glam::Mat4;

use crate::device::SurfaceExtent;

/// Perspective projection parameters (left-handed, depth 0..1).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    /// Vertical field of view, radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::FRAC_PI_4,
            near: 0.01,
            far: 1000.0,
        }
    }
}

impl Projection {
    /// Projection matrix for `extent`, or `None` while the surface is zero-sized.
    pub fn matrix(&self, extent: SurfaceExtent) -> Option<Mat4> {
        let aspect = extent.aspect()?;
        Some(Mat4::perspective_lh(self.fov_y, aspect, self.near, self.far))
    }
}
