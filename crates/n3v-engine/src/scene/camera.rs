use glam::{Mat4, Vec3};

/// Auto-fit distance as a multiple of the mesh radius.
pub const FIT_RADIUS_SCALE: f32 = 2.5;

/// Closest the auto-fit places the eye to the target.
pub const MIN_FIT_DISTANCE: f32 = 5.0;

/// Eye-to-target distance used to frame a sphere of `radius`.
#[inline]
pub fn fit_distance(radius: f32) -> f32 {
    (radius * FIT_RADIUS_SCALE).max(MIN_FIT_DISTANCE)
}

/// Look-at camera (left-handed, +Y up).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, -MIN_FIT_DISTANCE),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl Camera {
    /// Places the camera on the -Z side of `center`, looking at it from
    /// [`fit_distance`]`(radius)` away.
    pub fn frame_sphere(&mut self, center: Vec3, radius: f32) {
        let distance = fit_distance(radius);
        self.target = center;
        self.eye = center - Vec3::new(0.0, 0.0, distance);
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.eye, self.target, self.up)
    }
}
