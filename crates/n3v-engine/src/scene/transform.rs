use glam::{Mat4, Vec3};

/// Accumulated model-to-world transform.
///
/// Starts at identity and only ever grows by composed translations; there is
/// no reset short of re-initializing the renderer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WorldTransform {
    matrix: Mat4,
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self { matrix: Mat4::IDENTITY }
    }
}

impl WorldTransform {
    /// Composes a translation after everything applied so far.
    pub fn translate(&mut self, offset: Vec3) {
        self.matrix = Mat4::from_translation(offset) * self.matrix;
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Net translation accumulated so far.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_identity() {
        assert_eq!(WorldTransform::default().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn translations_accumulate() {
        let mut w = WorldTransform::default();
        w.translate(Vec3::X);
        w.translate(Vec3::X);

        assert_eq!(w.matrix().transform_point3(Vec3::ZERO), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(w.translation(), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn opposite_steps_cancel() {
        let mut w = WorldTransform::default();
        for _ in 0..4 {
            w.translate(Vec3::new(0.0, 0.5, 0.0));
        }
        for _ in 0..4 {
            w.translate(Vec3::new(0.0, -0.5, 0.0));
        }
        assert_eq!(w.matrix(), Mat4::IDENTITY);
    }
}
