use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Per-frame constant buffer contents.
///
/// The shader multiplies row vectors by these matrices, so each one is stored
/// transposed relative to glam's column-vector convention. Construct through
/// [`TransformUniforms::new`] only.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct TransformUniforms {
    pub world: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl TransformUniforms {
    pub const SIZE: u64 = std::mem::size_of::<TransformUniforms>() as u64;

    pub fn new(world: Mat4, view: Mat4, projection: Mat4) -> Self {
        Self {
            world: world.transpose().to_cols_array_2d(),
            view: view.transpose().to_cols_array_2d(),
            projection: projection.transpose().to_cols_array_2d(),
        }
    }

    /// Returns the `wgpu` minimum binding size for the uniform buffer.
    pub fn min_binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(Self::SIZE)
            .expect("TransformUniforms has non-zero size by construction")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn size_is_three_matrices() {
        assert_eq!(TransformUniforms::SIZE, 3 * 64);
        assert_eq!(TransformUniforms::min_binding_size().get(), 192);
    }

    #[test]
    fn matrices_are_uploaded_transposed() {
        let world = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let u = TransformUniforms::new(world, Mat4::IDENTITY, Mat4::IDENTITY);

        // Translation lives in the last column of `world`; transposed it becomes the last row.
        assert_eq!(u.world[0][3], 1.0);
        assert_eq!(u.world[1][3], 2.0);
        assert_eq!(u.world[2][3], 3.0);
        assert_eq!(u.world[3], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(u.view, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn row_vector_product_matches_column_transform() {
        let world = Mat4::from_translation(Vec3::new(1.0, -2.0, 0.5)) * Mat4::from_rotation_y(0.3);
        let u = TransformUniforms::new(world, Mat4::IDENTITY, Mat4::IDENTITY);
        let uploaded = Mat4::from_cols_array_2d(&u.world);

        // WGSL `v * M` is the dot product of `v` with each column of `M`.
        let v = Vec4::new(0.25, 1.0, -3.0, 1.0);
        let row = Vec4::new(
            v.dot(uploaded.x_axis),
            v.dot(uploaded.y_axis),
            v.dot(uploaded.z_axis),
            v.dot(uploaded.w_axis),
        );

        assert!(row.abs_diff_eq(world * v, 1e-5));
    }
}
