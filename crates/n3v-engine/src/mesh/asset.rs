use std::path::Path;

use glam::Vec3;

use super::bounds::BoundingSphere;
use super::error::MeshError;
use super::format;
use super::vertex::Vertex;

/// Indexed triangle mesh loaded from a `.n3v` file.
///
/// Invariants (checked on load and on construction):
/// - every index is `< vertex_count()`
/// - `index_count()` is a multiple of 3
/// - `vertex_count() <= MAX_VERTICES`
///
/// `center` / `radius` are derived from the vertices and refreshed whenever the
/// vertex set changes.
#[derive(Debug, Clone, Default)]
pub struct MeshAsset {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
    bounds: BoundingSphere,
}

impl MeshAsset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an asset from in-memory geometry.
    pub fn from_parts(vertices: Vec<Vertex>, indices: Vec<u16>) -> Result<Self, MeshError> {
        format::validate(vertices.len(), &indices)?;
        let mut mesh = Self { vertices, indices, bounds: BoundingSphere::EMPTY };
        mesh.recompute_bounds();
        Ok(mesh)
    }

    /// Reads a mesh file into a new asset.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MeshError> {
        let mut mesh = Self::new();
        mesh.load(path)?;
        Ok(mesh)
    }

    /// Replaces the contents of this asset with the mesh stored at `path`.
    ///
    /// Prior state is cleared before the file is opened, so on error the asset
    /// is left empty.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), MeshError> {
        let path = path.as_ref();
        self.clear();

        let bytes = std::fs::read(path).map_err(|source| MeshError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let (vertices, indices) = format::decode(&bytes)?;
        self.vertices = vertices;
        self.indices = indices;
        self.recompute_bounds();

        log::info!(
            "loaded mesh {}: {} vertices, {} indices, radius {:.3}",
            path.display(),
            self.vertices.len(),
            self.indices.len(),
            self.bounds.radius,
        );
        Ok(())
    }

    /// Writes this asset to `path` in the binary mesh format.
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, self.encode())
    }

    pub fn encode(&self) -> Vec<u8> {
        format::encode(&self.vertices, &self.indices)
    }

    /// Empties the asset and resets the bounds to the origin.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.bounds = BoundingSphere::EMPTY;
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when there is nothing to draw.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.bounds.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.bounds.radius
    }

    #[inline]
    pub fn bounds(&self) -> BoundingSphere {
        self.bounds
    }

    fn recompute_bounds(&mut self) {
        self.bounds = BoundingSphere::from_points(self.vertices.iter().map(Vertex::position));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::primitives::colored_cube;
    use approx::assert_relative_eq;

    #[test]
    fn default_is_empty_at_origin() {
        let m = MeshAsset::new();
        assert!(m.is_empty());
        assert_eq!(m.center(), Vec3::ZERO);
        assert_eq!(m.radius(), 0.0);
    }

    #[test]
    fn cube_bounds() {
        let m = colored_cube(1.0);
        assert_eq!(m.vertex_count(), 8);
        assert_eq!(m.triangle_count(), 12);
        assert_eq!(m.center(), Vec3::ZERO);
        assert_relative_eq!(m.radius(), 3.0f32.sqrt(), epsilon = 1e-6);

        let bounds = m.bounds();
        assert!(m.vertices().iter().all(|v| bounds.contains(v.position(), 1e-5)));
    }

    #[test]
    fn clear_resets_bounds() {
        let mut m = colored_cube(2.0);
        m.clear();
        assert_eq!(m.vertex_count(), 0);
        assert_eq!(m.index_count(), 0);
        assert_eq!(m.center(), Vec3::ZERO);
        assert_eq!(m.radius(), 0.0);
    }

    #[test]
    fn from_parts_rejects_bad_indices() {
        let v = vec![Vertex::default(); 2];
        assert!(matches!(
            MeshAsset::from_parts(v, vec![0, 1, 2]),
            Err(MeshError::IndexOutOfRange { index: 2, .. })
        ));
    }

    #[test]
    fn vertices_without_indices_are_empty_for_drawing() {
        let m = MeshAsset::from_parts(vec![Vertex::new([3.0, 0.0, 0.0], [1.0; 4])], vec![]).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.center(), Vec3::new(3.0, 0.0, 0.0));
    }
}
