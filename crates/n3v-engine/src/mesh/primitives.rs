//! Built-in meshes for demos and tests.

use super::asset::MeshAsset;
use super::vertex::Vertex;

/// Axis-aligned cube centered at the origin with one color per corner.
///
/// Triangles are wound clockwise when viewed from outside, matching the
/// pipeline's front-face convention.
pub fn colored_cube(half_extent: f32) -> MeshAsset {
    let h = half_extent;
    let vertices = vec![
        Vertex::new([-h, h, -h], [0.0, 0.0, 1.0, 1.0]),
        Vertex::new([h, h, -h], [0.0, 1.0, 0.0, 1.0]),
        Vertex::new([h, h, h], [0.0, 1.0, 1.0, 1.0]),
        Vertex::new([-h, h, h], [1.0, 0.0, 0.0, 1.0]),
        Vertex::new([-h, -h, -h], [1.0, 0.0, 1.0, 1.0]),
        Vertex::new([h, -h, -h], [1.0, 1.0, 0.0, 1.0]),
        Vertex::new([h, -h, h], [1.0, 1.0, 1.0, 1.0]),
        Vertex::new([-h, -h, h], [0.0, 0.0, 0.0, 1.0]),
    ];

    #[rustfmt::skip]
    let indices = vec![
        3, 1, 0,  2, 1, 3, // top
        0, 5, 4,  1, 5, 0, // front (-z)
        3, 4, 7,  0, 4, 3, // left
        1, 6, 5,  2, 6, 1, // right
        2, 7, 6,  3, 7, 2, // back (+z)
        6, 4, 5,  7, 4, 6, // bottom
    ];

    // Static geometry always satisfies the index invariants.
    MeshAsset::from_parts(vertices, indices).unwrap_or_default()
}
