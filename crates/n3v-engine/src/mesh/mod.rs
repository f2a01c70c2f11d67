//! Mesh data model.
//!
//! A [`MeshAsset`] is an indexed triangle list of position + color vertices read
//! from the `.n3v` binary format. The asset is CPU-only; GPU mirrors live in
//! `scene`.

mod asset;
mod bounds;
mod error;
mod format;
pub mod primitives;
mod vertex;

pub use asset::MeshAsset;
pub use bounds::BoundingSphere;
pub use error::MeshError;
pub use format::{decode, encode, MAX_VERTICES};
pub use vertex::Vertex;
