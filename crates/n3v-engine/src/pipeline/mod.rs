//! Fixed mesh pipeline.
//!
//! One WGSL module (vertex + fragment entry points), one vertex layout, one
//! uniform buffer holding the world/view/projection matrices. Everything is
//! built once when the renderer initializes.

mod mesh_pipeline;
mod shader;
mod uniforms;

pub use mesh_pipeline::MeshPipeline;
pub use shader::{validate_wgsl, ShaderError, MESH_SHADER_SOURCE};
pub use uniforms::TransformUniforms;
