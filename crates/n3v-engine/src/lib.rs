//! n3v engine crate.
//!
//! Loads `.n3v` triangle meshes and draws one of them at a time through wgpu,
//! with an auto-framed camera and an accumulating world translation.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod mesh;
pub mod pipeline;
pub mod scene;
