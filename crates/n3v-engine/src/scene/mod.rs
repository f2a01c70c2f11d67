//! Scene orchestration.
//!
//! `SceneRenderer` ties the device, the pipeline and the current mesh together.
//! The CPU-side state it drives (camera, world transform, projection, draw
//! counts) lives in `SceneState`, which has no GPU dependency.

mod buffers;
mod camera;
mod projection;
mod renderer;
mod state;
mod transform;

pub use buffers::MeshBuffers;
pub use camera::{fit_distance, Camera, FIT_RADIUS_SCALE, MIN_FIT_DISTANCE};
pub use projection::Projection;
pub use renderer::{FrameStatus, RendererPhase, SceneConfig, SceneRenderer};
pub use state::{DrawRange, SceneState};
pub use transform::WorldTransform;
