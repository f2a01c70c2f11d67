//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swap chain) and the depth-stencil target
//! - resizing both in the order the attachments require
//! - acquiring and presenting frames

mod depth;
mod frame;
mod gpu;
mod init;
mod provider;
mod surface;

pub use depth::{DepthTarget, DEPTH_FORMAT};
pub use frame::GpuFrame;
pub use gpu::GraphicsDevice;
pub use init::GpuInit;
pub use provider::SurfaceProvider;
pub use surface::{ResizeOutcome, SurfaceErrorAction, SurfaceExtent, Viewport};
