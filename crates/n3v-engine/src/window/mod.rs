//! Window + runtime loop.
//!
//! Owns the `winit` event loop and the single viewer window, and wires them to
//! the scene renderer.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
