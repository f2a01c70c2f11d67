//! Input subsystem.
//!
//! Public types do not expose winit. The runtime translates platform events into
//! [`InputEvent`]s through [`platform::translate_window_event`], and hosts turn
//! those into viewer actions with [`KeyBindings`].

mod bindings;
pub mod platform;
mod types;

pub use bindings::{Action, KeyBindings};
pub use types::{InputEvent, Key, KeyState};
