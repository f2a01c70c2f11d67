use crate::input::InputEvent;
use crate::scene::FrameStatus;
use crate::window::RuntimeCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by hosts of the runtime.
///
/// Callbacks queue work on the [`RuntimeCtx`]; the runtime applies it to the
/// renderer after the callback returns.
pub trait App {
    /// Called once, after the window and renderer exist.
    fn on_start(&mut self, ctx: &mut RuntimeCtx) {
        let _ = ctx;
    }

    /// Called for every translated input event.
    fn on_input(&mut self, event: &InputEvent, ctx: &mut RuntimeCtx) -> AppControl;

    /// Called after each render attempt.
    fn on_frame(&mut self, status: FrameStatus) -> AppControl {
        let _ = status;
        AppControl::Continue
    }
}
