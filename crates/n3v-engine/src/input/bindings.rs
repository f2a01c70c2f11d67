use std::path::PathBuf;

use glam::Vec3;

use super::types::{InputEvent, Key, KeyState};

/// What the viewer should do in response to an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Compose this offset onto the mesh world transform.
    Translate(Vec3),
    ClearMesh,
    ReloadMesh,
    LoadMesh(PathBuf),
    Exit,
}

/// Key bindings for the mesh viewer.
///
/// Arrow keys move along X/Y, PageUp/PageDown along Z, each by `step` world
/// units per press. Translation keys auto-repeat; the others fire once per press.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KeyBindings {
    step: f32,
}

impl KeyBindings {
    pub const DEFAULT_STEP: f32 = 0.5;

    pub fn new(step: f32) -> Self {
        Self { step }
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Resolves an input event into an action, if it is bound.
    pub fn resolve(&self, event: &InputEvent) -> Option<Action> {
        match event {
            InputEvent::FileDropped(path) => Some(Action::LoadMesh(path.clone())),
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                repeat,
            } => {
                if let Some(offset) = self.translation_for(*key) {
                    return Some(Action::Translate(offset));
                }
                if *repeat {
                    return None;
                }
                match key {
                    Key::C => Some(Action::ClearMesh),
                    Key::R => Some(Action::ReloadMesh),
                    Key::Escape => Some(Action::Exit),
                    _ => None,
                }
            }
            InputEvent::Key { .. } => None,
        }
    }

    fn translation_for(&self, key: Key) -> Option<Vec3> {
        let s = self.step;
        let offset = match key {
            Key::ArrowLeft => Vec3::new(-s, 0.0, 0.0),
            Key::ArrowRight => Vec3::new(s, 0.0, 0.0),
            Key::ArrowUp => Vec3::new(0.0, s, 0.0),
            Key::ArrowDown => Vec3::new(0.0, -s, 0.0),
            Key::PageUp => Vec3::new(0.0, 0.0, s),
            Key::PageDown => Vec3::new(0.0, 0.0, -s),
            _ => return None,
        };
        Some(offset)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STEP)
    }
}
