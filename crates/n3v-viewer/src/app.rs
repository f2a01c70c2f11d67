use std::path::PathBuf;

use n3v_engine::core::{App, AppControl};
use n3v_engine::input::{Action, InputEvent, KeyBindings};
use n3v_engine::mesh::MeshAsset;
use n3v_engine::mesh::primitives::colored_cube;
use n3v_engine::scene::FrameStatus;
use n3v_engine::window::RuntimeCtx;

const DEMO_CUBE_HALF_EXTENT: f32 = 1.0;

/// Maps viewer input to runtime commands.
pub struct ViewerApp {
    initial_mesh: Option<PathBuf>,
    bindings: KeyBindings,
    frames: u64,
}

impl ViewerApp {
    pub fn new(initial_mesh: Option<PathBuf>, bindings: KeyBindings) -> Self {
        Self {
            initial_mesh,
            bindings,
            frames: 0,
        }
    }
}

impl App for ViewerApp {
    fn on_start(&mut self, ctx: &mut RuntimeCtx) {
        match self.initial_mesh.take() {
            Some(path) => ctx.load_mesh(path),
            None => {
                log::info!("no mesh given, showing the demo cube");
                ctx.show_mesh(demo_cube());
            }
        }
    }

    fn on_input(&mut self, event: &InputEvent, ctx: &mut RuntimeCtx) -> AppControl {
        let Some(action) = self.bindings.resolve(event) else {
            return AppControl::Continue;
        };
        log::trace!("input {event:?} -> {action:?}");

        match action {
            Action::Translate(offset) => ctx.translate_mesh(offset),
            Action::ClearMesh => ctx.clear_mesh(),
            Action::ReloadMesh => ctx.reload_mesh(),
            Action::LoadMesh(path) => ctx.load_mesh(path),
            Action::Exit => return AppControl::Exit,
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, status: FrameStatus) -> AppControl {
        if let FrameStatus::Presented { draw_calls } = status {
            if self.frames == 0 {
                log::info!("first frame presented ({draw_calls} draw calls)");
            }
            self.frames += 1;
        }
        AppControl::Continue
    }
}

/// Cube shown when no file is given, also written by `--write-cube`.
pub fn demo_cube() -> MeshAsset {
    colored_cube(DEMO_CUBE_HALF_EXTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use n3v_engine::input::Key;

    #[test]
    fn escape_exits() {
        let mut app = ViewerApp::new(None, KeyBindings::default());
        let mut ctx = RuntimeCtx::default();
        assert_eq!(app.on_input(&InputEvent::pressed(Key::Escape), &mut ctx), AppControl::Exit);
    }

    #[test]
    fn other_input_continues() {
        let mut app = ViewerApp::new(None, KeyBindings::default());
        let mut ctx = RuntimeCtx::default();
        for key in [Key::ArrowLeft, Key::C, Key::R, Key::Q] {
            assert_eq!(app.on_input(&InputEvent::pressed(key), &mut ctx), AppControl::Continue);
        }
    }

    #[test]
    fn counts_presented_frames() {
        let mut app = ViewerApp::new(None, KeyBindings::default());
        app.on_frame(FrameStatus::Skipped);
        app.on_frame(FrameStatus::Presented { draw_calls: 1 });
        app.on_frame(FrameStatus::Presented { draw_calls: 0 });
        assert_eq!(app.frames, 2);
    }

    #[test]
    fn demo_cube_is_drawable() {
        let cube = demo_cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.triangle_count(), 12);
    }
}
