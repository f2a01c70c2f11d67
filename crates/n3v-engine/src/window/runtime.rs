use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::Vec3;
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl};
use crate::device::{GpuInit, SurfaceProvider};
use crate::input::platform::translate_window_event;
use crate::mesh::{MeshAsset, MeshError};
use crate::scene::{FrameStatus, SceneConfig, SceneRenderer};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub scene: SceneConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "n3v".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            scene: SceneConfig::default(),
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied in order after the current callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    /// Reads a mesh file and shows it. On failure nothing is shown.
    pub fn load_mesh(&mut self, path: impl Into<PathBuf>) {
        self.commands.push(Command::LoadMesh(path.into()));
    }

    /// Shows an in-memory mesh.
    pub fn show_mesh(&mut self, mesh: MeshAsset) {
        self.commands.push(Command::ShowMesh(mesh));
    }

    /// Reads the last loaded file again.
    pub fn reload_mesh(&mut self) {
        self.commands.push(Command::ReloadMesh);
    }

    pub fn clear_mesh(&mut self) {
        self.commands.push(Command::ClearMesh);
    }

    pub fn translate_mesh(&mut self, offset: Vec3) {
        self.commands.push(Command::Translate(offset));
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }
}

#[derive(Debug)]
enum Command {
    LoadMesh(PathBuf),
    ShowMesh(MeshAsset),
    ReloadMesh,
    ClearMesh,
    Translate(Vec3),
    Exit,
}

/// CPU copy of the displayed mesh and the file it came from.
#[derive(Debug, Default)]
struct CurrentMesh {
    asset: MeshAsset,
    path: Option<PathBuf>,
}

impl CurrentMesh {
    /// The path is remembered even when loading fails, so a reload can retry.
    fn load(&mut self, path: PathBuf) -> Result<(), MeshError> {
        let result = self.asset.load(&path);
        self.path = Some(path);
        result
    }

    fn reload(&mut self) -> Option<Result<(), MeshError>> {
        let path = self.path.clone()?;
        Some(self.load(path))
    }

    fn replace(&mut self, asset: MeshAsset) {
        self.asset = asset;
        self.path = None;
    }

    fn clear(&mut self) {
        self.asset.clear();
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initializes the renderer and runs until exit.
    ///
    /// Renderer initialization failures and fatal render errors are returned
    /// once the event loop has stopped.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    renderer: SceneRenderer<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    mesh: CurrentMesh,

    exit_requested: bool,
    error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            mesh: CurrentMesh::default(),
            exit_requested: false,
            error: None,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let scene = self.config.scene;
        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            window,
            renderer_builder: |w| {
                let mut renderer = SceneRenderer::new(scene);
                let (width, height) = w.surface_size();
                renderer.initialize(w, width, height, gpu_init).map(|()| renderer)
            },
        }
        .try_build()
        .context("renderer initialization failed")?;

        self.window = Some(entry);
        Ok(())
    }

    fn request_redraw(&self) {
        if let Some(entry) = &self.window {
            entry.borrow_window().request_redraw();
        }
    }

    /// Sends the current CPU mesh to the renderer. An empty asset clears the GPU mesh.
    fn upload_mesh(&mut self) {
        let (mesh, window) = (&self.mesh, &mut self.window);
        if let Some(entry) = window {
            entry.with_renderer_mut(|r| r.load_mesh(&mesh.asset));
        }
    }

    fn apply_commands(&mut self, ctx: RuntimeCtx) {
        let mut dirty = false;

        for cmd in ctx.commands {
            match cmd {
                Command::LoadMesh(path) => {
                    if let Err(e) = self.mesh.load(path) {
                        log::error!("{:#}", anyhow::Error::new(e));
                    }
                    self.upload_mesh();
                    dirty = true;
                }
                Command::ReloadMesh => match self.mesh.reload() {
                    Some(result) => {
                        if let Err(e) = result {
                            log::error!("{:#}", anyhow::Error::new(e));
                        }
                        self.upload_mesh();
                        dirty = true;
                    }
                    None => log::warn!("no mesh file to reload"),
                },
                Command::ShowMesh(asset) => {
                    self.mesh.replace(asset);
                    self.upload_mesh();
                    dirty = true;
                }
                Command::ClearMesh => {
                    self.mesh.clear();
                    self.upload_mesh();
                    dirty = true;
                }
                Command::Translate(offset) => {
                    if let Some(entry) = self.window.as_mut() {
                        entry.with_renderer_mut(|r| r.translate_mesh(offset.x, offset.y, offset.z));
                    }
                    dirty = true;
                }
                Command::Exit => self.request_exit(),
            }
        }

        if dirty {
            self.request_redraw();
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        let Some(entry) = self.window.as_mut() else {
            return;
        };

        match entry.with_renderer_mut(|r| r.resize(width, height)) {
            Ok(outcome) => log::trace!("resize {width}x{height}: {outcome:?}"),
            Err(e) => log::error!("resize to {width}x{height} failed: {e:#}"),
        }
        entry.borrow_window().request_redraw();
    }

    fn redraw(&mut self) {
        let Some(entry) = self.window.as_mut() else {
            return;
        };

        entry.borrow_window().pre_present_notify();

        match entry.with_renderer_mut(|r| r.render()) {
            Ok(status) => {
                if status == FrameStatus::Skipped {
                    entry.borrow_window().request_redraw();
                }
                if self.app.on_frame(status) == AppControl::Exit {
                    self.exit_requested = true;
                }
            }
            Err(e) => {
                log::error!("rendering failed: {e:#}");
                self.error = Some(e);
                self.exit_requested = true;
            }
        }
    }

    /// Releases the renderer before the window goes away.
    fn close_window(&mut self) {
        if let Some(mut entry) = self.window.take() {
            entry.with_renderer_mut(|r| r.shutdown());
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create viewer window: {e:#}");
            self.error = Some(e);
            self.request_exit();
            event_loop.exit();
            return;
        }

        let mut ctx = RuntimeCtx::default();
        self.app.on_start(&mut ctx);
        self.apply_commands(ctx);

        self.request_redraw();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            self.close_window();
            event_loop.exit();
            return;
        }

        // Redraws are requested explicitly; no continuous rendering.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            self.close_window();
            event_loop.exit();
            return;
        }

        if let Some(input) = translate_window_event(&event) {
            let mut ctx = RuntimeCtx::default();
            if self.app.on_input(&input, &mut ctx) == AppControl::Exit {
                ctx.exit();
            }
            self.apply_commands(ctx);
        }

        match &event {
            WindowEvent::CloseRequested => self.request_exit(),

            WindowEvent::Resized(size) => self.resize(size.width, size.height),

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = self.window.as_ref().map(|e| e.borrow_window().surface_size());
                if let Some((width, height)) = size {
                    self.resize(width, height);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }

        if self.exit_requested {
            self.close_window();
            event_loop.exit();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.close_window();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::primitives::colored_cube;

    #[test]
    fn commands_keep_their_order() {
        let mut ctx = RuntimeCtx::default();
        ctx.load_mesh("a.n3v");
        ctx.translate_mesh(Vec3::X);
        ctx.clear_mesh();
        ctx.exit();

        let kinds: Vec<_> = ctx
            .commands
            .iter()
            .map(|c| match c {
                Command::LoadMesh(_) => "load",
                Command::ShowMesh(_) => "show",
                Command::ReloadMesh => "reload",
                Command::ClearMesh => "clear",
                Command::Translate(_) => "translate",
                Command::Exit => "exit",
            })
            .collect();

        assert_eq!(kinds, ["load", "translate", "clear", "exit"]);
    }

    #[test]
    fn failed_load_clears_and_remembers_path() {
        let mut current = CurrentMesh::default();
        current.replace(colored_cube(1.0));
        assert!(!current.asset.is_empty());

        let path = PathBuf::from("definitely/not/here.n3v");
        let err = current.load(path.clone()).unwrap_err();

        assert!(matches!(err, MeshError::Open { .. }));
        assert!(current.asset.is_empty());
        assert_eq!(current.path, Some(path));
    }

    #[test]
    fn reload_without_file_does_nothing() {
        let mut current = CurrentMesh::default();
        current.replace(colored_cube(1.0));

        assert!(current.reload().is_none());
        assert!(!current.asset.is_empty());
    }

    #[test]
    fn replace_forgets_previous_file() {
        let mut current = CurrentMesh::default();
        let _ = current.load(PathBuf::from("missing.n3v"));

        current.replace(colored_cube(0.5));
        assert!(current.path.is_none());

        current.clear();
        assert!(current.asset.is_empty());
    }
}
