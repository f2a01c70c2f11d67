use anyhow::Result;
use glam::Vec3;

use crate::device::{
    GpuInit, GraphicsDevice, ResizeOutcome, SurfaceErrorAction, SurfaceExtent, SurfaceProvider,
};
use crate::mesh::MeshAsset;
use crate::pipeline::MeshPipeline;

use super::buffers::MeshBuffers;
use super::projection::Projection;
use super::state::SceneState;

/// Renderer configuration.
#[derive(Debug, Copy, Clone)]
pub struct SceneConfig {
    /// Background color the target is cleared to every frame.
    pub clear_color: wgpu::Color,
    pub projection: Projection,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            clear_color: wgpu::Color { r: 0.1, g: 0.2, b: 0.3, a: 1.0 },
            projection: Projection::default(),
        }
    }
}

/// Lifecycle of a [`SceneRenderer`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RendererPhase {
    Uninitialized,
    Ready,
    /// Terminal.
    Shutdown,
}

/// What a call to [`SceneRenderer::render`] did.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    /// Not initialized, shut down, or waiting for a successful resize.
    NotReady,
    /// Transient surface error; nothing was presented.
    Skipped,
    /// Frame cleared, drawn and presented.
    Presented { draw_calls: u32 },
}

/// Draws a single mesh with an auto-framed camera and an accumulating world transform.
///
/// All operations are expected on one thread (the host's event loop).
/// `load_mesh`, `translate_mesh`, `resize` and `render` do nothing unless the
/// renderer is [`RendererPhase::Ready`].
pub struct SceneRenderer<'w> {
    config: SceneConfig,
    phase: RendererPhase,

    device: Option<GraphicsDevice<'w>>,
    pipeline: Option<MeshPipeline>,
    mesh: Option<MeshBuffers>,

    state: SceneState,
}

impl<'w> SceneRenderer<'w> {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            phase: RendererPhase::Uninitialized,
            device: None,
            pipeline: None,
            mesh: None,
            state: SceneState::new(config.projection, SurfaceExtent::default()),
        }
    }

    /// Creates the device, the render targets and the mesh pipeline.
    ///
    /// On error nothing is kept and the renderer stays uninitialized.
    pub fn initialize<P: SurfaceProvider>(
        &mut self,
        provider: &'w P,
        width: u32,
        height: u32,
        init: GpuInit,
    ) -> Result<()> {
        match self.phase {
            RendererPhase::Uninitialized => {}
            RendererPhase::Ready => anyhow::bail!("renderer is already initialized"),
            RendererPhase::Shutdown => anyhow::bail!("renderer has been shut down"),
        }

        let device = pollster::block_on(GraphicsDevice::new(provider, width, height, init))?;
        let pipeline = MeshPipeline::new(device.device(), device.surface_format())?;

        self.state = SceneState::new(self.config.projection, device.extent());
        self.device = Some(device);
        self.pipeline = Some(pipeline);
        self.mesh = None;
        self.phase = RendererPhase::Ready;

        log::info!("renderer initialized at {width}x{height}");
        Ok(())
    }

    /// Replaces the GPU mesh with `mesh` and frames the camera on it.
    ///
    /// An empty mesh drops the current buffers and leaves the camera alone.
    pub fn load_mesh(&mut self, mesh: &MeshAsset) {
        if self.phase != RendererPhase::Ready {
            log::trace!("load_mesh ignored: renderer is {:?}", self.phase);
            return;
        }
        let Some(device) = self.device.as_ref() else { return };

        // Old buffers are released before the new ones exist; never patched.
        self.mesh = None;
        self.mesh = MeshBuffers::upload(device.device(), mesh);

        if self.state.apply_mesh(mesh) {
            let cam = self.state.camera();
            log::debug!(
                "camera framed: eye {:?} target {:?} distance {:.3}",
                cam.eye,
                cam.target,
                cam.distance()
            );
        } else {
            log::debug!("mesh is empty; nothing will be drawn");
        }
    }

    /// Composes a translation onto the world transform. Accumulates permanently.
    pub fn translate_mesh(&mut self, dx: f32, dy: f32, dz: f32) {
        if self.phase != RendererPhase::Ready {
            log::trace!("translate_mesh ignored: renderer is {:?}", self.phase);
            return;
        }
        self.state.translate(Vec3::new(dx, dy, dz));
    }

    /// Resizes the surface targets and recomputes the projection.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<ResizeOutcome> {
        if self.phase != RendererPhase::Ready {
            log::trace!("resize ignored: renderer is {:?}", self.phase);
            return Ok(ResizeOutcome::Unchanged);
        }
        let Some(device) = self.device.as_mut() else {
            return Ok(ResizeOutcome::Unchanged);
        };

        let outcome = device.resize(width, height)?;
        self.state.apply_resize(outcome, device.extent());
        Ok(outcome)
    }

    /// Clears, draws the current mesh (if any) and presents.
    ///
    /// Presentation blocks until the next vertical blank under the default FIFO
    /// present mode. Only unrecoverable surface errors are returned as `Err`.
    pub fn render(&mut self) -> Result<FrameStatus> {
        if self.phase != RendererPhase::Ready {
            return Ok(FrameStatus::NotReady);
        }
        let (Some(device), Some(pipeline)) = (self.device.as_mut(), self.pipeline.as_ref()) else {
            return Ok(FrameStatus::NotReady);
        };
        if !device.targets_ready() {
            return Ok(FrameStatus::NotReady);
        }

        let mut frame = match device.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match device.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => Err(anyhow::anyhow!("surface failed unrecoverably")),
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        Ok(FrameStatus::Skipped)
                    }
                };
            }
        };

        let device = &*device;
        let Some(depth_view) = device.depth_view() else {
            return Ok(FrameStatus::NotReady);
        };

        let target = self.state.draw_target(self.mesh.as_ref());
        if target.is_some() {
            pipeline.write_transforms(device.queue(), &self.state.uniforms());
        }

        let mut draw_calls = 0;

        // Render pass borrows frame.encoder; dropped before present() takes the frame.
        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("n3v mesh pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.config.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(0),
                        store: wgpu::StoreOp::Store,
                    }),
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let vp = device.viewport();
            rpass.set_viewport(vp.x, vp.y, vp.width, vp.height, vp.min_depth, vp.max_depth);

            if let Some((buffers, range)) = target {
                pipeline.bind(&mut rpass);
                buffers.draw(&mut rpass, range);
                draw_calls += 1;
            }
        }

        device.present(frame);
        Ok(FrameStatus::Presented { draw_calls })
    }

    /// Releases every GPU object and resets the scene. Terminal and idempotent.
    pub fn shutdown(&mut self) {
        if self.phase == RendererPhase::Shutdown {
            return;
        }
        let was_ready = self.phase == RendererPhase::Ready;

        self.mesh = None;
        self.pipeline = None;
        self.device = None;
        self.state = SceneState::new(self.config.projection, SurfaceExtent::default());
        self.phase = RendererPhase::Shutdown;

        if was_ready {
            log::info!("renderer shut down");
        }
    }

    #[inline]
    pub fn phase(&self) -> RendererPhase {
        self.phase
    }

    /// CPU-side scene state (camera, world, index count).
    #[inline]
    pub fn state(&self) -> &SceneState {
        &self.state
    }
}

impl Drop for SceneRenderer<'_> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::primitives::colored_cube;

    #[test]
    fn uninitialized_renderer_ignores_everything() {
        let mut r = SceneRenderer::new(SceneConfig::default());

        r.load_mesh(&colored_cube(1.0));
        r.translate_mesh(1.0, 0.0, 0.0);

        assert_eq!(r.resize(640, 480).unwrap(), ResizeOutcome::Unchanged);
        assert_eq!(r.render().unwrap(), FrameStatus::NotReady);
        assert_eq!(r.state().draw_range(), None);
        assert_eq!(r.state().world().translation(), Vec3::ZERO);
    }

    #[test]
    fn shutdown_is_idempotent_and_terminal() {
        let mut r = SceneRenderer::new(SceneConfig::default());
        r.shutdown();
        r.shutdown();
        assert_eq!(r.phase(), RendererPhase::Shutdown);

        r.translate_mesh(0.0, 1.0, 0.0);
        assert_eq!(r.render().unwrap(), FrameStatus::NotReady);
        assert_eq!(r.state().world().translation(), Vec3::ZERO);
    }

    #[test]
    fn empty_load_issues_no_draw() {
        let mut state = SceneState::new(Projection::default(), SurfaceExtent::new(800, 600));
        let uploaded = ();

        state.apply_mesh(&colored_cube(1.0));
        assert!(state.draw_target(Some(&uploaded)).is_some());

        // An empty upload yields no buffers, and the recorded range is gone too.
        let empty = MeshAsset::new();
        state.apply_mesh(&empty);
        assert_eq!(state.draw_target::<()>(None), None);
        assert_eq!(state.draw_target(Some(&uploaded)), None);
    }

    #[test]
    fn repeated_resize_is_a_no_op() {
        let mut state = SceneState::new(Projection::default(), SurfaceExtent::new(800, 600));
        let size = SurfaceExtent::new(1280, 720);

        state.apply_resize(ResizeOutcome::Resized, size);
        let (extent, projection) = (state.extent(), state.projection_matrix());

        // The device reports `Unchanged` for a same-size request with live targets.
        state.apply_resize(ResizeOutcome::Unchanged, size);
        assert_eq!(state.extent(), extent);
        assert_eq!(state.projection_matrix(), projection);
    }

    #[test]
    fn default_clear_color() {
        let c = SceneConfig::default().clear_color;
        assert_eq!((c.r, c.g, c.b, c.a), (0.1, 0.2, 0.3, 1.0));
    }
}
