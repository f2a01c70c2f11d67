use anyhow::{Context, Result};
use wgpu::SurfaceError;

use super::depth::DepthTarget;
use super::frame::GpuFrame;
use super::init::GpuInit;
use super::provider::SurfaceProvider;
use super::surface::{self, ResizeOutcome, ResizePlan, SurfaceErrorAction, SurfaceExtent, Viewport};

/// The device, its queue, the window surface and a depth-stencil target of the
/// same size.
///
/// Every GPU object is exclusively owned; dropping the device releases all of them.
pub struct GraphicsDevice<'w> {
    /// Surface bound to the host window.
    ///
    /// Surface lifetime is tied to the provider; the host must ensure the window
    /// outlives the device.
    surface: wgpu::Surface<'w>,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Configuration the surface was last configured with.
    config: wgpu::SurfaceConfiguration,

    /// Size the targets were last built for (or deferred at).
    extent: SurfaceExtent,

    /// `None` while the surface is zero-sized or after a failed resize.
    depth: Option<DepthTarget>,

    viewport: Viewport,
}

impl<'w> GraphicsDevice<'w> {
    /// Creates the device and its render targets for `provider`, sized `width`×`height`.
    ///
    /// Fails for a zero size or one beyond the device's texture limit. Adapter and
    /// device requests are async; hosts block on them with `pollster`.
    pub async fn new<P: SurfaceProvider>(
        provider: &'w P,
        width: u32,
        height: u32,
        init: GpuInit,
    ) -> Result<Self> {
        let extent = SurfaceExtent::new(width, height);
        anyhow::ensure!(!extent.is_zero(), "surface has zero size ({width}x{height})");

        let GpuInit {
            backends,
            power_preference,
            prefer_srgb,
            present_mode,
            alpha_mode,
            required_features,
            required_limits,
            desired_maximum_frame_latency,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(provider)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!("using adapter \"{}\" ({:?}, {:?})", info.name, info.backend, info.device_type);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("n3v device"),
                required_features,
                required_limits: required_limits.using_resolution(adapter.limits()),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let max_dim = device.limits().max_texture_dimension_2d;
        anyhow::ensure!(
            width <= max_dim && height <= max_dim,
            "surface size {width}x{height} exceeds device limit {max_dim}"
        );

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&surface_caps.formats, prefer_srgb)
            .context("no supported surface formats")?;

        let alpha_mode = surface::choose_alpha_mode(&surface_caps, alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);

        let depth = DepthTarget::new(&device, extent);
        log::debug!("surface configured: {width}x{height} {format:?} {present_mode:?}");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            extent,
            depth: Some(depth),
            viewport: Viewport::full(extent),
        })
    }

    /// Back buffer format the pipeline targets.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the size the targets were last built for.
    pub fn extent(&self) -> SurfaceExtent {
        self.extent
    }

    /// Full-surface viewport recorded by the last successful (re)configuration.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// True when both the surface and the depth-stencil target are usable.
    pub fn targets_ready(&self) -> bool {
        self.depth.is_some()
    }

    pub fn depth_view(&self) -> Option<&wgpu::TextureView> {
        self.depth.as_ref().map(DepthTarget::view)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Rebuilds the swap chain and depth-stencil target for a new size.
    ///
    /// Same size with live targets is a no-op. A zero dimension releases the
    /// targets and defers configuration. On error the targets stay released and
    /// the device remains usable; rendering resumes after the next successful resize.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<ResizeOutcome> {
        let requested = SurfaceExtent::new(width, height);

        match surface::plan_resize(self.extent, requested, self.targets_ready()) {
            ResizePlan::Skip => return Ok(ResizeOutcome::Unchanged),
            ResizePlan::Defer => {
                self.depth = None;
                self.extent = requested;
                log::debug!("resize to {width}x{height} deferred");
                return Ok(ResizeOutcome::Deferred);
            }
            ResizePlan::Apply => {}
        }

        // Old attachments go before the swap chain is reconfigured.
        self.depth = None;

        let max_dim = self.device.limits().max_texture_dimension_2d;
        anyhow::ensure!(
            width <= max_dim && height <= max_dim,
            "cannot resize surface to {width}x{height}: device limit is {max_dim}"
        );

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth = Some(DepthTarget::new(&self.device, requested));
        self.extent = requested;
        self.viewport = Viewport::full(requested);

        log::debug!("surface resized to {width}x{height}");
        Ok(ResizeOutcome::Resized)
    }

    /// Acquires the back buffer for this frame along with a fresh encoder.
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let color_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("n3v frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            color_view,
            encoder,
        })
    }

    /// Submits the recorded commands and presents the frame.
    ///
    /// With a FIFO present mode this waits for the next vertical blank.
    pub fn present(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            color_view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(color_view);
        surface_texture.present();
    }

    /// Reconfigures after a lost/outdated surface and says whether to carry on.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        log::warn!("surface error: {err}");
        surface::map_surface_error(&self.surface, &self.device, &self.config, self.extent, err)
    }
}
