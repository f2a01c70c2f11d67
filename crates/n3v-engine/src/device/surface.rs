//! Surface configuration helpers and resize bookkeeping.

/// Surface size in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SurfaceExtent {
    pub width: u32,
    pub height: u32,
}

impl SurfaceExtent {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// wgpu cannot configure a surface with a zero dimension.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height; `None` while either dimension is zero.
    #[inline]
    pub fn aspect(self) -> Option<f32> {
        (!self.is_zero()).then(|| self.width as f32 / self.height as f32)
    }
}

/// Rasterizer viewport rectangle, set per render pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Viewport covering the whole surface with the full depth range.
    pub fn full(extent: SurfaceExtent) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: extent.width as f32,
            height: extent.height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// Result of a resize request.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResizeOutcome {
    /// Same size and live targets; nothing was touched.
    Unchanged,
    /// Surface reconfigured and targets recreated.
    Resized,
    /// Zero-sized surface (e.g. minimized); targets released until a non-zero resize.
    Deferred,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum ResizePlan {
    Skip,
    Defer,
    Apply,
}

/// Decides what a resize request has to do.
///
/// A request matching the current size only counts as a no-op while the render
/// targets are alive; after a failed or deferred resize the same size must be
/// rebuilt.
pub(crate) fn plan_resize(
    current: SurfaceExtent,
    requested: SurfaceExtent,
    targets_live: bool,
) -> ResizePlan {
    if requested.is_zero() {
        return if current == requested && !targets_live {
            ResizePlan::Skip
        } else {
            ResizePlan::Defer
        };
    }

    if current == requested && targets_live {
        ResizePlan::Skip
    } else {
        ResizePlan::Apply
    }
}

pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = *formats.first()?;

    let preferred: [wgpu::TextureFormat; 2] = if prefer_srgb {
        [wgpu::TextureFormat::Bgra8UnormSrgb, wgpu::TextureFormat::Rgba8UnormSrgb]
    } else {
        [wgpu::TextureFormat::Rgba8Unorm, wgpu::TextureFormat::Bgra8Unorm]
    };

    Some(
        preferred
            .into_iter()
            .find(|f| formats.contains(f))
            .unwrap_or(first),
    )
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// What the renderer should do after failing to acquire a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Lost or outdated surface, now reconfigured. Try again next frame.
    Reconfigured,
    /// Timeout or other transient failure. Drop this frame.
    SkipFrame,
    /// Out of memory. Rendering cannot continue.
    Fatal,
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    extent: SurfaceExtent,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if !extent.is_zero() {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}
