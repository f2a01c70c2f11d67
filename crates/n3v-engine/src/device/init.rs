/// Device and surface creation options.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends the instance may pick an adapter from.
    pub backends: wgpu::Backends,

    pub power_preference: wgpu::PowerPreference,

    /// Pick an sRGB back buffer when the surface offers one.
    ///
    /// Off by default so vertex colors reach a UNORM back buffer unconverted.
    pub prefer_srgb: bool,

    /// FIFO presents once per vertical blank and is always supported.
    pub present_mode: wgpu::PresentMode,

    /// Used only if the surface supports it; otherwise the first supported mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,

    /// Base limits. The 2D texture dimension limit is raised to what the adapter
    /// supports so large windows can still be backed by a depth target.
    pub required_limits: wgpu::Limits,

    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    /// Prefers an integrated GPU.
    pub fn low_power() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::LowPower,
            ..Self::default()
        }
    }

    pub fn with_present_mode(mut self, present_mode: wgpu::PresentMode) -> Self {
        self.present_mode = present_mode;
        self
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_present_with_vsync() {
        let init = GpuInit::default();
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
        assert!(!init.prefer_srgb);
        assert!(init.required_features.is_empty());
    }

    #[test]
    fn low_power_keeps_other_defaults() {
        let init = GpuInit::low_power().with_present_mode(wgpu::PresentMode::AutoNoVsync);
        assert_eq!(init.power_preference, wgpu::PowerPreference::LowPower);
        assert_eq!(init.present_mode, wgpu::PresentMode::AutoNoVsync);
        assert_eq!(init.backends, wgpu::Backends::all());
    }
}
