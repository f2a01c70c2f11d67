use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

/// Native drawable surface the renderer presents into.
///
/// The host owns the window; the renderer only borrows its raw handles to create
/// a wgpu surface and asks for the current size in physical pixels.
pub trait SurfaceProvider: HasWindowHandle + HasDisplayHandle + Send + Sync {
    /// Current drawable size as `(width, height)` in physical pixels.
    fn surface_size(&self) -> (u32, u32);
}

impl SurfaceProvider for winit::window::Window {
    fn surface_size(&self) -> (u32, u32) {
        let size = self.inner_size();
        (size.width, size.height)
    }
}
