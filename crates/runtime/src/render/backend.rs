use crate::view::RevealView;

/// Abstraction for the rendering backend.
pub trait RenderBackend {
    /// Resizes the internal surface/buffers.
    fn resize(&mut self, width: u32, height: u32);

    /// Renders the current stage view to the target.
    fn render(&mut self, view: &RevealView) -> Result<(), String>;
}
