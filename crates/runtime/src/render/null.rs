use crate::view::RevealView;

use super::backend::RenderBackend;

/// Backend used when no drawing surface could be acquired.
///
/// Frames are counted and dropped, so the stage keeps ticking and committing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullBackend {
    size: (u32, u32),
    frames: u64,
}

impl NullBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            frames: 0,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Frames accepted so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderBackend for NullBackend {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn render(&mut self, _view: &RevealView) -> Result<(), String> {
        self.frames += 1;
        Ok(())
    }
}
