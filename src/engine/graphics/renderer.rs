use crate::engine::EngineResult;
use crate::engine::graphics::VisualWorld;

/// Render seam: whatever draws the scene receives one `VisualWorld` per frame.
///
/// Geometry, materials and textures live entirely behind this trait.
pub trait Renderer {
    fn draw_frame(&mut self, visuals: &VisualWorld) -> EngineResult<()>;

    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Renderer that only traces the frame; used headless and as the windowed default.
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn draw_frame(&mut self, visuals: &VisualWorld) -> EngineResult<()> {
        self.frames += 1;
        log::trace!(
            "frame {}: camera at {:?} looking at {:?}, focus {:?}, {} bodies",
            visuals.frame,
            visuals.camera.position,
            visuals.camera.look_at,
            visuals.focused,
            visuals.bodies.len()
        );
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        log::debug!("viewport resized to {}x{}", width, height);
    }
}
