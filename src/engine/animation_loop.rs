use crate::engine::EngineResult;
use crate::engine::Universe;
use crate::engine::graphics::Renderer;

/// Fixed-step driver for running a universe without a window.
///
/// Each frame: tick by a fixed step, hand the snapshot to the renderer.
pub struct AnimationLoop<'a, R: Renderer> {
    universe: &'a mut Universe,
    renderer: &'a mut R,
    frame_dt_sec: f64,
}

impl<'a, R: Renderer> AnimationLoop<'a, R> {
    pub const DEFAULT_FRAME_DT_SEC: f64 = 1.0 / 60.0;

    pub fn new(universe: &'a mut Universe, renderer: &'a mut R) -> Self {
        Self {
            universe,
            renderer,
            frame_dt_sec: Self::DEFAULT_FRAME_DT_SEC,
        }
    }

    pub fn step(&mut self) -> EngineResult<()> {
        let visuals = self.universe.tick(self.frame_dt_sec);
        self.renderer.draw_frame(visuals)
    }

    pub fn run_frames(&mut self, frames: u64) -> EngineResult<()> {
        log::info!("Running {} frames at dt={:.4}s", frames, self.frame_dt_sec);
        for _ in 0..frames {
            self.step()?;
        }
        Ok(())
    }
}
