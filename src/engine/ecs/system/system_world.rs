use super::World;
use crate::engine::camera::CameraPose;
use crate::engine::config::EngineConfig;
use crate::engine::ecs::system::{CameraSystem, FrameClock, OrbitSystem, System, TourSystem};
use crate::engine::ecs::{BodyId, BodyKind};
use crate::engine::{EngineError, EngineResult};

/// System world that holds and runs all registered systems.
///
/// Tick order is fixed: orbit (angles, then parent-first positions) → camera → tour. The tour
/// reads the focus the camera just settled, and its advance turns into a camera transition
/// that starts moving on the next tick.
#[derive(Debug)]
pub struct SystemWorld {
    pub orbit: OrbitSystem,
    pub camera: CameraSystem,
    pub tour: TourSystem,
}

impl SystemWorld {
    pub fn new(cfg: &EngineConfig) -> Self {
        Self {
            orbit: OrbitSystem::new(),
            camera: CameraSystem::new(cfg),
            tour: TourSystem::new(cfg.tour_dwell_sec),
        }
    }

    /// Advance one frame.
    pub fn tick(&mut self, world: &mut World, dt_sec: f64, speed_multiplier: f64) -> CameraPose {
        let clock = FrameClock::new(dt_sec, speed_multiplier);

        self.orbit.tick(world, &clock);
        self.camera.tick(world, &clock);
        self.tour.tick(world, &clock);

        if let Some(next) = self.tour.take_focus_request() {
            if let Err(e) = self.camera.focus_on(world, next) {
                log::warn!("Tour stop vanished: {}", e);
            }
        }

        self.camera.pose()
    }

    /// Focus the camera on `id`. An explicit focus ends a running tour.
    pub fn focus_on(&mut self, world: &World, id: BodyId) -> EngineResult<()> {
        if world.get(id).is_none() {
            return Err(EngineError::BodyNotFound(format!("{:?}", id)));
        }
        if self.tour.stop() {
            log::info!("Tour stopped by explicit focus");
        }
        self.camera.focus_on(world, id)
    }

    /// Stop following; also ends a running tour.
    pub fn release_focus(&mut self) {
        self.tour.stop();
        self.camera.release_focus();
    }

    /// Tour the planets in scene order, starting with the first.
    pub fn start_tour(&mut self, world: &World) -> EngineResult<BodyId> {
        let first = self.tour.start(world.ids_of_kind(BodyKind::Planet))?;
        self.camera.focus_on(world, first)?;
        Ok(first)
    }

    /// Stop the tour and release the focus target.
    pub fn stop_tour(&mut self) -> bool {
        let was_running = self.tour.stop();
        if was_running {
            self.camera.release_focus();
        }
        was_running
    }

    pub fn tour_next(&mut self, world: &World) -> EngineResult<BodyId> {
        let id = self.tour.next()?;
        self.camera.focus_on(world, id)?;
        Ok(id)
    }

    pub fn tour_prev(&mut self, world: &World) -> EngineResult<BodyId> {
        let id = self.tour.prev()?;
        self.camera.focus_on(world, id)?;
        Ok(id)
    }
}
