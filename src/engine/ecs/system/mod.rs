pub mod camera_system;
pub mod orbit_system;
pub mod system_world;
pub mod tour_system;

pub use camera_system::CameraSystem;
pub use orbit_system::OrbitSystem;
pub use system_world::SystemWorld;
pub use tour_system::TourSystem;

use super::World;

/// Per-frame inputs shared by every system.
///
/// `dt_sec` is measured wall-clock time; `speed_multiplier` scales the frame-count based
/// orbital motion only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    pub dt_sec: f64,
    pub speed_multiplier: f64,
}

impl FrameClock {
    pub fn new(dt_sec: f64, speed_multiplier: f64) -> Self {
        Self {
            dt_sec,
            speed_multiplier,
        }
    }
}

/// Individual system trait, ticked by `SystemWorld` in a fixed order.
pub trait System: std::fmt::Debug {
    fn tick(&mut self, world: &mut World, clock: &FrameClock);
}
