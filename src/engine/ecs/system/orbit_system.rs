use glam::DVec3;

use crate::engine::ecs::body::wrap_angle;
use crate::engine::ecs::system::{FrameClock, System};
use crate::engine::ecs::{CelestialBody, World};
use crate::engine::tilt::tilted_offset;

/// Advances orbital and spin angles, then recomputes world positions.
///
/// Motion is frame-count based: each tick adds `speed * speed_multiplier` regardless of
/// `dt_sec`. Positions are resolved parent-first, so a moon sees its planet's position from
/// the same tick.
#[derive(Debug, Default)]
pub struct OrbitSystem;

impl OrbitSystem {
    pub fn new() -> Self {
        Self
    }

    /// One integration step for a single body.
    pub fn integrate(body: &mut CelestialBody, speed_multiplier: f64) {
        body.orbital_angle = wrap_angle(body.orbital_angle + body.orbital_speed * speed_multiplier);
        body.spin_angle = wrap_angle(body.spin_angle + body.spin_speed * speed_multiplier);
    }

    /// Offset from the parent (or the origin for root bodies).
    pub fn local_offset(body: &CelestialBody) -> DVec3 {
        let (r, theta) = (body.orbital_radius, body.orbital_angle);
        match body.parent {
            None => DVec3::new(r * theta.cos(), 0.0, r * theta.sin()),
            Some(_) => tilted_offset(r, theta, body.tilt),
        }
    }

    /// Recompute every world position from current angles without advancing them.
    pub fn update_positions(world: &mut World) {
        for i in 0..world.len() {
            let id = world.ids()[i];

            let parent_pos = world
                .parent_of(id)
                .and_then(|p| world.get(p))
                .map(|p| p.position)
                .unwrap_or(DVec3::ZERO);

            if let Some(body) = world.get_mut(id) {
                body.position = parent_pos + Self::local_offset(body);
            }
        }
    }
}

impl System for OrbitSystem {
    fn tick(&mut self, world: &mut World, clock: &FrameClock) {
        for i in 0..world.len() {
            let id = world.ids()[i];
            if let Some(body) = world.get_mut(id) {
                Self::integrate(body, clock.speed_multiplier);
            }
        }
        Self::update_positions(world);
    }
}
