//! Orbit polylines for the renderer.

use std::f64::consts::TAU;

use glam::DVec3;

use crate::engine::ecs::{BodyId, BodyKind, CelestialBody, World};
use crate::engine::tilt::{OrbitTilt, tilted_offset};

pub const PLANET_SEGMENTS: usize = 100;
pub const MOON_SEGMENTS: usize = 50;

/// Closed circle of `segments + 1` points (first == last) in a plane tilted by `tilt`,
/// relative to the orbit's centre.
pub fn circle_points(radius: f64, segments: usize, tilt: OrbitTilt) -> Vec<DVec3> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let angle = if i == segments {
                0.0
            } else {
                TAU * i as f64 / segments as f64
            };
            tilted_offset(radius, angle, tilt)
        })
        .collect()
}

/// An orbit line drawn around `parent` (or the origin).
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPath {
    pub body: BodyId,
    pub parent: Option<BodyId>,
    /// World-space centre; follows the parent every frame.
    pub center: DVec3,
    pub points: Vec<DVec3>,
}

impl OrbitPath {
    /// Path for `body`, or `None` if it has no orbit (the sun, rings).
    pub fn for_body(id: BodyId, body: &CelestialBody) -> Option<Self> {
        if body.orbital_radius <= 0.0 {
            return None;
        }
        let segments = match body.kind {
            BodyKind::Moon => MOON_SEGMENTS,
            _ => PLANET_SEGMENTS,
        };
        let tilt = if body.parent.is_some() { body.tilt } else { OrbitTilt::NONE };
        Some(Self {
            body: id,
            parent: body.parent,
            center: DVec3::ZERO,
            points: circle_points(body.orbital_radius, segments, tilt),
        })
    }

    pub fn all(world: &World) -> Vec<Self> {
        world
            .iter()
            .filter_map(|(id, body)| Self::for_body(id, body))
            .collect()
    }

    pub fn recenter(&mut self, world: &World) {
        self.center = self
            .parent
            .and_then(|p| world.get(p))
            .map(|p| p.position)
            .unwrap_or(DVec3::ZERO);
    }
}
