use std::f64::consts::TAU;

use glam::{DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

use crate::engine::ecs::BodyId;
use crate::engine::tilt::OrbitTilt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
    Ring,
}

impl BodyKind {
    pub fn name(self) -> &'static str {
        match self {
            BodyKind::Star => "star",
            BodyKind::Planet => "planet",
            BodyKind::Moon => "moon",
            BodyKind::Ring => "ring",
        }
    }
}

/// A body on a circular orbit around its parent (or the origin).
///
/// Angles are in radians and kept in `[0, 2π)`. Speeds are radians per frame at speed
/// multiplier 1.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub name: String,
    pub kind: BodyKind,
    pub parent: Option<BodyId>,

    /// Visual radius, for the renderer.
    pub radius: f64,
    /// 0xRRGGBB base color, for the renderer.
    pub color: u32,

    pub orbital_radius: f64,
    pub orbital_speed: f64,
    pub spin_speed: f64,
    pub orbital_angle: f64,
    pub spin_angle: f64,

    /// Tilt of the orbital plane relative to the parent's equator.
    pub tilt: OrbitTilt,
    /// Fixed tilt of the body's own axis (Saturn's rings).
    pub orientation_tilt: OrbitTilt,

    /// World position from the last tick.
    pub position: DVec3,
}

impl CelestialBody {
    pub fn new(name: impl Into<String>, kind: BodyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            radius: 1.0,
            color: 0xffffff,
            orbital_radius: 0.0,
            orbital_speed: 0.0,
            spin_speed: 0.0,
            orbital_angle: 0.0,
            spin_angle: 0.0,
            tilt: OrbitTilt::NONE,
            orientation_tilt: OrbitTilt::NONE,
            position: DVec3::ZERO,
        }
    }

    pub fn with_orbit(mut self, orbital_radius: f64, orbital_speed: f64) -> Self {
        self.orbital_radius = orbital_radius;
        self.orbital_speed = orbital_speed;
        self
    }

    pub fn with_spin(mut self, spin_speed: f64) -> Self {
        self.spin_speed = spin_speed;
        self
    }

    pub fn with_angle(mut self, orbital_angle: f64) -> Self {
        self.orbital_angle = wrap_angle(orbital_angle);
        self
    }

    pub fn with_tilt(mut self, tilt: OrbitTilt) -> Self {
        self.tilt = tilt;
        self
    }

    pub fn with_orientation_tilt(mut self, tilt: OrbitTilt) -> Self {
        self.orientation_tilt = tilt;
        self
    }

    pub fn with_appearance(mut self, radius: f64, color: u32) -> Self {
        self.radius = radius;
        self.color = color;
        self
    }

    /// Body rotation: fixed axis tilt about X and Z, spin about Y (Euler XYZ).
    pub fn orientation(&self) -> DQuat {
        DQuat::from_euler(
            EulerRot::XYZ,
            self.orientation_tilt.x,
            self.spin_angle,
            self.orientation_tilt.z,
        )
    }

    /// Bodies the tour and focus commands care about.
    pub fn is_focusable(&self) -> bool {
        self.kind != BodyKind::Ring
    }
}

/// Wrap into `[0, 2π)`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_angle_stays_in_range() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(TAU + 1.0) - 1.0).abs() < 1e-12);
        assert!((wrap_angle(-1.0) - (TAU - 1.0)).abs() < 1e-12);
        assert!(wrap_angle(-1e-18) < TAU);
    }

    #[test]
    fn untilted_orientation_is_spin_about_y() {
        let body = CelestialBody::new("Mars", BodyKind::Planet);
        for theta in [0.0, 0.3, 2.0, 5.9] {
            let spun = CelestialBody {
                spin_angle: theta,
                ..body.clone()
            };
            assert!(spun.orientation().abs_diff_eq(DQuat::from_rotation_y(theta), 1e-12));
        }
    }

    #[test]
    fn rings_keep_axis_tilt_while_spinning() {
        use std::f64::consts::{FRAC_PI_2, FRAC_PI_6};

        use crate::engine::backdrop::Backdrop;
        use crate::engine::ecs::World;
        use crate::engine::ecs::system::{FrameClock, OrbitSystem, System};
        use crate::engine::graphics::VisualWorld;

        let mut world = World::new();
        let saturn = world
            .add_body(CelestialBody::new("Saturn", BodyKind::Planet).with_orbit(100.0, 0.00294))
            .unwrap();
        let rings = world
            .add_child(
                saturn,
                CelestialBody::new("Saturn Rings", BodyKind::Ring)
                    .with_spin(0.001)
                    .with_orientation_tilt(OrbitTilt::new(FRAC_PI_2, FRAC_PI_6)),
            )
            .unwrap();
        OrbitSystem::update_positions(&mut world);
        let mut visuals = VisualWorld::new(&world, Backdrop::default());

        let mut orbit = OrbitSystem::new();
        let m = 0.5;
        for n in 1..=20 {
            orbit.tick(&mut world, &FrameClock::new(0.016, m));

            let body = world.get(rings).unwrap();
            let spin = 0.001 * m * n as f64;
            assert!((body.spin_angle - spin).abs() < 1e-12);

            let (x, y, z) = body.orientation().to_euler(EulerRot::XYZ);
            assert!((x - FRAC_PI_2).abs() < 1e-6, "x tilt drifted to {x}");
            assert!((y - spin).abs() < 1e-6, "spin {y} != {spin}");
            assert!((z - FRAC_PI_6).abs() < 1e-6, "z tilt drifted to {z}");
        }

        visuals.sync_bodies(&world);
        let inst = visuals.bodies.iter().find(|b| b.id == rings).unwrap();
        assert_eq!(inst.orientation, world.get(rings).unwrap().orientation());
        assert_eq!(inst.position, world.get(saturn).unwrap().position);
    }

    #[test]
    fn ring_is_not_focusable() {
        assert!(!CelestialBody::new("Rings", BodyKind::Ring).is_focusable());
        assert!(CelestialBody::new("Io", BodyKind::Moon).is_focusable());
    }
}
