//! Procedural scenery: the starfield and the asteroid belt.
//!
//! Neither takes part in focus or tour; they are particle sets handed to the renderer.

use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;

use crate::engine::config::EngineConfig;
use crate::engine::ecs::body::wrap_angle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: DVec3,
    pub color: [f32; 3],
    pub size: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    /// `count` stars uniformly inside a cube of edge `extent` centred on the origin. A negative
    /// extent counts as its magnitude.
    ///
    /// Color bands: 30% blue-white, 40% yellow-white, 30% red-orange. Sizes: 90% small
    /// (0.5..1.5), 10% large (1.5..3.5).
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize, extent: f64) -> Self {
        let half = extent.abs() * 0.5;
        let stars = (0..count)
            .map(|_| {
                let position = DVec3::new(
                    rng.gen_range(-half..=half),
                    rng.gen_range(-half..=half),
                    rng.gen_range(-half..=half),
                );

                let temperature: f32 = rng.gen_range(0.0..1.0);
                let color: [f32; 3] = if temperature < 0.3 {
                    [rng.gen_range(0.8..1.0), rng.gen_range(0.9..1.0), 1.0]
                } else if temperature < 0.7 {
                    [1.0, rng.gen_range(0.9..1.0), rng.gen_range(0.7..0.9)]
                } else {
                    [1.0, rng.gen_range(0.4..0.7), rng.gen_range(0.2..0.4)]
                };

                let size: f32 = if rng.gen_bool(0.9) {
                    rng.gen_range(0.5..1.5)
                } else {
                    rng.gen_range(1.5..3.5)
                };

                Star {
                    position,
                    color,
                    size,
                }
            })
            .collect();
        Self { stars }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    pub orbital_radius: f64,
    pub orbital_angle: f64,
    /// Radians per frame at speed multiplier 1.
    pub orbital_speed: f64,
    /// Vertical offset from the ecliptic.
    pub height: f64,
    pub size: f32,
}

impl Asteroid {
    pub fn position(&self) -> DVec3 {
        DVec3::new(
            self.orbital_radius * self.orbital_angle.cos(),
            self.height,
            self.orbital_radius * self.orbital_angle.sin(),
        )
    }
}

/// Ring of small rocks between `inner` and `outer` radius.
///
/// Inner rocks move faster than outer ones, scaled to sit between Mars and Jupiter speeds.
#[derive(Debug, Clone, Default)]
pub struct AsteroidBelt {
    pub asteroids: Vec<Asteroid>,
}

impl AsteroidBelt {
    const SPEED_AT_UNIT_RADIUS: f64 = 0.24;

    pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize, inner: f64, outer: f64) -> Self {
        let (inner, outer) = if inner <= outer { (inner, outer) } else { (outer, inner) };
        let asteroids = (0..count)
            .map(|_| {
                let orbital_radius = if outer > inner {
                    rng.gen_range(inner..outer)
                } else {
                    inner
                };
                Asteroid {
                    orbital_radius,
                    orbital_angle: rng.gen_range(0.0..TAU),
                    orbital_speed: Self::SPEED_AT_UNIT_RADIUS / orbital_radius.max(1.0),
                    height: rng.gen_range(-1.0..=1.0),
                    size: rng.gen_range(0.05..0.3),
                }
            })
            .collect();
        Self { asteroids }
    }

    /// Same frame-count rule as the planets.
    pub fn advance(&mut self, speed_multiplier: f64) {
        for a in self.asteroids.iter_mut() {
            a.orbital_angle = wrap_angle(a.orbital_angle + a.orbital_speed * speed_multiplier);
        }
    }
}

/// All procedural scenery for one scene.
#[derive(Debug, Clone, Default)]
pub struct Backdrop {
    pub starfield: Starfield,
    pub belt: AsteroidBelt,
}

impl Backdrop {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, cfg: &EngineConfig) -> Self {
        let backdrop = Self {
            starfield: Starfield::generate(rng, cfg.star_count, cfg.starfield_extent),
            belt: AsteroidBelt::generate(
                rng,
                cfg.asteroid_count,
                cfg.asteroid_inner_radius,
                cfg.asteroid_outer_radius,
            ),
        };
        log::debug!(
            "Generated {} stars and {} asteroids",
            backdrop.starfield.stars.len(),
            backdrop.belt.asteroids.len()
        );
        backdrop
    }
}
