//! Scene description: the seed data a `World` is built from, and its JSON codec.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_6, TAU};
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::config::EngineConfig;
use crate::engine::ecs::{BodyKind, CelestialBody, World};
use crate::engine::tilt::OrbitTilt;
use crate::engine::{EngineError, EngineResult};

/// One body as it appears in a scene file.
///
/// `initial_angle` and `tilt` are optional: missing values are randomized at build time
/// (angle uniformly in `[0, 2π)`, moon tilt within the configured band).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescription {
    pub name: String,
    pub kind: BodyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub radius: f64,
    pub color: u32,
    #[serde(default)]
    pub orbital_radius: f64,
    #[serde(default)]
    pub orbital_speed: f64,
    #[serde(default)]
    pub spin_speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilt: Option<OrbitTilt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation_tilt: Option<OrbitTilt>,
}

impl BodyDescription {
    fn new(name: &str, kind: BodyKind, radius: f64, color: u32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            parent: None,
            radius,
            color,
            orbital_radius: 0.0,
            orbital_speed: 0.0,
            spin_speed: 0.0,
            initial_angle: None,
            tilt: None,
            orientation_tilt: None,
        }
    }

    fn planet(name: &str, radius: f64, color: u32, distance: f64, orbital: f64, spin: f64) -> Self {
        Self {
            orbital_radius: distance,
            orbital_speed: orbital,
            spin_speed: spin,
            ..Self::new(name, BodyKind::Planet, radius, color)
        }
    }

    fn moon(
        name: &str,
        parent: &str,
        radius: f64,
        color: u32,
        distance: f64,
        orbital: f64,
        spin: f64,
    ) -> Self {
        Self {
            parent: Some(parent.to_string()),
            orbital_radius: distance,
            orbital_speed: orbital,
            spin_speed: spin,
            ..Self::new(name, BodyKind::Moon, radius, color)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub bodies: Vec<BodyDescription>,
}

impl SceneDescription {
    /// The stock solar system: sun, eight planets, Saturn's rings and six moons.
    ///
    /// Speeds are radians per frame at full speed.
    pub fn solar_system() -> Self {
        let sun = BodyDescription {
            spin_speed: 0.0035,
            ..BodyDescription::new("Sun", BodyKind::Star, 5.0, 0xffaa00)
        };

        let planets = [
            BodyDescription::planet("Mercury", 0.4, 0x8c6239, 15.0, 0.0098, 0.0049),
            BodyDescription::planet("Venus", 0.95, 0xffc649, 20.0, 0.00858, 0.001225),
            BodyDescription::planet("Earth", 1.0, 0x6b93d6, 30.0, 0.00735, 0.00245),
            BodyDescription::planet("Mars", 0.53, 0xcd5c5c, 40.0, 0.006125, 0.00245),
            BodyDescription::planet("Jupiter", 3.0, 0xd8ca9d, 70.0, 0.003675, 0.006125),
            BodyDescription::planet("Saturn", 2.5, 0xfad5a5, 100.0, 0.00294, 0.0056),
            BodyDescription::planet("Uranus", 1.6, 0x4fd0e7, 130.0, 0.00196, 0.003675),
            BodyDescription::planet("Neptune", 1.55, 0x4b70dd, 160.0, 0.00147, 0.00343),
        ];

        // Rings ride on Saturn with a fixed axis tilt and a slow spin.
        let rings = BodyDescription {
            parent: Some("Saturn".to_string()),
            spin_speed: 0.001,
            orientation_tilt: Some(OrbitTilt::new(FRAC_PI_2, FRAC_PI_6)),
            ..BodyDescription::new("Saturn Rings", BodyKind::Ring, 5.5, 0xddddaa)
        };

        let moons = [
            BodyDescription::moon("Moon", "Earth", 0.27, 0xcccccc, 4.0, 0.035, 0.035),
            BodyDescription::moon("Io", "Jupiter", 0.18, 0xffff99, 6.0, 0.056, 0.056),
            BodyDescription::moon("Europa", "Jupiter", 0.16, 0xaaccff, 8.0, 0.042, 0.042),
            BodyDescription::moon("Ganymede", "Jupiter", 0.26, 0x887744, 10.0, 0.035, 0.035),
            BodyDescription::moon("Callisto", "Jupiter", 0.24, 0x444444, 13.0, 0.028, 0.028),
            BodyDescription::moon("Titan", "Saturn", 0.26, 0xddaa77, 8.0, 0.042, 0.042),
        ];

        let mut bodies = vec![sun];
        bodies.extend(planets);
        bodies.push(rings);
        bodies.extend(moons);
        Self { bodies }
    }

    /// Build a `World`, filling unspecified angles and tilts from `rng`.
    ///
    /// Root bodies orbit the origin. Bodies must appear after their parent.
    pub fn build<R: Rng + ?Sized>(&self, cfg: &EngineConfig, rng: &mut R) -> EngineResult<World> {
        let mut world = World::new();

        for desc in &self.bodies {
            let parent = match &desc.parent {
                Some(parent) => Some(world.find(parent).ok_or_else(|| {
                    EngineError::UnknownParent {
                        body: desc.name.clone(),
                        parent: parent.clone(),
                    }
                })?),
                None => None,
            };

            let angle = match desc.initial_angle {
                Some(angle) => angle,
                None if desc.orbital_radius > 0.0 => rng.gen_range(0.0..TAU),
                None => 0.0,
            };

            let tilt = match desc.tilt {
                Some(tilt) => tilt,
                None if desc.kind == BodyKind::Moon => {
                    OrbitTilt::random_banded(rng, cfg.moon_tilt_min_deg, cfg.moon_tilt_max_deg)
                }
                None => OrbitTilt::NONE,
            };

            let mut body = CelestialBody::new(desc.name.clone(), desc.kind)
                .with_appearance(desc.radius, desc.color)
                .with_orbit(desc.orbital_radius, desc.orbital_speed)
                .with_spin(desc.spin_speed)
                .with_angle(angle)
                .with_tilt(tilt)
                .with_orientation_tilt(desc.orientation_tilt.unwrap_or(OrbitTilt::NONE));
            body.parent = parent;

            world.add_body(body)?;
        }

        log::info!("Built scene with {} bodies", world.len());
        Ok(world)
    }
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self::solar_system()
    }
}

/// Codec for reading and writing scene descriptions as JSON files.
pub struct SceneCodec;

impl SceneCodec {
    pub fn to_json(scene: &SceneDescription) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(scene)?)
    }

    pub fn from_json(json: &str) -> EngineResult<SceneDescription> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn encode(scene: &SceneDescription, output_file: impl AsRef<Path>) -> EngineResult<()> {
        let output_file = output_file.as_ref();
        std::fs::write(output_file, Self::to_json(scene)?)?;
        log::info!(
            "Wrote scene with {} bodies to {}",
            scene.bodies.len(),
            output_file.display()
        );
        Ok(())
    }

    pub fn decode(input_file: impl AsRef<Path>) -> EngineResult<SceneDescription> {
        let json = std::fs::read_to_string(input_file.as_ref())?;
        Self::from_json(&json)
    }
}
