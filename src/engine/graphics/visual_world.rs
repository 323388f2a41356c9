use glam::{DQuat, DVec3};

use crate::engine::backdrop::Backdrop;
use crate::engine::camera::CameraPose;
use crate::engine::ecs::{BodyId, BodyKind, World};
use crate::engine::graphics::orbit_path::OrbitPath;

/// Renderer-facing state of one body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyInstance {
    pub id: BodyId,
    pub name: String,
    pub kind: BodyKind,
    pub radius: f64,
    pub color: u32,
    pub position: DVec3,
    pub orientation: DQuat,
}

/// Tour progress as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct TourStatus {
    pub stop: usize,
    pub stops: usize,
    pub time_at_current: f64,
    pub dwell_duration: f64,
}

/// Renderer-friendly snapshot of the scene, refreshed in place every frame.
///
/// Body and orbit-path lists are built once from the `World`; `sync` only overwrites the
/// per-frame fields.
#[derive(Debug, Clone)]
pub struct VisualWorld {
    pub frame: u64,
    pub bodies: Vec<BodyInstance>,
    pub orbit_paths: Vec<OrbitPath>,
    pub show_orbits: bool,
    pub camera: CameraPose,
    pub focused: Option<String>,
    pub tour: Option<TourStatus>,
    pub backdrop: Backdrop,
}

impl VisualWorld {
    pub fn new(world: &World, backdrop: Backdrop) -> Self {
        let bodies = world
            .iter()
            .map(|(id, b)| BodyInstance {
                id,
                name: b.name.clone(),
                kind: b.kind,
                radius: b.radius,
                color: b.color,
                position: b.position,
                orientation: b.orientation(),
            })
            .collect();

        let mut visuals = Self {
            frame: 0,
            bodies,
            orbit_paths: OrbitPath::all(world),
            show_orbits: false,
            camera: CameraPose::default(),
            focused: None,
            tour: None,
            backdrop,
        };
        visuals.sync_bodies(world);
        visuals
    }

    /// Copy positions and orientations out of `world` and move moon orbits with their planets.
    pub fn sync_bodies(&mut self, world: &World) {
        for inst in self.bodies.iter_mut() {
            if let Some(body) = world.get(inst.id) {
                inst.position = body.position;
                inst.orientation = body.orientation();
            }
        }
        for path in self.orbit_paths.iter_mut() {
            path.recenter(world);
        }
    }
}
