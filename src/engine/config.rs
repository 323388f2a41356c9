//! Engine tuning knobs.
//!
//! Every field has a default, so a config file only needs to name what it overrides.

use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::engine::EngineResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds a focus transition takes.
    pub transition_duration_sec: f64,
    /// Seconds the tour stays on one body before moving on.
    pub tour_dwell_sec: f64,
    /// Camera sits at `body + (d, d/2, d)` while following.
    pub follow_distance: f64,
    /// Free-fly translation per frame while a movement key is held.
    pub free_fly_step: f64,
    /// Fractional zoom per wheel notch.
    pub zoom_step: f64,
    pub min_camera_distance: f64,
    pub max_camera_distance: f64,
    pub initial_camera_position: DVec3,

    pub moon_tilt_min_deg: f64,
    pub moon_tilt_max_deg: f64,

    pub star_count: usize,
    /// Edge length of the cube the starfield fills.
    pub starfield_extent: f64,
    pub asteroid_count: usize,
    pub asteroid_inner_radius: f64,
    pub asteroid_outer_radius: f64,

    /// Fixed seed for reproducible scenes. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            transition_duration_sec: 2.0,
            tour_dwell_sec: 10.0,
            follow_distance: 8.0,
            free_fly_step: 0.5,
            zoom_step: 0.1,
            min_camera_distance: 10.0,
            max_camera_distance: 2000.0,
            initial_camera_position: DVec3::new(0.0, 80.0, 200.0),
            moon_tilt_min_deg: 10.0,
            moon_tilt_max_deg: 30.0,
            star_count: 10_000,
            starfield_extent: 3000.0,
            asteroid_count: 1500,
            asteroid_inner_radius: 45.0,
            asteroid_outer_radius: 62.0,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let cfg = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(cfg)
    }

    /// Offset from a followed body to the camera.
    pub fn follow_offset(&self) -> DVec3 {
        let d = self.follow_distance;
        DVec3::new(d, d * 0.5, d)
    }
}
