//! Camera pose and eased transitions between poses.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Where the camera is and what it looks at. Orientation is derived by the renderer
/// (look-at with +Y up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: DVec3,
    pub look_at: DVec3,
}

impl CameraPose {
    pub fn new(position: DVec3, look_at: DVec3) -> Self {
        Self { position, look_at }
    }

    pub fn lerp(&self, target: &CameraPose, t: f64) -> CameraPose {
        CameraPose {
            position: self.position.lerp(target.position, t),
            look_at: self.look_at.lerp(target.look_at, t),
        }
    }

    /// Unit view direction. Falls back to -Z when position and look-at coincide.
    pub fn forward(&self) -> DVec3 {
        (self.look_at - self.position).try_normalize().unwrap_or(DVec3::NEG_Z)
    }

    /// Camera-local right and up axes (world +Y as the up hint).
    pub fn basis(&self) -> (DVec3, DVec3, DVec3) {
        let forward = self.forward();
        let right = forward.cross(DVec3::Y).try_normalize().unwrap_or(DVec3::X);
        let up = right.cross(forward);
        (forward, right, up)
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(DVec3::new(0.0, 80.0, 200.0), DVec3::ZERO)
    }
}

/// Cubic ease-in-out on `[0, 1]`.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// One eased move between two poses.
///
/// Lifecycle: created active by [`CameraTransition::start`], advanced by [`advance`], inactive
/// once `elapsed >= duration`. Inactive transitions keep their last pose.
///
/// [`advance`]: CameraTransition::advance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransition {
    pub start: CameraPose,
    pub target: CameraPose,
    pub elapsed: f64,
    pub duration: f64,
    pub active: bool,
}

impl CameraTransition {
    pub fn start(from: CameraPose, to: CameraPose, duration: f64) -> Self {
        Self {
            start: from,
            target: to,
            elapsed: 0.0,
            duration,
            active: true,
        }
    }

    /// `elapsed / duration` clamped to `[0, 1]`. A non-positive duration is already done.
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Pose at the current progress.
    pub fn pose(&self) -> CameraPose {
        let p = self.progress();
        if p >= 1.0 {
            return self.target;
        }
        self.start.lerp(&self.target, ease_in_out_cubic(p))
    }

    /// Move the end point without touching progress (used to chase a moving body).
    pub fn retarget(&mut self, target: CameraPose) {
        self.target = target;
    }

    /// Add `dt_sec` and return the resulting pose. Deactivates at progress 1.
    pub fn advance(&mut self, dt_sec: f64) -> CameraPose {
        if self.active {
            self.elapsed += dt_sec;
            if self.progress() >= 1.0 {
                self.active = false;
            }
        }
        self.pose()
    }
}
