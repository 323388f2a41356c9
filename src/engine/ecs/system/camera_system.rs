use std::f64::consts::PI;

use glam::DVec3;

use crate::engine::camera::{CameraPose, CameraTransition};
use crate::engine::config::EngineConfig;
use crate::engine::ecs::command_queue::Move;
use crate::engine::ecs::system::{FrameClock, System};
use crate::engine::ecs::{BodyId, World};
use crate::engine::{EngineError, EngineResult};

/// Owns the camera pose.
///
/// Exactly one writer per tick, in priority order:
/// 1. an active transition,
/// 2. focus follow (`body + follow_offset`, looking at the body),
/// 3. free-fly movement, orbit drag and zoom queued since the last tick.
///
/// Movement, orbit and zoom requested while 1 or 2 own the pose are dropped.
#[derive(Debug)]
pub struct CameraSystem {
    pose: CameraPose,
    transition: Option<CameraTransition>,
    focus: Option<BodyId>,

    follow_offset: DVec3,
    transition_duration: f64,
    free_fly_step: f64,
    min_distance: f64,
    max_distance: f64,

    pending_moves: Vec<Move>,
    pending_orbit: (f64, f64),
    pending_zoom: f64,
}

/// Keeps the eye off the poles so the +Y up hint stays usable.
const MIN_POLAR_ANGLE: f64 = 1e-3;

impl CameraSystem {
    pub fn new(cfg: &EngineConfig) -> Self {
        Self {
            pose: CameraPose::new(cfg.initial_camera_position, DVec3::ZERO),
            transition: None,
            focus: None,
            follow_offset: cfg.follow_offset(),
            transition_duration: cfg.transition_duration_sec,
            free_fly_step: cfg.free_fly_step,
            min_distance: cfg.min_camera_distance,
            max_distance: cfg.max_camera_distance,
            pending_moves: Vec::new(),
            pending_orbit: (0.0, 0.0),
            pending_zoom: 1.0,
        }
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn focus(&self) -> Option<BodyId> {
        self.focus
    }

    pub fn transition(&self) -> Option<&CameraTransition> {
        self.transition.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Where the camera sits while following `id`.
    pub fn follow_pose(&self, world: &World, id: BodyId) -> Option<CameraPose> {
        let body = world.get(id)?;
        Some(CameraPose::new(body.position + self.follow_offset, body.position))
    }

    /// Start (or restart) an eased move toward `id`'s follow pose.
    ///
    /// The transition starts from the current pose, so a request mid-flight continues from
    /// wherever the camera was drawn last frame.
    pub fn focus_on(&mut self, world: &World, id: BodyId) -> EngineResult<()> {
        let target = self
            .follow_pose(world, id)
            .ok_or_else(|| EngineError::BodyNotFound(format!("{:?}", id)))?;

        self.transition = Some(CameraTransition::start(
            self.pose,
            target,
            self.transition_duration,
        ));
        self.focus = Some(id);
        Ok(())
    }

    /// Stop following. The camera stays where it is.
    pub fn release_focus(&mut self) {
        self.focus = None;
        self.transition = None;
    }

    pub fn queue_move(&mut self, dir: Move) {
        self.pending_moves.push(dir);
    }

    /// Swing the eye around the look-at point on the next free tick: `yaw` about world +Y,
    /// `pitch` toward the top view.
    pub fn queue_orbit(&mut self, yaw: f64, pitch: f64) {
        if yaw.is_finite() && pitch.is_finite() {
            self.pending_orbit.0 += yaw;
            self.pending_orbit.1 += pitch;
        }
    }

    /// Scale the eye-to-target distance by `factor` on the next free tick.
    pub fn queue_zoom(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.pending_zoom *= factor;
        }
    }

    fn apply_free_fly(&mut self) {
        let (forward, right, up) = self.pose.basis();
        let step = self.free_fly_step;

        for dir in self.pending_moves.drain(..) {
            let delta = match dir {
                Move::Forward => forward * step,
                Move::Backward => -forward * step,
                Move::Left => -right * step,
                Move::Right => right * step,
                Move::Up => up * step,
                Move::Down => -up * step,
            };
            self.pose.position += delta;
            self.pose.look_at += delta;
        }

        let (yaw, pitch) = self.pending_orbit;
        if yaw == 0.0 && pitch == 0.0 && self.pending_zoom == 1.0 {
            return;
        }

        let offset = self.pose.position - self.pose.look_at;
        let dir = orbit_direction(offset.try_normalize().unwrap_or(DVec3::Z), yaw, pitch);
        let distance = (offset.length() * self.pending_zoom)
            .clamp(self.min_distance, self.max_distance);
        self.pose.position = self.pose.look_at + dir * distance;
    }
}

/// Rotate unit `dir` by `yaw` about +Y and move it `pitch` toward +Y, with the polar angle
/// kept inside `[MIN_POLAR_ANGLE, PI - MIN_POLAR_ANGLE]`.
fn orbit_direction(dir: DVec3, yaw: f64, pitch: f64) -> DVec3 {
    if yaw == 0.0 && pitch == 0.0 {
        return dir;
    }
    let theta = dir.x.atan2(dir.z) - yaw;
    let phi = (dir.y.clamp(-1.0, 1.0).acos() - pitch)
        .clamp(MIN_POLAR_ANGLE, PI - MIN_POLAR_ANGLE);
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    DVec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
}

impl System for CameraSystem {
    fn tick(&mut self, world: &mut World, clock: &FrameClock) {
        let follow = self.focus.and_then(|id| self.follow_pose(world, id));

        if let Some(transition) = self.transition.as_mut() {
            if let Some(target) = follow {
                transition.retarget(target);
            }
            self.pose = transition.advance(clock.dt_sec);
            if !transition.active {
                self.transition = None;
            }
        } else if let Some(target) = follow {
            self.pose = target;
        } else {
            self.apply_free_fly();
        }

        self.pending_moves.clear();
        self.pending_orbit = (0.0, 0.0);
        self.pending_zoom = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ecs::system::OrbitSystem;
    use crate::engine::ecs::{BodyKind, CelestialBody};

    fn setup() -> (World, BodyId, BodyId, CameraSystem) {
        let mut world = World::new();
        let a = world
            .add_body(CelestialBody::new("A", BodyKind::Planet).with_orbit(30.0, 0.01))
            .unwrap();
        let b = world
            .add_body(
                CelestialBody::new("B", BodyKind::Planet)
                    .with_orbit(70.0, 0.004)
                    .with_angle(2.0),
            )
            .unwrap();
        OrbitSystem::update_positions(&mut world);
        (world, a, b, CameraSystem::new(&EngineConfig::default()))
    }

    fn tick(cam: &mut CameraSystem, world: &mut World, dt: f64) {
        cam.tick(world, &FrameClock::new(dt, 0.0));
    }

    #[test]
    fn focus_transition_starts_at_current_pose_and_ends_following() {
        let (mut world, a, _, mut cam) = setup();
        let start = cam.pose();

        cam.focus_on(&world, a).unwrap();
        assert_eq!(cam.transition().unwrap().start, start);

        tick(&mut cam, &mut world, 0.0);
        assert_eq!(cam.pose(), start);

        tick(&mut cam, &mut world, 2.0);
        assert!(!cam.is_transitioning());
        assert_eq!(cam.pose(), cam.follow_pose(&world, a).unwrap());
    }

    #[test]
    fn restart_mid_flight_continues_from_last_pose() {
        let (mut world, a, b, mut cam) = setup();
        cam.focus_on(&world, a).unwrap();
        tick(&mut cam, &mut world, 0.5);
        tick(&mut cam, &mut world, 0.4);
        let last = cam.pose();

        cam.focus_on(&world, b).unwrap();
        let t = cam.transition().unwrap();
        assert!((t.start.position - last.position).length() < 1e-9);
        assert!((t.start.look_at - last.look_at).length() < 1e-9);
        assert_eq!(t.elapsed, 0.0);
        assert_eq!(cam.focus(), Some(b));
    }

    #[test]
    fn transition_chases_moving_target() {
        let (mut world, a, _, mut cam) = setup();
        let mut orbit = OrbitSystem::new();
        cam.focus_on(&world, a).unwrap();

        for _ in 0..30 {
            orbit.tick(&mut world, &FrameClock::new(0.1, 1.0));
            tick(&mut cam, &mut world, 0.1);
        }
        // 3s > 2s duration: now following the body where it is now.
        assert!(!cam.is_transitioning());
        let body = world.get(a).unwrap().position;
        assert_eq!(cam.pose().look_at, body);
    }

    #[test]
    fn free_fly_moves_along_view_axes() {
        let (mut world, _, _, mut cam) = setup();
        let before = cam.pose();
        cam.queue_move(Move::Forward);
        tick(&mut cam, &mut world, 0.016);

        let after = cam.pose();
        let moved = after.position - before.position;
        assert!((moved.length() - 0.5).abs() < 1e-12);
        assert!((moved.normalize() - before.forward()).length() < 1e-12);
        assert!(((after.look_at - before.look_at) - moved).length() < 1e-9);
    }

    #[test]
    fn movement_is_ignored_while_following() {
        let (mut world, a, _, mut cam) = setup();
        cam.focus_on(&world, a).unwrap();
        tick(&mut cam, &mut world, 5.0);
        let following = cam.pose();

        cam.queue_move(Move::Left);
        cam.queue_zoom(0.5);
        tick(&mut cam, &mut world, 0.016);
        assert_eq!(cam.pose(), following);
    }

    #[test]
    fn orbit_drag_swings_eye_at_fixed_distance() {
        let (mut world, _, _, mut cam) = setup();
        let before = cam.pose();
        let distance = (before.position - before.look_at).length();

        cam.queue_orbit(0.8, 0.2);
        tick(&mut cam, &mut world, 0.016);
        let after = cam.pose();

        assert_eq!(after.look_at, before.look_at);
        assert!(((after.position - after.look_at).length() - distance).abs() < 1e-9);
        assert!((after.position - before.position).length() > 1.0);
        // Pitch toward the top view raises the eye.
        assert!(after.position.y > before.position.y);
    }

    #[test]
    fn orbit_pitch_stops_short_of_the_pole() {
        let (mut world, _, _, mut cam) = setup();
        cam.queue_orbit(0.0, 10.0);
        tick(&mut cam, &mut world, 0.016);

        let dir = (cam.pose().position - cam.pose().look_at).normalize();
        assert!((dir.y - MIN_POLAR_ANGLE.cos()).abs() < 1e-9);
        let (forward, right, _) = cam.pose().basis();
        assert!(forward.is_finite() && right.is_finite());
    }

    #[test]
    fn orbit_is_ignored_while_following() {
        let (mut world, a, _, mut cam) = setup();
        cam.focus_on(&world, a).unwrap();
        tick(&mut cam, &mut world, 5.0);
        let following = cam.pose();

        cam.queue_orbit(1.0, 0.5);
        tick(&mut cam, &mut world, 0.016);
        assert_eq!(cam.pose(), following);

        // Nothing left over once free again.
        cam.release_focus();
        tick(&mut cam, &mut world, 0.016);
        assert_eq!(cam.pose(), following);
    }

    #[test]
    fn zoom_is_clamped() {
        let (mut world, _, _, mut cam) = setup();
        cam.queue_zoom(1e-6);
        tick(&mut cam, &mut world, 0.016);
        let d = (cam.pose().position - cam.pose().look_at).length();
        assert!((d - 10.0).abs() < 1e-9);

        cam.queue_zoom(1e9);
        tick(&mut cam, &mut world, 0.016);
        let d = (cam.pose().position - cam.pose().look_at).length();
        assert!((d - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn release_keeps_pose() {
        let (mut world, a, _, mut cam) = setup();
        cam.focus_on(&world, a).unwrap();
        tick(&mut cam, &mut world, 0.7);
        let mid = cam.pose();

        cam.release_focus();
        tick(&mut cam, &mut world, 0.7);
        assert_eq!(cam.focus(), None);
        assert_eq!(cam.pose(), mid);
    }
}
