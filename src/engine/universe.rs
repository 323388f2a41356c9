use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::engine::backdrop::Backdrop;
use crate::engine::camera::CameraPose;
use crate::engine::config::EngineConfig;
use crate::engine::ecs::command_queue::{Command, CommandTarget, Move};
use crate::engine::ecs::system::OrbitSystem;
use crate::engine::ecs::{BodyId, SceneDescription, SystemWorld, World};
use crate::engine::graphics::{TourStatus, VisualWorld};
use crate::engine::preferences::{self, Preferences};
use crate::engine::{EngineError, EngineResult};

/// The scene, its systems and the renderer-facing snapshot, driven one `tick` per frame.
///
/// Every user-facing operation goes through here by body name; `BodyId`s stay internal.
pub struct Universe {
    pub world: World,
    pub systems: SystemWorld,
    pub visuals: VisualWorld,
    speed_multiplier: f64,
    show_orbits: bool,
    cfg: EngineConfig,
}

impl Universe {
    pub fn new(mut world: World, backdrop: Backdrop, cfg: EngineConfig) -> Self {
        OrbitSystem::update_positions(&mut world);
        let systems = SystemWorld::new(&cfg);
        let visuals = VisualWorld::new(&world, backdrop);

        let mut universe = Self {
            world,
            systems,
            visuals,
            speed_multiplier: 1.0,
            show_orbits: false,
            cfg,
        };
        universe.sync_visuals();
        universe
    }

    /// Build the world and backdrop from `scene`, seeding the RNG from `cfg.seed` if set.
    pub fn from_scene(scene: &SceneDescription, cfg: EngineConfig) -> EngineResult<Self> {
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let world = scene.build(&cfg, &mut rng)?;
        let backdrop = Backdrop::generate(&mut rng, &cfg);
        Ok(Self::new(world, backdrop, cfg))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Advance one frame and return the refreshed snapshot.
    pub fn tick(&mut self, dt_sec: f64) -> &VisualWorld {
        self.visuals.backdrop.belt.advance(self.speed_multiplier);
        self.systems.tick(&mut self.world, dt_sec, self.speed_multiplier);
        self.visuals.frame += 1;
        self.sync_visuals();
        &self.visuals
    }

    fn sync_visuals(&mut self) {
        self.visuals.sync_bodies(&self.world);
        self.visuals.camera = self.systems.camera.pose();
        self.visuals.show_orbits = self.show_orbits;
        self.visuals.focused = self.focused_body().map(str::to_owned);
        self.visuals.tour = self.systems.tour.state().map(|s| TourStatus {
            stop: s.current_index,
            stops: self.systems.tour.stops().len(),
            time_at_current: s.time_at_current,
            dwell_duration: s.dwell_duration,
        });
    }

    // ---- queries ----

    pub fn camera_pose(&self) -> CameraPose {
        self.systems.camera.pose()
    }

    pub fn focused_body(&self) -> Option<&str> {
        self.systems.camera.focus().and_then(|id| self.world.name_of(id))
    }

    pub fn is_transitioning(&self) -> bool {
        self.systems.camera.is_transitioning()
    }

    pub fn tour_running(&self) -> bool {
        self.systems.tour.is_running()
    }

    pub fn tour_stop(&self) -> Option<&str> {
        self.systems.tour.current_stop().and_then(|id| self.world.name_of(id))
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn speed_level(&self) -> u8 {
        preferences::multiplier_to_speed_level(self.speed_multiplier)
    }

    pub fn show_orbits(&self) -> bool {
        self.show_orbits
    }

    // ---- commands ----

    /// Transition to and then follow `name` (exact, else case-insensitive). Stops a running tour.
    pub fn focus_on(&mut self, name: &str) -> EngineResult<()> {
        let id = self.focusable(name)?;
        self.systems.focus_on(&self.world, id)?;
        log::info!("Focusing on {}", self.world.name_of(id).unwrap_or(name));
        Ok(())
    }

    fn focusable(&self, name: &str) -> EngineResult<BodyId> {
        let id = self.world.resolve(name)?;
        match self.world.get(id) {
            Some(body) if body.is_focusable() => Ok(id),
            _ => Err(EngineError::BodyNotFound(name.to_owned())),
        }
    }

    pub fn release_focus(&mut self) {
        if self.systems.camera.focus().is_some() {
            log::info!("Focus released");
        }
        self.systems.release_focus();
    }

    pub fn start_tour(&mut self) -> EngineResult<()> {
        let first = self.systems.start_tour(&self.world)?;
        log::info!(
            "Tour started with {} stops at {}",
            self.systems.tour.stops().len(),
            self.world.name_of(first).unwrap_or("?")
        );
        Ok(())
    }

    /// Returns whether a tour was running.
    pub fn stop_tour(&mut self) -> bool {
        let was_running = self.systems.stop_tour();
        if was_running {
            log::info!("Tour stopped");
        }
        was_running
    }

    pub fn tour_next(&mut self) -> EngineResult<()> {
        let id = self.systems.tour_next(&self.world)?;
        log::info!("Tour skipped ahead to {}", self.world.name_of(id).unwrap_or("?"));
        Ok(())
    }

    pub fn tour_prev(&mut self) -> EngineResult<()> {
        let id = self.systems.tour_prev(&self.world)?;
        log::info!("Tour stepped back to {}", self.world.name_of(id).unwrap_or("?"));
        Ok(())
    }

    /// Levels above 9 are treated as 9.
    pub fn set_speed_level(&mut self, level: u8) {
        self.set_speed_multiplier(preferences::speed_level_to_multiplier(level));
    }

    /// Clamped to `[0, 1]`.
    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        let multiplier = multiplier.clamp(0.0, 1.0);
        if multiplier != self.speed_multiplier {
            log::info!("Speed multiplier {:.3}", multiplier);
        }
        self.speed_multiplier = multiplier;
    }

    pub fn toggle_orbits(&mut self) {
        self.set_show_orbits(!self.show_orbits);
    }

    pub fn set_show_orbits(&mut self, show: bool) {
        self.show_orbits = show;
        self.visuals.show_orbits = show;
    }

    /// `notches > 0` moves toward the look-at point. Ignored while focused or transitioning.
    pub fn zoom(&mut self, notches: f64) {
        let step = self.cfg.zoom_step;
        let factor = if notches >= 0.0 {
            1.0 / (1.0 + notches * step)
        } else {
            1.0 - notches * step
        };
        self.systems.camera.queue_zoom(factor);
    }

    /// Free-fly one step. Ignored while focused or transitioning.
    pub fn move_camera(&mut self, dir: Move) {
        self.systems.camera.queue_move(dir);
    }

    /// Swing the eye around its look-at point. Ignored while focused or transitioning.
    pub fn orbit_camera(&mut self, yaw: f64, pitch: f64) {
        self.systems.camera.queue_orbit(yaw, pitch);
    }

    // ---- preferences ----

    pub fn preferences(&self) -> Preferences {
        Preferences {
            speed_level: self.speed_level(),
            show_orbits: self.show_orbits,
            focused_body: self.focused_body().map(str::to_owned),
        }
    }

    /// Apply saved preferences. A focus target that no longer exists is skipped.
    pub fn apply_preferences(&mut self, prefs: &Preferences) {
        self.set_speed_level(prefs.speed_level);
        self.set_show_orbits(prefs.show_orbits);
        match &prefs.focused_body {
            Some(name) => {
                if let Err(e) = self.focus_on(name) {
                    log::warn!("Ignoring saved focus: {}", e);
                }
            }
            None => self.release_focus(),
        }
        self.sync_visuals();
    }
}

impl CommandTarget for Universe {
    fn apply(&mut self, command: &Command) -> EngineResult<()> {
        match command {
            Command::FocusOn(name) => self.focus_on(name)?,
            Command::ReleaseFocus => self.release_focus(),
            Command::StartTour => self.start_tour()?,
            Command::StopTour => {
                if !self.stop_tour() {
                    return Err(EngineError::TourNotRunning);
                }
            }
            Command::ToggleTour => {
                if !self.stop_tour() {
                    self.start_tour()?;
                }
            }
            Command::TourNext => self.tour_next()?,
            Command::TourPrev => self.tour_prev()?,
            Command::SetSpeedLevel(level) => self.set_speed_level(*level),
            Command::ToggleOrbits => self.toggle_orbits(),
            Command::SetShowOrbits(show) => self.set_show_orbits(*show),
            Command::Zoom(notches) => self.zoom(*notches),
            Command::Move(dir) => self.move_camera(*dir),
            Command::Orbit { yaw, pitch } => self.orbit_camera(*yaw, *pitch),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ecs::{BodyKind, CelestialBody};

    fn cfg() -> EngineConfig {
        EngineConfig {
            seed: Some(11),
            star_count: 10,
            asteroid_count: 10,
            ..EngineConfig::default()
        }
    }

    fn solar() -> Universe {
        Universe::from_scene(&SceneDescription::solar_system(), cfg()).unwrap()
    }

    fn run(u: &mut Universe, frames: usize, dt: f64) {
        for _ in 0..frames {
            u.tick(dt);
        }
    }

    #[test]
    fn unknown_focus_changes_nothing() {
        let mut u = solar();
        u.focus_on("Earth").unwrap();
        run(&mut u, 5, 0.1);
        let pose = u.camera_pose();

        let err = u.focus_on("Vulcan").unwrap_err();
        assert!(matches!(err, EngineError::BodyNotFound(ref n) if n == "Vulcan"));
        assert_eq!(u.focused_body(), Some("Earth"));
        assert_eq!(u.camera_pose(), pose);
    }

    #[test]
    fn rings_are_not_focus_targets() {
        let mut u = solar();
        assert!(u.focus_on("Saturn Rings").is_err());
        assert_eq!(u.focused_body(), None);
    }

    #[test]
    fn focus_is_case_insensitive() {
        let mut u = solar();
        u.focus_on("jupiter").unwrap();
        assert_eq!(u.focused_body(), Some("Jupiter"));
    }

    #[test]
    fn focus_settles_into_follow() {
        let mut u = solar();
        u.focus_on("Mars").unwrap();
        run(&mut u, 30, 0.1);
        assert!(!u.is_transitioning());

        let mars = u.world.get(u.world.find("Mars").unwrap()).unwrap().position;
        let pose = u.camera_pose();
        assert!((pose.position - (mars + u.config().follow_offset())).length() < 1e-9);
        assert!((pose.look_at - mars).length() < 1e-9);
    }

    #[test]
    fn speed_level_zero_freezes_the_scene() {
        let mut u = solar();
        u.set_speed_level(0);
        let before: Vec<_> = u.world.iter().map(|(_, b)| b.position).collect();
        run(&mut u, 50, 0.016);
        let after: Vec<_> = u.world.iter().map(|(_, b)| b.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn speed_multiplier_is_clamped() {
        let mut u = solar();
        u.set_speed_multiplier(3.0);
        assert_eq!(u.speed_multiplier(), 1.0);
        u.set_speed_multiplier(-1.0);
        assert_eq!(u.speed_multiplier(), 0.0);
        u.set_speed_level(3);
        assert_eq!(u.speed_level(), 3);
    }

    #[test]
    fn tour_visits_planets_in_order() {
        let mut u = solar();
        u.start_tour().unwrap();
        assert_eq!(u.tour_stop(), Some("Mercury"));
        assert_eq!(u.focused_body(), Some("Mercury"));

        run(&mut u, 20, 0.5);
        assert_eq!(u.tour_stop(), Some("Venus"));

        u.tour_prev().unwrap();
        u.tour_prev().unwrap();
        assert_eq!(u.tour_stop(), Some("Neptune"));
    }

    #[test]
    fn tour_requires_planets() {
        let mut world = World::new();
        world.add_body(CelestialBody::new("Sun", BodyKind::Star)).unwrap();
        let mut u = Universe::new(world, Backdrop::default(), cfg());
        assert!(matches!(u.start_tour(), Err(EngineError::EmptyTour)));
        assert!(!u.tour_running());
        assert!(matches!(u.tour_next(), Err(EngineError::TourNotRunning)));
    }

    #[test]
    fn release_stops_tour_and_keeps_pose() {
        let mut u = solar();
        u.start_tour().unwrap();
        run(&mut u, 5, 0.1);
        let pose = u.camera_pose();

        u.release_focus();
        assert!(!u.tour_running());
        assert_eq!(u.focused_body(), None);
        assert_eq!(u.camera_pose(), pose);
    }

    #[test]
    fn zoom_applies_only_in_free_fly() {
        let mut u = solar();
        let distance = |u: &Universe| {
            let p = u.camera_pose();
            (p.position - p.look_at).length()
        };
        let before = distance(&u);
        u.zoom(1.0);
        u.tick(0.016);
        assert!(distance(&u) < before);

        u.zoom(-100.0);
        u.tick(0.016);
        assert!((distance(&u) - u.config().max_camera_distance).abs() < 1e-9);

        u.focus_on("Earth").unwrap();
        run(&mut u, 40, 0.1);
        let followed = distance(&u);
        u.zoom(5.0);
        u.tick(0.016);
        assert!((distance(&u) - followed).abs() < 1e-9);
    }

    #[test]
    fn orbit_command_only_moves_a_free_camera() {
        let mut u = solar();
        let distance = |p: CameraPose| (p.position - p.look_at).length();
        let before = u.camera_pose();

        u.apply(&Command::Orbit { yaw: 0.5, pitch: 0.0 }).unwrap();
        u.tick(0.016);
        let after = u.camera_pose();
        assert!((distance(after) - distance(before)).abs() < 1e-9);
        assert!((after.position - before.position).length() > 1.0);
        assert!((after.position.y - before.position.y).abs() < 1e-9);

        u.focus_on("Venus").unwrap();
        run(&mut u, 40, 0.1);
        let followed = u.camera_pose();
        u.apply(&Command::Orbit { yaw: 0.5, pitch: 0.3 }).unwrap();
        u.tick(0.016);
        let venus = u.world.get(u.world.find("Venus").unwrap()).unwrap().position;
        let expected = venus + u.config().follow_offset();
        assert!((u.camera_pose().position - expected).length() < 1e-9);
        assert!((distance(u.camera_pose()) - distance(followed)).abs() < 1e-9);
    }

    #[test]
    fn preferences_round_trip() {
        let mut u = solar();
        u.set_speed_level(4);
        u.toggle_orbits();
        u.focus_on("Neptune").unwrap();
        let prefs = u.preferences();
        assert_eq!(
            prefs,
            Preferences {
                speed_level: 4,
                show_orbits: true,
                focused_body: Some("Neptune".into()),
            }
        );

        let mut fresh = solar();
        fresh.apply_preferences(&prefs);
        assert_eq!(fresh.preferences(), prefs);
        assert!(fresh.visuals.show_orbits);
        assert_eq!(fresh.visuals.focused.as_deref(), Some("Neptune"));
    }

    #[test]
    fn stale_saved_focus_is_ignored() {
        let mut u = solar();
        u.apply_preferences(&Preferences {
            speed_level: 2,
            show_orbits: false,
            focused_body: Some("Pluto".into()),
        });
        assert_eq!(u.focused_body(), None);
        assert_eq!(u.speed_level(), 2);
    }

    #[test]
    fn commands_drive_the_universe() {
        let mut u = solar();
        u.apply(&Command::ToggleTour).unwrap();
        assert!(u.tour_running());
        u.apply(&Command::TourNext).unwrap();
        assert_eq!(u.tour_stop(), Some("Venus"));
        u.apply(&Command::ToggleTour).unwrap();
        assert!(!u.tour_running());
        assert!(matches!(u.apply(&Command::StopTour), Err(EngineError::TourNotRunning)));

        u.apply(&Command::SetSpeedLevel(0)).unwrap();
        assert_eq!(u.speed_multiplier(), 0.0);
        u.apply(&Command::ToggleOrbits).unwrap();
        assert!(u.show_orbits());
    }

    #[test]
    fn snapshot_tracks_frames_and_tour() {
        let mut u = solar();
        let body_count = u.world.len();
        u.start_tour().unwrap();
        let v = u.tick(0.5);
        assert_eq!(v.frame, 1);
        let tour = v.tour.clone().unwrap();
        assert_eq!(tour.stop, 0);
        assert_eq!(tour.stops, 8);
        assert!((tour.time_at_current - 0.5).abs() < 1e-12);
        assert_eq!(v.bodies.len(), body_count);
    }
}
