use crate::engine::ecs::system::{FrameClock, System};
use crate::engine::ecs::{BodyId, World};
use crate::engine::{EngineError, EngineResult};

/// Progress through the current tour.
#[derive(Debug, Clone, PartialEq)]
pub struct TourState {
    pub current_index: usize,
    pub time_at_current: f64,
    pub dwell_duration: f64,
}

/// Round-robin focus timer.
///
/// The tour never writes the camera. An automatic advance leaves a focus request that
/// `SystemWorld` hands to the camera after this system ticks; manual `start`/`next`/`prev`
/// return the new stop to the caller instead.
#[derive(Debug)]
pub struct TourSystem {
    stops: Vec<BodyId>,
    state: Option<TourState>,
    dwell_duration: f64,
    pending_focus: Option<BodyId>,
}

impl TourSystem {
    pub fn new(dwell_duration: f64) -> Self {
        Self {
            stops: Vec::new(),
            state: None,
            dwell_duration,
            pending_focus: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&TourState> {
        self.state.as_ref()
    }

    pub fn stops(&self) -> &[BodyId] {
        &self.stops
    }

    pub fn current_stop(&self) -> Option<BodyId> {
        let state = self.state.as_ref()?;
        self.stops.get(state.current_index).copied()
    }

    /// Begin at the first of `stops`. Restarts from the beginning if already running.
    pub fn start(&mut self, stops: Vec<BodyId>) -> EngineResult<BodyId> {
        let Some(&first) = stops.first() else {
            return Err(EngineError::EmptyTour);
        };
        self.stops = stops;
        self.state = Some(TourState {
            current_index: 0,
            time_at_current: 0.0,
            dwell_duration: self.dwell_duration,
        });
        self.pending_focus = None;
        Ok(first)
    }

    /// Returns whether a tour was running.
    pub fn stop(&mut self) -> bool {
        self.pending_focus = None;
        self.stops.clear();
        self.state.take().is_some()
    }

    pub fn next(&mut self) -> EngineResult<BodyId> {
        self.step(1)
    }

    pub fn prev(&mut self) -> EngineResult<BodyId> {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> EngineResult<BodyId> {
        let n = self.stops.len();
        let state = self.state.as_mut().ok_or(EngineError::TourNotRunning)?;
        if n == 0 {
            return Err(EngineError::EmptyTour);
        }

        let n = n as isize;
        state.current_index = (state.current_index as isize + delta).rem_euclid(n) as usize;
        state.time_at_current = 0.0;
        self.pending_focus = None;
        Ok(self.stops[state.current_index])
    }

    /// Focus request left by the last automatic advance, if any.
    pub fn take_focus_request(&mut self) -> Option<BodyId> {
        self.pending_focus.take()
    }
}

impl System for TourSystem {
    fn tick(&mut self, _world: &mut World, clock: &FrameClock) {
        let n = self.stops.len();
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if n == 0 {
            return;
        }

        state.time_at_current += clock.dt_sec;
        if state.time_at_current >= state.dwell_duration {
            state.time_at_current = 0.0;
            state.current_index = (state.current_index + 1) % n;
            let next = self.stops[state.current_index];
            log::info!("Tour advancing to stop {} of {}", state.current_index + 1, n);
            self.pending_focus = Some(next);
        }
    }
}
