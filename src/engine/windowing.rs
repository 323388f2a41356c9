use std::sync::Arc;
use std::time::Instant;

use crate::engine::ecs::CommandQueue;
use crate::engine::graphics::Renderer;
use crate::engine::preferences::{PreferenceStore, PreferenceSync};
use crate::engine::repl::{Repl, ReplBackend};
use crate::engine::user_input::UserInput;
use crate::engine::{EngineError, EngineResult, Universe};

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

/// Longest frame step fed to the camera and tour, so a stalled window does not skip a
/// whole transition.
const MAX_FRAME_DT_SEC: f64 = 0.25;

/// winit wrapper (ApplicationHandler style) that owns the frame loop.
pub struct Windowing;

impl Windowing {
    pub fn run_app<R, S>(
        universe: Universe,
        renderer: R,
        prefs: PreferenceSync<S>,
        repl: Option<Repl>,
    ) -> EngineResult<()>
    where
        R: Renderer,
        S: PreferenceStore,
    {
        let event_loop = EventLoop::new().map_err(|e| EngineError::Windowing(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = App {
            window: None,
            universe,
            renderer,
            prefs,
            repl,
            repl_backend: ReplBackend::new(),
            input: UserInput::new(),
            commands: CommandQueue::new(),
            last_frame: None,
            error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| EngineError::Windowing(e.to_string()))?;

        app.save_preferences();
        match app.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct App<R: Renderer, S: PreferenceStore> {
    window: Option<Arc<Window>>,
    universe: Universe,
    renderer: R,
    prefs: PreferenceSync<S>,
    repl: Option<Repl>,
    repl_backend: ReplBackend,
    input: UserInput,
    commands: CommandQueue,
    last_frame: Option<Instant>,
    /// First fatal error; reported after the event loop exits.
    error: Option<EngineError>,
}

impl<R: Renderer, S: PreferenceStore> App<R, S> {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: EngineError) {
        log::error!("{}", error);
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    fn save_preferences(&mut self) {
        if let Err(e) = self.prefs.save_if_changed(&self.universe.preferences()) {
            log::warn!("Could not save preferences: {}", e);
        }
    }

    fn frame(&mut self) -> EngineResult<()> {
        let now = Instant::now();
        let dt = self
            .last_frame
            .replace(now)
            .map(|prev| (now - prev).as_secs_f64().min(MAX_FRAME_DT_SEC))
            .unwrap_or(0.0);

        if let Some(repl) = &self.repl {
            let lines = repl.try_recv_all();
            if !lines.is_empty() {
                self.repl_backend.exec_all(&self.universe, lines, &mut self.commands);
            }
        }
        self.commands.extend(self.input.commands_for_frame());
        self.input.begin_frame();
        if !self.commands.is_empty() {
            log::trace!("Applying {} queued commands", self.commands.len());
            self.commands.flush(&mut self.universe);
        }

        let visuals = self.universe.tick(dt);
        self.renderer.draw_frame(visuals)?;

        self.save_preferences();
        Ok(())
    }
}

impl<R: Renderer, S: PreferenceStore> ApplicationHandler for App<R, S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs: WindowAttributes = Window::default_attributes()
            .with_title("orrery")
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 800.0));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, EngineError::Windowing(e.to_string()));
                return;
            }
        };

        let size = window.inner_size();
        self.renderer.resize(size.width, size.height);

        window.request_redraw();
        self.window = Some(window);
        self.last_frame = Some(Instant::now());
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.input.handle_window_event(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                self.renderer.resize(size.width, size.height);
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.frame() {
                    self.fail(event_loop, e);
                    return;
                }

                if let Some(w) = &self.window {
                    w.pre_present_notify();
                    w.request_redraw();
                }
            }

            _ => {}
        }
    }
}
