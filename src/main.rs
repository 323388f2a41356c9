mod engine;
mod utils;

use engine::cli::{CLI, CliCommand};
use engine::ecs::{SceneCodec, SceneDescription};
use engine::graphics::LogRenderer;
use engine::preferences::{JsonFileStore, PreferenceSync};
use engine::repl::Repl;
use engine::{AnimationLoop, EngineConfig, EngineResult, Universe, Windowing};

fn main() {
    utils::logger::init();

    let cli = CLI::parse();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: CLI) -> EngineResult<()> {
    let cfg = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let scene = match &cli.command {
        CliCommand::Save { filename } => {
            SceneCodec::encode(&SceneDescription::solar_system(), filename)?;
            log::info!("Saved stock scene to {}", filename);
            return Ok(());
        }
        CliCommand::Load { filename } => SceneCodec::decode(filename)?,
        CliCommand::Run | CliCommand::Simulate { .. } => SceneDescription::solar_system(),
    };

    let mut universe = Universe::from_scene(&scene, cfg)?;

    let store = match &cli.prefs {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::default(),
    };
    let mut prefs = PreferenceSync::new(store);
    match prefs.load() {
        Ok(Some(saved)) => universe.apply_preferences(&saved),
        Ok(None) => {}
        Err(e) => log::warn!("Ignoring unreadable preferences: {}", e),
    }

    match cli.command {
        CliCommand::Simulate { frames } => {
            let mut renderer = LogRenderer::new();
            AnimationLoop::new(&mut universe, &mut renderer).run_frames(frames)?;
            log_final_state(&universe);
            Ok(())
        }
        _ => Windowing::run_app(universe, LogRenderer::new(), prefs, Some(Repl::new())),
    }
}

fn log_final_state(universe: &Universe) {
    for body in &universe.visuals.bodies {
        log::info!(
            "{:<14} ({:>8.2}, {:>6.2}, {:>8.2})",
            body.name,
            body.position.x,
            body.position.y,
            body.position.z
        );
    }
    let pose = universe.camera_pose();
    log::info!(
        "camera at {:?} looking at {:?}, focus {}",
        pose.position,
        pose.look_at,
        universe.focused_body().unwrap_or("-")
    );
    if universe.tour_running() {
        log::info!("tour at {}", universe.tour_stop().unwrap_or("-"));
    }
}
