//! Drift: headless space flight sandbox.
//!
//! Loads the config and a scene, then flies a scripted pilot through it for
//! a fixed number of frames on a simulated 60 Hz clock and logs what
//! happened. The script is replayed through the configured keybindings.
//!
//! Run with: `cargo run -p drift-game -- --frames 1200`

mod script;

use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use drift_app::{FrameLoop, SimWorld, WorldClocks};
use drift_config::{CliArgs, Config, ConfigError};
use drift_entity::{DrawLog, ModelRegistry};
use drift_input::{ControlMap, InputReplay};
use drift_physics::{DebugLineBuffer, ManualClock};
use drift_scene::Scene;
use tracing::{error, info, warn};

/// Microseconds the simulated clock advances per frame.
const FRAME_MICROS: u64 = 16_667;

/// Models the headless renderer pretends to have loaded.
const MODELS: [&str; 10] = [
    "skybox",
    "wing_x",
    "laser_bullet",
    "saucer",
    "station",
    "sun",
    "Earth",
    "Mercury",
    "Venus",
    "Mars",
];

const DEMO_SCENE: &str = include_str!("../scenes/demo.ron");

fn load_config(args: &CliArgs) -> Result<(Config, Option<PathBuf>), ConfigError> {
    let dir = match &args.config {
        Some(dir) => dir.clone(),
        None => match drift_config::default_config_dir() {
            Ok(dir) => dir,
            Err(ConfigError::NoConfigDir) => return Ok((Config::default(), None)),
            Err(err) => return Err(err),
        },
    };
    Ok((Config::load_or_create(&dir)?, Some(dir)))
}

fn load_scene(args: &CliArgs) -> Result<Scene, drift_scene::SceneError> {
    match &args.scene {
        Some(path) => Scene::load(path),
        None => {
            info!("no scene given, using the built-in demo");
            Scene::from_ron_str(DEMO_SCENE)
        }
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let (mut config, config_dir) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("Failed to load config: {err}");
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    drift_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    info!("Drift sandbox");
    if let Some(dir) = &config_dir {
        info!(config = %dir.display(), "configuration loaded");
    }

    let controls = match ControlMap::from_config(&config.input) {
        Ok(map) => map,
        Err(err) => {
            error!(%err, "invalid keybindings");
            return ExitCode::FAILURE;
        }
    };
    let mut pilot = InputReplay::new(controls);

    let scene = match load_scene(&args) {
        Ok(scene) => scene,
        Err(err) => {
            error!(%err, "cannot load scene");
            return ExitCode::FAILURE;
        }
    };

    let clock = ManualClock::new();
    let debug_lines = Rc::new(RefCell::new(DebugLineBuffer::default()));
    let mut world = SimWorld::new(
        &config,
        WorldClocks {
            physics: Box::new(clock.clone()),
            camera: Box::new(clock.clone()),
        },
        Box::new(Rc::clone(&debug_lines)),
        Box::new(ModelRegistry::with_models(MODELS)),
    );

    let report = world.load_scene(scene);
    if report.loaded == 0 {
        error!("scene contains nothing usable");
        return ExitCode::FAILURE;
    }
    if world.player().is_none() {
        warn!("scene has no player, the camera stays free");
    }

    let mut frames = FrameLoop::new(Box::new(clock.clone()));
    let mut sink = DrawLog::default();
    let mut draw_calls = 0usize;
    let mut debug_line_count = 0usize;

    for frame in 0..args.frames {
        clock.advance_micros(FRAME_MICROS);
        sink.clear();
        debug_lines.borrow_mut().clear();

        let input = pilot.frame(&script::input_for(frame));
        let step = frames.tick(&mut world, &input, &mut sink);

        draw_calls += sink.calls.len();
        debug_line_count += debug_lines.borrow().lines.len();
        if step.spawned > 0 {
            tracing::debug!(frame, spawned = step.spawned, live = step.live, "entities spawned");
        }
    }

    let player = world.player().map(|ship| ship.transform().position);
    info!(
        frames = frames.frame_count(),
        substeps = frames.substep_count(),
        sim_seconds = frames.total_sim_time(),
        slow_frames = frames.slow_frames(),
        live = world.entities().len(),
        draw_calls,
        debug_lines = debug_line_count,
        "flight finished"
    );
    if let Some(position) = player {
        info!(
            "Player at ({:.1}, {:.1}, {:.1}), camera {:?}",
            position.x,
            position.y,
            position.z,
            world.camera().mode()
        );
    }

    let leaked = world.cleanup();
    if leaked > 0 {
        error!(leaked, "physics bodies leaked");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
