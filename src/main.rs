//! Stagecraft main entry point.
//!
//! Runs the sample scene from [`stagecraft::demo`]:
//!
//! - headless by default: a fixed number of frames with a fixed delta, each
//!   drawn into a recording surface, with an optional JSON dump of the final
//!   actor state;
//! - in a raylib window with `--windowed` (feature `raylib`).
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 300 --dump-json
//! cargo run --release --features raylib -- --windowed
//! ```

use std::path::PathBuf;

use clap::Parser;

use stagecraft::demo::build_demo;
use stagecraft::engine::Engine;
use stagecraft::render::recording::RecordingSurface;
use stagecraft::resources::engineconfig::EngineConfig;
use stagecraft::resources::input::FrameInput;

/// Stagecraft 2D actor engine
#[derive(Parser)]
#[command(version, about = "Runs the stagecraft sample scene")]
struct Cli {
    /// INI configuration file (default: ./config.ini when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of frames for a headless run.
    #[arg(long)]
    frames: Option<u32>,

    /// Frame delta in milliseconds for a headless run.
    #[arg(long)]
    delta: Option<f32>,

    /// Start with the debug overlay on.
    #[arg(long)]
    debug: bool,

    /// Print the final actor state as JSON.
    #[arg(long)]
    dump_json: bool,

    /// Open a window instead of running headless.
    #[cfg(feature = "raylib")]
    #[arg(long)]
    windowed: bool,
}

fn load_config(cli: &Cli) -> EngineConfig {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::with_path(path),
        None => EngineConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        if cli.config.is_some() {
            log::warn!("{e}; using defaults");
        } else {
            log::debug!("{e}; using defaults");
        }
    }
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }
    if let Some(delta) = cli.delta {
        config.delta_ms = delta;
    }
    if cli.debug {
        config.debug_draw = true;
    }
    config
}

fn run_headless(engine: &mut Engine, frames: u32, delta: f32) {
    let mut surface = RecordingSurface::new();
    let mut primitives = 0;
    for _ in 0..frames {
        engine.update(delta, FrameInput::new());
        surface.clear();
        engine.draw(&mut surface);
        primitives += surface.primitive_count();
    }
    let time = engine.time();
    log::info!(
        "Simulated {} frames ({:.0} ms), {} primitives drawn, {} actors in the scene",
        time.frame_count,
        time.elapsed,
        primitives,
        engine.snapshot().len()
    );
}

#[cfg(feature = "raylib")]
fn run_windowed(engine: &mut Engine) {
    use stagecraft::render::raylib_surface::RaylibSurface;
    use stagecraft::systems::input::poll_raylib_input;

    let (width, height) = engine.config().window_size();
    let fps = engine.config().target_fps;
    let (mut rl, thread) = raylib::init()
        .size(width as i32, height as i32)
        .title("stagecraft")
        .build();
    rl.set_target_fps(fps);

    let mut input = FrameInput::new();
    while !rl.window_should_close() {
        if poll_raylib_input(&rl, &mut input) {
            engine.toggle_debug();
        }
        let delta = rl.get_frame_time() * 1000.0;
        engine.update(delta, input.clone());
        input.clear_samples();

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(raylib::prelude::Color::BLACK);
        let mut surface = RaylibSurface::new(&mut d);
        engine.draw(&mut surface);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli);
    let (frames, delta) = (config.frames, config.delta_ms);

    let mut engine = Engine::new(config);
    build_demo(&mut engine);

    #[cfg(feature = "raylib")]
    if cli.windowed {
        run_windowed(&mut engine);
        return;
    }

    run_headless(&mut engine, frames, delta);

    if cli.dump_json {
        match serde_json::to_string_pretty(&engine.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("Failed to serialize snapshot: {e}");
                std::process::exit(1);
            }
        }
    }
}
