//! fxplayer headless driver.
//!
//! Plays one effect from a definitions file without a window: every frame
//! advances [`WorldTime`], runs the update and both draw passes, and logs the
//! recorded sprite and light commands. Useful for checking timing, loop
//! counts and light placement of new effects.
//!
//! # Main Loop
//!
//! 1. Load `config.ini`, the definitions file and an optional texture manifest
//! 2. Build the ECS world and start the audio thread
//! 3. Spawn the requested effect and place it
//! 4. Tick until the effect disposes itself or `duration_ms` elapses
//! 5. Dispose leftovers and join the audio thread
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- fireball --textures assets/textures.json
//! ```

use std::path::PathBuf;
use std::time::Duration;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{debug, info};

use fxplayer::components::animationinstance::{AnimationInstance, AnimationOptions};
use fxplayer::components::mapposition::MapLocation;
use fxplayer::resources::animationstore::AnimationStore;
use fxplayer::resources::audio::{
    AudioBridge, SilentSoundFactory, SoundFactory, setup_audio, shutdown_audio,
};
use fxplayer::resources::playbackconfig::PlaybackConfig;
use fxplayer::resources::registry::LiveAnimations;
use fxplayer::resources::renderqueue::{DrawCommand, RenderQueue};
use fxplayer::resources::texturestore::TextureStore;
use fxplayer::resources::worldtime::{Clock, SystemClock, WorldTime};
use fxplayer::systems::animation::update_live_animations;
use fxplayer::systems::render::{clear_render_queue, render_lower_pass, render_upper_pass};
use fxplayer::systems::time::update_world_time;

/// Headless player for two-layer sprite effects
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Name of the animation to play.
    animation: String,

    /// Animation definitions (JSON object keyed by name).
    #[arg(long, value_name = "PATH", default_value = "assets/animations.json")]
    definitions: PathBuf,

    /// Texture manifest (JSON object of name -> {width, height}).
    #[arg(long, value_name = "PATH")]
    textures: Option<PathBuf>,

    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Loop until the simulation duration runs out.
    #[arg(long)]
    loop_forever: bool,

    /// Rotate the effect to its facing.
    #[arg(long)]
    auto_rotate: bool,

    /// Facing, 0..=7 (up, down, left, right, up-left, up-right, down-left, down-right).
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    dir: i32,

    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    z: i32,

    /// World position in pixels.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    x: f32,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    y: f32,

    /// Tile position and map for the effect sound.
    #[arg(long, default_value_t = 0)]
    tile_x: i32,
    #[arg(long, default_value_t = 0)]
    tile_y: i32,
    #[arg(long, default_value_t = 0)]
    map: i32,

    /// Override `[simulation] tick_ms`.
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Override `[simulation] duration_ms`.
    #[arg(long)]
    duration_ms: Option<u64>,

    /// Pace frames against the wall clock instead of stepping instantly.
    #[arg(long)]
    realtime: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = PlaybackConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        debug!("{}; using defaults", e);
    }
    if let Some(tick) = cli.tick_ms {
        config.tick_ms = tick.max(1);
    }
    if let Some(duration) = cli.duration_ms {
        config.duration_ms = duration;
    }
    if config.time_scale <= 0.0 {
        return Err(format!("time_scale must be positive, got {}", config.time_scale));
    }

    let store = AnimationStore::load_from_file(&cli.definitions)?;
    let definition = store
        .get(&cli.animation)
        .ok_or_else(|| format!("Unknown animation '{}'", cli.animation))?;
    let textures = match &cli.textures {
        Some(path) => TextureStore::load_from_file(path)?,
        None => TextureStore::new(),
    };

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
    world.insert_resource(LiveAnimations::new());
    world.insert_resource(textures);
    world.insert_resource(RenderQueue::new());
    if config.audio_enabled {
        setup_audio(&mut world);
    }

    let options = AnimationOptions::new(cli.loop_forever)
        .with_auto_rotate(cli.auto_rotate)
        .with_z(cli.z)
        .with_sound_distance(config.sound_distance);
    let animation = {
        let live = world.resource::<LiveAnimations>();
        let time = world.resource::<WorldTime>();
        let sounds: &dyn SoundFactory = match world.get_resource::<AudioBridge>() {
            Some(bridge) => &bridge.sounds,
            None => &SilentSoundFactory,
        };
        AnimationInstance::spawn(Some(definition), options, live, time, sounds)
    }
    .ok_or_else(|| format!("Failed to start '{}'", cli.animation))?;
    animation.lock().set_position(
        cli.x,
        cli.y,
        MapLocation::new(cli.tile_x, cli.tile_y, cli.map),
        cli.dir,
        cli.z,
    );
    world.insert_resource(config.clone());

    let mut update = Schedule::default();
    update.add_systems(
        (
            clear_render_queue,
            update_live_animations,
            render_lower_pass,
            render_upper_pass,
        )
            .chain(),
    );
    update
        .initialize(&mut world)
        .map_err(|e| format!("Failed to initialize schedule: {}", e))?;

    // --------------- Main loop ---------------
    let clock = SystemClock::new();
    let mut last = clock.now_ms();
    let (mut sprites, mut lights) = (0usize, 0usize);
    while !world.resource::<LiveAnimations>().is_empty()
        && world.resource::<WorldTime>().elapsed_ms < config.duration_ms
    {
        let dt = if cli.realtime {
            std::thread::sleep(Duration::from_millis(config.tick_ms));
            let now = clock.now_ms();
            let dt = now - last;
            last = now;
            dt
        } else {
            config.tick_ms
        };
        update_world_time(&mut world, dt);
        update.run(&mut world);

        let now = world.resource::<WorldTime>().elapsed_ms;
        for command in world.resource_mut::<RenderQueue>().drain() {
            match command {
                DrawCommand::Sprite(s) => {
                    sprites += 1;
                    debug!(
                        "[{}ms] sprite '{}' src=({}, {}) dest=({}, {}) {}x{} rot={}",
                        now, s.texture, s.src.x, s.src.y, s.dest.x, s.dest.y, s.dest.width,
                        s.dest.height, s.rotation_degrees
                    );
                }
                DrawCommand::Light(l) => {
                    lights += 1;
                    debug!(
                        "[{}ms] light at ({}, {}) size={} intensity={} expand={}",
                        now, l.x, l.y, l.size, l.intensity, l.expand
                    );
                }
            }
        }
    }

    let time = *world.resource::<WorldTime>();
    let finished = animation.lock().is_disposed();
    let leftover = world.resource::<LiveAnimations>().dispose_all();
    info!(
        "Played '{}' for {}ms over {} frames: {} sprite draws, {} lights, {}",
        cli.animation,
        time.elapsed_ms,
        time.frame_count,
        sprites,
        lights,
        if finished {
            "finished".to_string()
        } else {
            format!("stopped with {} still live", leftover)
        }
    );

    if let Some(stats) = shutdown_audio(&mut world) {
        info!(
            "Audio: {} started, {} stopped, {} moved, {} leaked",
            stats.started, stats.stopped, stats.moved, stats.leaked
        );
    }
    Ok(())
}
