//! Santa scenes entry point.
//!
//! A small Christmas stage written in Rust using:
//! - **raylib** for windowing, graphics, and audio
//! - **bevy_ecs** for entity-component-system architecture
//!
//! A sprite dancer boogies to the configured tempo while chimneys scroll past
//! underneath. Click to drop a present; land it in a chimney to score.
//! SPACE pauses the dancer, UP/DOWN change the tempo, P halts the chimneys
//! and F11 shows hitboxes.
//!
//! # Main Loop
//!
//! 1. Read `config.ini` (or the file given with `--config`)
//! 2. Build the ECS world with [`game::setup_world`]
//! 3. Each frame: read input, advance time, run the schedule, then turn the
//!    world into draw commands and hand them to a draw target
//! 4. Shut the audio thread down on exit
//!
//! `--headless` runs the same schedule for a fixed number of frames without
//! opening a window or an audio device, with presents dropped automatically.
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! cargo run --release -- --headless --frames 600 --seed 7
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use clap::Parser;
use raylib::prelude::{Color, KeyboardKey, MouseButton, RaylibDraw, RaylibHandle, RaylibThread};

use santascenes::components::animation::FRAMES_PER_SPRITE;
use santascenes::events::present::DropPresentEvent;
use santascenes::events::switchdebug::SwitchDebugEvent;
use santascenes::game;
use santascenes::resources::audio::{setup_audio, shutdown_audio};
use santascenes::resources::autodrop::AutoDrop;
use santascenes::resources::debugmode::DebugMode;
use santascenes::resources::gameconfig::GameConfig;
use santascenes::resources::score::DropScore;
use santascenes::resources::spritetable::SpriteTable;
use santascenes::systems::render::{
    CHIMNEY_TEXTURE, DrawTarget, PRESENT_TEXTURE, RaylibTarget, RecordingTarget, TextureStore,
    build_draw_list,
};
use santascenes::systems::time::update_world_time;

/// Tempo change per UP/DOWN key press.
const TEMPO_STEP: f64 = 10.0;

/// Santa scenes: a dancing sprite and a present drop game.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path of the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Run without a window or audio device.
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Seed for automatic present drops.
    #[arg(long, default_value_t = 0x5A17A)]
    seed: u64,

    /// Seconds between automatic drops. Windowed runs only drop
    /// automatically when this is given.
    #[arg(long, value_name = "SECONDS")]
    drop_interval: Option<f32>,

    /// Start with hitbox overlays on.
    #[arg(long)]
    debug: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = game::load_config(&cli.config);
    let table = game::load_sprite_table(&config);

    if cli.headless {
        run_headless(&cli, &config, table);
    } else {
        run_windowed(&cli, &config, table);
    }
}

fn run_headless(cli: &Cli, config: &GameConfig, table: SpriteTable) {
    log::info!("Running {} frames headless", cli.frames);
    let mut world = World::new();
    game::setup_world(&mut world, config, table);
    world.insert_resource(AutoDrop::new(cli.drop_interval.unwrap_or(0.75), cli.seed));
    if cli.debug {
        world.insert_resource(DebugMode);
    }

    let mut update = game::build_schedule();
    let dt = 1.0 / config.target_fps.max(1) as f32;
    let mut target = RecordingTarget::default();
    for _ in 0..cli.frames {
        update_world_time(&mut world, dt);
        update.run(&mut world);
        world.clear_trackers();

        target.commands.clear();
        let cmds = build_draw_list(&mut world);
        target.draw_all(&cmds);
    }

    log::debug!("Last frame drew {} commands", target.commands.len());
    let score = world.resource::<DropScore>();
    log::info!(
        "Delivered {} presents: {} hits ({} on the rim), {} misses",
        score.delivered(),
        score.hits,
        score.edge_hits,
        score.misses
    );
}

fn run_windowed(cli: &Cli, config: &GameConfig, table: SpriteTable) {
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .title("Santa Scenes");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // Disable ESC to exit
    rl.set_exit_key(None);

    let textures = load_textures(&mut rl, &thread, config);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    // Audio must go before the game setup!!
    setup_audio(&mut world);
    game::setup_world(&mut world, config, table);
    if let Some(interval) = cli.drop_interval {
        world.insert_resource(AutoDrop::new(interval, cli.seed));
    }
    if cli.debug {
        world.insert_resource(DebugMode);
    }

    let mut update = game::build_schedule();

    // --------------- Main loop ---------------
    while !rl.window_should_close() {
        let scale = (rl.get_screen_width() as f32 / config.stage_width.max(1) as f32)
            .min(rl.get_screen_height() as f32 / config.stage_height.max(1) as f32);

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let x = rl.get_mouse_x() as f32 / scale;
            world.trigger(DropPresentEvent { x });
        }
        if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            game::toggle_dancer(&mut world);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_UP) || rl.is_key_pressed(KeyboardKey::KEY_DOWN) {
            let step = if rl.is_key_pressed(KeyboardKey::KEY_UP) {
                TEMPO_STEP
            } else {
                -TEMPO_STEP
            };
            let bpm = world.resource::<GameConfig>().bpm;
            game::set_tempo(&mut world, bpm + step);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_P) {
            game::toggle_stage(&mut world);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_F11) {
            world.trigger(SwitchDebugEvent {});
        }
        world.flush();

        let dt = rl.get_frame_time();
        update_world_time(&mut world, dt);
        update.run(&mut world);
        world.clear_trackers(); // Clear changed components for next frame

        let cmds = build_draw_list(&mut world);
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        let mut target = RaylibTarget {
            d: &mut d,
            textures: &textures,
            scale,
        };
        target.draw_all(&cmds);
    }

    shutdown_audio(&mut world);
}

/// Load every texture the stage draws. Missing files are logged and drawn
/// as flat rectangles.
fn load_textures(rl: &mut RaylibHandle, thread: &RaylibThread, config: &GameConfig) -> TextureStore {
    let mut textures = TextureStore::new();
    let sheet_dir = config
        .sprite_table
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let sheets = config.frames.div_ceil(FRAMES_PER_SPRITE).max(1);

    let mut wanted: Vec<(String, PathBuf)> = (0..sheets)
        .map(|i| {
            let key = SpriteTable::key(&config.sheet, i);
            let path = sheet_dir.join(format!("{}.png", key));
            (key, path)
        })
        .collect();
    wanted.push((
        PRESENT_TEXTURE.to_string(),
        PathBuf::from("./assets/present.png"),
    ));
    wanted.push((
        CHIMNEY_TEXTURE.to_string(),
        PathBuf::from("./assets/chimney.png"),
    ));

    for (key, path) in wanted {
        if let Err(e) = textures.load(rl, thread, &key, &path.display().to_string()) {
            log::warn!("{}", e);
        }
    }
    textures
}
