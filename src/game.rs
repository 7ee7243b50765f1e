//! World and schedule assembly.
//!
//! [`setup_world`] inserts every resource and spawns the stage entities
//! described by a [`GameConfig`]; [`build_schedule`] wires the per-frame
//! systems in order. Both the windowed and the headless front-ends in
//! `main.rs` use them, as do the integration tests.

use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::animation::{Animation, CurrentFrame, MAX_BPM};
use crate::components::chimney::Chimney;
use crate::components::mapposition::MapPosition;
use crate::components::present::MISS_SOUND;
use crate::components::rigidbody::RigidBody;
use crate::events::audio::AudioCmd;
use crate::events::chimney::observe_chimney_hit;
use crate::events::present::observe_drop_present;
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::gameconfig::{ChimneyParams, GameConfig};
use crate::resources::presentpool::PresentPool;
use crate::resources::score::DropScore;
use crate::resources::screensize::ScreenSize;
use crate::resources::spritetable::{SpriteData, SpriteSheet, SpriteTable};
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation_system;
use crate::systems::audio::{
    forward_audio_cmds, log_audio_messages, poll_audio_messages, update_bevy_audio_cmds,
    update_bevy_audio_messages,
};
use crate::systems::autodrop::autodrop_system;
use crate::systems::chimney::chimney_scroll_system;
use crate::systems::movement::movement_system;
use crate::systems::present::present_system;

/// Marker for the dancing sprite.
#[derive(Component, Debug, Clone, Copy)]
pub struct Dancer;

/// Load the dancer's sprite table, or build a flat stand-in when the asset
/// is missing so the stage still runs without art.
pub fn load_sprite_table(config: &GameConfig) -> SpriteTable {
    match SpriteTable::load(&config.sprite_table) {
        Ok(table) => table,
        Err(e) => {
            log::warn!("{}; using placeholder geometry", e);
            placeholder_sprite_table(&config.sheet, config.frames)
        }
    }
}

/// Uniform geometry for every sheet an animation of `frames` frames needs.
pub fn placeholder_sprite_table(sheet: &str, frames: usize) -> SpriteTable {
    let sheets = frames.div_ceil(crate::components::animation::FRAMES_PER_SPRITE).max(1);
    let mut table = SpriteTable::new();
    table.insert_sheets(
        sheet,
        sheets,
        SpriteData {
            width: 120.0,
            height: 180.0,
            offset_x: 300.0,
            offset_y: 120.0,
        },
    );
    table
}

/// Insert resources, observers and stage entities.
pub fn setup_world(world: &mut World, config: &GameConfig, table: SpriteTable) {
    world.insert_resource(config.clone());
    world.insert_resource(WorldTime::default());
    world.insert_resource(ScreenSize {
        w: config.stage_width as i32,
        h: config.stage_height as i32,
    });
    world.insert_resource(DropScore::default());
    world.insert_resource(PresentPool::new(config.pool_size, config.presents));
    if !world.contains_resource::<Messages<AudioCmd>>() {
        crate::resources::audio::setup_audio_queues(world);
    }

    world.add_observer(observe_drop_present);
    world.add_observer(observe_chimney_hit);
    world.add_observer(switch_debug_observer);
    world.flush();

    let mut animation = Animation::new(
        &SpriteSheet::new(config.sheet.clone(), config.frames),
        config.bpm,
        Arc::new(table),
    );
    animation.play();
    world.spawn((Dancer, animation, CurrentFrame::default()));

    spawn_chimneys(world, &config.chimneys, config.stage_width as f32);

    world
        .resource_mut::<Messages<AudioCmd>>()
        .write(AudioCmd::LoadFx {
            id: MISS_SOUND.to_string(),
            path: config.miss_fx.display().to_string(),
        });

    log::info!(
        "Stage ready: {} chimneys, {} pooled presents, dancing at {} bpm",
        config.chimneys.count,
        config.pool_size,
        config.bpm
    );
}

/// Spawn `count` chimneys spread evenly over the stage plus one chimney
/// width, all scrolling left.
pub fn spawn_chimneys(world: &mut World, params: &ChimneyParams, stage_width: f32) {
    if params.count == 0 {
        return;
    }
    let spacing = (stage_width + params.width) / params.count as f32;
    for i in 0..params.count {
        let x = i as f32 * spacing;
        world.spawn((
            MapPosition::new(x, params.top),
            RigidBody::with_velocity(Vector2 {
                x: -params.speed,
                y: 0.0,
            }),
            Chimney::new(params.width, params.height, params.rim),
        ));
    }
}

/// Toggle the dancer between playing and paused.
pub fn toggle_dancer(world: &mut World) {
    let mut query = world.query_filtered::<&mut Animation, With<Dancer>>();
    for mut animation in query.iter_mut(world) {
        if animation.is_paused() {
            animation.play();
        } else {
            animation.pause();
        }
    }
}

/// Change the dancer's tempo, keeping the current frame. The tempo is
/// clamped like [`Animation::frame_duration_for`] does; returns the value
/// applied.
pub fn set_tempo(world: &mut World, bpm: f64) -> f64 {
    let bpm = bpm.max(1.0).min(MAX_BPM);
    if let Some(mut config) = world.get_resource_mut::<GameConfig>() {
        config.bpm = bpm;
    }
    let mut query = world.query_filtered::<&mut Animation, With<Dancer>>();
    for mut animation in query.iter_mut(world) {
        animation.set_bpm(bpm);
    }
    log::info!("Dancing at {} bpm", bpm);
    bpm
}

/// Halt or resume the scrolling chimneys. Returns true when halted.
pub fn toggle_stage(world: &mut World) -> bool {
    let mut query = world.query_filtered::<&mut RigidBody, With<Chimney>>();
    let mut halted = false;
    for mut body in query.iter_mut(world) {
        if body.frozen {
            body.unfreeze();
        } else {
            body.freeze();
            halted = true;
        }
    }
    log::info!("Chimneys {}", if halted { "halted" } else { "scrolling" });
    halted
}

/// Per-frame systems in execution order.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        // audio systems must be together
        (
            update_bevy_audio_cmds,
            forward_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
            log_audio_messages,
        )
            .chain(),
    );
    update.add_systems(autodrop_system);
    update.add_systems(movement_system);
    update.add_systems(chimney_scroll_system.after(movement_system));
    update.add_systems(
        present_system
            .after(chimney_scroll_system)
            .after(autodrop_system)
            .before(update_bevy_audio_cmds),
    );
    update.add_systems(animation_system);
    update
}

/// Read a config file, falling back to defaults when it is missing.
pub fn load_config(path: &Path) -> GameConfig {
    let mut config = GameConfig::with_path(path);
    if let Err(e) = config.load_from_file() {
        log::info!("{}; using defaults", e);
    }
    config
}
