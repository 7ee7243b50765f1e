//! Stage tick integration tests for presents, chimneys, autoplay and animation.

use std::sync::Arc;

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use raylib::prelude::Vector2;

use santascenes::components::animation::{Animation, CurrentFrame};
use santascenes::components::chimney::Chimney;
use santascenes::components::mapposition::MapPosition;
use santascenes::components::present::{MISS_SOUND, PresentParams};
use santascenes::components::rigidbody::RigidBody;
use santascenes::events::audio::AudioCmd;
use santascenes::events::chimney::observe_chimney_hit;
use santascenes::events::present::{DropPresentEvent, observe_drop_present};
use santascenes::resources::autodrop::AutoDrop;
use santascenes::resources::presentpool::PresentPool;
use santascenes::resources::score::DropScore;
use santascenes::resources::screensize::ScreenSize;
use santascenes::resources::spritetable::{SpriteData, SpriteSheet, SpriteTable};
use santascenes::resources::worldtime::WorldTime;
use santascenes::systems::animation::animation_system;
use santascenes::systems::autodrop::autodrop_system;
use santascenes::systems::chimney::chimney_scroll_system;
use santascenes::systems::movement::movement_system;
use santascenes::systems::present::present_system;
use santascenes::systems::time::update_world_time;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(delta: f32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta,
        time_scale: 1.0,
        frame_count: 0,
    });
    world.insert_resource(ScreenSize { w: 800, h: 600 });
    world.insert_resource(DropScore::default());
    world.insert_resource(PresentPool::new(4, PresentParams::default()));
    world.init_resource::<Messages<AudioCmd>>();
    world.add_observer(observe_drop_present);
    world.add_observer(observe_chimney_hit);
    world.flush();
    world
}

/// Chimney whose opening spans x 212..298 at y 300; centre x 255.
fn spawn_chimney(world: &mut World) -> Entity {
    world
        .spawn((
            MapPosition::new(200.0, 300.0),
            Chimney::new(110.0, 120.0, 12.0),
        ))
        .id()
}

fn tick_presents(world: &mut World, frames: usize) {
    let mut schedule = Schedule::default();
    schedule.add_systems(present_system);
    for _ in 0..frames {
        schedule.run(world);
    }
}

fn audio_cmds(world: &mut World) -> Vec<AudioCmd> {
    let mut state = SystemState::<MessageReader<AudioCmd>>::new(world);
    let mut reader = state.get_mut(world);
    reader.read().cloned().collect()
}

#[test]
fn present_dropped_over_chimney_is_delivered() {
    let mut world = make_world(0.05);
    let chimney = spawn_chimney(&mut world);

    world.trigger(DropPresentEvent { x: 255.0 });
    world.flush();
    assert_eq!(world.resource::<PresentPool>().live_count(), 1);

    tick_presents(&mut world, 20);

    let score = *world.resource::<DropScore>();
    assert_eq!(score.hits, 1);
    assert_eq!(score.edge_hits, 0);
    assert_eq!(score.misses, 0);
    assert_eq!(world.get::<Chimney>(chimney).unwrap().hits, 1);
    assert_eq!(world.resource::<PresentPool>().live_count(), 0);
    assert!(audio_cmds(&mut world).is_empty());
}

#[test]
fn present_clipping_the_rim_counts_as_edge_hit() {
    let mut world = make_world(0.05);
    spawn_chimney(&mut world);

    world.trigger(DropPresentEvent { x: 285.0 });
    world.flush();
    tick_presents(&mut world, 20);

    let score = *world.resource::<DropScore>();
    assert_eq!(score.hits, 1);
    assert_eq!(score.edge_hits, 1);
}

#[test]
fn present_missing_every_chimney_plays_miss_sound() {
    let mut world = make_world(0.05);
    let chimney = spawn_chimney(&mut world);

    world.trigger(DropPresentEvent { x: 600.0 });
    world.flush();
    tick_presents(&mut world, 30);

    let score = *world.resource::<DropScore>();
    assert_eq!(score.hits, 0);
    assert_eq!(score.misses, 1);
    assert_eq!(world.get::<Chimney>(chimney).unwrap().hits, 0);
    assert_eq!(world.resource::<PresentPool>().live_count(), 0);
    assert_eq!(
        audio_cmds(&mut world),
        vec![AudioCmd::PlayFx {
            id: MISS_SOUND.to_string()
        }]
    );
}

#[test]
fn inactive_chimney_is_ignored() {
    let mut world = make_world(0.05);
    let chimney = spawn_chimney(&mut world);
    world.get_mut::<Chimney>(chimney).unwrap().active = false;

    world.trigger(DropPresentEvent { x: 255.0 });
    world.flush();
    tick_presents(&mut world, 30);

    let score = *world.resource::<DropScore>();
    assert_eq!(score.hits, 0);
    assert_eq!(score.misses, 1);
}

#[test]
fn released_presents_are_reused() {
    let mut world = make_world(0.05);
    world.trigger(DropPresentEvent { x: 600.0 });
    world.flush();
    let first = world.resource::<PresentPool>().keys()[0];
    tick_presents(&mut world, 30);
    assert!(world.resource::<PresentPool>().get(first).is_none());

    world.trigger(DropPresentEvent { x: 100.0 });
    world.flush();
    let pool = world.resource::<PresentPool>();
    assert_eq!(pool.live_count(), 1);
    assert_eq!(pool.pool.capacity(), 4);
    assert_eq!(pool.pool.spare_count(), 3);
    let (key, present) = pool.pool.iter().next().unwrap();
    assert_ne!(key, first);
    assert!(!present.dead);
    assert!(approx_eq(present.x, 100.0 - PresentParams::default().center()));
}

#[test]
fn chimney_scrolls_and_wraps_around_the_stage() {
    let mut world = make_world(0.0);
    let chimney = world
        .spawn((
            MapPosition::new(-100.0, 360.0),
            RigidBody::with_velocity(Vector2 { x: -90.0, y: 0.0 }),
            Chimney::new(110.0, 120.0, 12.0),
        ))
        .id();

    let mut schedule = Schedule::default();
    schedule.add_systems((movement_system, chimney_scroll_system).chain());

    update_world_time(&mut world, 0.5);
    schedule.run(&mut world);

    let pos = world.get::<MapPosition>(chimney).unwrap().pos;
    assert!(approx_eq(pos.x, -145.0 + 800.0 + 110.0));
    assert!(approx_eq(pos.y, 360.0));
    assert!(world.get::<Chimney>(chimney).unwrap().active);
}

#[test]
fn chimney_off_stage_is_inactive() {
    let mut world = make_world(0.0);
    let chimney = world
        .spawn((
            MapPosition::new(850.0, 360.0),
            Chimney::new(110.0, 120.0, 12.0),
        ))
        .id();

    let mut schedule = Schedule::default();
    schedule.add_systems(chimney_scroll_system);
    schedule.run(&mut world);

    assert!(!world.get::<Chimney>(chimney).unwrap().active);
}

#[test]
fn autodrop_drops_on_interval() {
    let mut world = make_world(0.0);
    world.insert_resource(AutoDrop::new(1.0, 42));

    let mut schedule = Schedule::default();
    schedule.add_systems(autodrop_system);

    update_world_time(&mut world, 0.1);
    schedule.run(&mut world);
    assert_eq!(world.resource::<PresentPool>().live_count(), 1);

    for _ in 0..5 {
        update_world_time(&mut world, 0.1);
        schedule.run(&mut world);
    }
    assert_eq!(world.resource::<PresentPool>().live_count(), 1);

    for _ in 0..5 {
        update_world_time(&mut world, 0.1);
        schedule.run(&mut world);
    }
    assert_eq!(world.resource::<PresentPool>().live_count(), 2);
}

#[test]
fn autodrop_aims_at_active_chimneys() {
    let mut world = make_world(0.0);
    spawn_chimney(&mut world);
    world.insert_resource(AutoDrop::new(1.0, 7));

    let mut schedule = Schedule::default();
    schedule.add_systems(autodrop_system);
    update_world_time(&mut world, 0.1);
    schedule.run(&mut world);

    let pool = world.resource::<PresentPool>();
    let params = pool.params;
    let (_, present) = pool.pool.iter().next().unwrap();
    let center = present.center_x(&params);
    assert!((center - 255.0).abs() <= 20.0, "dropped at {}", center);
}

fn animation_world(table: SpriteTable) -> (World, Entity) {
    let mut world = make_world(0.0);
    let mut animation = Animation::new(&SpriteSheet::new("boogie", 48), 120.0, Arc::new(table));
    animation.play();
    let entity = world.spawn((animation, CurrentFrame::default())).id();
    (world, entity)
}

#[test]
fn animation_system_publishes_current_frame() {
    let mut table = SpriteTable::new();
    table.insert_sheets(
        "boogie",
        2,
        SpriteData {
            width: 100.0,
            height: 200.0,
            offset_x: 10.0,
            offset_y: 20.0,
        },
    );
    let (mut world, entity) = animation_world(table);

    let mut schedule = Schedule::default();
    schedule.add_systems(animation_system);

    let duration = Animation::frame_duration_for(120.0);
    update_world_time(&mut world, (duration * 2.5 / 1000.0) as f32);
    schedule.run(&mut world);

    assert_eq!(world.get::<Animation>(entity).unwrap().frame(), 2);
    let frame = world
        .get::<CurrentFrame>(entity)
        .unwrap()
        .0
        .clone()
        .unwrap();
    assert_eq!(frame.sprite, "boogie_0");
    assert!(approx_eq(frame.x, 200.0));
    assert!(approx_eq(frame.y, 0.0));
}

#[test]
#[should_panic]
fn animation_system_aborts_on_missing_sprite_data() {
    let (mut world, _) = animation_world(SpriteTable::new());

    let mut schedule = Schedule::default();
    schedule.add_systems(animation_system);
    update_world_time(&mut world, 0.01);
    schedule.run(&mut world);
}
