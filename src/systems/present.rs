//! Present simulation system.
//!
//! [`present_system`] steps every falling present once per frame. It
//! snapshots the hitboxes of the active chimneys, hands them to each present
//! through a [`DropContext`], releases presents whose fall ended and then
//! dispatches the outcomes:
//!
//! - hits trigger a [`ChimneyHitEvent`]
//! - misses bump [`DropScore::misses`]
//! - sounds are written as [`AudioCmd::PlayFx`] messages

use std::ops::ControlFlow;

use bevy_ecs::prelude::*;
use smallvec::SmallVec;

use crate::components::chimney::Chimney;
use crate::components::mapposition::MapPosition;
use crate::components::present::{DropContext, HitKind, Hitbox, PresentOutcome};
use crate::events::audio::AudioCmd;
use crate::events::chimney::ChimneyHitEvent;
use crate::resources::presentpool::PresentPool;
use crate::resources::score::DropScore;
use crate::resources::worldtime::WorldTime;

/// Per-frame view of the world handed to presents.
#[derive(Default)]
struct DropFrame {
    hitboxes: SmallVec<[(Entity, Hitbox); 8]>,
    hits: SmallVec<[(Entity, HitKind); 4]>,
    sounds: Vec<String>,
}

impl DropContext for DropFrame {
    type Target = Entity;

    fn for_each_hitbox(&self, visit: &mut dyn FnMut(Entity, &Hitbox) -> ControlFlow<()>) {
        for (entity, hitbox) in &self.hitboxes {
            if visit(*entity, hitbox).is_break() {
                break;
            }
        }
    }

    fn chimney_hit(&mut self, target: Entity, kind: HitKind) {
        self.hits.push((target, kind));
    }

    fn trigger_sound(&mut self, id: &str) {
        self.sounds.push(id.to_string());
    }
}

pub fn present_system(
    mut pool: ResMut<PresentPool>,
    chimneys: Query<(Entity, &MapPosition, &Chimney)>,
    time: Res<WorldTime>,
    mut score: ResMut<DropScore>,
    mut commands: Commands,
    mut sounds: MessageWriter<AudioCmd>,
) {
    let mut frame = DropFrame {
        hitboxes: chimneys
            .iter()
            .filter(|(_, _, chimney)| chimney.active)
            .map(|(entity, position, chimney)| (entity, chimney.hitbox(position.pos)))
            .collect(),
        ..Default::default()
    };

    let params = pool.params;
    for key in pool.keys() {
        let Some(present) = pool.get_mut(key) else {
            continue;
        };
        let Some(outcome) = present.on_frame(time.delta, &params, &mut frame) else {
            continue;
        };
        if let PresentOutcome::Miss = outcome {
            score.misses += 1;
            log::debug!("Present {:?} missed", key);
        }
        if let Err(e) = pool.remove(key) {
            log::warn!("Could not return present to pool: {}", e);
        }
    }

    for (chimney, kind) in frame.hits {
        commands.trigger(ChimneyHitEvent { chimney, kind });
    }
    for id in frame.sounds {
        sounds.write(AudioCmd::PlayFx { id });
    }
}
