//! Chimney hit notifications.
//!
//! The present system triggers [`ChimneyHitEvent`] when a falling present
//! drops into a chimney. [`observe_chimney_hit`] records the delivery on the
//! chimney and in the [`DropScore`].
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::components::chimney::Chimney;
use crate::components::present::HitKind;
use crate::resources::score::DropScore;

/// A present landed in `chimney`.
#[derive(Event, Debug, Clone, Copy)]
pub struct ChimneyHitEvent {
    pub chimney: Entity,
    pub kind: HitKind,
}

/// Global observer that counts a hit on the chimney and the score.
///
/// The chimney may have been despawned between detection and the observer
/// running; the score still counts the delivery.
pub fn observe_chimney_hit(
    trigger: On<ChimneyHitEvent>,
    mut chimneys: Query<&mut Chimney>,
    mut score: ResMut<DropScore>,
) {
    let event = trigger.event();
    if let Ok(mut chimney) = chimneys.get_mut(event.chimney) {
        chimney.hit();
    }
    score.hits += 1;
    if event.kind == HitKind::Edge {
        score.edge_hits += 1;
    }
    log::debug!("Present hit {:?} ({:?})", event.chimney, event.kind);
}
