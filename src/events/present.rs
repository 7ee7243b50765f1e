//! Present drop requests.
//!
//! Input handlers and the autoplay system trigger [`DropPresentEvent`]; the
//! [`observe_drop_present`] observer takes a present from the pool and
//! releases it over the requested position.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::resources::presentpool::PresentPool;

/// Drop a present centred on stage x coordinate `x`.
#[derive(Event, Debug, Clone, Copy)]
pub struct DropPresentEvent {
    pub x: f32,
}

pub fn observe_drop_present(trigger: On<DropPresentEvent>, mut pool: ResMut<PresentPool>) {
    let x = trigger.event().x;
    let key = pool.drop_present(x);
    log::debug!(
        "Dropped present {:?} at x={} ({} falling)",
        key,
        x,
        pool.live_count()
    );
}
