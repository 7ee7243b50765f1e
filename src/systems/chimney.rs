//! Chimney scrolling.
//!
//! Chimneys move left with their [`RigidBody`](crate::components::rigidbody::RigidBody).
//! Once a chimney has left the stage completely it jumps back by
//! `stage width + chimney width`, which keeps evenly spaced chimneys evenly
//! spaced forever. The `active` flag follows stage visibility; presents only
//! test active chimneys.

use bevy_ecs::prelude::*;

use crate::components::chimney::Chimney;
use crate::components::mapposition::MapPosition;
use crate::resources::screensize::ScreenSize;

pub fn chimney_scroll_system(
    mut query: Query<(&mut MapPosition, &mut Chimney)>,
    screen: Res<ScreenSize>,
) {
    let stage_w = screen.w as f32;
    for (mut position, mut chimney) in query.iter_mut() {
        if position.pos.x + chimney.width <= 0.0 {
            position.pos.x += stage_w + chimney.width;
            log::trace!("Chimney wrapped to x={}", position.pos.x);
        }
        let active = position.pos.x < stage_w && position.pos.x + chimney.width > 0.0;
        if chimney.active != active {
            chimney.active = active;
        }
    }
}
