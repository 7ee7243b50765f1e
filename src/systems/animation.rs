//! Animation system.
//!
//! [`animation_system`] advances every [`Animation`] by the frame delta and
//! stores the resolved frame in the entity's [`CurrentFrame`] for rendering.
//!
//! A sprite table without an entry for the requested sheet is a content
//! error. The system returns it instead of drawing garbage, and the
//! schedule's error handler aborts.

use bevy_ecs::error::Result;
use bevy_ecs::prelude::{Query, Res};

use crate::components::animation::{Animation, CurrentFrame};
use crate::resources::worldtime::WorldTime;

/// Advance animation playback and publish the frame to draw.
///
/// Contract
/// - Reads [`WorldTime`] and converts its delta to milliseconds.
/// - Mutates [`Animation`] state and the entity's [`CurrentFrame`].
/// - Fails on the first animation whose frame cannot be resolved.
pub fn animation_system(
    mut query: Query<(&mut Animation, &mut CurrentFrame)>,
    time: Res<WorldTime>,
) -> Result {
    let dt = time.delta_millis();
    for (mut animation, mut current) in query.iter_mut() {
        let frame = animation.update(dt)?;
        current.0 = Some(frame);
    }
    Ok(())
}
