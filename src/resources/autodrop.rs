//! Autoplay settings for unattended runs.
//!
//! When present, the [`autodrop_system`](crate::systems::autodrop::autodrop_system)
//! drops a present every `interval` seconds over a random active chimney, or
//! over a random stage position when `aim` is off.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone)]
pub struct AutoDrop {
    /// Seconds between drops.
    pub interval: f32,
    /// Time left until the next drop.
    pub timer: f32,
    /// Aim at chimneys instead of dropping anywhere.
    pub aim: bool,
    pub rng: fastrand::Rng,
}

impl AutoDrop {
    pub fn new(interval: f32, seed: u64) -> Self {
        Self {
            interval: interval.max(0.01),
            timer: 0.0,
            aim: true,
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}
