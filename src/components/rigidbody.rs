//! Kinematic body component.
//!
//! The [`RigidBody`] component stores the velocity of an entity that the
//! [`movement_system`](crate::systems::movement::movement_system) integrates
//! into its [`MapPosition`](super::mapposition::MapPosition) every frame.
//! Chimneys use it to scroll across the stage.
//!
//! The `frozen` flag temporarily disables movement, which is how the stage
//! is halted without losing each chimney's speed.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Kinematic body storing a constant velocity.
///
/// # Fields
/// - `velocity` - Current velocity in stage pixels per second
/// - `frozen` - When true, movement system skips this entity
#[derive(Component, Clone, Copy, Debug)]
pub struct RigidBody {
    pub velocity: Vector2,
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody at rest.
    pub fn new() -> Self {
        Self {
            velocity: Vector2 { x: 0.0, y: 0.0 },
            frozen: false,
        }
    }

    /// Create a RigidBody moving at `velocity`.
    pub fn with_velocity(velocity: Vector2) -> Self {
        Self {
            velocity,
            frozen: false,
        }
    }

    /// Freeze the rigid body, preventing movement system from updating it.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Unfreeze the rigid body, allowing movement system to update it.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
