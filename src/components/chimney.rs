//! Chimney targets for falling presents.
//!
//! A chimney entity carries a [`MapPosition`](super::mapposition::MapPosition)
//! for its top-left corner, a [`RigidBody`](super::rigidbody::RigidBody) that
//! scrolls it across the stage and this [`Chimney`] component describing the
//! opening. Only chimneys flagged `active` are offered to presents.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

use crate::components::present::Hitbox;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Chimney {
    /// Outer width of the chimney.
    pub width: f32,
    /// Height drawn below the opening line.
    pub height: f32,
    /// Thickness of the rim on each side of the opening.
    pub rim: f32,
    /// Presents delivered into this chimney.
    pub hits: u32,
    /// Whether the chimney is at least partly on stage.
    pub active: bool,
}

impl Chimney {
    pub fn new(width: f32, height: f32, rim: f32) -> Self {
        Self {
            width,
            height,
            rim,
            hits: 0,
            active: true,
        }
    }

    /// Opening of the chimney placed at `pos`.
    pub fn hitbox(&self, pos: Vector2) -> Hitbox {
        Hitbox {
            x: pos.x + self.rim,
            y: pos.y,
            center: (self.width / 2.0 - self.rim).max(0.0),
        }
    }

    /// Record a delivered present.
    pub fn hit(&mut self) {
        self.hits += 1;
    }
}
