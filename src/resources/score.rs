//! Running tally of the present drop game.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropScore {
    /// Presents that went down a chimney.
    pub hits: u32,
    /// Of those, presents that clipped the rim.
    pub edge_hits: u32,
    /// Presents that landed on the floor.
    pub misses: u32,
}

impl DropScore {
    /// Presents whose fall has ended.
    pub fn delivered(&self) -> u32 {
        self.hits + self.misses
    }
}
