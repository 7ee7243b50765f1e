use bevy_ecs::prelude::Resource;

/// Presence of this resource enables hitbox overlays.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode;
