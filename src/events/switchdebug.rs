use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::resources::debugmode::DebugMode;

/// Toggle hitbox overlays.
#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchDebugEvent {}

pub fn switch_debug_observer(
    _trigger: On<SwitchDebugEvent>,
    mut commands: Commands,
    debug: Option<Res<DebugMode>>,
) {
    if debug.is_some() {
        log::info!("Debug mode off");
        commands.remove_resource::<DebugMode>();
    } else {
        log::info!("Debug mode on");
        commands.insert_resource(DebugMode);
    }
}
