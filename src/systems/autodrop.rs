use bevy_ecs::prelude::*;

use crate::components::chimney::Chimney;
use crate::components::mapposition::MapPosition;
use crate::events::present::DropPresentEvent;
use crate::resources::autodrop::AutoDrop;
use crate::resources::screensize::ScreenSize;
use crate::resources::worldtime::WorldTime;

/// Drop presents on a timer while [`AutoDrop`] is present.
pub fn autodrop_system(
    auto: Option<ResMut<AutoDrop>>,
    time: Res<WorldTime>,
    screen: Res<ScreenSize>,
    chimneys: Query<(&MapPosition, &Chimney)>,
    mut commands: Commands,
) {
    let Some(mut auto) = auto else {
        return;
    };
    let auto = &mut *auto;
    auto.timer -= time.delta;
    if auto.timer > 0.0 {
        return;
    }
    auto.timer += auto.interval;

    let targets: Vec<f32> = chimneys
        .iter()
        .filter(|(_, chimney)| chimney.active)
        .map(|(position, chimney)| position.pos.x + chimney.width / 2.0)
        .collect();
    let x = if auto.aim && !targets.is_empty() {
        let pick = auto.rng.usize(..targets.len());
        // Nudge a little so rim hits happen too.
        targets[pick] + (auto.rng.f32() - 0.5) * 40.0
    } else {
        auto.rng.f32() * screen.w as f32
    };
    commands.trigger(DropPresentEvent { x });
}
