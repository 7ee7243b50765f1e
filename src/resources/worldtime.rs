use bevy_ecs::prelude::Resource;

/// Simulation clock. `delta` is in seconds and already scaled.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    /// Frame delta in milliseconds, the unit animations are timed in.
    pub fn delta_millis(&self) -> f64 {
        self.delta as f64 * 1000.0
    }
}
