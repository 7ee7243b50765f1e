//! Stage size resource.
//!
//! Stores the dimensions of the stage in pixels. Chimneys wrap around its
//! edges and the renderer scales it into the window.

use bevy_ecs::prelude::Resource;

/// Current stage size in pixels.
#[derive(Resource, Clone, Copy, Debug)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}
