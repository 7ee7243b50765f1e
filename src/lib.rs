//! Santa scenes library.
//!
//! Exposes the stage's ECS components, resources, systems and events so the
//! binary and the integration tests share one world setup.

pub mod components;
pub mod events;
pub mod game;
pub mod pool;
pub mod resources;
pub mod systems;
