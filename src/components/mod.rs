//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animation`] – frame-indexed sprite playback synchronised to a tempo
//! - [`chimney`] – scrolling drop target with a rim-aware hitbox
//! - [`mapposition`] – stage-space position of an entity
//! - [`present`] – falling present and its collision rules
//! - [`rigidbody`] – simple kinematic body storing velocity

pub mod animation;
pub mod chimney;
pub mod mapposition;
pub mod present;
pub mod rigidbody;
