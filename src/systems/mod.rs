//! Stage systems.
//!
//! Submodules overview
//! - [`animation`] – advance sprite animations and publish the current frame
//! - [`audio`] – bridge with the audio thread (poll/update message queues)
//! - [`autodrop`] – drop presents on a timer
//! - [`chimney`] – scroll chimneys and wrap them around the stage
//! - [`movement`] – integrate positions from rigid body velocities and time
//! - [`present`] – step falling presents and dispatch hits and misses
//! - [`render`] – turn the world into draw commands for a draw target
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod audio;
pub mod autodrop;
pub mod chimney;
pub mod movement;
pub mod present;
pub mod render;
pub mod time;
