//! Event types and observers used by the game.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`chimney`] – a present landed in a chimney
//! - [`present`] – requests to drop a present
//! - [`switchdebug`] – toggle hitbox overlays on/off
pub mod audio;
pub mod chimney;
pub mod present;
pub mod switchdebug;
