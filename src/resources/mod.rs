//! ECS resources made available to systems.
//!
//! Overview
//! - `audio` – bridge and channels for the background audio thread
//! - `autodrop` – unattended present dropping
//! - `debugmode` – presence toggles hitbox overlays
//! - `gameconfig` – INI-backed settings
//! - `presentpool` – recycled presents and their physics parameters
//! - `score` – delivered and missed presents
//! - `screensize` – stage dimensions in pixels
//! - `spritetable` – per-sheet frame geometry shared by animations
//! - `worldtime` – simulation time and delta
pub mod audio;
pub mod autodrop;
pub mod debugmode;
pub mod gameconfig;
pub mod presentpool;
pub mod score;
pub mod screensize;
pub mod spritetable;
pub mod worldtime;
