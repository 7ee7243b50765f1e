//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 960
//! height = 540
//! target_fps = 60
//! vsync = true
//!
//! [stage]
//! width = 960
//! height = 540
//!
//! [boogie]
//! bpm = 120
//! sheet = boogie
//! frames = 48
//! sprite_table = ./assets/boogie/sprites.json
//!
//! [presents]
//! start_y = 40
//! end_y = 470
//! gravity = 1200
//! initial_velocity = 100
//! width = 56
//! pool_size = 16
//!
//! [chimneys]
//! count = 3
//! speed = 90
//! width = 110
//! height = 120
//! rim = 12
//! top = 360
//!
//! [audio]
//! miss_fx = ./assets/audio/pd_item_miss.wav
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::present::PresentParams;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 960;
const DEFAULT_WINDOW_HEIGHT: u32 = 540;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_STAGE_WIDTH: u32 = 960;
const DEFAULT_STAGE_HEIGHT: u32 = 540;
const DEFAULT_BPM: f64 = 120.0;
const DEFAULT_SHEET: &str = "boogie";
const DEFAULT_FRAMES: usize = 48;
const DEFAULT_SPRITE_TABLE: &str = "./assets/boogie/sprites.json";
const DEFAULT_POOL_SIZE: usize = 16;
const DEFAULT_CHIMNEY_COUNT: usize = 3;
const DEFAULT_CHIMNEY_SPEED: f32 = 90.0;
const DEFAULT_CHIMNEY_WIDTH: f32 = 110.0;
const DEFAULT_CHIMNEY_HEIGHT: f32 = 120.0;
const DEFAULT_CHIMNEY_RIM: f32 = 12.0;
const DEFAULT_CHIMNEY_TOP: f32 = 360.0;
const DEFAULT_MISS_FX: &str = "./assets/audio/pd_item_miss.wav";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Chimney layout and scrolling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChimneyParams {
    pub count: usize,
    /// Scroll speed to the left in pixels per second.
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    pub rim: f32,
    /// Height of the chimney openings.
    pub top: f32,
}

impl Default for ChimneyParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_CHIMNEY_COUNT,
            speed: DEFAULT_CHIMNEY_SPEED,
            width: DEFAULT_CHIMNEY_WIDTH,
            height: DEFAULT_CHIMNEY_HEIGHT,
            rim: DEFAULT_CHIMNEY_RIM,
            top: DEFAULT_CHIMNEY_TOP,
        }
    }
}

/// Game configuration resource.
///
/// Stores window settings, stage size, the dancer animation setup, present
/// physics and chimney layout.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Stage width in pixels.
    pub stage_width: u32,
    /// Stage height in pixels.
    pub stage_height: u32,
    /// Tempo the dancer moves to.
    pub bpm: f64,
    /// Sprite-sheet family of the dancer.
    pub sheet: String,
    /// Logical frames in the dance loop.
    pub frames: usize,
    /// JSON sprite table for the dancer.
    pub sprite_table: PathBuf,
    pub presents: PresentParams,
    /// Presents preallocated in the pool.
    pub pool_size: usize,
    pub chimneys: ChimneyParams,
    /// Sound effect played on a miss.
    pub miss_fx: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            stage_width: DEFAULT_STAGE_WIDTH,
            stage_height: DEFAULT_STAGE_HEIGHT,
            bpm: DEFAULT_BPM,
            sheet: DEFAULT_SHEET.to_string(),
            frames: DEFAULT_FRAMES,
            sprite_table: PathBuf::from(DEFAULT_SPRITE_TABLE),
            presents: PresentParams::default(),
            pool_size: DEFAULT_POOL_SIZE,
            chimneys: ChimneyParams::default(),
            miss_fx: PathBuf::from(DEFAULT_MISS_FX),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: {}x{} window, {}x{} stage, fps={}, bpm={}, pool={}, chimneys={}",
            self.window_width,
            self.window_height,
            self.stage_width,
            self.stage_height,
            self.target_fps,
            self.bpm,
            self.pool_size,
            self.chimneys.count
        );

        Ok(())
    }

    /// Load configuration from INI text, keeping defaults for missing keys.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let uint = |section: &str, key: &str| config.getuint(section, key).ok().flatten();
        let float = |section: &str, key: &str| config.getfloat(section, key).ok().flatten();

        // [window] section
        if let Some(width) = uint("window", "width") {
            self.window_width = width as u32;
        }
        if let Some(height) = uint("window", "height") {
            self.window_height = height as u32;
        }
        if let Some(fps) = uint("window", "target_fps") {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [stage] section
        if let Some(width) = uint("stage", "width") {
            self.stage_width = width as u32;
        }
        if let Some(height) = uint("stage", "height") {
            self.stage_height = height as u32;
        }

        // [boogie] section
        if let Some(bpm) = float("boogie", "bpm") {
            if bpm > 0.0 {
                self.bpm = bpm;
            } else {
                log::warn!("Ignoring non-positive bpm {}", bpm);
            }
        }
        if let Some(sheet) = config.get("boogie", "sheet") {
            self.sheet = sheet;
        }
        if let Some(frames) = uint("boogie", "frames") {
            self.frames = frames as usize;
        }
        if let Some(path) = config.get("boogie", "sprite_table") {
            self.sprite_table = PathBuf::from(path);
        }

        // [presents] section
        if let Some(v) = float("presents", "start_y") {
            self.presents.start_y = v as f32;
        }
        if let Some(v) = float("presents", "end_y") {
            self.presents.end_y = v as f32;
        }
        if let Some(v) = float("presents", "gravity") {
            self.presents.gravity = v as f32;
        }
        if let Some(v) = float("presents", "initial_velocity") {
            self.presents.initial_velocity = v as f32;
        }
        if let Some(v) = float("presents", "width") {
            self.presents.width = v as f32;
        }
        if let Some(v) = uint("presents", "pool_size") {
            self.pool_size = v as usize;
        }

        // [chimneys] section
        if let Some(v) = uint("chimneys", "count") {
            self.chimneys.count = v as usize;
        }
        if let Some(v) = float("chimneys", "speed") {
            self.chimneys.speed = v as f32;
        }
        if let Some(v) = float("chimneys", "width") {
            self.chimneys.width = v as f32;
        }
        if let Some(v) = float("chimneys", "height") {
            self.chimneys.height = v as f32;
        }
        if let Some(v) = float("chimneys", "rim") {
            self.chimneys.rim = v as f32;
        }
        if let Some(v) = float("chimneys", "top") {
            self.chimneys.top = v as f32;
        }

        // [audio] section
        if let Some(path) = config.get("audio", "miss_fx") {
            self.miss_fx = PathBuf::from(path);
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));

        config.set("stage", "width", Some(self.stage_width.to_string()));
        config.set("stage", "height", Some(self.stage_height.to_string()));

        config.set("boogie", "bpm", Some(self.bpm.to_string()));
        config.set("boogie", "sheet", Some(self.sheet.clone()));
        config.set("boogie", "frames", Some(self.frames.to_string()));
        config.set(
            "boogie",
            "sprite_table",
            Some(self.sprite_table.display().to_string()),
        );

        let p = &self.presents;
        config.set("presents", "start_y", Some(p.start_y.to_string()));
        config.set("presents", "end_y", Some(p.end_y.to_string()));
        config.set("presents", "gravity", Some(p.gravity.to_string()));
        config.set(
            "presents",
            "initial_velocity",
            Some(p.initial_velocity.to_string()),
        );
        config.set("presents", "width", Some(p.width.to_string()));
        config.set("presents", "pool_size", Some(self.pool_size.to_string()));

        let c = &self.chimneys;
        config.set("chimneys", "count", Some(c.count.to_string()));
        config.set("chimneys", "speed", Some(c.speed.to_string()));
        config.set("chimneys", "width", Some(c.width.to_string()));
        config.set("chimneys", "height", Some(c.height.to_string()));
        config.set("chimneys", "rim", Some(c.rim.to_string()));
        config.set("chimneys", "top", Some(c.top.to_string()));

        config.set("audio", "miss_fx", Some(self.miss_fx.display().to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.window_size(), (960, 540));
        assert_eq!(config.bpm, 120.0);
        assert_eq!(config.frames, 48);
        assert_eq!(config.presents, PresentParams::default());
        assert_eq!(config.chimneys, ChimneyParams::default());
    }

    #[test]
    fn test_partial_ini_keeps_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str(
                "[boogie]\nbpm = 90\nsheet = shuffle\n\n[presents]\ngravity = 800\npool_size = 4\n",
            )
            .unwrap();
        assert_eq!(config.bpm, 90.0);
        assert_eq!(config.sheet, "shuffle");
        assert_eq!(config.presents.gravity, 800.0);
        assert_eq!(config.pool_size, 4);
        assert_eq!(config.presents.end_y, PresentParams::default().end_y);
        assert_eq!(config.window_width, 960);
    }

    #[test]
    fn test_non_positive_bpm_is_ignored() {
        let mut config = GameConfig::new();
        config.load_from_str("[boogie]\nbpm = 0\n").unwrap();
        assert_eq!(config.bpm, 120.0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("./definitely/not/here.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.target_fps, 60);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("santascenes-{}.ini", std::process::id()));
        let mut config = GameConfig::with_path(&path);
        config.chimneys.count = 5;
        config.presents.width = 64.0;
        config.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.chimneys.count, 5);
        assert_eq!(loaded.presents.width, 64.0);
        let _ = std::fs::remove_file(&path);
    }
}
