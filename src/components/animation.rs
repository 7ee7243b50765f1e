//! Tempo-driven sprite-sheet animation.
//!
//! An [`Animation`] turns elapsed wall-clock time into a frame index and the
//! rectangle of the sprite sheet to draw for it. Playback speed follows a
//! musical tempo: one loop of two beats at a fixed base rate of [`FPS`]
//! frames per second, so a frame lasts `(1000 / FPS) * (60 / bpm * 2)` ms.
//!
//! Logical frames are spread over several sheets of [`FRAMES_PER_SPRITE`]
//! cells each. Frame `n` lives in sheet `n / FRAMES_PER_SPRITE`, looked up in
//! the [`SpriteTable`] under `"<name>_<sheet>"`.
//!
//! # States
//!
//! Animations start **Paused**. [`Animation::play`] rewinds to frame 0 and
//! switches to **Playing**; [`Animation::pause`] freezes the current frame.
//! Playing animations loop forever.

use std::fmt;
use std::sync::Arc;

use bevy_ecs::prelude::Component;
use raylib::prelude::{Rectangle, Vector2};

use crate::resources::spritetable::{SpriteSheet, SpriteTable};

/// Size of the stage the dancer is drawn on.
pub const CANVAS_WIDTH: f32 = 622.0;
pub const CANVAS_HEIGHT: f32 = 494.0;
/// Base frame rate of the sprite art.
pub const FPS: f64 = 24.0;
/// Frame cells per sprite sheet.
pub const FRAMES_PER_SPRITE: usize = 24;
/// The art board was exported at this scale of 1920x1080.
pub const SPRITE_SCALE_FACTOR: f32 = 0.6;
pub const ORIGINAL_WIDTH: f32 = 1920.0 * SPRITE_SCALE_FACTOR;
pub const ORIGINAL_HEIGHT: f32 = 1080.0 * SPRITE_SCALE_FACTOR;
/// Fastest supported tempo.
pub const MAX_BPM: f64 = 100_000.0;

/// Errors raised while resolving animation frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// The sprite table has no entry for the requested sheet.
    MissingData { sprite: String },
}

impl fmt::Display for AnimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimationError::MissingData { sprite } => write!(f, "Missing data for {}", sprite),
        }
    }
}

impl std::error::Error for AnimationError {}

/// Region of a sprite sheet to draw, plus where to draw it on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Canvas position of the frame, centred for the canvas size.
    pub offset_x: f32,
    pub offset_y: f32,
    /// Sprite-sheet key the rectangle refers to.
    pub sprite: String,
}

impl FrameRect {
    /// Source rectangle inside the sprite sheet.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn offset(&self) -> Vector2 {
        Vector2 {
            x: self.offset_x,
            y: self.offset_y,
        }
    }
}

/// Playback state of a tempo-driven sprite animation.
#[derive(Debug, Clone, Component)]
pub struct Animation {
    name: String,
    frame: usize,
    frame_count: usize,
    frame_duration: f64,
    elapsed_time: f64,
    paused: bool,
    data: Arc<SpriteTable>,
}

impl Animation {
    /// Create a paused animation for `sheet` at the given tempo.
    pub fn new(sheet: &SpriteSheet, bpm: f64, data: Arc<SpriteTable>) -> Self {
        Self {
            name: sheet.name.clone(),
            frame: 0,
            // A zero-frame sheet would make the modulo below meaningless.
            frame_count: sheet.frames.max(1),
            frame_duration: Self::frame_duration_for(bpm),
            elapsed_time: 0.0,
            paused: true,
            data,
        }
    }

    /// Duration of a single frame in milliseconds at `bpm`. The tempo is
    /// clamped to `1..=MAX_BPM` so the duration stays positive and finite.
    pub fn frame_duration_for(bpm: f64) -> f64 {
        1000.0 / FPS * (60.0 / bpm.max(1.0).min(MAX_BPM) * 2.0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn frame_duration(&self) -> f64 {
        self.frame_duration
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Rewind to the first frame and start playing.
    pub fn play(&mut self) {
        self.frame = 0;
        self.paused = false;
    }

    /// Freeze on the current frame.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Change the tempo. The sub-frame remainder is kept but clamped into the
    /// new frame duration.
    pub fn set_bpm(&mut self, bpm: f64) {
        self.frame_duration = Self::frame_duration_for(bpm);
        if self.elapsed_time >= self.frame_duration {
            self.elapsed_time %= self.frame_duration;
        }
    }

    /// Advance by `dt` milliseconds and return the frame to draw.
    ///
    /// Paused animations ignore `dt`, and so does every animation when `dt`
    /// is not finite. Whole frame durations are consumed from the accumulated
    /// time; the remainder carries over to the next call so playback speed
    /// does not depend on how often this is called.
    pub fn update(&mut self, dt: f64) -> Result<FrameRect, AnimationError> {
        if self.paused {
            return self.get_frame(&self.name, self.frame);
        }
        if !dt.is_finite() {
            log::warn!("Animation '{}' ignored a step of {} ms", self.name, dt);
            return self.get_frame(&self.name, self.frame);
        }

        self.elapsed_time += dt.max(0.0);

        if self.elapsed_time >= self.frame_duration {
            let remainder = self.elapsed_time % self.frame_duration;
            let frames_elapsed = ((self.elapsed_time - remainder) / self.frame_duration).round();
            // Reduce before converting so huge steps cannot overflow the index.
            let advance = (frames_elapsed % self.frame_count as f64) as usize;

            self.frame = (self.frame + advance) % self.frame_count;
            self.elapsed_time = remainder;
        }

        self.get_frame(&self.name, self.frame)
    }

    /// Resolve logical frame `number` of sheet family `name`.
    pub fn get_frame(&self, name: &str, number: usize) -> Result<FrameRect, AnimationError> {
        let index = number / FRAMES_PER_SPRITE;
        let sprite = SpriteTable::key(name, index);
        let Some(data) = self.data.get(&sprite) else {
            return Err(AnimationError::MissingData { sprite });
        };

        Ok(FrameRect {
            x: (number % FRAMES_PER_SPRITE) as f32 * data.width,
            y: 0.0,
            width: data.width,
            height: data.height,
            offset_x: data.offset_x - (ORIGINAL_WIDTH / 2.0 - CANVAS_WIDTH / 2.0),
            offset_y: data.offset_y - (ORIGINAL_HEIGHT / 2.0 - CANVAS_HEIGHT / 2.0),
            sprite,
        })
    }
}

/// Last frame resolved for an animated entity, consumed by rendering.
#[derive(Debug, Clone, Default, Component)]
pub struct CurrentFrame(pub Option<FrameRect>);
