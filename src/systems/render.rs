//! Rendering.
//!
//! Simulation code never draws. Each frame [`build_draw_list`] walks the
//! world and produces plain [`DrawCommand`]s in stage coordinates, and a
//! [`DrawTarget`] turns them into pixels:
//!
//! - [`RaylibTarget`] draws into a raylib drawing scope, scaling the stage
//!   into the window and falling back to flat rectangles for textures that
//!   were never loaded.
//! - [`RecordingTarget`] keeps the commands, for headless runs and tests.

use bevy_ecs::prelude::*;
use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::components::animation::CurrentFrame;
use crate::components::chimney::Chimney;
use crate::components::mapposition::MapPosition;
use crate::resources::debugmode::DebugMode;
use crate::resources::presentpool::PresentPool;
use crate::resources::score::DropScore;
use crate::resources::screensize::ScreenSize;

/// Texture key of the present sprite.
pub const PRESENT_TEXTURE: &str = "present";
/// Texture key of the chimney sprite.
pub const CHIMNEY_TEXTURE: &str = "chimney";

const SKY: Color = Color::new(18, 32, 71, 255);
const BRICK: Color = Color::new(150, 52, 40, 255);
const WRAPPING: Color = Color::new(200, 30, 60, 255);
const HITBOX: Color = Color::GREEN;

/// One drawing operation in stage coordinates.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Region `src` of texture `tex_key`, top-left corner at `dest`.
    Sprite {
        tex_key: String,
        src: Rectangle,
        dest: Vector2,
        /// Colour to use when the texture is not available.
        fallback: Color,
    },
    Fill { rect: Rectangle, color: Color },
    Outline { rect: Rectangle, color: Color },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: i32,
        color: Color,
    },
}

/// Anything that can execute [`DrawCommand`]s.
pub trait DrawTarget {
    fn draw(&mut self, cmd: &DrawCommand);

    fn draw_all(&mut self, cmds: &[DrawCommand]) {
        for cmd in cmds {
            self.draw(cmd);
        }
    }
}

/// Collect everything visible this frame, back to front.
pub fn build_draw_list(world: &mut World) -> Vec<DrawCommand> {
    let mut cmds = Vec::new();

    if let Some(screen) = world.get_resource::<ScreenSize>() {
        cmds.push(DrawCommand::Fill {
            rect: Rectangle::new(0.0, 0.0, screen.w as f32, screen.h as f32),
            color: SKY,
        });
    }

    let mut frames = world.query::<&CurrentFrame>();
    for current in frames.iter(world) {
        if let Some(frame) = &current.0 {
            cmds.push(DrawCommand::Sprite {
                tex_key: frame.sprite.clone(),
                src: frame.source_rect(),
                dest: frame.offset(),
                fallback: Color::GOLD,
            });
        }
    }

    let debug = world.contains_resource::<DebugMode>();
    let mut chimneys = world.query::<(&MapPosition, &Chimney)>();
    for (position, chimney) in chimneys.iter(world) {
        if !chimney.active {
            continue;
        }
        cmds.push(DrawCommand::Sprite {
            tex_key: CHIMNEY_TEXTURE.to_string(),
            src: Rectangle::new(0.0, 0.0, chimney.width, chimney.height),
            dest: position.pos,
            fallback: BRICK,
        });
        if debug {
            let hitbox = chimney.hitbox(position.pos);
            cmds.push(DrawCommand::Outline {
                rect: Rectangle::new(hitbox.x, hitbox.y - 2.0, hitbox.center * 2.0, 4.0),
                color: HITBOX,
            });
        }
    }

    if let Some(presents) = world.get_resource::<PresentPool>() {
        let size = presents.params.width;
        for (_, present) in presents.pool.iter() {
            if present.dead || !present.dropping {
                continue;
            }
            cmds.push(DrawCommand::Sprite {
                tex_key: PRESENT_TEXTURE.to_string(),
                src: Rectangle::new(0.0, 0.0, size, size),
                dest: Vector2::new(present.x, present.y),
                fallback: WRAPPING,
            });
        }
    }

    if let Some(score) = world.get_resource::<DropScore>() {
        cmds.push(DrawCommand::Text {
            text: format!("Delivered: {}  Missed: {}", score.hits, score.misses),
            x: 10.0,
            y: 10.0,
            size: 20,
            color: Color::RAYWHITE,
        });
    }

    cmds
}

/// Raylib-backed textures keyed by name.
#[derive(Default)]
pub struct TextureStore {
    pub map: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, texture: Texture2D) {
        self.map.insert(key.into(), texture);
    }

    pub fn get(&self, key: &str) -> Option<&Texture2D> {
        self.map.get(key)
    }

    /// Load `path` under `key`, keeping the store unchanged on failure.
    pub fn load(
        &mut self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        key: &str,
        path: &str,
    ) -> Result<(), String> {
        let texture = rl
            .load_texture(th, path)
            .map_err(|e| format!("Failed to load texture '{}' from {}: {}", key, path, e))?;
        self.insert(key, texture);
        Ok(())
    }
}

/// Draws commands into a raylib drawing scope.
pub struct RaylibTarget<'a, D: RaylibDraw> {
    pub d: &'a mut D,
    pub textures: &'a TextureStore,
    /// Stage-to-window scale factor.
    pub scale: f32,
}

impl<D: RaylibDraw> RaylibTarget<'_, D> {
    fn to_window(&self, rect: Rectangle) -> Rectangle {
        Rectangle {
            x: rect.x * self.scale,
            y: rect.y * self.scale,
            width: rect.width * self.scale,
            height: rect.height * self.scale,
        }
    }
}

impl<D: RaylibDraw> DrawTarget for RaylibTarget<'_, D> {
    fn draw(&mut self, cmd: &DrawCommand) {
        match cmd {
            DrawCommand::Sprite {
                tex_key,
                src,
                dest,
                fallback,
            } => {
                let dest = self.to_window(Rectangle {
                    x: dest.x,
                    y: dest.y,
                    width: src.width,
                    height: src.height,
                });
                if let Some(tex) = self.textures.get(tex_key) {
                    self.d
                        .draw_texture_pro(tex, *src, dest, Vector2::zero(), 0.0, Color::WHITE);
                } else {
                    self.d.draw_rectangle_rec(dest, *fallback);
                }
            }
            DrawCommand::Fill { rect, color } => {
                let rect = self.to_window(*rect);
                self.d.draw_rectangle_rec(rect, *color);
            }
            DrawCommand::Outline { rect, color } => {
                let rect = self.to_window(*rect);
                self.d.draw_rectangle_lines_ex(rect, 1.0, *color);
            }
            DrawCommand::Text {
                text,
                x,
                y,
                size,
                color,
            } => {
                let x = (x * self.scale) as i32;
                let y = (y * self.scale) as i32;
                let size = (*size as f32 * self.scale).max(8.0) as i32;
                self.d.draw_text(text, x, y, size, *color);
            }
        }
    }
}

/// Keeps every command it is asked to draw.
#[derive(Default, Debug)]
pub struct RecordingTarget {
    pub commands: Vec<DrawCommand>,
}

impl RecordingTarget {
    /// Texture keys of all sprites drawn so far, in order.
    pub fn sprite_keys(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Sprite { tex_key, .. } => Some(tex_key.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawTarget for RecordingTarget {
    fn draw(&mut self, cmd: &DrawCommand) {
        self.commands.push(cmd.clone());
    }
}
