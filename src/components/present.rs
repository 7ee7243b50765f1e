//! Falling presents.
//!
//! A [`Present`] is a pooled object that falls under constant gravity until
//! it either drops into a chimney or lands on the floor. It never touches the
//! world directly: every frame it is handed a [`DropContext`] that lists the
//! hitboxes to test against and receives the outcome.
//!
//! # Lifecycle
//!
//! 1. Acquired from the [`PresentPool`](crate::resources::presentpool::PresentPool)
//! 2. [`Present::on_init`] resets position and velocity
//! 3. [`Present::drop_at`] places it and marks it as dropping
//! 4. [`Present::on_frame`] runs each frame until it reports an outcome
//! 5. The owner releases it back to the pool; [`Poolable::on_dispose`] marks
//!    it dead
//!
//! # Collision
//!
//! A hitbox is only considered on the frame where the present crosses the
//! hitbox line (`last_y < hitbox.y < y`), so a present can hit a chimney at
//! most once. The horizontal distance between the present centre and the
//! opening centre decides the result:
//!
//! - `diff <= center - PRESENT_CENTER` drops straight in ([`HitKind::Inside`])
//! - `diff < center + PRESENT_CENTER` clips the rim ([`HitKind::Edge`])
//!
//! Both kinds currently resolve the same way.

use std::ops::ControlFlow;

use slotmap::new_key_type;

use crate::pool::Poolable;

new_key_type! {
    /// Key of a present in the [`PresentPool`](crate::resources::presentpool::PresentPool).
    pub struct PresentKey;
}

/// Sound played when a present lands on the floor.
pub const MISS_SOUND: &str = "pd_item_miss";

/// Physics constants shared by all presents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentParams {
    /// Height presents start falling from.
    pub start_y: f32,
    /// Floor height. Presents reaching it are lost.
    pub end_y: f32,
    /// Downward acceleration in pixels per second squared.
    pub gravity: f32,
    /// Downward velocity at release in pixels per second.
    pub initial_velocity: f32,
    /// Present sprite width in pixels.
    pub width: f32,
}

impl Default for PresentParams {
    fn default() -> Self {
        Self {
            start_y: 40.0,
            end_y: 420.0,
            gravity: 1200.0,
            initial_velocity: 100.0,
            width: 56.0,
        }
    }
}

impl PresentParams {
    /// Half the present width.
    pub fn center(&self) -> f32 {
        self.width / 2.0
    }
}

/// Chimney opening as seen by a falling present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    /// Left edge of the opening.
    pub x: f32,
    /// Height of the opening line.
    pub y: f32,
    /// Half-width of the opening.
    pub center: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    /// Present fell cleanly into the opening.
    Inside,
    /// Present clipped the rim of the opening.
    Edge,
}

/// How a present's fall ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentOutcome<T> {
    Hit { target: T, kind: HitKind },
    Miss,
}

/// Everything a present needs from the game while it falls.
pub trait DropContext {
    /// Identifies a chimney.
    type Target: Copy;

    /// Visit the hitbox of every active chimney. Returning
    /// `ControlFlow::Break` stops the walk.
    fn for_each_hitbox(
        &self,
        visit: &mut dyn FnMut(Self::Target, &Hitbox) -> ControlFlow<()>,
    );

    /// A present landed in `target`.
    fn chimney_hit(&mut self, target: Self::Target, kind: HitKind);

    /// Fire a named sound effect.
    fn trigger_sound(&mut self, id: &str);
}

/// State of one falling present.
#[derive(Debug, Clone, PartialEq)]
pub struct Present {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Vertical velocity, positive is down.
    pub velocity: f32,
    pub dead: bool,
    /// Set once the present has been released over the stage.
    pub dropping: bool,
}

impl Default for Present {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            velocity: 0.0,
            dead: true,
            dropping: false,
        }
    }
}

impl Poolable for Present {
    fn on_dispose(&mut self) {
        self.dead = true;
        self.dropping = false;
    }
}

impl Present {
    /// Reset for reuse, centred on `x`.
    pub fn on_init(&mut self, x: f32, params: &PresentParams) {
        self.dead = false;
        self.dropping = false;
        self.x = x - params.center();
        self.y = params.start_y;
        self.velocity = params.initial_velocity;
    }

    /// Release the present over `x`.
    pub fn drop_at(&mut self, x: f32, params: &PresentParams) {
        self.x = x - params.center();
        self.dropping = true;
    }

    /// Horizontal centre.
    pub fn center_x(&self, params: &PresentParams) -> f32 {
        self.x + params.center()
    }

    /// Advance `delta` seconds and resolve collisions.
    ///
    /// Returns the outcome on the frame the fall ends; the present is dead
    /// from then on and further calls return `None`.
    pub fn on_frame<C: DropContext>(
        &mut self,
        delta: f32,
        params: &PresentParams,
        ctx: &mut C,
    ) -> Option<PresentOutcome<C::Target>> {
        if self.dead {
            return None;
        }

        let last_y = self.y;

        if self.y < params.end_y {
            self.velocity += params.gravity * delta;
            self.y += self.velocity * delta;
            if self.y > params.end_y {
                self.y = params.end_y;
            }
        } else {
            self.dead = true;
            ctx.trigger_sound(MISS_SOUND);
            return Some(PresentOutcome::Miss);
        }

        let y = self.y;
        let center_x = self.center_x(params);
        let half = params.center();
        let mut hit = None;
        ctx.for_each_hitbox(&mut |target, hitbox| {
            if hitbox.y <= last_y || hitbox.y >= y {
                return ControlFlow::Continue(());
            }

            let diff = (center_x - hitbox.x - hitbox.center).abs();

            if diff <= hitbox.center - half {
                hit = Some((target, HitKind::Inside));
                ControlFlow::Break(())
            } else if diff < hitbox.center + half {
                // TODO: bounce rim hits off the chimney instead of accepting them.
                hit = Some((target, HitKind::Edge));
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        let (target, kind) = hit?;
        self.dead = true;
        ctx.chimney_hit(target, kind);
        Some(PresentOutcome::Hit { target, kind })
    }
}
