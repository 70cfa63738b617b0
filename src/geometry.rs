//! Hit rectangles and the screen-space helpers around them.
//!
//! Gameplay runs in screen coordinates: origin at the top-left of the
//! window, y growing downwards. Bevy's 2D world has its origin at the window
//! center with y growing upwards, so everything drawn goes through
//! [`screen_to_world`].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// A hit-rectangle relative to an actor's drawn position.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RectOffset {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectOffset {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Axis-aligned box in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRect {
    pub min: Vec2,
    pub size: Vec2,
}

impl HitRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn offset_from(origin: Vec2, offset: &RectOffset) -> Self {
        Self::new(
            origin.x + offset.x,
            origin.y + offset.y,
            offset.width,
            offset.height,
        )
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Half-open overlap test: touching edges do not count.
    pub fn intersects(&self, other: &HitRect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

/// Converts a screen-space top-left corner into the world-space center of
/// something `drawn_size` big.
pub fn screen_to_world(top_left: Vec2, drawn_size: Vec2) -> Vec2 {
    Vec2::new(
        top_left.x + drawn_size.x / 2.0 - WINDOW_WIDTH / 2.0,
        WINDOW_HEIGHT / 2.0 - top_left.y - drawn_size.y / 2.0,
    )
}
