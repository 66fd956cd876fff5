//! Game tuning configuration
//!
//! Geometry and rule knobs with defaults matching the original device
//! (128x64 display, 4x16 brick grid, 3-pixel encoder step). Values load
//! from JSON when the host provides a file; anything out of range is
//! clamped rather than rejected.

use serde::{Deserialize, Serialize};

use crate::consts::{BRICK_HEIGHT, FONT_ASCENT};

/// Tuning knobs for one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield width in pixels.
    pub width: i32,
    /// Playfield height in pixels.
    pub height: i32,
    /// Brick grid rows.
    pub brick_rows: u8,
    /// Brick grid columns.
    pub brick_cols: u8,
    /// Paddle thickness in pixels (1-3 stacked lines).
    pub paddle_thickness: u8,
    /// Lives at session entry.
    pub starting_lives: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
            brick_rows: 4,
            brick_cols: 16,
            paddle_thickness: 2,
            starting_lives: 3,
        }
    }
}

impl GameConfig {
    /// Clamp every knob into its supported range, logging adjustments.
    pub fn validated(mut self) -> Self {
        let orig = self;
        self.width = self.width.clamp(64, 256);
        self.height = self.height.clamp(48, 256);
        self.brick_rows = self.brick_rows.clamp(1, 6);
        self.brick_cols = self.brick_cols.clamp(4, 32);
        self.paddle_thickness = self.paddle_thickness.clamp(1, 3);
        // The lives row renders at most three icons.
        self.starting_lives = self.starting_lives.clamp(1, 3);
        if self != orig {
            log::warn!("config adjusted to supported ranges: {:?} -> {:?}", orig, self);
        }
        self
    }

    /// Load from a JSON file, falling back to defaults on any failure.
    pub fn from_json_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<GameConfig>(&json) {
                Ok(config) => {
                    log::info!("loaded config from {}", path.display());
                    config.validated()
                }
                Err(err) => {
                    log::warn!("bad config {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("cannot read {}: {err}", path.display());
                Self::default()
            }
        }
    }

    // Derived geometry. The playfield, top to bottom: HUD row, brick band,
    // open air, paddle band, floor.

    /// Paddle width in pixels.
    pub fn paddle_width(&self) -> i32 {
        self.width / 8
    }

    /// Paddle top-line y coordinate.
    pub fn paddle_y(&self) -> i32 {
        self.height - 1 - self.paddle_thickness as i32
    }

    /// Largest legal paddle x position.
    pub fn max_paddle_x(&self) -> i32 {
        self.width - self.paddle_width()
    }

    /// Width of one brick in pixels.
    pub fn brick_width(&self) -> i32 {
        self.width / self.brick_cols as i32
    }

    /// First row of the brick band.
    pub fn brick_top(&self) -> i32 {
        FONT_ASCENT
    }

    /// Last row of the brick band (inclusive).
    pub fn brick_bottom(&self) -> i32 {
        self.brick_top() + BRICK_HEIGHT * self.brick_rows as i32 - 1
    }
}
