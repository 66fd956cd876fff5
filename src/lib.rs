//! Brickout - a ball/paddle/brick game for encoder-driven menu displays
//!
//! Core modules:
//! - `fixed`: Sub-pixel fixed-point arithmetic
//! - `game`: Deterministic simulation (physics, collisions, game state)
//! - `render`: Composes a model snapshot into drawing-primitive calls
//! - `audio`: Maps simulation events to buzzer tones
//! - `platform`: Host collaborator traits (display, encoder, buzzer, RNG)
//! - `session`: Game lifecycle wiring for the host menu loop
//!
//! The simulation owns nothing outside its own model: drawing, input,
//! sound and randomness are reached through the `platform` traits, so the
//! same core drives a monochrome LCD, a color panel or the terminal demo
//! host in `main.rs`.

pub mod audio;
pub mod config;
pub mod fixed;
pub mod game;
pub mod platform;
pub mod render;
pub mod session;

pub use config::GameConfig;
pub use fixed::Fixed;
pub use session::{FrameOutcome, Session};

/// Game tuning constants
pub mod consts {
    /// Physics ticks per rendered frame. Collision resolution runs at
    /// double the draw rate for finer spatial resolution.
    pub const TICKS_PER_FRAME: u32 = 2;

    /// Ascent of the host's HUD font; the brick band starts below it.
    pub const FONT_ASCENT: i32 = 8;
    /// Width of one HUD font glyph in pixels.
    pub const FONT_WIDTH: i32 = 6;

    /// Height of one brick row in pixels.
    pub const BRICK_HEIGHT: i32 = 5;

    /// Pixels of paddle travel per encoder detent.
    pub const PADDLE_STEP: i32 = 3;

    /// Vertical gap between the paddle and a freshly served ball.
    pub const SERVE_DISTANCE: i32 = 24;
    /// A serve spawning within this margin of the right wall is mirrored
    /// left so the ball has room to travel before its first wall bounce.
    pub const SERVE_WALL_MARGIN: i32 = 10;
    /// Serve speed, horizontal: 1.25 px/tick in raw fixed-point sub-units.
    pub const SERVE_SPEED_X: i32 = 320;
    /// Serve speed, vertical: 1.3 px/tick in raw fixed-point sub-units.
    pub const SERVE_SPEED_Y: i32 = 332;

    /// Half-range of the random brick-bounce perturbation (raw sub-units).
    pub const BRICK_JITTER: i32 = 16;
    /// Range of the random paddle edge-zone perturbation (raw sub-units).
    pub const PADDLE_EDGE_JITTER: i32 = 64;
    /// Horizontal speed limit after an edge-zone perturbation, px/tick.
    pub const PADDLE_VX_LIMIT: i32 = 2;
}
