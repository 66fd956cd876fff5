//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Fixed-point integer math only
//! - Randomness injected through `RandomSource`
//! - Side effects reported as `GameEvent`s, never performed here
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;

pub use state::{Ball, BrickGrid, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{RandomSource, TickInput, tick};
