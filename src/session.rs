//! Session lifecycle
//!
//! Wires the simulation into the host menu loop: `enter` once, then
//! `frame` on every serviced frame until it asks to exit. Each frame
//! runs both logic ticks to completion before any drawing, so the
//! rendered picture always reflects a fully-resolved physics state.

use crate::audio::tone_for;
use crate::config::GameConfig;
use crate::consts::TICKS_PER_FRAME;
use crate::game::{GameEvent, GameState, RandomSource, TickInput, tick};
use crate::platform::{DrawTarget, HostIo, Region};
use crate::render::compose;

/// What the host should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Keep scheduling frames.
    Continue,
    /// The player clicked out; return to the menu.
    Exit,
}

/// One game session. The host keeps exactly one alive at a time; all
/// model state lives here and dies with it.
pub struct Session {
    state: GameState,
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self {
            state: GameState::new(config),
            events: Vec::new(),
        }
    }

    /// Read-only view of the model, for hosts that overlay their own UI.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Reset the model for a fresh game and align the encoder with the
    /// centered paddle so the first frame reads back the same position.
    pub fn enter(&mut self, io: &mut impl HostIo) {
        self.state = GameState::new(self.state.config);
        io.set_encoder_position(self.state.paddle.detent());
        log::info!(
            "session start: {} lives, {} bricks",
            self.state.lives,
            self.state.bricks.count()
        );
    }

    /// Service one frame: two logic ticks, audio feedback, compose, and
    /// the exit check. The click is consumed at the end of the frame,
    /// never mid-tick.
    pub fn frame(
        &mut self,
        io: &mut impl HostIo,
        rng: &mut dyn RandomSource,
        draw: &mut impl DrawTarget,
    ) -> FrameOutcome {
        self.events.clear();

        // The encoder is sampled once; both ticks see the same value.
        let input = TickInput {
            encoder_pos: io.encoder_position(),
        };
        if self.state.phase.in_play() {
            for _ in 0..TICKS_PER_FRAME {
                tick(&mut self.state, &input, rng, &mut self.events);
            }
            // Write the clamped position back so the encoder can't run
            // away past the playfield.
            io.set_encoder_position(self.state.paddle.detent());
        }

        for &event in &self.events {
            if let Some(tone) = tone_for(event) {
                io.buzz(tone.duration_ms, tone.frequency_hz);
            }
        }

        let region = draw
            .repaint_region()
            .unwrap_or(Region::full(self.state.config.height));
        compose(&self.state, region, draw);

        if io.take_click() {
            log::info!("session exit at score {}", self.state.score);
            FrameOutcome::Exit
        } else {
            FrameOutcome::Continue
        }
    }
}
