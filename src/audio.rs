//! Buzzer feedback
//!
//! Each audible simulation event maps to one fixed tone on the host
//! buzzer. The pitches distinguish surfaces: low thud for the walls,
//! brighter the closer the contact is to scoring.

use crate::game::GameEvent;

/// One buzzer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub duration_ms: u16,
    pub frequency_hz: u16,
}

const WALL: Tone = Tone { duration_ms: 5, frequency_hz: 220 };
const CEILING: Tone = Tone { duration_ms: 5, frequency_hz: 280 };
const BRICK_TOP_FACE: Tone = Tone { duration_ms: 5, frequency_hz: 880 };
const BRICK_SIDE_FACE: Tone = Tone { duration_ms: 5, frequency_hz: 640 };
const PADDLE: Tone = Tone { duration_ms: 3, frequency_hz: 880 };
const LIFE_LOST: Tone = Tone { duration_ms: 500, frequency_hz: 75 };

/// Tone for an event, if it makes a sound. The life-lost groan covers
/// the game-over transition too; phase changes themselves are silent.
pub fn tone_for(event: GameEvent) -> Option<Tone> {
    match event {
        GameEvent::WallBounce => Some(WALL),
        GameEvent::CeilingBounce => Some(CEILING),
        GameEvent::BrickHit { vertical: true } => Some(BRICK_TOP_FACE),
        GameEvent::BrickHit { vertical: false } => Some(BRICK_SIDE_FACE),
        GameEvent::PaddleHit => Some(PADDLE),
        GameEvent::LifeLost => Some(LIFE_LOST),
        GameEvent::BoardCleared | GameEvent::BoardRefilled | GameEvent::GameOver => None,
    }
}
