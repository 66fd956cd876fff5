//! Physics and collision tick
//!
//! One `tick` advances the ball by one logic step. The session runs two
//! ticks per rendered frame, so collisions resolve at double the draw
//! rate. Collision tests run against the *provisional* next position
//! (current + velocity); the final position update then re-adds the
//! possibly-reflected velocity to the old position, so a bounce lands at
//! `old + new_velocity` rather than on the boundary itself. That update
//! order is load-bearing: it reproduces the bounce trajectories the rest
//! of the tuning (serve speeds, jitter ranges) was balanced against.

use crate::consts::*;
use crate::fixed::Fixed;

use super::state::{Ball, GameEvent, GamePhase, GameState};

/// Host-owned randomness, injected per tick. Implementations return a
/// uniform value from the half-open range `[lo, hi)`.
pub trait RandomSource {
    fn random_in_range(&mut self, lo: i32, hi: i32) -> i32;
}

/// Input sample for a tick. The encoder is read once per frame and the
/// same sample feeds both of the frame's ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Raw encoder position in detents; any value is legal.
    pub encoder_pos: i32,
}

/// Advance the simulation by one logic tick.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    if !state.phase.in_play() {
        return;
    }

    let config = state.config;

    // Paddle tracks the encoder, clamped to the playfield.
    state.paddle.track_encoder(input.encoder_pos, &config);

    // Provisional next position; every collision test below looks at
    // where the ball is about to be, not where it is.
    let new_x = state.ball.x + state.ball.vx;
    let new_y = state.ball.y + state.ball.vy;

    // Side walls reflect horizontally.
    if new_x < Fixed::ZERO || new_x > Fixed::from_int(config.width - 1) {
        state.ball.vx = -state.ball.vx;
        events.push(GameEvent::WallBounce);
    }

    if new_y < Fixed::ZERO {
        // Ceiling reflects vertically and arms the tie-break.
        state.ball.vy = -state.ball.vy;
        state.ball.hit_dir = 1;
        events.push(GameEvent::CeilingBounce);
    } else if new_y > Fixed::from_int(config.height) {
        // Past the floor: lose a life, re-serve or end the game. The
        // position update is skipped either way.
        events.push(GameEvent::LifeLost);
        state.lives -= 1;
        if state.lives > 0 {
            state.ball = Ball::serve(&state.paddle, &config);
        } else {
            state.phase = GamePhase::GameOver;
            events.push(GameEvent::GameOver);
            log::info!("game over, final score {}", state.score);
        }
        return;
    }

    if new_y >= Fixed::from_int(config.brick_top())
        && new_y <= Fixed::from_int(config.brick_bottom())
    {
        hit_bricks(state, new_x, new_y, rng, events);
    } else if state.ball.vy > Fixed::ZERO
        && new_y >= Fixed::from_int(config.paddle_y())
        && new_y <= Fixed::from_int(config.paddle_y() + config.paddle_thickness as i32)
    {
        hit_paddle(state, new_x, rng, events);
    }

    // Commit: old position plus the (possibly updated) velocity.
    state.ball.x += state.ball.vx;
    state.ball.y += state.ball.vy;
}

/// Brick-band collision: map the provisional position to a cell, remove
/// it if present, and pick the reflection axis by tie-break.
fn hit_bricks(
    state: &mut GameState,
    new_x: Fixed,
    new_y: Fixed,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    let config = state.config;

    // A wall reflection this tick leaves the provisional x slightly out
    // of range; clamp before deriving the column.
    let px = new_x.to_int().clamp(0, config.width - 1);
    let col = (px / config.brick_width()) as usize;
    let row = ((new_y.to_int() - config.brick_top()) / BRICK_HEIGHT) as usize;
    debug_assert!(
        row < state.bricks.rows() && col < state.bricks.cols(),
        "brick index ({row},{col}) out of grid bounds"
    );
    let col = col.min(state.bricks.cols() - 1);

    if !state.bricks.remove(row, col) {
        return;
    }

    // Higher rows are worth more.
    state.score += (state.bricks.rows() - row) as u32;
    if state.bricks.is_empty() {
        state.phase = GamePhase::ClearedAwaitingReset;
        events.push(GameEvent::BoardCleared);
        log::debug!("board cleared at score {}", state.score);
    }

    // Tie-break: a vertical velocity still agreeing with the last
    // vertical bounce direction means the ball hit a top/bottom face;
    // otherwise it came around a side. The reflected axis stays exact,
    // the other axis picks up a small random jitter.
    let ball = &mut state.ball;
    if ball.vy.is_negative() == (ball.hit_dir < 0) {
        ball.vy = -ball.vy;
        ball.vx += Fixed::from_raw(rng.random_in_range(-BRICK_JITTER, BRICK_JITTER));
        events.push(GameEvent::BrickHit { vertical: true });
    } else {
        ball.vx = -ball.vx;
        ball.vy += Fixed::from_raw(rng.random_in_range(-BRICK_JITTER, BRICK_JITTER));
        events.push(GameEvent::BrickHit { vertical: false });
    }
}

/// Paddle-band collision: reflect upward and shape the horizontal
/// velocity by strike zone.
fn hit_paddle(
    state: &mut GameState,
    new_x: Fixed,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    let config = state.config;
    let width = config.paddle_width();

    let offset = new_x.to_int() - state.paddle.x;
    if !(0..width).contains(&offset) {
        return; // clean miss; the floor test will catch it next tick
    }

    let ball = &mut state.ball;
    ball.vy = -ball.vy;
    ball.hit_dir = -1;
    events.push(GameEvent::PaddleHit);

    let vx_limit = (
        Fixed::from_int(-PADDLE_VX_LIMIT),
        Fixed::from_int(PADDLE_VX_LIMIT),
    );
    let is_left_edge = offset <= 1;
    if is_left_edge || offset >= width - 2 {
        // Outermost pixel: send the ball back toward the paddle interior
        // unless it is already heading that way.
        if ball.vx.is_negative() == is_left_edge {
            ball.vx = -ball.vx;
        }
    } else if offset <= 3 {
        ball.vx += Fixed::from_raw(rng.random_in_range(-PADDLE_EDGE_JITTER, 0));
        ball.vx = ball.vx.clamp(vx_limit.0, vx_limit.1);
    } else if offset >= width - 4 {
        ball.vx += Fixed::from_raw(rng.random_in_range(0, PADDLE_EDGE_JITTER));
        ball.vx = ball.vx.clamp(vx_limit.0, vx_limit.1);
    }

    // A strike on a cleared board brings the bricks back.
    if state.phase == GamePhase::ClearedAwaitingReset {
        state.bricks.refill();
        state.phase = GamePhase::Running;
        events.push(GameEvent::BoardRefilled);
        log::debug!("board refilled, {} lives left", state.lives);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    /// Deterministic stub: always returns `value`, clamped into the
    /// requested half-open range.
    struct StubRandom {
        value: i32,
    }

    impl RandomSource for StubRandom {
        fn random_in_range(&mut self, lo: i32, hi: i32) -> i32 {
            self.value.clamp(lo, hi - 1)
        }
    }

    fn no_jitter() -> StubRandom {
        StubRandom { value: 0 }
    }

    /// Place the ball so its provisional next position is exactly
    /// (`tx`, `ty`) when moving with (`vx`, `vy`).
    fn aim(state: &mut GameState, tx: Fixed, ty: Fixed, vx: Fixed, vy: Fixed) {
        state.ball.x = tx - vx;
        state.ball.y = ty - vy;
        state.ball.vx = vx;
        state.ball.vy = vy;
    }

    fn state_with_input() -> (GameState, TickInput) {
        let state = GameState::new(GameConfig::default());
        let input = TickInput {
            encoder_pos: state.paddle.detent(),
        };
        (state, input)
    }

    #[test]
    fn wall_bounce_reflects_horizontal_velocity() {
        let (mut state, input) = state_with_input();
        let vx = Fixed::from_raw(320);
        let vy = Fixed::from_raw(100);
        aim(&mut state, Fixed::from_int(128), Fixed::from_int(40), vx, vy);
        let old_x = state.ball.x;

        let mut events = Vec::new();
        tick(&mut state, &input, &mut no_jitter(), &mut events);

        assert_eq!(state.ball.vx, -vx);
        assert!(events.contains(&GameEvent::WallBounce));
        // The bounce step lands at old position + new velocity, not on
        // the wall.
        assert_eq!(state.ball.x, old_x + -vx);
    }

    #[test]
    fn ceiling_bounce_sets_hit_dir_up() {
        let (mut state, input) = state_with_input();
        state.ball.hit_dir = -1;
        aim(
            &mut state,
            Fixed::from_int(60),
            Fixed::from_raw(-10),
            Fixed::from_raw(100),
            -Fixed::from_raw(300),
        );

        let mut events = Vec::new();
        tick(&mut state, &input, &mut no_jitter(), &mut events);

        assert_eq!(state.ball.hit_dir, 1);
        assert!(!state.ball.vy.is_negative());
        assert!(events.contains(&GameEvent::CeilingBounce));
    }

    #[test]
    fn floor_costs_a_life_and_reserves() {
        let (mut state, input) = state_with_input();
        state.lives = 2;
        aim(
            &mut state,
            Fixed::from_int(60),
            Fixed::from_int(65),
            Fixed::from_raw(100),
            Fixed::from_raw(300),
        );

        let mut events = Vec::new();
        tick(&mut state, &input, &mut no_jitter(), &mut events);

        assert_eq!(state.lives, 1);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(events.contains(&GameEvent::LifeLost));
        // Re-served: above the paddle and moving up, away from the floor.
        assert!(state.ball.y.to_int() < state.config.paddle_y());
        assert!(state.ball.vy.is_negative());
    }

    #[test]
    fn last_life_ends_the_game_and_freezes_it() {
        let (mut state, input) = state_with_input();
        state.lives = 1;
        state.score = 7;
        aim(
            &mut state,
            Fixed::from_int(60),
            Fixed::from_int(65),
            Fixed::from_raw(100),
            Fixed::from_raw(300),
        );

        let mut events = Vec::new();
        tick(&mut state, &input, &mut no_jitter(), &mut events);

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::GameOver));

        // Terminal: further ticks change nothing.
        let frozen = (state.ball.x, state.ball.y, state.score);
        events.clear();
        tick(&mut state, &input, &mut no_jitter(), &mut events);
        assert_eq!((state.ball.x, state.ball.y, state.score), frozen);
        assert!(events.is_empty());
    }

    #[test]
    fn brick_hit_removes_cell_and_scores_by_row() {
        let (mut state, input) = state_with_input();
        // Bottom brick row (row 3) spans y 23..27; approach from below
        // moving up with the tie-break armed for a vertical reflection.
        state.ball.hit_dir = -1;
        let vy = -Fixed::from_raw(300);
        aim(&mut state, Fixed::from_int(4), Fixed::from_int(25), Fixed::from_raw(50), vy);

        let mut events = Vec::new();
        tick(&mut state, &input, &mut no_jitter(), &mut events);

        assert_eq!(state.bricks.count(), 63);
        assert!(!state.bricks.is_present(3, 0));
        assert_eq!(state.score, 1); // rows - row = 4 - 3
        assert_eq!(state.ball.vy, -vy);
        assert!(events.contains(&GameEvent::BrickHit { vertical: true }));
    }

    #[test]
    fn brick_tie_break_reflects_horizontal_when_directions_disagree() {
        let (mut state, input) = state_with_input();
        // Moving up but the last vertical bounce was off the ceiling:
        // treat as a side hit.
        state.ball.hit_dir = 1;
        let vx = Fixed::from_raw(200);
        aim(&mut state, Fixed::from_int(4), Fixed::from_int(25), vx, -Fixed::from_raw(300));

        let mut events = Vec::new();
        tick(&mut state, &input, &mut no_jitter(), &mut events);

        assert_eq!(state.ball.vx, -vx);
        assert!(events.contains(&GameEvent::BrickHit { vertical: false }));
    }

    #[test]
    fn brick_jitter_perturbs_the_other_axis() {
        let (mut state, input) = state_with_input();
        state.ball.hit_dir = -1;
        let vx = Fixed::from_raw(50);
        aim(&mut state, Fixed::from_int(4), Fixed::from_int(25), vx, -Fixed::from_raw(300));

        let mut events = Vec::new();
        let mut rng = StubRandom { value: 10 };
        tick(&mut state, &input, &mut rng, &mut events);

        assert_eq!(state.ball.vx, vx + Fixed::from_raw(10));
    }

    #[test]
    fn clearing_last_brick_awaits_reset() {
        let (mut state, input) = state_with_input();
        // Leave only the brick at (row 0, col 0).
        for row in 0..state.bricks.rows() {
            for col in 0..state.bricks.cols() {
                if (row, col) != (0, 0) {
                    state.bricks.remove(row, col);
                }
            }
        }
        let before = state.score;
        state.ball.hit_dir = -1;
        aim(
            &mut state,
            Fixed::from_int(2),
            Fixed::from_int(9),
            Fixed::from_raw(50),
            -Fixed::from_raw(300),
        );

        let mut events = Vec::new();
        tick(&mut state, &input, &mut no_jitter(), &mut events);

        assert_eq!(state.bricks.count(), 0);
        assert_eq!(state.phase, GamePhase::ClearedAwaitingReset);
        // Top row scores the full row count.
        assert_eq!(state.score, before + state.bricks.rows() as u32);
        assert!(events.contains(&GameEvent::BoardCleared));
    }

    #[test]
    fn paddle_hit_reflects_up_and_arms_tie_break() {
        let (mut state, input) = state_with_input();
        state.ball.hit_dir = 1;
        let vy = Fixed::from_raw(300);
        let target_x = Fixed::from_int(state.paddle.x + 8);
        aim(&mut state, target_x, Fixed::from_int(61), Fixed::from_raw(100), vy);

        let mut events = Vec::new();
        tick(&mut state, &input, &mut no_jitter(), &mut events);

        assert_eq!(state.ball.vy, -vy);
        assert_eq!(state.ball.hit_dir, -1);
        assert!(events.contains(&GameEvent::PaddleHit));
    }

    #[test]
    fn left_edge_strike_turns_the_ball_around() {
        let mut state = GameState::new(GameConfig::default());
        // Paddle hard against the left wall.
        let input = TickInput { encoder_pos: -100 };
        let vx = -Fixed::from_raw(320);
        aim(
            &mut state,
            Fixed::from_int(0),
            Fixed::from_int(61),
            vx,
            Fixed::from_raw(332),
        );

        let mut events = Vec::new();
        tick(&mut state, &input, &mut no_jitter(), &mut events);

        assert_eq!(state.paddle.x, 0);
        assert!(state.ball.vy.is_negative());
        // Struck the leftmost pixel moving left: inverted back inward.
        assert_eq!(state.ball.vx, -vx);
        assert!(events.contains(&GameEvent::PaddleHit));
    }

    #[test]
    fn edge_strike_keeps_inward_motion() {
        let (mut state, _) = state_with_input();
        let input = TickInput { encoder_pos: -100 };
        let vx = Fixed::from_raw(320); // already moving right, inward
        aim(
            &mut state,
            Fixed::from_int(1),
            Fixed::from_int(61),
            vx,
            Fixed::from_raw(332),
        );

        tick(&mut state, &input, &mut no_jitter(), &mut Vec::new());
        assert_eq!(state.ball.vx, vx);
    }

    #[test]
    fn near_edge_zone_clamps_horizontal_speed() {
        let (mut state, _) = state_with_input();
        let input = TickInput { encoder_pos: -100 };
        // Offset 2: left jitter zone, large negative perturbation.
        aim(
            &mut state,
            Fixed::from_int(2),
            Fixed::from_int(61),
            -Fixed::from_int(2),
            Fixed::from_raw(332),
        );

        let mut rng = StubRandom { value: -64 };
        tick(&mut state, &input, &mut rng, &mut Vec::new());
        assert_eq!(state.ball.vx, Fixed::from_int(-2)); // clamped
    }

    #[test]
    fn paddle_strike_refills_a_cleared_board() {
        let (mut state, input) = state_with_input();
        // Force the cleared-awaiting-reset phase with an empty grid.
        for row in 0..state.bricks.rows() {
            for col in 0..state.bricks.cols() {
                state.bricks.remove(row, col);
            }
        }
        state.phase = GamePhase::ClearedAwaitingReset;

        let target_x = Fixed::from_int(state.paddle.x + 8);
        aim(&mut state, target_x, Fixed::from_int(61), Fixed::from_raw(100), Fixed::from_raw(332));

        let mut events = Vec::new();
        tick(&mut state, &input, &mut no_jitter(), &mut events);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.bricks.count(), 64);
        assert!(events.contains(&GameEvent::BoardRefilled));
    }

    #[test]
    fn missing_the_paddle_is_not_a_hit() {
        let (mut state, input) = state_with_input();
        let lives = state.lives;
        // In the paddle band but left of the paddle.
        let target_x = Fixed::from_int(state.paddle.x - 4);
        aim(
            &mut state,
            target_x,
            Fixed::from_int(61),
            -Fixed::from_raw(100),
            Fixed::from_raw(332),
        );

        let mut events = Vec::new();
        tick(&mut state, &input, &mut no_jitter(), &mut events);

        assert!(!events.contains(&GameEvent::PaddleHit));
        assert_eq!(state.lives, lives); // the floor decides next tick
        assert!(state.ball.vy > Fixed::ZERO);
    }

    /// Long random run: the bookkeeping invariants hold throughout.
    #[test]
    fn invariants_hold_over_a_random_run() {
        use rand::SeedableRng;

        struct PcgSource(rand_pcg::Pcg32);
        impl RandomSource for PcgSource {
            fn random_in_range(&mut self, lo: i32, hi: i32) -> i32 {
                use rand::Rng;
                self.0.random_range(lo..hi)
            }
        }

        let mut state = GameState::new(GameConfig::default());
        let mut rng = PcgSource(rand_pcg::Pcg32::seed_from_u64(7));
        let mut events = Vec::new();
        let mut last_score = 0;

        for step in 0..20_000 {
            let input = TickInput {
                // Sweep the paddle back and forth, beyond both ends.
                encoder_pos: (step % 120) - 20,
            };
            events.clear();
            tick(&mut state, &input, &mut rng, &mut events);

            assert!(state.paddle.x >= 0 && state.paddle.x <= state.config.max_paddle_x());
            assert!(state.score >= last_score);
            last_score = state.score;

            let mut present = 0;
            for row in 0..state.bricks.rows() {
                for col in 0..state.bricks.cols() {
                    present += state.bricks.is_present(row, col) as u32;
                }
            }
            assert_eq!(present, state.bricks.count());

            if state.phase == GamePhase::GameOver {
                break;
            }
        }
    }
}
