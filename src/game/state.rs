//! Game state and core simulation types

use crate::config::GameConfig;
use crate::consts::*;
use crate::fixed::Fixed;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Ball in play, bricks on the board
    Running,
    /// Board cleared; the next paddle strike refills it
    ClearedAwaitingReset,
    /// Out of lives. Terminal: only a click leaves this screen.
    GameOver,
}

impl GamePhase {
    /// The ball simulates in every phase except game over.
    #[inline]
    pub fn in_play(self) -> bool {
        !matches!(self, GamePhase::GameOver)
    }
}

/// Something that happened during a tick and is audible or otherwise
/// interesting to the host. The simulation never touches the buzzer
/// itself; the session translates these at the frame boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball reflected off the left or right wall
    WallBounce,
    /// Ball reflected off the ceiling
    CeilingBounce,
    /// Brick removed. `vertical` tells which velocity component reflected
    /// (the tie-break picked a top/bottom face rather than a side face).
    BrickHit { vertical: bool },
    /// Ball reflected off the paddle
    PaddleHit,
    /// Ball passed the floor
    LifeLost,
    /// Last brick removed; board awaits a paddle strike to refill
    BoardCleared,
    /// Board refilled after a paddle strike
    BoardRefilled,
    /// Last life lost
    GameOver,
}

/// The brick grid: rows x cols of present/absent cells, with the present
/// count cached. The count is updated in the same call as every cell
/// mutation so it can never drift.
#[derive(Debug, Clone)]
pub struct BrickGrid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
    count: u32,
}

impl BrickGrid {
    /// A fully populated grid.
    pub fn full(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![true; rows * cols],
            count: (rows * cols) as u32,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Present cells remaining.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_present(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    /// Remove the brick at (row, col). Returns whether one was present.
    pub fn remove(&mut self, row: usize, col: usize) -> bool {
        let cell = &mut self.cells[row * self.cols + col];
        if *cell {
            *cell = false;
            self.count -= 1;
            true
        } else {
            false
        }
    }

    /// Repopulate every cell.
    pub fn refill(&mut self) {
        self.cells.fill(true);
        self.count = (self.rows * self.cols) as u32;
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    /// Left-edge x position in pixels. Always within
    /// `[0, width - paddle_width]`.
    pub x: i32,
}

impl Paddle {
    /// Centered on the playfield.
    pub fn centered(config: &GameConfig) -> Self {
        Self {
            x: (config.width - config.paddle_width()) / 2,
        }
    }

    /// Track the raw encoder position. The clamp happens in detent space
    /// and is then scaled to pixels, so any raw value (negative, huge)
    /// lands inside the legal range.
    pub fn track_encoder(&mut self, raw: i32, config: &GameConfig) {
        let max_detent = config.max_paddle_x() / PADDLE_STEP;
        self.x = raw.clamp(0, max_detent) * PADDLE_STEP;
    }

    /// Encoder detent matching the current position, for write-back.
    pub fn detent(&self) -> i32 {
        self.x / PADDLE_STEP
    }
}

/// The ball: sub-pixel position and velocity, plus the last vertical
/// bounce direction used as the brick-bounce tie-break.
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub x: Fixed,
    pub y: Fixed,
    pub vx: Fixed,
    pub vy: Fixed,
    /// +1 after a ceiling bounce, -1 after a paddle bounce or serve.
    pub hit_dir: i8,
}

impl Ball {
    /// Serve above the paddle: upward diagonal velocity, horizontal sign
    /// mirrored when the spawn point would crowd the right wall.
    pub fn serve(paddle: &Paddle, config: &GameConfig) -> Self {
        let mut vx = -Fixed::from_raw(SERVE_SPEED_X);
        let mut px = paddle.x + config.paddle_width() / 2 + SERVE_DISTANCE;
        if px >= config.width - SERVE_WALL_MARGIN {
            px -= SERVE_DISTANCE * 2;
            vx = -vx;
        }
        Self {
            x: Fixed::from_int(px),
            y: Fixed::from_int(config.paddle_y() - SERVE_DISTANCE),
            vx,
            vy: -Fixed::from_raw(SERVE_SPEED_Y),
            hit_dir: -1,
        }
    }
}

/// Complete game state for one session. Owned by exactly one `Session`;
/// mutated in place once per tick and dropped at exit.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub bricks: BrickGrid,
    pub paddle: Paddle,
    pub ball: Ball,
    pub lives: u8,
    pub score: u32,
    pub phase: GamePhase,
}

impl GameState {
    /// Fresh state: full board, centered paddle, served ball.
    pub fn new(config: GameConfig) -> Self {
        let config = config.validated();
        let paddle = Paddle::centered(&config);
        let ball = Ball::serve(&paddle, &config);
        Self {
            bricks: BrickGrid::full(config.brick_rows as usize, config.brick_cols as usize),
            paddle,
            ball,
            lives: config.starting_lives,
            score: 0,
            phase: GamePhase::Running,
            config,
        }
    }
}
