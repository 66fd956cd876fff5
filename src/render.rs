//! Rendering composer
//!
//! Projects a `GameState` snapshot onto a `DrawTarget`. The caller says
//! which row band is being repainted (paged display drivers redraw one
//! band per pass) and only intersecting elements emit draw calls. No
//! game logic here.

use crate::consts::{BRICK_HEIGHT, FONT_ASCENT, FONT_WIDTH};
use crate::game::GameState;
use crate::platform::{Color, DrawTarget, Region};

/// Brick colors, cycled across cells.
pub const BRICK_COLORS: [Color; 6] = [
    Color::Red,
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
];

/// Compose one frame of the model into drawing calls clipped to `region`.
pub fn compose(state: &GameState, region: Region, out: &mut impl DrawTarget) {
    let config = &state.config;

    draw_bricks(state, region, out);

    // Everything below the bricks is white.
    out.set_color(Color::White);

    // Paddle: 1-3 stacked lines, topmost first.
    for t in (0..config.paddle_thickness as i32).rev() {
        let y = config.paddle_y() - t;
        if region.contains_row(y) {
            out.draw_hline(state.paddle.x, y, config.paddle_width());
        }
    }

    if state.phase.in_play() {
        // Ball: a 2x2 outline square.
        let by = state.ball.y.to_int();
        if region.intersects(by, by + 1) {
            out.draw_frame(state.ball.x.to_int(), by, 2, 2);
        }
    } else {
        draw_game_over(state, region, out);
    }

    // HUD: score left, remaining-lives icons right.
    if region.starts_above(FONT_ASCENT) {
        out.draw_int(0, FONT_ASCENT - 1, state.score);
        let lives = state.lives.min(3) as usize;
        out.draw_text(
            config.width - FONT_WIDTH * 3,
            FONT_ASCENT - 1,
            &"ooo"[..lives],
        );
    }
}

fn draw_bricks(state: &GameState, region: Region, out: &mut impl DrawTarget) {
    let config = &state.config;
    let brick_w = config.brick_width();

    let mut color_index = 0;
    for row in 0..state.bricks.rows() {
        let yy = config.brick_top() + row as i32 * BRICK_HEIGHT;
        for col in 0..state.bricks.cols() {
            // The cycle advances even for absent cells, so surviving
            // bricks keep their color when a neighbor is destroyed.
            let color = BRICK_COLORS[color_index % BRICK_COLORS.len()];
            color_index += 1;

            if !state.bricks.is_present(row, col) {
                continue;
            }
            if !region.intersects(yy, yy + BRICK_HEIGHT - 2) {
                continue;
            }
            out.set_color(color);
            out.draw_box(col as i32 * brick_w, yy, brick_w - 1, BRICK_HEIGHT - 1);
        }
    }
}

fn draw_game_over(state: &GameState, region: Region, out: &mut impl DrawTarget) {
    const TEXT: &str = "GAME OVER";
    let config = &state.config;

    let tw = TEXT.len() as i32 * FONT_WIDTH;
    let x = (config.width - tw) / 2;
    let baseline = (config.height + FONT_ASCENT) / 2;
    let top = baseline - FONT_ASCENT - 2;
    let h = FONT_ASCENT + 6;
    if region.intersects(top, top + h - 1) {
        out.draw_frame(x - 4, top, tw + 8, h);
        out.draw_text(x, baseline, TEXT);
    }
}
