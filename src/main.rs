//! Terminal demo host
//!
//! Runs the game core against a crossterm backend: the playfield renders
//! as half-block cells, arrow keys stand in for the rotary encoder, and
//! Enter (or `q`/Esc) is the click that leaves the session. The real
//! device wires the same `Session` into its menu idle loop instead.

use std::io::{self, BufWriter, Stdout, Write, stdout};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    style::{self, Print, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use brickout::platform::{Color, DrawTarget, HostIo, PcgRandom};
use brickout::{FrameOutcome, GameConfig, Session};

/// Frame pacing, roughly the original device's service rate.
const FRAME: Duration = Duration::from_millis(33);

/// Encoder/click/buzzer emulation over the keyboard.
#[derive(Default)]
struct TermHost {
    encoder: i32,
    click: bool,
}

impl HostIo for TermHost {
    fn encoder_position(&mut self) -> i32 {
        self.encoder
    }
    fn set_encoder_position(&mut self, pos: i32) {
        self.encoder = pos;
    }
    fn take_click(&mut self) -> bool {
        std::mem::take(&mut self.click)
    }
    fn buzz(&mut self, duration_ms: u16, frequency_hz: u16) {
        // No terminal audio; surface the request to the log instead.
        log::debug!("buzz {duration_ms}ms @ {frequency_hz}Hz");
    }
}

/// Pixel-buffer draw target flushed as half-block characters, two
/// playfield rows per terminal row.
struct Canvas {
    width: i32,
    height: i32,
    pixels: Vec<Option<Color>>,
    texts: Vec<(i32, i32, String)>,
    color: Color,
}

impl Canvas {
    fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; (width * height) as usize],
            texts: Vec::new(),
            color: Color::White,
        }
    }

    fn clear(&mut self) {
        self.pixels.fill(None);
        self.texts.clear();
    }

    fn set_pixel(&mut self, x: i32, y: i32) {
        if (0..self.width).contains(&x) && (0..self.height).contains(&y) {
            self.pixels[(y * self.width + x) as usize] = Some(self.color);
        }
    }

    fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.pixels[(y * self.width + x) as usize]
    }

    fn flush(&self, out: &mut BufWriter<Stdout>) -> io::Result<()> {
        for cy in 0..self.height / 2 {
            out.queue(cursor::MoveTo(0, cy as u16))?;
            for x in 0..self.width {
                let top = self.pixel(x, cy * 2);
                let bottom = self.pixel(x, cy * 2 + 1);
                out.queue(SetForegroundColor(term_color(top)))?;
                out.queue(SetBackgroundColor(term_color(bottom)))?;
                out.queue(Print('▀'))?;
            }
        }

        out.queue(style::ResetColor)?;
        for (x, y, text) in &self.texts {
            out.queue(cursor::MoveTo(*x as u16, (*y / 2) as u16))?;
            out.queue(Print(text))?;
        }
        out.flush()
    }
}

fn term_color(color: Option<Color>) -> style::Color {
    match color {
        None => style::Color::Black,
        Some(Color::White) => style::Color::White,
        Some(Color::Red) => style::Color::Red,
        Some(Color::Cyan) => style::Color::Cyan,
        Some(Color::Green) => style::Color::Green,
        Some(Color::Yellow) => style::Color::Yellow,
        Some(Color::Magenta) => style::Color::Magenta,
        Some(Color::Blue) => style::Color::Blue,
    }
}

impl DrawTarget for Canvas {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn draw_hline(&mut self, x: i32, y: i32, len: i32) {
        for i in 0..len {
            self.set_pixel(x + i, y);
        }
    }

    fn draw_box(&mut self, x: i32, y: i32, w: i32, h: i32) {
        for dy in 0..h {
            self.draw_hline(x, y + dy, w);
        }
    }

    fn draw_frame(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.draw_hline(x, y, w);
        self.draw_hline(x, y + h - 1, w);
        for dy in 0..h {
            self.set_pixel(x, y + dy);
            self.set_pixel(x + w - 1, y + dy);
        }
    }

    fn draw_int(&mut self, x: i32, y: i32, value: u32) {
        self.texts.push((x, y, value.to_string()));
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        self.texts.push((x, y, text.to_string()));
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::from_json_file(Path::new(&path)),
        None => GameConfig::default(),
    }
    .validated();

    terminal::enable_raw_mode()?;
    let mut out = BufWriter::new(stdout());
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    let result = run(&mut out, config);

    out.execute(cursor::Show)?;
    out.execute(terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(out: &mut BufWriter<Stdout>, config: GameConfig) -> io::Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("rng seed {seed}");

    let mut session = Session::new(config);
    let mut host = TermHost::default();
    let mut rng = PcgRandom::from_seed(seed);
    let mut canvas = Canvas::new(config.width, config.height);

    session.enter(&mut host);

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    match key.code {
                        KeyCode::Left => host.encoder -= 1,
                        KeyCode::Right => host.encoder += 1,
                        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => host.click = true,
                        _ => {}
                    }
                }
            }
        }

        canvas.clear();
        if session.frame(&mut host, &mut rng, &mut canvas) == FrameOutcome::Exit {
            return Ok(());
        }
        canvas.flush(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}
