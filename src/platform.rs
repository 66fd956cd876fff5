//! Host collaborator traits
//!
//! The core never talks to hardware. The host menu subsystem hands the
//! session a drawing surface, an encoder, a buzzer and a random source
//! through these traits; swapping the display backend (monochrome page
//! buffer, color panel, terminal) never touches the simulation.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::game::RandomSource;

/// Drawing colors available on the richer display backends. Monochrome
/// backends are free to ignore `set_color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Red,
    Cyan,
    Green,
    Yellow,
    Magenta,
    Blue,
}

/// An inclusive row range of the display, used by paged display drivers
/// that repaint a band at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub top: i32,
    pub bottom: i32,
}

impl Region {
    /// The whole screen of the given height.
    pub fn full(height: i32) -> Self {
        Self {
            top: 0,
            bottom: height - 1,
        }
    }

    /// Does the region include row `y`?
    #[inline]
    pub fn contains_row(&self, y: i32) -> bool {
        (self.top..=self.bottom).contains(&y)
    }

    /// Does the region overlap the inclusive row span `[y0, y1]`?
    #[inline]
    pub fn intersects(&self, y0: i32, y1: i32) -> bool {
        y0 <= self.bottom && y1 >= self.top
    }

    /// Does the region start above row `y`? Used for the HUD band.
    #[inline]
    pub fn starts_above(&self, y: i32) -> bool {
        self.top < y
    }
}

/// Display drawing primitives. All calls are fire-and-forget; the host
/// flushes at its own pace.
pub trait DrawTarget {
    fn set_color(&mut self, color: Color);
    /// Horizontal line of `len` pixels starting at (x, y).
    fn draw_hline(&mut self, x: i32, y: i32, len: i32);
    /// Filled rectangle.
    fn draw_box(&mut self, x: i32, y: i32, w: i32, h: i32);
    /// Rectangle outline.
    fn draw_frame(&mut self, x: i32, y: i32, w: i32, h: i32);
    /// Decimal integer with the baseline at (x, y).
    fn draw_int(&mut self, x: i32, y: i32, value: u32);
    /// Text with the baseline at (x, y).
    fn draw_text(&mut self, x: i32, y: i32, text: &str);

    /// The row band this target is currently repainting. `None` means
    /// everything; paged drivers report the live page per pass.
    fn repaint_region(&self) -> Option<Region> {
        None
    }
}

/// Non-display host services: the rotary encoder and the buzzer.
pub trait HostIo {
    /// Current raw encoder position, in detents.
    fn encoder_position(&mut self) -> i32;
    /// Write the encoder position back (keeps it clamped to the paddle).
    fn set_encoder_position(&mut self, pos: i32);
    /// Edge-triggered click, consumed by the read.
    fn take_click(&mut self) -> bool;
    /// Request a tone, fire-and-forget.
    fn buzz(&mut self, duration_ms: u16, frequency_hz: u16);
}

/// Deterministic PCG-backed random source. The host seeds it; replays
/// with the same seed and inputs reproduce a run exactly.
pub struct PcgRandom {
    rng: Pcg32,
}

impl PcgRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for PcgRandom {
    fn random_in_range(&mut self, lo: i32, hi: i32) -> i32 {
        if lo >= hi {
            return lo;
        }
        self.rng.random_range(lo..hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_membership() {
        let region = Region { top: 8, bottom: 15 };
        assert!(region.contains_row(8));
        assert!(region.contains_row(15));
        assert!(!region.contains_row(16));
        assert!(region.intersects(0, 8));
        assert!(region.intersects(15, 40));
        assert!(!region.intersects(16, 40));
        assert!(region.starts_above(9));
        assert!(!region.starts_above(8));
    }

    #[test]
    fn full_region_spans_screen() {
        let region = Region::full(64);
        assert!(region.contains_row(0));
        assert!(region.contains_row(63));
        assert!(!region.contains_row(64));
    }

    #[test]
    fn pcg_respects_half_open_range() {
        let mut rng = PcgRandom::from_seed(1);
        for _ in 0..1000 {
            let v = rng.random_in_range(-16, 16);
            assert!((-16..16).contains(&v));
        }
        // Degenerate range collapses to its lower bound.
        assert_eq!(rng.random_in_range(5, 5), 5);
    }

    #[test]
    fn pcg_is_reproducible() {
        let mut a = PcgRandom::from_seed(99);
        let mut b = PcgRandom::from_seed(99);
        for _ in 0..100 {
            assert_eq!(a.random_in_range(0, 1000), b.random_in_range(0, 1000));
        }
    }
}
