//! Built-in activity spinner
//!
//! Twelve spokes arranged around the center. The leading spoke is fully
//! opaque and each following spoke fades, so advancing the phase one spoke
//! at a time reads as rotation.

use std::f32::consts::{FRAC_PI_2, TAU};
use std::time::Duration;

use tiny_skia::{Color, LineCap};

use super::{colors, Drawing, Shape};
use crate::geometry::{Point, Size};

const SPOKES: usize = 12;
/// One full revolution per second
const STEP: Duration = Duration::from_millis(1000 / SPOKES as u64);
const MIN_ALPHA: f32 = 0.25;

/// Indeterminate activity indicator
#[derive(Debug, Clone, PartialEq)]
pub struct Spinner {
    pub color: Color,
    phase: usize,
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            color: colors::white(),
            phase: 0,
        }
    }
}

impl Spinner {
    /// Size of the built-in spinner
    pub const SIZE: Size = Size::new(37.0, 37.0);

    pub fn new(color: Color) -> Self {
        Self { color, phase: 0 }
    }

    pub fn intrinsic_size(&self) -> Size {
        Self::SIZE
    }

    /// Index of the leading (fully opaque) spoke
    pub fn phase(&self) -> usize {
        self.phase
    }

    /// Set the phase from the time spent animating.
    ///
    /// Returns `true` if the leading spoke moved.
    pub fn animate_to(&mut self, elapsed: Duration) -> bool {
        let phase = ((elapsed.as_millis() / STEP.as_millis()) % SPOKES as u128) as usize;
        let changed = phase != self.phase;
        self.phase = phase;
        changed
    }

    pub fn draw(&self, size: Size, out: &mut Drawing) {
        let center = Point::new(size.width / 2.0, size.height / 2.0);
        let outer = size.width.min(size.height) / 2.0;
        let spoke_width = (outer * 0.22).max(1.0);
        // Round caps extend past the endpoints by half the width
        let r_out = outer - spoke_width / 2.0;
        let r_in = outer * 0.5;

        for i in 0..SPOKES {
            let angle = -FRAC_PI_2 + i as f32 * TAU / SPOKES as f32;
            let (sin, cos) = angle.sin_cos();

            let mut spoke = Shape::new();
            spoke.move_to(Point::new(center.x + r_in * cos, center.y + r_in * sin));
            spoke.line_to(Point::new(center.x + r_out * cos, center.y + r_out * sin));

            let color = colors::with_alpha(self.color, self.color.alpha() * self.spoke_alpha(i));
            out.stroke(spoke, color, spoke_width, LineCap::Round);
        }
    }

    /// Opacity multiplier of spoke `i` for the current phase
    fn spoke_alpha(&self, i: usize) -> f32 {
        // Distance behind the leading spoke, going counter-clockwise
        let behind = (self.phase + SPOKES - i) % SPOKES;
        1.0 - (1.0 - MIN_ALPHA) * behind as f32 / (SPOKES - 1) as f32
    }
}
