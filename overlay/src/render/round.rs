//! Pie and ring progress indicator
//!
//! Both variants start at the top of the circle (-90°) and sweep clockwise by
//! `progress * 360°`.

use std::f32::consts::{FRAC_PI_2, TAU};

use tiny_skia::{Color, LineCap};

use super::{clamp_progress, colors, Drawing, Shape, LINE_WIDTH};
use crate::geometry::{Point, Rect, Size};

/// Angle of the 12 o'clock position
const START_ANGLE: f32 = -FRAC_PI_2;

/// Round determinate progress indicator (pie or ring)
#[derive(Debug, Clone, PartialEq)]
pub struct RoundProgress {
    progress: f32,
    /// Color of the filled portion and the pie outline
    pub progress_tint: Color,
    /// Color of the unfilled disc or track
    pub background_tint: Color,
    /// `true` renders a ring, `false` a pie
    pub annular: bool,
}

impl Default for RoundProgress {
    fn default() -> Self {
        Self {
            progress: 0.0,
            progress_tint: colors::white(),
            background_tint: colors::translucent_white(),
            annular: false,
        }
    }
}

impl RoundProgress {
    /// Size of the built-in round indicator
    pub const SIZE: Size = Size::new(37.0, 37.0);

    pub fn new(annular: bool) -> Self {
        Self {
            annular,
            ..Default::default()
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Set progress; values outside `[0, 1]` are clamped
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = clamp_progress(progress);
    }

    pub fn intrinsic_size(&self) -> Size {
        Self::SIZE
    }

    /// Draw into a `size.width` x `size.height` box with its origin at 0,0
    pub fn draw(&self, size: Size, out: &mut Drawing) {
        if self.annular {
            self.draw_ring(size, out);
        } else {
            self.draw_pie(size, out);
        }
    }

    fn end_angle(&self) -> f32 {
        START_ANGLE + self.progress * TAU
    }

    fn draw_ring(&self, size: Size, out: &mut Drawing) {
        let center = Point::new(size.width / 2.0, size.height / 2.0);
        let radius = (size.width - LINE_WIDTH) / 2.0;

        // Track
        out.stroke(
            Shape::circle(center, radius, START_ANGLE),
            self.background_tint,
            LINE_WIDTH,
            LineCap::Butt,
        );

        if self.progress <= 0.0 {
            return;
        }

        let mut arc = Shape::new();
        arc.arc(center, radius, START_ANGLE, self.end_angle(), true);
        out.stroke(arc, self.progress_tint, LINE_WIDTH, LineCap::Square);
    }

    fn draw_pie(&self, size: Size, out: &mut Drawing) {
        let circle_rect = Rect::from_size(size).inset(2.0, 2.0);

        // Background disc with outline
        out.fill(Shape::oval(circle_rect), self.background_tint);
        out.stroke(
            Shape::oval(circle_rect),
            self.progress_tint,
            LINE_WIDTH,
            LineCap::Butt,
        );

        if self.progress <= 0.0 {
            return;
        }

        let center = Point::new(size.width / 2.0, size.height / 2.0);
        let radius = (size.width - 4.0) / 2.0;
        let mut sector = Shape::new();
        sector.move_to(center);
        sector.arc(center, radius, START_ANGLE, self.end_angle(), true);
        sector.close();
        out.fill(sector, self.progress_tint);
    }
}
