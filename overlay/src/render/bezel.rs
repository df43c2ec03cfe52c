//! HUD chrome: the dimmed backdrop and the rounded bezel

use tiny_skia::Color;

use super::{colors, DrawOp, Drawing, Shape};
use crate::geometry::{Rect, Size};

/// Radial gradient over the whole container, clear in the center and
/// darkening towards the edges
pub fn draw_dim_background(bounds: Size, out: &mut Drawing) {
    let area = Rect::from_size(bounds);
    out.push(DrawOp::RadialGradient {
        area,
        center: area.center(),
        radius: bounds.width.min(bounds.height),
        inner: colors::dim_inner(),
        outer: colors::dim_outer(),
    });
}

/// Rounded bezel rect behind the indicator and labels
pub fn draw_bezel(rect: Rect, corner_radius: f32, color: Color, out: &mut Drawing) {
    if rect.size().is_empty() {
        return;
    }
    out.fill(Shape::rounded_rect(rect, corner_radius), color);
}
