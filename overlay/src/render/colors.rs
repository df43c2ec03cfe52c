//! Default palette for HUD rendering

use tiny_skia::Color;

#[inline]
pub fn white() -> Color {
    Color::WHITE
}

#[inline]
pub fn black() -> Color {
    Color::BLACK
}

#[inline]
pub fn transparent() -> Color {
    Color::TRANSPARENT
}

/// Default background (non-progress) tint of the round indicator
#[inline]
pub fn translucent_white() -> Color {
    with_alpha(Color::WHITE, 0.1)
}

/// Default bezel fill: black at 80%
#[inline]
pub fn bezel() -> Color {
    Color::from_rgba8(0, 0, 0, 204)
}

/// Center of the dimming gradient
#[inline]
pub fn dim_inner() -> Color {
    Color::TRANSPARENT
}

/// Edge of the dimming gradient
#[inline]
pub fn dim_outer() -> Color {
    with_alpha(Color::BLACK, 0.75)
}

/// Same color with its alpha replaced
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    let mut c = color;
    c.set_alpha(alpha.clamp(0.0, 1.0));
    c
}
