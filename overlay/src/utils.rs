//! Small helpers shared by the renderers and the lifecycle
//!
//! Number formatting for labels lives in `hudkit_types::formatting`.

use tiny_skia::Color;

pub use hudkit_types::formatting;

/// Convert [u8; 4] RGBA array to tiny_skia Color
#[inline]
pub fn color_from_rgba(rgba: [u8; 4]) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Convert seconds from a style file into a duration; negative and NaN
/// values become zero
pub fn duration_from_secs(secs: f32) -> std::time::Duration {
    if secs.is_nan() {
        return std::time::Duration::ZERO;
    }
    std::time::Duration::from_secs_f32(secs.clamp(0.0, u32::MAX as f32))
}

/// Percentage text for a details label
///
/// Delegates to [`formatting::format_percent`].
pub fn progress_text(progress: f32) -> String {
    formatting::format_percent(progress)
}
