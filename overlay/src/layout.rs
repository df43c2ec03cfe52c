//! Bezel and content layout
//!
//! Content is stacked vertically (indicator, label, details) and centered in
//! the container, shifted by the configured offsets. The bezel grows around
//! the stack by `margin` on each side, then the square and minimum size rules
//! apply.

use hudkit_types::Font;

use crate::geometry::{Rect, Size};
use crate::host::TextMeasurer;

/// Vertical gap between stacked elements
pub const PADDING: f32 = 4.0;

/// Everything layout needs to know about a HUD
#[derive(Debug, Clone)]
pub struct LayoutInput<'a> {
    /// Container bounds
    pub bounds: Size,
    /// Intrinsic size of the mounted indicator (zero if none)
    pub indicator: Size,
    pub label: &'a str,
    pub label_font: &'a Font,
    pub details: &'a str,
    pub details_font: &'a Font,
    pub margin: f32,
    pub x_offset: f32,
    pub y_offset: f32,
    pub square: bool,
    pub min_size: Size,
}

/// Computed frames, all in container coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    /// Bezel size
    pub size: Size,
    pub bezel: Rect,
    pub indicator: Rect,
    pub label: Rect,
    pub details: Rect,
}

pub fn compute(input: &LayoutInput<'_>, measurer: &dyn TextMeasurer) -> Layout {
    let bounds = input.bounds;
    let margin = input.margin;
    let max_width = bounds.width - 4.0 * margin;
    let mut total = Size::ZERO;

    let indicator = Size::new(input.indicator.width.min(max_width), input.indicator.height);
    total.width = total.width.max(indicator.width);
    total.height += indicator.height;

    let mut label = measurer.measure_line(input.label, input.label_font);
    label.width = label.width.min(max_width);
    total.width = total.width.max(label.width);
    total.height += label.height;
    let gap_after_indicator = label.height > 0.0 && indicator.height > 0.0;
    if gap_after_indicator {
        total.height += PADDING;
    }

    let remaining = bounds.height - total.height - PADDING - 4.0 * margin;
    let details = measurer.measure_multiline(
        input.details,
        input.details_font,
        Size::new(max_width, remaining),
    );
    total.width = total.width.max(details.width);
    total.height += details.height;
    let gap_before_details =
        details.height > 0.0 && (indicator.height > 0.0 || label.height > 0.0);
    if gap_before_details {
        total.height += PADDING;
    }

    total.width += 2.0 * margin;
    total.height += 2.0 * margin;

    let mut y = ((bounds.height - total.height) / 2.0).round() + margin + input.y_offset;
    let centered_x = |width: f32| ((bounds.width - width) / 2.0).round() + input.x_offset;

    let indicator_frame = Rect::new(centered_x(indicator.width), y, indicator.width, indicator.height);
    y += indicator.height;

    if gap_after_indicator {
        y += PADDING;
    }
    let label_frame = Rect::new(centered_x(label.width), y, label.width, label.height);
    y += label.height;

    if gap_before_details {
        y += PADDING;
    }
    let details_frame = Rect::new(centered_x(details.width), y, details.width, details.height);

    if input.square {
        let side = total.width.max(total.height);
        if side <= bounds.width - 2.0 * margin {
            total.width = side;
        }
        if side <= bounds.height - 2.0 * margin {
            total.height = side;
        }
    }
    total.width = total.width.max(input.min_size.width);
    total.height = total.height.max(input.min_size.height);

    let bezel = Rect::new(
        ((bounds.width - total.width) / 2.0).round() + input.x_offset,
        ((bounds.height - total.height) / 2.0).round() + input.y_offset,
        total.width,
        total.height,
    );

    Layout {
        size: total,
        bezel,
        indicator: indicator_frame,
        label: label_frame,
        details: details_frame,
    }
}
