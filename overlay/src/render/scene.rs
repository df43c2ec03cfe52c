//! Full HUD composition

use super::{bezel, DrawOp, Drawing};
use crate::lifecycle::Hud;
use crate::utils::color_from_rgba;

/// Everything a HUD draws, back to front, in container coordinates.
///
/// The whole drawing is meant to be composited with [`Hud::appearance`].
pub fn scene(hud: &Hud) -> Drawing {
    let style = hud.style();
    let layout = hud.layout();
    let mut out = Drawing::new();

    if style.dim_background {
        bezel::draw_dim_background(hud.bounds(), &mut out);
    }
    bezel::draw_bezel(
        layout.bezel,
        style.corner_radius,
        color_from_rgba(style.bezel_color),
        &mut out,
    );

    let mut indicator = Drawing::new();
    hud.indicator().draw(layout.indicator.size(), &mut indicator);
    out.append_translated(&indicator, layout.indicator.x, layout.indicator.y);

    if !hud.label().is_empty() {
        out.push(DrawOp::Text {
            text: hud.label().to_string(),
            font: style.label_font.clone(),
            color: color_from_rgba(style.label_color),
            frame: layout.label,
            multiline: false,
        });
    }
    if !hud.details().is_empty() {
        out.push(DrawOp::Text {
            text: hud.details().to_string(),
            font: style.details_font.clone(),
            color: color_from_rgba(style.details_color),
            frame: layout.details,
            multiline: true,
        });
    }
    out
}
