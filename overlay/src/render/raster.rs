//! tiny-skia rasterizer for HUD drawings

use std::path::Path;

use tiny_skia::{
    Color, FillRule, GradientStop, Paint, Pixmap, PixmapPaint, RadialGradient, SpreadMode,
    Stroke, Transform,
};

use super::{DrawOp, Drawing};
use crate::error::HudError;
use crate::geometry::Point;
use crate::lifecycle::{Appearance, Hud};

/// Software renderer backed by a tiny-skia pixmap
///
/// Drawings are first rendered into an offscreen layer, then composited onto
/// the target with the HUD's opacity and scale so the whole overlay fades and
/// zooms as one unit.
pub struct Renderer {
    target: Pixmap,
    layer: Pixmap,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Result<Self, HudError> {
        let target = Pixmap::new(width, height).ok_or(HudError::InvalidSurface { width, height })?;
        let layer = Pixmap::new(width, height).ok_or(HudError::InvalidSurface { width, height })?;
        Ok(Self { target, layer })
    }

    pub fn width(&self) -> u32 {
        self.target.width()
    }

    pub fn height(&self) -> u32 {
        self.target.height()
    }

    /// Fill the target with a solid color
    pub fn clear(&mut self, color: Color) {
        self.target.fill(color);
    }

    /// Draw a HUD as it currently appears, zooming about its bezel
    pub fn draw_hud(&mut self, hud: &Hud) {
        let pivot = hud.layout().bezel.center();
        self.draw(&super::scene(hud), hud.appearance(), pivot);
    }

    /// Draw `drawing` on top of the target's current contents, scaled by
    /// `appearance.scale` about `pivot`
    pub fn draw(&mut self, drawing: &Drawing, appearance: Appearance, pivot: Point) {
        if appearance.opacity <= 0.0 {
            return;
        }

        self.layer.fill(Color::TRANSPARENT);
        for op in drawing.ops() {
            draw_op(&mut self.layer, op);
        }

        let transform = Transform::from_translate(pivot.x, pivot.y)
            .pre_scale(appearance.scale, appearance.scale)
            .pre_translate(-pivot.x, -pivot.y);
        let paint = PixmapPaint {
            opacity: appearance.opacity.clamp(0.0, 1.0),
            ..PixmapPaint::default()
        };
        self.target
            .draw_pixmap(0, 0, self.layer.as_ref(), &paint, transform, None);
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.target
    }

    /// Premultiplied RGBA of a single pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.target
            .pixel(x, y)
            .map(|p| [p.red(), p.green(), p.blue(), p.alpha()])
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, HudError> {
        self.target
            .encode_png()
            .map_err(|e| HudError::Png(e.to_string()))
    }

    pub fn save_png(&self, path: &Path) -> Result<(), HudError> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes).map_err(|source| HudError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn draw_op(pixmap: &mut Pixmap, op: &DrawOp) {
    match op {
        DrawOp::Fill { shape, color } => {
            let Some(path) = shape.to_path() else {
                return;
            };
            let paint = solid(*color);
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
        DrawOp::Stroke {
            shape,
            color,
            width,
            cap,
        } => {
            let Some(path) = shape.to_path() else {
                return;
            };
            let paint = solid(*color);
            let stroke = Stroke {
                width: *width,
                line_cap: *cap,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
        DrawOp::RadialGradient {
            area,
            center,
            radius,
            inner,
            outer,
        } => {
            let Some(rect) = area.to_skia() else {
                return;
            };
            let c = tiny_skia::Point::from_xy(center.x, center.y);
            let Some(shader) = RadialGradient::new(
                c,
                c,
                *radius,
                vec![GradientStop::new(0.0, *inner), GradientStop::new(1.0, *outer)],
                SpreadMode::Pad,
                Transform::identity(),
            ) else {
                tracing::trace!(radius, "degenerate dim gradient skipped");
                return;
            };
            let paint = Paint {
                shader,
                anti_alias: true,
                ..Paint::default()
            };
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
        DrawOp::Text { text, .. } => {
            // Glyph rendering belongs to the host's text stack
            tracing::trace!(%text, "text op left to host");
        }
    }
}

fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}
