//! Vector drawing model and the indicator renderers
//!
//! Renderers never touch pixels. They append [`DrawOp`]s to a [`Drawing`],
//! which the [`Renderer`] rasterizes with tiny-skia (or a host replays with its
//! own graphics API).

mod bar;
mod bezel;
pub mod colors;
mod raster;
mod round;
mod scene;
pub mod shape;
mod spinner;

pub use bar::{BarProgress, BarGeometry};
pub use bezel::{draw_bezel, draw_dim_background};
pub use raster::Renderer;
pub use round::RoundProgress;
pub use scene::scene;
pub use shape::{PathCmd, Shape};
pub use spinner::Spinner;

use hudkit_types::Font;
use tiny_skia::{Color, LineCap};

use crate::geometry::{Point, Rect};

/// Width of every stroked indicator outline
pub const LINE_WIDTH: f32 = 2.0;

/// A single drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Fill a shape (non-zero winding)
    Fill { shape: Shape, color: Color },
    /// Stroke a shape's outline
    Stroke {
        shape: Shape,
        color: Color,
        width: f32,
        cap: LineCap,
    },
    /// Fill `area` with a radial gradient from `inner` at `center` to
    /// `outer` at `radius`, padded beyond it
    RadialGradient {
        area: Rect,
        center: Point,
        radius: f32,
        inner: Color,
        outer: Color,
    },
    /// Text to be drawn by the host inside `frame`
    Text {
        text: String,
        font: Font,
        color: Color,
        frame: Rect,
        multiline: bool,
    },
}

impl DrawOp {
    fn translated(&self, dx: f32, dy: f32) -> DrawOp {
        match self {
            DrawOp::Fill { shape, color } => DrawOp::Fill {
                shape: shape.translated(dx, dy),
                color: *color,
            },
            DrawOp::Stroke {
                shape,
                color,
                width,
                cap,
            } => DrawOp::Stroke {
                shape: shape.translated(dx, dy),
                color: *color,
                width: *width,
                cap: *cap,
            },
            DrawOp::RadialGradient {
                area,
                center,
                radius,
                inner,
                outer,
            } => DrawOp::RadialGradient {
                area: Rect::new(area.x + dx, area.y + dy, area.width, area.height),
                center: Point::new(center.x + dx, center.y + dy),
                radius: *radius,
                inner: *inner,
                outer: *outer,
            },
            DrawOp::Text {
                text,
                font,
                color,
                frame,
                multiline,
            } => DrawOp::Text {
                text: text.clone(),
                font: font.clone(),
                color: *color,
                frame: Rect::new(frame.x + dx, frame.y + dy, frame.width, frame.height),
                multiline: *multiline,
            },
        }
    }
}

/// An ordered display list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Drawing {
    ops: Vec<DrawOp>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn fill(&mut self, shape: Shape, color: Color) {
        self.ops.push(DrawOp::Fill { shape, color });
    }

    pub fn stroke(&mut self, shape: Shape, color: Color, width: f32, cap: LineCap) {
        self.ops.push(DrawOp::Stroke {
            shape,
            color,
            width,
            cap,
        });
    }

    /// Append another drawing offset by `(dx, dy)`
    pub fn append_translated(&mut self, other: &Drawing, dx: f32, dy: f32) {
        self.ops
            .extend(other.ops.iter().map(|op| op.translated(dx, dy)));
    }

    /// Every shape in the drawing has finite coordinates
    pub fn is_finite(&self) -> bool {
        self.ops.iter().all(|op| match op {
            DrawOp::Fill { shape, .. } | DrawOp::Stroke { shape, .. } => shape.is_finite(),
            _ => true,
        })
    }
}

/// Clamp a progress value into `[0, 1]`; NaN counts as empty
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        tracing::trace!("NaN progress treated as 0");
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}
