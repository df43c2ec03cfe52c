//! Horizontal bar progress indicator
//!
//! The track is a rounded rectangle inset by 2 units. The fill sits 2 units
//! inside the track and is built differently depending on where its right
//! edge (`progress * width`) lands: in the left end cap, in the straight
//! middle span, or in the right end cap.

use std::f32::consts::PI;

use tiny_skia::{Color, LineCap};

use super::{clamp_progress, colors, Drawing, Shape, LINE_WIDTH};
use crate::geometry::{Point, Size};

/// Which construction the fill uses for a given progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarGeometry {
    /// Nothing filled, track only
    Empty,
    /// Fill edge inside the left rounded end
    LeftCap,
    /// Fill edge on the straight span
    Middle,
    /// Fill edge inside the right rounded end
    RightCap,
}

/// Flat bar progress indicator
#[derive(Debug, Clone, PartialEq)]
pub struct BarProgress {
    progress: f32,
    /// Track border color
    pub line_color: Color,
    /// Track fill behind the progress
    pub remaining_color: Color,
    /// Progress fill color
    pub progress_color: Color,
}

impl Default for BarProgress {
    fn default() -> Self {
        Self {
            progress: 0.0,
            line_color: colors::white(),
            remaining_color: colors::transparent(),
            progress_color: colors::white(),
        }
    }
}

impl BarProgress {
    /// Size of the built-in bar indicator
    pub const SIZE: Size = Size::new(120.0, 20.0);

    pub fn new() -> Self {
        Self::default()
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

    /// Which fill construction applies at the current progress
    pub fn geometry(&self, size: Size) -> BarGeometry {
        let radius = fill_radius(size);
        let amount = self.progress * size.width;

        if amount >= radius + 4.0 && amount <= size.width - radius - 4.0 {
            BarGeometry::Middle
        } else if amount > radius + 4.0 {
            BarGeometry::RightCap
        } else if amount < radius + 4.0 && amount > 0.0 {
            BarGeometry::LeftCap
        } else {
            BarGeometry::Empty
        }
    }

    pub fn draw(&self, size: Size, out: &mut Drawing) {
        let track = track_shape(size);
        out.fill(track.clone(), self.remaining_color);
        out.stroke(track, self.line_color, LINE_WIDTH, LineCap::Butt);

        let fill = match self.geometry(size) {
            BarGeometry::Middle => self.middle_fill(size),
            BarGeometry::RightCap => self.right_cap_fill(size),
            BarGeometry::LeftCap => left_cap_fill(size),
            BarGeometry::Empty => return,
        };
        out.fill(fill, self.progress_color);
    }

    fn middle_fill(&self, size: Size) -> Shape {
        let (w, h) = (size.width, size.height);
        let r = fill_radius(size);
        let amount = self.progress * w;

        let mut s = Shape::new();
        s.move_to(Point::new(4.0, h / 2.0));
        s.arc_to(Point::new(4.0, 4.0), Point::new(r + 4.0, 4.0), r);
        s.line_to(Point::new(amount, 4.0));
        s.line_to(Point::new(amount, r + 4.0));

        s.move_to(Point::new(4.0, h / 2.0));
        s.arc_to(Point::new(4.0, h - 4.0), Point::new(r + 4.0, h - 4.0), r);
        s.line_to(Point::new(amount, h - 4.0));
        s.line_to(Point::new(amount, r + 4.0));
        s
    }

    fn right_cap_fill(&self, size: Size) -> Shape {
        let (w, h) = (size.width, size.height);
        let r = fill_radius(size);
        let amount = self.progress * w;
        let cap_x = w - r - 4.0;
        let x = amount - cap_x;
        let cap_center = Point::new(cap_x, h / 2.0);

        let mut s = Shape::new();
        s.move_to(Point::new(4.0, h / 2.0));
        s.arc_to(Point::new(4.0, 4.0), Point::new(r + 4.0, 4.0), r);
        s.line_to(Point::new(cap_x, 4.0));
        s.arc(cap_center, r, PI, cap_angle(-(x / r).acos()), true);
        s.line_to(Point::new(amount, h / 2.0));

        s.move_to(Point::new(4.0, h / 2.0));
        s.arc_to(Point::new(4.0, h - 4.0), Point::new(r + 4.0, h - 4.0), r);
        s.line_to(Point::new(cap_x, h - 4.0));
        s.arc(cap_center, r, -PI, cap_angle((x / r).acos()), false);
        s.line_to(Point::new(amount, h / 2.0));
        s
    }
}

/// Radius of the track's rounded ends
fn track_radius(size: Size) -> f32 {
    size.height / 2.0 - 2.0
}

/// Radius of the fill's rounded ends
fn fill_radius(size: Size) -> f32 {
    track_radius(size) - 2.0
}

/// An out-of-domain `acos` yields NaN; such arcs end at angle zero.
fn cap_angle(angle: f32) -> f32 {
    if angle.is_nan() {
        tracing::trace!("bar end cap angle out of domain, using 0");
        0.0
    } else {
        angle
    }
}

fn track_shape(size: Size) -> Shape {
    let (w, h) = (size.width, size.height);
    let r = track_radius(size);

    let mut s = Shape::new();
    s.move_to(Point::new(2.0, h / 2.0));
    s.arc_to(Point::new(2.0, 2.0), Point::new(r + 2.0, 2.0), r);
    s.line_to(Point::new(w - r - 2.0, 2.0));
    s.arc_to(Point::new(w - 2.0, 2.0), Point::new(w - 2.0, h / 2.0), r);
    s.arc_to(Point::new(w - 2.0, h - 2.0), Point::new(w - r - 2.0, h - 2.0), r);
    s.line_to(Point::new(r + 2.0, h - 2.0));
    s.arc_to(Point::new(2.0, h - 2.0), Point::new(2.0, h / 2.0), r);
    s.close();
    s
}

/// The left cap is always filled whole once any progress exists
fn left_cap_fill(size: Size) -> Shape {
    let h = size.height;
    let r = fill_radius(size);

    let mut s = Shape::new();
    s.move_to(Point::new(4.0, h / 2.0));
    s.arc_to(Point::new(4.0, 4.0), Point::new(r + 4.0, 4.0), r);
    s.line_to(Point::new(r + 4.0, h / 2.0));

    s.move_to(Point::new(4.0, h / 2.0));
    s.arc_to(Point::new(4.0, h - 4.0), Point::new(r + 4.0, h - 4.0), r);
    s.line_to(Point::new(r + 4.0, h / 2.0));
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawOp, PathCmd};

    const SIZE: Size = Size::new(100.0, 20.0);

    fn bar(progress: f32) -> BarProgress {
        let mut bar = BarProgress::new();
        bar.set_progress(progress);
        bar
    }

    fn render(progress: f32) -> Drawing {
        let mut out = Drawing::new();
        bar(progress).draw(SIZE, &mut out);
        out
    }

    fn fill_shape(drawing: &Drawing) -> &Shape {
        let DrawOp::Fill { shape, .. } = &drawing.ops()[2] else {
            panic!("expected progress fill");
        };
        shape
    }

    #[test]
    fn test_half_progress_is_middle_span() {
        // Track radius 8, fill radius 6: the middle span is [10, 90]
        assert_eq!(track_radius(SIZE), 8.0);
        assert_eq!(bar(0.5).geometry(SIZE), BarGeometry::Middle);

        let drawing = render(0.5);
        assert_eq!(drawing.len(), 3);
        let shape = fill_shape(&drawing);
        assert!(shape.cmds().contains(&PathCmd::LineTo(Point::new(50.0, 4.0))));
        assert!(shape.cmds().contains(&PathCmd::LineTo(Point::new(50.0, 16.0))));
    }

    #[test]
    fn test_geometry_cases() {
        assert_eq!(bar(0.0).geometry(SIZE), BarGeometry::Empty);
        assert_eq!(bar(0.05).geometry(SIZE), BarGeometry::LeftCap);
        assert_eq!(bar(0.1).geometry(SIZE), BarGeometry::Middle);
        assert_eq!(bar(0.9).geometry(SIZE), BarGeometry::Middle);
        assert_eq!(bar(0.95).geometry(SIZE), BarGeometry::RightCap);
        assert_eq!(bar(1.0).geometry(SIZE), BarGeometry::RightCap);
    }

    #[test]
    fn test_empty_bar_is_track_only() {
        assert_eq!(render(0.0).len(), 2);
        assert_eq!(render(0.0), render(-1.0));
    }

    #[test]
    fn test_overfull_matches_full() {
        assert_eq!(render(1.0), render(3.0));
    }

    #[test]
    fn test_full_bar_clamps_out_of_domain_angle_to_zero() {
        // At 100% x = 10 > r = 6, so acos is undefined for both cap arcs
        let drawing = render(1.0);
        assert!(drawing.is_finite());

        let shape = fill_shape(&drawing);
        let cap_arcs: Vec<_> = shape
            .arcs()
            .filter(|(center, ..)| *center == Point::new(90.0, 10.0))
            .collect();
        assert_eq!(cap_arcs.len(), 2);
        assert_eq!(cap_arcs[0].2, PI);
        assert_eq!(cap_arcs[0].3, 0.0);
        assert!(cap_arcs[0].4);
        assert_eq!(cap_arcs[1].2, -PI);
        assert_eq!(cap_arcs[1].3, 0.0);
        assert!(!cap_arcs[1].4);
    }

    #[test]
    fn test_right_cap_angle_inside_domain() {
        // amount = 93 => x = 3 => acos(0.5) = 60°
        let shape_owner = render(0.93);
        let shape = fill_shape(&shape_owner);
        let cap: Vec<_> = shape
            .arcs()
            .filter(|(center, ..)| *center == Point::new(90.0, 10.0))
            .collect();
        assert!((cap[0].3 + PI / 3.0).abs() < 1e-4);
        assert!((cap[1].3 - PI / 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_left_cap_ignores_exact_amount() {
        let a = render(0.02);
        let b = render(0.08);
        assert_eq!(fill_shape(&a), fill_shape(&b));
    }

    #[test]
    fn test_track_is_closed_rounded_rect() {
        let drawing = render(0.0);
        let DrawOp::Stroke { shape, width, .. } = &drawing.ops()[1] else {
            panic!("expected track stroke");
        };
        assert_eq!(*width, 2.0);
        assert_eq!(shape.arcs().count(), 4);
        assert_eq!(*shape.cmds().last().unwrap(), PathCmd::Close);
        let bounds = shape.to_path().unwrap().bounds();
        assert!((bounds.left() - 2.0).abs() < 0.01);
        assert!((bounds.right() - 98.0).abs() < 0.01);
        assert!((bounds.top() - 2.0).abs() < 0.01);
        assert!((bounds.bottom() - 18.0).abs() < 0.01);
    }
}
