//! Resolution-independent path description
//!
//! Renderers build `Shape`s out of straight lines and circular arcs. Tangent
//! arcs (`arc_to`) are resolved into a line plus an explicit `Arc` as soon as
//! they are added, so a finished shape only ever contains the commands below.
//! Conversion to a `tiny_skia::Path` happens at rasterization time.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use tiny_skia::{Path, PathBuilder};

use crate::geometry::{Point, Rect};

/// A single path command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    /// Circular arc. A line joins the current point to the arc start.
    ///
    /// `clockwise` means increasing angle, which is clockwise on a y-down
    /// screen. Angles are radians with 0 pointing along +x.
    Arc {
        center: Point,
        radius: f32,
        start: f32,
        end: f32,
        clockwise: bool,
    },
    /// Closed ellipse inscribed in the rect (its own subpath)
    Oval(Rect),
    Close,
}

/// An ordered list of path commands
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    cmds: Vec<PathCmd>,
    current: Option<Point>,
    subpath_start: Option<Point>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn oval(rect: Rect) -> Self {
        let mut shape = Self::new();
        shape.push_oval(rect);
        shape
    }

    /// Full circle starting at `start` and sweeping clockwise
    pub fn circle(center: Point, radius: f32, start: f32) -> Self {
        let mut shape = Self::new();
        shape.arc(center, radius, start, start + TAU, true);
        shape
    }

    /// Rounded rectangle with the same radius in every corner
    pub fn rounded_rect(rect: Rect, radius: f32) -> Self {
        let r = radius.clamp(0.0, rect.width.min(rect.height) / 2.0);
        let mut shape = Self::new();
        shape.move_to(Point::new(rect.min_x() + r, rect.min_y()));
        shape.arc(
            Point::new(rect.max_x() - r, rect.min_y() + r),
            r,
            3.0 * FRAC_PI_2,
            0.0,
            true,
        );
        shape.arc(
            Point::new(rect.max_x() - r, rect.max_y() - r),
            r,
            0.0,
            FRAC_PI_2,
            true,
        );
        shape.arc(
            Point::new(rect.min_x() + r, rect.max_y() - r),
            r,
            FRAC_PI_2,
            PI,
            true,
        );
        shape.arc(
            Point::new(rect.min_x() + r, rect.min_y() + r),
            r,
            PI,
            3.0 * FRAC_PI_2,
            true,
        );
        shape.close();
        shape
    }

    pub fn cmds(&self) -> &[PathCmd] {
        &self.cmds
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn current_point(&self) -> Option<Point> {
        self.current
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.cmds.push(PathCmd::MoveTo(p));
        self.current = Some(p);
        self.subpath_start = Some(p);
        self
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        if self.current.is_none() {
            return self.move_to(p);
        }
        self.cmds.push(PathCmd::LineTo(p));
        self.current = Some(p);
        self
    }

    pub fn arc(
        &mut self,
        center: Point,
        radius: f32,
        start: f32,
        end: f32,
        clockwise: bool,
    ) -> &mut Self {
        let start_point = point_on_circle(center, radius, start);
        if self.current.is_none() {
            self.subpath_start = Some(start_point);
        }
        self.cmds.push(PathCmd::Arc {
            center,
            radius,
            start,
            end,
            clockwise,
        });
        let sweep = normalized_sweep(start, end, clockwise);
        self.current = Some(point_on_circle(center, radius, start + sweep));
        self
    }

    /// Tangent arc: round the corner formed by the current point, `corner`
    /// and `toward` with the given radius.
    ///
    /// Adds a line to the first tangent point and an arc to the second. When
    /// the three points are collinear or the radius is zero this degrades to
    /// a plain line to `corner`.
    pub fn arc_to(&mut self, corner: Point, toward: Point, radius: f32) -> &mut Self {
        let Some(from) = self.current else {
            return self.move_to(corner);
        };

        let v1 = normalize(from.x - corner.x, from.y - corner.y);
        let v2 = normalize(toward.x - corner.x, toward.y - corner.y);
        let (Some(v1), Some(v2)) = (v1, v2) else {
            return self.line_to(corner);
        };

        let cos_theta = (v1.x * v2.x + v1.y * v2.y).clamp(-1.0, 1.0);
        let theta = cos_theta.acos();
        if radius <= 0.0 || theta.abs() < 1e-6 || (PI - theta).abs() < 1e-6 {
            return self.line_to(corner);
        }

        let tangent_dist = radius / (theta / 2.0).tan();
        let t1 = Point::new(corner.x + v1.x * tangent_dist, corner.y + v1.y * tangent_dist);
        let t2 = Point::new(corner.x + v2.x * tangent_dist, corner.y + v2.y * tangent_dist);

        let Some(bisector) = normalize(v1.x + v2.x, v1.y + v2.y) else {
            return self.line_to(corner);
        };
        let center_dist = radius / (theta / 2.0).sin();
        let center = Point::new(
            corner.x + bisector.x * center_dist,
            corner.y + bisector.y * center_dist,
        );

        let start = (t1.y - center.y).atan2(t1.x - center.x);
        let end = (t2.y - center.y).atan2(t2.x - center.x);
        let mut delta = end - start;
        if delta > PI {
            delta -= TAU;
        } else if delta < -PI {
            delta += TAU;
        }

        if t1.distance(from) > 1e-4 {
            self.line_to(t1);
        }
        self.arc(center, radius, start, end, delta > 0.0)
    }

    /// Add a closed ellipse as its own subpath
    pub fn push_oval(&mut self, rect: Rect) -> &mut Self {
        self.cmds.push(PathCmd::Oval(rect));
        self.current = None;
        self.subpath_start = None;
        self
    }

    pub fn close(&mut self) -> &mut Self {
        if self.current.is_some() {
            self.cmds.push(PathCmd::Close);
            self.current = self.subpath_start;
        }
        self
    }

    /// Copy of the shape offset by `(dx, dy)`
    pub fn translated(&self, dx: f32, dy: f32) -> Shape {
        let mut out = Shape::new();
        let shift = |p: Point| Point::new(p.x + dx, p.y + dy);
        for cmd in self.cmds() {
            match *cmd {
                PathCmd::MoveTo(p) => {
                    out.move_to(shift(p));
                }
                PathCmd::LineTo(p) => {
                    out.line_to(shift(p));
                }
                PathCmd::Arc {
                    center,
                    radius,
                    start,
                    end,
                    clockwise,
                } => {
                    out.arc(shift(center), radius, start, end, clockwise);
                }
                PathCmd::Oval(r) => {
                    out.push_oval(Rect::new(r.x + dx, r.y + dy, r.width, r.height));
                }
                PathCmd::Close => {
                    out.close();
                }
            }
        }
        out
    }

    /// Every coordinate and angle in the shape is finite
    pub fn is_finite(&self) -> bool {
        self.cmds.iter().all(|cmd| match *cmd {
            PathCmd::MoveTo(p) | PathCmd::LineTo(p) => p.x.is_finite() && p.y.is_finite(),
            PathCmd::Arc {
                center,
                radius,
                start,
                end,
                ..
            } => {
                center.x.is_finite()
                    && center.y.is_finite()
                    && radius.is_finite()
                    && start.is_finite()
                    && end.is_finite()
            }
            PathCmd::Oval(r) => {
                r.x.is_finite() && r.y.is_finite() && r.width.is_finite() && r.height.is_finite()
            }
            PathCmd::Close => true,
        })
    }

    /// Arcs in command order
    pub fn arcs(&self) -> impl Iterator<Item = (Point, f32, f32, f32, bool)> + '_ {
        self.cmds.iter().filter_map(|cmd| match *cmd {
            PathCmd::Arc {
                center,
                radius,
                start,
                end,
                clockwise,
            } => Some((center, radius, start, end, clockwise)),
            _ => None,
        })
    }

    /// Convert to a tiny-skia path, approximating arcs with cubic curves.
    ///
    /// Returns `None` for shapes that produce no drawable geometry.
    pub fn to_path(&self) -> Option<Path> {
        let mut pb = PathBuilder::new();
        let mut has_current = false;

        for cmd in &self.cmds {
            match *cmd {
                PathCmd::MoveTo(p) => {
                    pb.move_to(p.x, p.y);
                    has_current = true;
                }
                PathCmd::LineTo(p) => {
                    if has_current {
                        pb.line_to(p.x, p.y);
                    } else {
                        pb.move_to(p.x, p.y);
                        has_current = true;
                    }
                }
                PathCmd::Arc {
                    center,
                    radius,
                    start,
                    end,
                    clockwise,
                } => {
                    let p0 = point_on_circle(center, radius, start);
                    if has_current {
                        pb.line_to(p0.x, p0.y);
                    } else {
                        pb.move_to(p0.x, p0.y);
                        has_current = true;
                    }
                    append_arc(&mut pb, center, radius, start, normalized_sweep(start, end, clockwise));
                }
                PathCmd::Oval(rect) => {
                    if let Some(r) = rect.to_skia() {
                        pb.push_oval(r);
                    }
                    has_current = false;
                }
                PathCmd::Close => {
                    if has_current {
                        pb.close();
                    }
                }
            }
        }

        pb.finish()
    }
}

/// Signed sweep from `start` to `end` in the given direction, within one turn.
///
/// A difference of a full turn or more draws a full circle.
pub fn normalized_sweep(start: f32, end: f32, clockwise: bool) -> f32 {
    let diff = end - start;
    if clockwise {
        if diff >= TAU {
            TAU
        } else if diff < 0.0 {
            diff.rem_euclid(TAU)
        } else {
            diff
        }
    } else if diff <= -TAU {
        -TAU
    } else if diff > 0.0 {
        diff.rem_euclid(TAU) - TAU
    } else {
        diff
    }
}

pub fn point_on_circle(center: Point, radius: f32, angle: f32) -> Point {
    Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

fn normalize(x: f32, y: f32) -> Option<Point> {
    let len = (x * x + y * y).sqrt();
    if len < 1e-6 || !len.is_finite() {
        None
    } else {
        Some(Point::new(x / len, y / len))
    }
}

/// Append cubic segments of at most a quarter turn each
fn append_arc(pb: &mut PathBuilder, center: Point, radius: f32, start: f32, sweep: f32) {
    if sweep == 0.0 || radius <= 0.0 {
        return;
    }
    let segments = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / segments as f32;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let mut a0 = start;
    for _ in 0..segments {
        let a1 = a0 + step;
        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();
        let p1 = Point::new(center.x + radius * (c0 - k * s0), center.y + radius * (s0 + k * c0));
        let p2 = Point::new(center.x + radius * (c1 + k * s1), center.y + radius * (s1 - k * c1));
        let p3 = Point::new(center.x + radius * c1, center.y + radius * s1);
        pb.cubic_to(p1.x, p1.y, p2.x, p2.y, p3.x, p3.y);
        a0 = a1;
    }
}
