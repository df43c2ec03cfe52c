//! Mode-driven indicator selection
//!
//! A HUD shows at most one indicator. [`IndicatorSelector::reconcile`] maps the
//! current [`Mode`] to an indicator kind, remounting only when the kind (or the
//! identity of a custom view) changes and restyling in place otherwise.

use std::rc::Weak;
use std::time::Duration;

use hudkit_types::Mode;
use tiny_skia::Color;

use crate::geometry::{Rect, Size};
use crate::host::CustomView;
use crate::render::{colors, BarProgress, Drawing, RoundProgress, Spinner};

/// Alpha of the round indicator's unfilled disc relative to the tint
const BACKGROUND_TINT_ALPHA: f32 = 0.1;

/// Kind of the mounted indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    Spinner,
    Round,
    Bar,
    Custom,
    None,
}

/// The single mounted indicator
#[derive(Clone)]
pub enum ActiveIndicator {
    Spinner(Spinner),
    Round(RoundProgress),
    Bar(BarProgress),
    /// Host view, not owned by the HUD
    Custom(Weak<dyn CustomView>),
    None,
}

impl ActiveIndicator {
    pub fn kind(&self) -> IndicatorKind {
        match self {
            ActiveIndicator::Spinner(_) => IndicatorKind::Spinner,
            ActiveIndicator::Round(_) => IndicatorKind::Round,
            ActiveIndicator::Bar(_) => IndicatorKind::Bar,
            ActiveIndicator::Custom(_) => IndicatorKind::Custom,
            ActiveIndicator::None => IndicatorKind::None,
        }
    }
}

impl std::fmt::Debug for ActiveIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActiveIndicator::Spinner(s) => f.debug_tuple("Spinner").field(s).finish(),
            ActiveIndicator::Round(r) => f.debug_tuple("Round").field(r).finish(),
            ActiveIndicator::Bar(b) => f.debug_tuple("Bar").field(b).finish(),
            ActiveIndicator::Custom(_) => f.write_str("Custom"),
            ActiveIndicator::None => f.write_str("None"),
        }
    }
}

/// Owns the mounted indicator and keeps it in sync with mode, tint and
/// progress
#[derive(Debug)]
pub struct IndicatorSelector {
    active: ActiveIndicator,
    progress: f32,
    mounts: usize,
}

impl Default for IndicatorSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorSelector {
    pub fn new() -> Self {
        Self {
            active: ActiveIndicator::None,
            progress: 0.0,
            mounts: 0,
        }
    }

    pub fn active(&self) -> &ActiveIndicator {
        &self.active
    }

    pub fn kind(&self) -> IndicatorKind {
        self.active.kind()
    }

    /// Number of indicators mounted so far
    pub fn mount_count(&self) -> usize {
        self.mounts
    }

    /// Bring the mounted indicator in line with `mode`.
    ///
    /// Returns `true` if the previous indicator was replaced.
    pub fn reconcile(
        &mut self,
        mode: Mode,
        custom: Option<&Weak<dyn CustomView>>,
        tint: Color,
    ) -> bool {
        let custom = custom.filter(|view| view.strong_count() > 0);
        let wanted = match mode {
            Mode::Indeterminate => IndicatorKind::Spinner,
            Mode::Determinate | Mode::AnnularDeterminate => IndicatorKind::Round,
            Mode::DeterminateBar => IndicatorKind::Bar,
            Mode::CustomView if custom.is_some() => IndicatorKind::Custom,
            Mode::CustomView | Mode::TextOnly => IndicatorKind::None,
        };

        let same_custom = match (&self.active, custom) {
            (ActiveIndicator::Custom(mounted), Some(view)) => Weak::ptr_eq(mounted, view),
            _ => true,
        };

        let remount = wanted != self.kind() || !same_custom;
        if remount {
            let previous = self.kind();
            // Unmount before mounting the replacement
            self.active = ActiveIndicator::None;
            self.active = match wanted {
                IndicatorKind::Spinner => ActiveIndicator::Spinner(Spinner::new(tint)),
                IndicatorKind::Round => ActiveIndicator::Round(RoundProgress::default()),
                IndicatorKind::Bar => ActiveIndicator::Bar(BarProgress::default()),
                IndicatorKind::Custom => match custom {
                    Some(view) => ActiveIndicator::Custom(view.clone()),
                    None => ActiveIndicator::None,
                },
                IndicatorKind::None => ActiveIndicator::None,
            };
            if wanted != IndicatorKind::None {
                self.mounts += 1;
            }
            tracing::debug!(?previous, current = ?wanted, ?mode, "indicator remounted");
        }

        self.restyle(mode, tint);
        remount
    }

    fn restyle(&mut self, mode: Mode, tint: Color) {
        let progress = self.progress;
        match &mut self.active {
            ActiveIndicator::Spinner(spinner) => spinner.color = tint,
            ActiveIndicator::Round(round) => {
                round.annular = mode == Mode::AnnularDeterminate;
                round.progress_tint = tint;
                round.background_tint = colors::with_alpha(tint, BACKGROUND_TINT_ALPHA);
                round.set_progress(progress);
            }
            ActiveIndicator::Bar(bar) => {
                bar.line_color = tint;
                bar.progress_color = tint;
                bar.set_progress(progress);
            }
            ActiveIndicator::Custom(_) | ActiveIndicator::None => {}
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Forward progress to a determinate indicator; remembered for remounts
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress;
        match &mut self.active {
            ActiveIndicator::Round(round) => round.set_progress(progress),
            ActiveIndicator::Bar(bar) => bar.set_progress(progress),
            _ => {}
        }
    }

    pub fn intrinsic_size(&self) -> Size {
        match &self.active {
            ActiveIndicator::Spinner(s) => s.intrinsic_size(),
            ActiveIndicator::Round(r) => r.intrinsic_size(),
            ActiveIndicator::Bar(b) => b.intrinsic_size(),
            ActiveIndicator::Custom(view) => view
                .upgrade()
                .map(|v| v.intrinsic_size())
                .unwrap_or(Size::ZERO),
            ActiveIndicator::None => Size::ZERO,
        }
    }

    /// Hand the laid-out frame to a custom view
    pub fn set_frame(&self, frame: Rect) {
        if let ActiveIndicator::Custom(view) = &self.active {
            if let Some(view) = view.upgrade() {
                view.set_frame(frame);
            }
        }
    }

    /// Advance the spinner; returns `true` if it needs a redraw
    pub fn animate(&mut self, elapsed: Duration) -> bool {
        match &mut self.active {
            ActiveIndicator::Spinner(spinner) => spinner.animate_to(elapsed),
            _ => false,
        }
    }

    pub fn draw(&self, size: Size, out: &mut Drawing) {
        match &self.active {
            ActiveIndicator::Spinner(s) => s.draw(size, out),
            ActiveIndicator::Round(r) => r.draw(size, out),
            ActiveIndicator::Bar(b) => b.draw(size, out),
            ActiveIndicator::Custom(view) => {
                if let Some(view) = view.upgrade() {
                    view.draw(size, out);
                }
            }
            ActiveIndicator::None => {}
        }
    }
}
