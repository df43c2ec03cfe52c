//! HUD lifecycle state machine
//!
//! ```text
//!              show, grace > 0
//!   Hidden ─────────────────────────▶ PendingGrace
//!    │  ▲                               │        │ grace fires,
//!    │  └─── grace fires, task done ────┘        │ task running
//!    │ show, grace = 0                           ▼
//!    └────────────────────────────────────────▶ Visible
//!                                               │    │ hide before
//!              animated hide                    │    │ min show time
//!   Hiding ◀────────────────────────────────────┘    ▼
//!    │                                      PendingMinShowHide
//!    │ animation ends                                │ min show fires
//!    ▼                                               │
//!   Hidden (finalize) ◀──── non-animated hide ───────┘
//! ```
//!
//! All time-based transitions are timers on the HUD's own [`TimerQueue`],
//! fired by [`Hud::poll`]. Side effects that hand control back to the host
//! (layout and redraw requests, completion callback, delegate, detaching from
//! the container) are queued during a step and delivered once the step is
//! over.

mod animation;
mod clock;
mod shared;
mod timers;

#[cfg(test)]
mod lifecycle_tests;

pub use animation::{Appearance, Transition, HIDE_TARGET_OPACITY, TRANSITION_DURATION};
pub use clock::{Clock, ManualClock, SystemClock};
pub use shared::SharedHud;
pub use timers::{TimerHandle, TimerKind, TimerQueue};

use std::rc::Weak;
use std::time::{Duration, Instant};

use hudkit_types::{AnimationStyle, Font, HudStyle, Mode};

use crate::dispatch::{CommandQueue, HudSender};
use crate::geometry::Size;
use crate::host::{Container, CustomView, HudDelegate, TextMeasurer, ViewId};
use crate::indicator::IndicatorSelector;
use crate::layout::{self, Layout, LayoutInput};
use crate::utils::{color_from_rgba, duration_from_secs};

/// Visibility phase of a HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    /// `show` called, waiting for the grace timer
    PendingGrace,
    Visible,
    /// `hide` called before the minimum show time elapsed
    PendingMinShowHide,
    /// Hide transition running; ends in `Hidden`
    Hiding,
}

/// Side effect delivered after a state-machine step
pub(crate) enum Effect {
    Layout {
        container: Weak<dyn Container>,
        id: ViewId,
    },
    Redraw {
        container: Weak<dyn Container>,
        id: ViewId,
    },
    Detach {
        container: Weak<dyn Container>,
        id: ViewId,
    },
    Completion(Box<dyn FnOnce()>),
    Notify {
        delegate: Weak<dyn HudDelegate>,
        id: ViewId,
    },
}

pub(crate) fn deliver(effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::Layout { container, id } => {
                if let Some(container) = container.upgrade() {
                    container.request_layout(id);
                }
            }
            Effect::Redraw { container, id } => {
                if let Some(container) = container.upgrade() {
                    container.request_redraw(id);
                }
            }
            Effect::Detach { container, id } => {
                if let Some(container) = container.upgrade() {
                    container.unsubscribe_bounds(id);
                    container.remove_child(id);
                    tracing::debug!(id = id.raw(), "hud detached");
                }
            }
            Effect::Completion(callback) => callback(),
            Effect::Notify { delegate, id } => {
                if let Some(delegate) = delegate.upgrade() {
                    delegate.hud_was_hidden(id);
                }
            }
        }
    }
}

/// A busy overlay
///
/// `Hud` is `!Send`: it keeps `Rc`/`Weak` handles to host objects and must
/// stay on the thread that created it. Other threads talk to it through a
/// [`HudSender`].
pub struct Hud {
    id: ViewId,
    style: HudStyle,
    label: String,
    details: String,
    progress: f32,
    task_in_progress: bool,

    custom_view: Option<Weak<dyn CustomView>>,
    delegate: Option<Weak<dyn HudDelegate>>,
    completion: Option<Box<dyn FnOnce()>>,
    container: Option<Weak<dyn Container>>,
    bounds: Size,

    clock: Box<dyn Clock>,
    measurer: Box<dyn TextMeasurer>,
    indicator: IndicatorSelector,
    layout: Layout,

    phase: Phase,
    timers: TimerQueue,
    grace_timer: Option<TimerHandle>,
    min_show_timer: Option<TimerHandle>,
    deferred_hide: Option<TimerHandle>,
    animation_timer: Option<TimerHandle>,
    show_animated: bool,
    hide_animated: bool,
    show_started: Option<Instant>,
    finished: bool,

    resting: Appearance,
    transition: Option<Transition>,
    spinner_epoch: Instant,

    commands: CommandQueue,
    needs_layout: bool,
    needs_redraw: bool,
    outbox: Vec<Effect>,
    defer_effects: bool,
}

impl Hud {
    pub fn new(
        style: HudStyle,
        clock: impl Clock + 'static,
        measurer: impl TextMeasurer + 'static,
    ) -> Self {
        let now = clock.now();
        let mut hud = Self {
            id: ViewId::next(),
            style,
            label: String::new(),
            details: String::new(),
            progress: 0.0,
            task_in_progress: false,
            custom_view: None,
            delegate: None,
            completion: None,
            container: None,
            bounds: Size::ZERO,
            clock: Box::new(clock),
            measurer: Box::new(measurer),
            indicator: IndicatorSelector::new(),
            layout: Layout::default(),
            phase: Phase::Hidden,
            timers: TimerQueue::new(),
            grace_timer: None,
            min_show_timer: None,
            deferred_hide: None,
            animation_timer: None,
            show_animated: false,
            hide_animated: false,
            show_started: None,
            finished: false,
            resting: Appearance::HIDDEN,
            transition: None,
            spinner_epoch: now,
            commands: CommandQueue::new(),
            needs_layout: false,
            needs_redraw: false,
            outbox: Vec::new(),
            defer_effects: false,
        };
        hud.update_indicator();
        hud.relayout();
        hud
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn style(&self) -> &HudStyle {
        &self.style
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn task_in_progress(&self) -> bool {
        self.task_in_progress
    }

    pub fn indicator(&self) -> &IndicatorSelector {
        &self.indicator
    }

    /// Last computed bezel size
    pub fn size(&self) -> Size {
        self.layout.size
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Size of the area the HUD covers
    pub fn bounds(&self) -> Size {
        self.container
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|c| c.bounds())
            .unwrap_or(self.bounds)
    }

    /// Instant the HUD last became visible, while it is showing
    pub fn visible_since(&self) -> Option<Instant> {
        self.show_started
    }

    /// Completion has run for the current show cycle
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn appearance(&self) -> Appearance {
        self.appearance_at(self.clock.now())
    }

    pub fn appearance_at(&self, now: Instant) -> Appearance {
        match &self.transition {
            Some(transition) => transition.sample(now),
            None => self.resting,
        }
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Earliest pending timer, for hosts that sleep between polls
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Setters
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the whole style
    pub fn set_style(&mut self, style: HudStyle) {
        self.style = style;
        self.update_indicator();
        self.relayout();
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.style.mode == mode {
            return;
        }
        self.style.mode = mode;
        self.update_indicator();
        self.relayout();
    }

    pub fn set_animation(&mut self, animation: AnimationStyle) {
        self.style.animation = animation;
    }

    pub fn set_indicator_color(&mut self, rgba: [u8; 4]) {
        self.style.indicator_color = rgba;
        self.update_indicator();
        self.redraw();
    }

    pub fn set_custom_view(&mut self, view: Option<Weak<dyn CustomView>>) {
        self.custom_view = view;
        self.update_indicator();
        self.relayout();
    }

    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress;
        self.indicator.set_progress(progress);
        self.redraw();
    }

    pub fn set_label(&mut self, text: impl Into<String>) {
        self.label = text.into();
        self.relayout();
    }

    pub fn set_details(&mut self, text: impl Into<String>) {
        self.details = text.into();
        self.relayout();
    }

    pub fn set_label_font(&mut self, font: Font) {
        self.style.label_font = font;
        self.relayout();
    }

    pub fn set_label_color(&mut self, rgba: [u8; 4]) {
        self.style.label_color = rgba;
        self.redraw();
    }

    pub fn set_details_font(&mut self, font: Font) {
        self.style.details_font = font;
        self.relayout();
    }

    pub fn set_details_color(&mut self, rgba: [u8; 4]) {
        self.style.details_color = rgba;
        self.redraw();
    }

    pub fn set_bezel_color(&mut self, rgba: [u8; 4]) {
        self.style.bezel_color = rgba;
        self.redraw();
    }

    pub fn set_dim_background(&mut self, dim: bool) {
        self.style.dim_background = dim;
        self.redraw();
    }

    pub fn set_margin(&mut self, margin: f32) {
        self.style.margin = margin;
        self.relayout();
    }

    pub fn set_corner_radius(&mut self, radius: f32) {
        self.style.corner_radius = radius;
        self.redraw();
    }

    pub fn set_min_size(&mut self, size: Size) {
        self.style.min_size = [size.width, size.height];
        self.relayout();
    }

    pub fn set_square(&mut self, square: bool) {
        self.style.square = square;
        self.relayout();
    }

    pub fn set_offset(&mut self, x: f32, y: f32) {
        self.style.x_offset = x;
        self.style.y_offset = y;
        self.relayout();
    }

    pub fn set_grace_time(&mut self, secs: f32) {
        self.style.grace_time = secs;
    }

    pub fn set_min_show_time(&mut self, secs: f32) {
        self.style.min_show_time = secs;
    }

    pub fn set_remove_on_hide(&mut self, remove: bool) {
        self.style.remove_on_hide = remove;
    }

    /// Whether the task the HUD represents is still running; checked when
    /// the grace period ends
    pub fn set_task_in_progress(&mut self, running: bool) {
        self.task_in_progress = running;
    }

    /// Called once when the HUD finishes hiding
    pub fn set_completion(&mut self, callback: impl FnOnce() + 'static) {
        self.completion = Some(Box::new(callback));
    }

    pub fn set_delegate(&mut self, delegate: Option<Weak<dyn HudDelegate>>) {
        self.delegate = delegate;
    }

    /// Bounds used while not attached to a container
    pub fn set_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
        self.relayout();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Show / hide
    // ─────────────────────────────────────────────────────────────────────────

    pub fn show(&mut self, animated: bool) {
        let now = self.clock.now();
        self.show_at(animated, now);
        self.flush();
    }

    pub fn hide(&mut self, animated: bool) {
        let now = self.clock.now();
        self.hide_at(animated, now);
        self.flush();
    }

    /// Hide after `delay`, replacing any earlier delayed hide
    pub fn hide_after_delay(&mut self, animated: bool, delay: Duration) {
        self.cancel_timer(TimerSlot::DeferredHide);
        let deadline = self.clock.now() + delay;
        self.deferred_hide = Some(
            self.timers
                .schedule(deadline, TimerKind::DeferredHide { animated }),
        );
        tracing::debug!(id = self.id.raw(), ?delay, animated, "hide scheduled");
    }

    /// Fire due timers and advance the spinner.
    ///
    /// Returns `true` if the HUD needs to be redrawn.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        let mut dirty = false;
        while let Some((handle, kind, deadline)) = self.timers.pop_due(now) {
            self.fire(handle, kind, deadline);
            dirty = true;
        }

        if matches!(
            self.phase,
            Phase::Visible | Phase::PendingMinShowHide | Phase::Hiding
        ) {
            let elapsed = now.saturating_duration_since(self.spinner_epoch);
            dirty |= self.indicator.animate(elapsed);
        }
        dirty |= self.transition.is_some();

        if dirty {
            self.redraw();
        }
        self.flush();
        dirty
    }

    /// Recompute the layout against the current bounds
    pub fn relayout(&mut self) {
        let bounds = self.bounds();
        let min_size = Size::new(self.style.min_size[0], self.style.min_size[1]);
        let input = LayoutInput {
            bounds,
            indicator: self.indicator.intrinsic_size(),
            label: &self.label,
            label_font: &self.style.label_font,
            details: &self.details,
            details_font: &self.style.details_font,
            margin: self.style.margin,
            x_offset: self.style.x_offset,
            y_offset: self.style.y_offset,
            square: self.style.square,
            min_size,
        };
        self.layout = layout::compute(&input, self.measurer.as_ref());
        self.indicator.set_frame(self.layout.indicator);
        self.needs_layout = true;
        self.redraw();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cross-thread commands
    // ─────────────────────────────────────────────────────────────────────────

    /// A `Send` handle for queuing commands from other threads
    pub fn sender(&self) -> HudSender {
        self.commands.sender()
    }

    /// Apply every queued command in arrival order; returns how many ran
    pub fn drain_commands(&mut self) -> usize {
        let mut applied = 0;
        while let Some(command) = self.commands.try_next() {
            self.apply(command);
            applied += 1;
        }
        if applied > 0 {
            tracing::trace!(id = self.id.raw(), applied, "commands drained");
        }
        applied
    }

    // ─────────────────────────────────────────────────────────────────────────
    // State machine
    // ─────────────────────────────────────────────────────────────────────────

    fn show_at(&mut self, animated: bool, now: Instant) {
        self.show_animated = animated;
        self.cancel_timer(TimerSlot::DeferredHide);
        self.cancel_timer(TimerSlot::MinShow);
        self.cancel_timer(TimerSlot::Grace);
        // A hide transition must not finalize the new show cycle
        self.cancel_timer(TimerSlot::Animation);
        if let Some(transition) = self.transition.take() {
            self.resting = transition.sample(now);
        }
        self.finished = false;

        let grace = duration_from_secs(self.style.grace_time);
        if grace > Duration::ZERO {
            self.grace_timer = Some(self.timers.schedule(now + grace, TimerKind::Grace));
            self.set_phase(Phase::PendingGrace);
        } else {
            self.enter_visible(animated, now);
        }
    }

    fn enter_visible(&mut self, animated: bool, at: Instant) {
        self.cancel_timer(TimerSlot::DeferredHide);
        self.cancel_timer(TimerSlot::Animation);
        self.set_phase(Phase::Visible);
        self.show_started = Some(at);
        self.spinner_epoch = at;
        self.relayout();

        if animated {
            let from = Appearance {
                opacity: self.appearance_at(at).opacity,
                scale: self.style.animation.show_from_scale(),
            };
            self.transition = Some(Transition::new(from, Appearance::VISIBLE, at));
            self.animation_timer = Some(
                self.timers
                    .schedule(at + TRANSITION_DURATION, TimerKind::ShowAnimationEnd),
            );
        } else {
            self.transition = None;
            self.resting = Appearance::VISIBLE;
        }
    }

    fn hide_at(&mut self, animated: bool, now: Instant) {
        self.hide_animated = animated;
        self.cancel_timer(TimerSlot::DeferredHide);
        if self.phase == Phase::PendingGrace {
            self.cancel_timer(TimerSlot::Grace);
        }

        let min_show = duration_from_secs(self.style.min_show_time);
        if let Some(started) = self.show_started {
            let shown_for = now.saturating_duration_since(started);
            if min_show > Duration::ZERO && shown_for < min_show {
                self.cancel_timer(TimerSlot::MinShow);
                let deadline = started + min_show;
                self.min_show_timer = Some(self.timers.schedule(deadline, TimerKind::MinShow));
                self.set_phase(Phase::PendingMinShowHide);
                tracing::debug!(
                    id = self.id.raw(),
                    remaining = ?(min_show - shown_for),
                    "hide deferred until minimum show time"
                );
                return;
            }
        }

        self.hide_now(animated, now);
    }

    fn hide_now(&mut self, animated: bool, at: Instant) {
        let animate = animated && self.show_started.is_some();
        self.show_started = None;

        if animate {
            let from = self.appearance_at(at);
            let to = Appearance {
                opacity: HIDE_TARGET_OPACITY,
                scale: self.style.animation.hide_to_scale(),
            };
            self.cancel_timer(TimerSlot::Animation);
            self.transition = Some(Transition::new(from, to, at));
            self.animation_timer = Some(
                self.timers
                    .schedule(at + TRANSITION_DURATION, TimerKind::HideAnimationEnd),
            );
            self.set_phase(Phase::Hiding);
        } else {
            self.resting = Appearance {
                opacity: 0.0,
                ..self.appearance_at(at)
            };
            self.transition = None;
            self.finalize(at);
        }
    }

    fn finalize(&mut self, at: Instant) {
        self.cancel_timer(TimerSlot::DeferredHide);
        self.cancel_timer(TimerSlot::Grace);
        self.cancel_timer(TimerSlot::MinShow);
        self.cancel_timer(TimerSlot::Animation);
        if self.finished {
            return;
        }
        self.finished = true;

        self.resting = Appearance {
            opacity: 0.0,
            ..self.appearance_at(at)
        };
        self.transition = None;
        self.set_phase(Phase::Hidden);

        if self.style.remove_on_hide {
            if let Some(container) = self.container.clone() {
                self.outbox.push(Effect::Detach {
                    container,
                    id: self.id,
                });
            }
        }
        if let Some(callback) = self.completion.take() {
            self.outbox.push(Effect::Completion(callback));
        }
        if let Some(delegate) = self.delegate.clone() {
            self.outbox.push(Effect::Notify {
                delegate,
                id: self.id,
            });
        }
        self.redraw();
    }

    fn fire(&mut self, handle: TimerHandle, kind: TimerKind, at: Instant) {
        tracing::trace!(id = self.id.raw(), ?kind, "timer fired");
        match kind {
            TimerKind::Grace => {
                self.clear_slot(TimerSlot::Grace, handle);
                if self.phase != Phase::PendingGrace {
                    return;
                }
                if self.task_in_progress {
                    self.enter_visible(self.show_animated, at);
                } else if self.resting.opacity > 0.0 {
                    // Still on screen from an interrupted hide
                    tracing::debug!(id = self.id.raw(), "task finished during grace period");
                    self.finalize(at);
                } else {
                    tracing::debug!(id = self.id.raw(), "task finished during grace period");
                    self.set_phase(Phase::Hidden);
                }
            }
            TimerKind::MinShow => {
                self.clear_slot(TimerSlot::MinShow, handle);
                self.hide_now(self.hide_animated, at);
            }
            TimerKind::DeferredHide { animated } => {
                self.clear_slot(TimerSlot::DeferredHide, handle);
                self.hide_at(animated, at);
            }
            TimerKind::ShowAnimationEnd => {
                self.clear_slot(TimerSlot::Animation, handle);
                if let Some(transition) = self.transition.take() {
                    self.resting = transition.to;
                }
            }
            TimerKind::HideAnimationEnd => {
                self.clear_slot(TimerSlot::Animation, handle);
                self.finalize(at);
            }
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            tracing::debug!(id = self.id.raw(), from = ?self.phase, to = ?phase, "hud phase");
            self.phase = phase;
        }
    }

    fn slot(&mut self, slot: TimerSlot) -> &mut Option<TimerHandle> {
        match slot {
            TimerSlot::Grace => &mut self.grace_timer,
            TimerSlot::MinShow => &mut self.min_show_timer,
            TimerSlot::DeferredHide => &mut self.deferred_hide,
            TimerSlot::Animation => &mut self.animation_timer,
        }
    }

    fn cancel_timer(&mut self, slot: TimerSlot) {
        if let Some(handle) = self.slot(slot).take() {
            self.timers.cancel(handle);
        }
    }

    fn clear_slot(&mut self, slot: TimerSlot, fired: TimerHandle) {
        let slot = self.slot(slot);
        if *slot == Some(fired) {
            *slot = None;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Host plumbing
    // ─────────────────────────────────────────────────────────────────────────

    fn update_indicator(&mut self) {
        let tint = color_from_rgba(self.style.indicator_color);
        self.indicator.set_progress(self.progress);
        self.indicator
            .reconcile(self.style.mode, self.custom_view.as_ref(), tint);
    }

    fn container(&self) -> Option<std::rc::Rc<dyn Container>> {
        self.container.as_ref().and_then(Weak::upgrade)
    }

    fn redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub(crate) fn set_container(&mut self, container: Weak<dyn Container>) {
        self.container = Some(container);
    }

    pub(crate) fn defer_effects(&mut self) {
        self.defer_effects = true;
    }

    /// Pending effects in delivery order; coalesced layout and redraw
    /// requests go first
    pub(crate) fn take_effects(&mut self) -> Vec<Effect> {
        let needs_layout = std::mem::take(&mut self.needs_layout);
        let needs_redraw = std::mem::take(&mut self.needs_redraw);
        let mut effects = Vec::with_capacity(self.outbox.len() + 2);
        if let Some(container) = &self.container {
            if needs_layout {
                effects.push(Effect::Layout {
                    container: container.clone(),
                    id: self.id,
                });
            }
            if needs_redraw {
                effects.push(Effect::Redraw {
                    container: container.clone(),
                    id: self.id,
                });
            }
        }
        effects.append(&mut self.outbox);
        effects
    }

    fn flush(&mut self) {
        if !self.defer_effects {
            deliver(self.take_effects());
        }
    }
}

impl Drop for Hud {
    fn drop(&mut self) {
        if let Some(container) = self.container() {
            container.unsubscribe_bounds(self.id);
        }
    }
}

impl std::fmt::Debug for Hud {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hud")
            .field("id", &self.id)
            .field("phase", &self.phase)
            .field("mode", &self.style.mode)
            .field("progress", &self.progress)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy)]
enum TimerSlot {
    Grace,
    MinShow,
    DeferredHide,
    Animation,
}
