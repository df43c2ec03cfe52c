//! Timing scenarios driven by a manual clock

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use hudkit_types::{AnimationStyle, HudStyle, Mode};

use super::*;
use crate::geometry::Size;
use crate::finder::hud_for;
use crate::host::{
    ApproximateMeasurer, ChildView, Container, HeadlessContainer, HudDelegate, ViewId,
};
use crate::indicator::{ActiveIndicator, IndicatorKind};
use crate::render::scene;

fn setup(style: HudStyle) -> (Rc<ManualClock>, Hud) {
    let clock = Rc::new(ManualClock::new());
    let mut hud = Hud::new(style, clock.clone(), ApproximateMeasurer);
    hud.set_bounds(Size::new(320.0, 480.0));
    (clock, hud)
}

fn at(clock: &ManualClock, secs: f32) {
    clock.set_elapsed(Duration::from_secs_f32(secs));
}

fn counter(hud: &mut Hud) -> Rc<Cell<u32>> {
    let calls = Rc::new(Cell::new(0));
    let c = calls.clone();
    hud.set_completion(move || c.set(c.get() + 1));
    calls
}

fn style_with(f: impl FnOnce(&mut HudStyle)) -> HudStyle {
    let mut style = HudStyle::default();
    f(&mut style);
    style
}

// ─────────────────────────────────────────────────────────────────────────────
// Show
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_show_without_grace_is_synchronous() {
    let (clock, mut hud) = setup(HudStyle::default());
    assert_eq!(hud.phase(), Phase::Hidden);
    assert_eq!(hud.appearance(), Appearance::HIDDEN);

    hud.show(false);
    assert_eq!(hud.phase(), Phase::Visible);
    assert_eq!(hud.visible_since(), Some(clock.now()));
    assert_eq!(hud.appearance(), Appearance::VISIBLE);
}

#[test]
fn test_negative_grace_counts_as_zero() {
    let (_clock, mut hud) = setup(style_with(|s| s.grace_time = -2.0));
    hud.show(false);
    assert_eq!(hud.phase(), Phase::Visible);
}

#[test]
fn test_grace_shows_once_task_still_running() {
    let (clock, mut hud) = setup(style_with(|s| s.grace_time = 0.5));
    hud.set_task_in_progress(true);
    hud.show(false);
    assert_eq!(hud.phase(), Phase::PendingGrace);

    at(&clock, 0.49);
    hud.poll();
    assert_eq!(hud.phase(), Phase::PendingGrace);
    assert_eq!(hud.appearance().opacity, 0.0);

    at(&clock, 0.5);
    hud.poll();
    assert_eq!(hud.phase(), Phase::Visible);
    assert_eq!(
        hud.visible_since(),
        Some(clock.origin() + Duration::from_millis(500))
    );
}

#[test]
fn test_late_poll_keeps_exact_grace_deadline() {
    let (clock, mut hud) = setup(style_with(|s| s.grace_time = 0.5));
    hud.set_task_in_progress(true);
    hud.show(false);

    at(&clock, 0.8);
    hud.poll();
    assert_eq!(
        hud.visible_since(),
        Some(clock.origin() + Duration::from_millis(500))
    );
}

#[test]
fn test_grace_expires_without_task() {
    let (clock, mut hud) = setup(style_with(|s| s.grace_time = 0.5));
    let calls = counter(&mut hud);
    hud.show(false);

    for step in 1..=10 {
        at(&clock, step as f32 * 0.1);
        hud.poll();
        assert_ne!(hud.phase(), Phase::Visible);
    }
    assert_eq!(hud.phase(), Phase::Hidden);
    assert_eq!(hud.visible_since(), None);
    assert_eq!(calls.get(), 0);
    assert_eq!(hud.next_deadline(), None);
}

#[test]
fn test_hide_during_grace_finalizes() {
    let (clock, mut hud) = setup(style_with(|s| s.grace_time = 0.5));
    hud.set_task_in_progress(true);
    let calls = counter(&mut hud);
    hud.show(true);

    at(&clock, 0.2);
    hud.hide(true);
    assert_eq!(hud.phase(), Phase::Hidden);
    assert_eq!(calls.get(), 1);

    at(&clock, 1.0);
    hud.poll();
    assert_eq!(hud.phase(), Phase::Hidden);
}

// ─────────────────────────────────────────────────────────────────────────────
// Minimum show time
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_early_hide_waits_for_min_show_time() {
    let (clock, mut hud) = setup(style_with(|s| s.min_show_time = 1.0));
    let calls = counter(&mut hud);
    hud.show(false);

    at(&clock, 0.3);
    hud.hide(false);
    assert_eq!(hud.phase(), Phase::PendingMinShowHide);
    assert_eq!(
        hud.next_deadline(),
        Some(clock.origin() + Duration::from_secs(1))
    );

    at(&clock, 0.999);
    hud.poll();
    assert_eq!(hud.phase(), Phase::PendingMinShowHide);
    assert_eq!(calls.get(), 0);

    at(&clock, 1.0);
    hud.poll();
    assert_eq!(hud.phase(), Phase::Hidden);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_late_hide_is_immediate() {
    let (clock, mut hud) = setup(style_with(|s| s.min_show_time = 1.0));
    hud.show(false);
    at(&clock, 1.5);
    hud.hide(false);
    assert_eq!(hud.phase(), Phase::Hidden);
}

#[test]
fn test_show_cancels_pending_min_show_hide() {
    let (clock, mut hud) = setup(style_with(|s| s.min_show_time = 1.0));
    hud.show(false);
    at(&clock, 0.3);
    hud.hide(false);
    hud.show(false);
    assert_eq!(hud.phase(), Phase::Visible);

    at(&clock, 2.0);
    hud.poll();
    assert_eq!(hud.phase(), Phase::Visible);
}

// ─────────────────────────────────────────────────────────────────────────────
// Completion and notifications
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_double_hide_completes_once() {
    for animated in [false, true] {
        let (clock, mut hud) = setup(HudStyle::default());
        let calls = counter(&mut hud);
        hud.show(false);
        hud.hide(animated);
        hud.hide(animated);
        at(&clock, 1.0);
        hud.poll();
        assert_eq!(calls.get(), 1, "animated = {animated}");
        assert_eq!(hud.phase(), Phase::Hidden);
        assert!(hud.is_finished());
    }
}

#[test]
fn test_completion_runs_again_after_new_show() {
    let (_clock, mut hud) = setup(HudStyle::default());
    let calls = counter(&mut hud);
    hud.show(false);
    hud.hide(false);
    assert_eq!(calls.get(), 1);

    // Consumed by the first cycle
    hud.show(false);
    hud.hide(false);
    assert_eq!(calls.get(), 1);

    let again = counter(&mut hud);
    hud.show(false);
    assert!(!hud.is_finished());
    hud.hide(false);
    assert_eq!(again.get(), 1);
}

struct Recorder {
    hidden: RefCell<Vec<ViewId>>,
}

impl HudDelegate for Recorder {
    fn hud_was_hidden(&self, hud: ViewId) {
        self.hidden.borrow_mut().push(hud);
    }
}

#[test]
fn test_delegate_notified_on_hide() {
    let (_clock, mut hud) = setup(HudStyle::default());
    let recorder = Rc::new(Recorder {
        hidden: RefCell::new(Vec::new()),
    });
    let delegate: Rc<dyn HudDelegate> = recorder.clone();
    hud.set_delegate(Some(Rc::downgrade(&delegate)));

    hud.show(false);
    hud.hide(false);
    hud.hide(false);
    assert_eq!(*recorder.hidden.borrow(), vec![hud.id()]);
}

#[test]
fn test_completion_may_reenter_shared_hud() {
    let clock = Rc::new(ManualClock::new());
    let shared = SharedHud::new(Hud::new(
        HudStyle::default(),
        clock.clone(),
        ApproximateMeasurer,
    ));
    let reentered = shared.clone();
    shared.with(|hud| {
        hud.set_completion(move || {
            reentered.with(|h| h.set_label("again"));
            reentered.show(false);
        })
    });

    shared.show(false);
    shared.hide(false);
    let hud = shared.borrow();
    assert_eq!(hud.label(), "again");
    assert_eq!(hud.phase(), Phase::Visible);
}

// ─────────────────────────────────────────────────────────────────────────────
// Delayed hide
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hide_after_delay_replaces_earlier_request() {
    let (clock, mut hud) = setup(HudStyle::default());
    hud.show(false);
    hud.hide_after_delay(false, Duration::from_secs(2));
    at(&clock, 1.0);
    hud.hide_after_delay(false, Duration::from_secs(2));

    at(&clock, 2.5);
    hud.poll();
    assert_eq!(hud.phase(), Phase::Visible);

    at(&clock, 3.0);
    hud.poll();
    assert_eq!(hud.phase(), Phase::Hidden);
}

#[test]
fn test_show_cancels_delayed_hide() {
    let (clock, mut hud) = setup(HudStyle::default());
    hud.show(false);
    hud.hide_after_delay(true, Duration::from_secs(1));
    hud.show(false);

    at(&clock, 5.0);
    hud.poll();
    assert_eq!(hud.phase(), Phase::Visible);
}

#[test]
fn test_delayed_hide_respects_min_show_time() {
    let (clock, mut hud) = setup(style_with(|s| s.min_show_time = 2.0));
    hud.show(false);
    hud.hide_after_delay(false, Duration::from_millis(500));

    at(&clock, 0.5);
    hud.poll();
    assert_eq!(hud.phase(), Phase::PendingMinShowHide);

    at(&clock, 2.0);
    hud.poll();
    assert_eq!(hud.phase(), Phase::Hidden);
}

// ─────────────────────────────────────────────────────────────────────────────
// Transitions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_zoom_in_show_transition() {
    let (clock, mut hud) = setup(style_with(|s| s.animation = AnimationStyle::ZoomIn));
    hud.show(true);
    assert_eq!(
        hud.appearance(),
        Appearance {
            opacity: 0.0,
            scale: 0.5
        }
    );

    at(&clock, 0.3);
    assert_eq!(hud.appearance(), Appearance::VISIBLE);
    hud.poll();
    assert!(hud.transition().is_none());
    assert_eq!(hud.appearance(), Appearance::VISIBLE);
}

#[test]
fn test_animated_hide_fades_then_finalizes() {
    let (clock, mut hud) = setup(style_with(|s| s.animation = AnimationStyle::ZoomOut));
    let calls = counter(&mut hud);
    hud.show(false);

    at(&clock, 1.0);
    hud.hide(true);
    assert_eq!(hud.phase(), Phase::Hiding);
    assert_eq!(calls.get(), 0);

    let end = clock.origin() + Duration::from_millis(1300);
    assert_eq!(
        hud.appearance_at(end),
        Appearance {
            opacity: HIDE_TARGET_OPACITY,
            scale: 0.5
        }
    );

    at(&clock, 1.5);
    hud.poll();
    assert_eq!(hud.phase(), Phase::Hidden);
    assert_eq!(calls.get(), 1);
    assert_eq!(hud.appearance().opacity, 0.0);
}

#[test]
fn test_show_during_hide_animation_keeps_hud() {
    let (clock, mut hud) = setup(HudStyle::default());
    let calls = counter(&mut hud);
    hud.show(false);
    at(&clock, 1.0);
    hud.hide(true);
    at(&clock, 1.1);
    hud.show(true);

    at(&clock, 2.0);
    hud.poll();
    assert_eq!(hud.phase(), Phase::Visible);
    assert_eq!(calls.get(), 0);
    assert_eq!(hud.appearance(), Appearance::VISIBLE);
}

#[test]
fn test_interrupted_hide_finalizes_when_grace_finds_task_done() {
    let (clock, mut hud) = setup(style_with(|s| s.grace_time = 0.5));
    let calls = counter(&mut hud);
    hud.set_task_in_progress(true);
    hud.show(false);
    at(&clock, 0.5);
    hud.poll();
    assert_eq!(hud.phase(), Phase::Visible);

    at(&clock, 1.0);
    hud.hide(true);
    hud.set_task_in_progress(false);
    at(&clock, 1.15);
    hud.show(true);
    assert_eq!(hud.phase(), Phase::PendingGrace);
    assert!(hud.appearance().opacity > 0.0);

    at(&clock, 3.0);
    hud.poll();
    assert_eq!(hud.phase(), Phase::Hidden);
    assert_eq!(hud.appearance().opacity, 0.0);
    assert_eq!(calls.get(), 1);
    assert!(hud.is_finished());
    assert_eq!(hud.next_deadline(), None);
}

#[test]
fn test_hide_without_show_is_not_animated() {
    let (_clock, mut hud) = setup(HudStyle::default());
    let calls = counter(&mut hud);
    hud.hide(true);
    assert_eq!(hud.phase(), Phase::Hidden);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_poll_spins_indicator_while_visible() {
    let (clock, mut hud) = setup(HudStyle::default());
    at(&clock, 0.5);
    assert!(!hud.poll());

    hud.show(false);
    at(&clock, 0.75);
    assert!(hud.poll());
    let ActiveIndicator::Spinner(spinner) = hud.indicator().active() else {
        panic!("expected spinner");
    };
    assert_eq!(spinner.phase(), 3);
}

// ─────────────────────────────────────────────────────────────────────────────
// Indicator and layout
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_mode_and_tint_changes() {
    let (_clock, mut hud) = setup(HudStyle::default());
    assert_eq!(hud.indicator().kind(), IndicatorKind::Spinner);
    assert_eq!(hud.indicator().mount_count(), 1);

    hud.set_indicator_color([255, 0, 0, 255]);
    assert_eq!(hud.indicator().mount_count(), 1);

    hud.set_progress(0.4);
    hud.set_mode(Mode::AnnularDeterminate);
    assert_eq!(hud.indicator().kind(), IndicatorKind::Round);
    assert_eq!(hud.indicator().mount_count(), 2);
    let ActiveIndicator::Round(round) = hud.indicator().active() else {
        panic!("expected round");
    };
    assert!(round.annular);
    assert_eq!(round.progress(), 0.4);

    hud.set_mode(Mode::TextOnly);
    assert_eq!(hud.indicator().kind(), IndicatorKind::None);
}

#[test]
fn test_text_only_still_lays_out_labels() {
    let (_clock, mut hud) = setup(style_with(|s| s.mode = Mode::TextOnly));
    hud.set_label("Saved");
    assert!(hud.size().width > 2.0 * hud.style().margin);
    assert!(hud.layout().label.height > 0.0);
    assert_eq!(hud.layout().indicator.size(), Size::ZERO);
}

#[test]
fn test_attached_hud_follows_container_bounds() {
    let container = HeadlessContainer::new(Size::new(320.0, 480.0));
    let clock = Rc::new(ManualClock::new());
    let shared = SharedHud::attach(
        Hud::new(HudStyle::default(), clock, ApproximateMeasurer),
        &container,
    );
    let before = shared.borrow().layout().bezel;
    assert!(container.layout_requests() > 0);

    container.set_bounds(Size::new(480.0, 320.0));
    let after = shared.borrow().layout().bezel;
    assert_eq!(after.size(), before.size());
    assert_eq!(after.x, before.x + 80.0);
    assert_eq!(after.y, before.y - 80.0);
}

#[test]
fn test_hide_keeps_child_unless_remove_on_hide() {
    let container = HeadlessContainer::new(Size::new(320.0, 480.0));
    let shared = SharedHud::attach(
        Hud::new(HudStyle::default(), ManualClock::new(), ApproximateMeasurer),
        &container,
    );
    shared.show(false);
    shared.hide(false);
    assert_eq!(container.child_count(), 1);

    shared.with(|h| h.set_remove_on_hide(true));
    shared.show(false);
    shared.hide(false);
    assert_eq!(container.child_count(), 0);
}

#[test]
fn test_dropping_hud_unsubscribes() {
    let container = HeadlessContainer::new(Size::new(320.0, 480.0));
    let shared = SharedHud::attach(
        Hud::new(HudStyle::default(), ManualClock::new(), ApproximateMeasurer),
        &container,
    );
    let id = shared.id();
    assert!(container.is_subscribed(id));
    container.remove_child(id);
    drop(shared);
    assert!(!container.is_subscribed(id));
}

/// Repaints synchronously from its redraw hook
struct RepaintingContainer {
    inner: Rc<HeadlessContainer>,
    painted: Cell<usize>,
}

impl Container for RepaintingContainer {
    fn bounds(&self) -> Size {
        self.inner.bounds()
    }

    fn add_child(&self, child: ChildView) {
        self.inner.add_child(child);
    }

    fn remove_child(&self, id: ViewId) -> bool {
        self.inner.remove_child(id)
    }

    fn children(&self) -> Vec<ChildView> {
        self.inner.children()
    }

    fn request_layout(&self, id: ViewId) {
        if let Some(hud) = hud_for(self) {
            assert_eq!(hud.borrow().id(), id);
        }
    }

    fn request_redraw(&self, _id: ViewId) {
        if let Some(hud) = hud_for(self) {
            let drawing = scene(&hud.borrow());
            assert!(!drawing.is_empty());
            self.painted.set(self.painted.get() + 1);
        }
    }

    fn subscribe_bounds(&self, id: ViewId) {
        self.inner.subscribe_bounds(id);
    }

    fn unsubscribe_bounds(&self, id: ViewId) {
        self.inner.unsubscribe_bounds(id);
    }
}

#[test]
fn test_container_may_repaint_from_redraw_request() {
    let container = Rc::new(RepaintingContainer {
        inner: HeadlessContainer::new(Size::new(320.0, 480.0)),
        painted: Cell::new(0),
    });
    let shared = SharedHud::attach(
        Hud::new(HudStyle::default(), ManualClock::new(), ApproximateMeasurer),
        &container,
    );
    let after_attach = container.painted.get();
    assert!(after_attach > 0);

    shared.with(|h| {
        h.set_progress(0.5);
        h.set_label("Syncing");
    });
    // Requests from one step are coalesced
    assert_eq!(container.painted.get(), after_attach + 1);

    shared.show(false);
    shared.hide(false);
    assert_eq!(container.painted.get(), after_attach + 3);
}
