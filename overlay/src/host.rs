//! Host integration points
//!
//! The HUD never owns a window or a view tree. It talks to whatever hosts it
//! through the small traits in this module: a [`Container`] it is attached to,
//! a [`TextMeasurer`] for label sizes, an optional [`CustomView`] indicator
//! and an optional [`HudDelegate`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use hudkit_types::Font;

use crate::geometry::{Rect, Size};
use crate::lifecycle::SharedHud;
use crate::render::Drawing;

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a child inside a [`Container`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    /// Allocate a process-unique id
    pub fn next() -> Self {
        Self(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A child of a container: either a HUD or some other host view
#[derive(Clone)]
pub enum ChildView {
    Hud(SharedHud),
    Other(ViewId),
}

impl ChildView {
    pub fn id(&self) -> ViewId {
        match self {
            ChildView::Hud(hud) => hud.id(),
            ChildView::Other(id) => *id,
        }
    }

    pub fn as_hud(&self) -> Option<&SharedHud> {
        match self {
            ChildView::Hud(hud) => Some(hud),
            ChildView::Other(_) => None,
        }
    }
}

impl std::fmt::Debug for ChildView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChildView::Hud(hud) => f.debug_tuple("Hud").field(&hud.id()).finish(),
            ChildView::Other(id) => f.debug_tuple("Other").field(id).finish(),
        }
    }
}

/// The host view a HUD covers
///
/// Methods take `&self`; implementations use interior mutability because the
/// HUD only holds a `Weak` handle and may call back while the host is
/// iterating its own state.
pub trait Container {
    /// Size of the area the HUD covers
    fn bounds(&self) -> Size;

    /// Add a child on top of the existing ones
    fn add_child(&self, child: ChildView);

    /// Remove a child; returns `false` if it was not attached
    fn remove_child(&self, id: ViewId) -> bool;

    /// Children ordered back to front
    fn children(&self) -> Vec<ChildView>;

    fn request_layout(&self, id: ViewId);

    fn request_redraw(&self, id: ViewId);

    /// Ask to be relaid out when the bounds change (e.g. rotation)
    fn subscribe_bounds(&self, id: ViewId);

    fn unsubscribe_bounds(&self, id: ViewId);
}

/// Text sizing supplied by the host's text stack
pub trait TextMeasurer {
    /// Size of `text` on a single line. Empty text measures zero.
    fn measure_line(&self, text: &str, font: &Font) -> Size;

    /// Bounding size of `text` wrapped to `max.width` and cut at `max.height`.
    /// Empty text measures zero.
    fn measure_multiline(&self, text: &str, font: &Font, max: Size) -> Size;
}

/// Host-provided indicator used in custom view mode
pub trait CustomView {
    fn intrinsic_size(&self) -> Size;

    /// Frame assigned by layout, in container coordinates
    fn set_frame(&self, frame: Rect);

    /// Optional vector content, drawn at the origin of a `size` box
    fn draw(&self, _size: Size, _out: &mut Drawing) {}
}

/// Notified after a HUD has finished hiding
pub trait HudDelegate {
    fn hud_was_hidden(&self, hud: ViewId);
}

// ─────────────────────────────────────────────────────────────────────────────
// Approximate text measurement
// ─────────────────────────────────────────────────────────────────────────────

/// Glyph-free measurer based on average advance widths
///
/// Good enough for headless rendering and tests; real hosts should measure
/// with their own font stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateMeasurer;

impl ApproximateMeasurer {
    fn advance(font: &Font) -> f32 {
        if font.bold {
            font.size * 3.0 / 5.0
        } else {
            font.size * 11.0 / 20.0
        }
    }

    fn line_height(font: &Font) -> f32 {
        (font.size * 6.0 / 5.0).ceil()
    }

    fn line_width(text: &str, font: &Font) -> f32 {
        (text.chars().count() as f32 * Self::advance(font)).ceil()
    }
}

impl TextMeasurer for ApproximateMeasurer {
    fn measure_line(&self, text: &str, font: &Font) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        Size::new(Self::line_width(text, font), Self::line_height(font))
    }

    fn measure_multiline(&self, text: &str, font: &Font, max: Size) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }

        let advance = Self::advance(font);
        let max_chars = ((max.width / advance).floor() as usize).max(1);

        let mut lines = 0usize;
        let mut widest = 0usize;
        for paragraph in text.split('\n') {
            let mut current = 0usize;
            lines += 1;
            for word in paragraph.split_whitespace() {
                let len = word.chars().count();
                let needed = if current == 0 { len } else { current + 1 + len };
                if needed <= max_chars || current == 0 {
                    current = needed.min(max_chars);
                } else {
                    widest = widest.max(current);
                    lines += 1;
                    current = len.min(max_chars);
                }
            }
            widest = widest.max(current);
        }

        let line_height = Self::line_height(font);
        let fitting = (max.height.max(0.0) / line_height).floor() as usize;
        let lines = lines.min(fitting);
        Size::new(
            (widest as f32 * advance).ceil().min(max.width.max(0.0)),
            lines as f32 * line_height,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Headless container
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory [`Container`] for hosts without a view tree and for tests
#[derive(Default)]
pub struct HeadlessContainer {
    bounds: Cell<Size>,
    children: RefCell<Vec<ChildView>>,
    subscribers: RefCell<Vec<ViewId>>,
    layout_requests: Cell<usize>,
    redraw_requests: Cell<usize>,
}

impl HeadlessContainer {
    pub fn new(bounds: Size) -> Rc<Self> {
        Rc::new(Self {
            bounds: Cell::new(bounds),
            ..Default::default()
        })
    }

    /// Resize and relayout every subscribed HUD
    pub fn set_bounds(&self, bounds: Size) {
        self.bounds.set(bounds);
        let subscribed: Vec<SharedHud> = {
            let subscribers = self.subscribers.borrow();
            self.children
                .borrow()
                .iter()
                .filter_map(ChildView::as_hud)
                .filter(|hud| subscribers.contains(&hud.id()))
                .cloned()
                .collect()
        };
        tracing::debug!(
            width = bounds.width,
            height = bounds.height,
            huds = subscribed.len(),
            "container resized"
        );
        for hud in subscribed {
            hud.relayout();
        }
    }

    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn is_subscribed(&self, id: ViewId) -> bool {
        self.subscribers.borrow().contains(&id)
    }

    pub fn layout_requests(&self) -> usize {
        self.layout_requests.get()
    }

    pub fn redraw_requests(&self) -> usize {
        self.redraw_requests.get()
    }
}

impl Container for HeadlessContainer {
    fn bounds(&self) -> Size {
        self.bounds.get()
    }

    fn add_child(&self, child: ChildView) {
        let id = child.id();
        let mut children = self.children.borrow_mut();
        children.retain(|c| c.id() != id);
        children.push(child);
    }

    fn remove_child(&self, id: ViewId) -> bool {
        let mut children = self.children.borrow_mut();
        let before = children.len();
        children.retain(|c| c.id() != id);
        children.len() != before
    }

    fn children(&self) -> Vec<ChildView> {
        self.children.borrow().clone()
    }

    fn request_layout(&self, _id: ViewId) {
        self.layout_requests.set(self.layout_requests.get() + 1);
    }

    fn request_redraw(&self, _id: ViewId) {
        self.redraw_requests.set(self.redraw_requests.get() + 1);
    }

    fn subscribe_bounds(&self, id: ViewId) {
        let mut subscribers = self.subscribers.borrow_mut();
        if !subscribers.contains(&id) {
            subscribers.push(id);
        }
    }

    fn unsubscribe_bounds(&self, id: ViewId) {
        self.subscribers.borrow_mut().retain(|s| *s != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_ids_are_unique() {
        let a = ViewId::next();
        let b = ViewId::next();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn test_empty_text_measures_zero() {
        let m = ApproximateMeasurer;
        let font = Font::bold_system(16.0);
        assert_eq!(m.measure_line("", &font), Size::ZERO);
        assert_eq!(
            m.measure_multiline("", &font, Size::new(100.0, 100.0)),
            Size::ZERO
        );
    }

    #[test]
    fn test_single_line_width_scales_with_length() {
        let m = ApproximateMeasurer;
        let font = Font::bold_system(10.0);
        let short = m.measure_line("ab", &font);
        let long = m.measure_line("abcd", &font);
        assert_eq!(short, Size::new(12.0, 12.0));
        assert_eq!(long.width, 24.0);
    }

    #[test]
    fn test_multiline_wraps_and_caps_height() {
        let m = ApproximateMeasurer;
        // 6 units per char, 12 per line
        let font = Font::bold_system(10.0);
        let wrapped = m.measure_multiline("aaaa bbbb cccc", &font, Size::new(60.0, 100.0));
        // "aaaa bbbb" fits in 10 chars, "cccc" wraps
        assert_eq!(wrapped, Size::new(54.0, 24.0));

        let cut = m.measure_multiline("aaaa bbbb cccc", &font, Size::new(60.0, 20.0));
        assert_eq!(cut.height, 12.0);
    }

    #[test]
    fn test_headless_children_and_subscriptions() {
        let container = HeadlessContainer::new(Size::new(320.0, 480.0));
        let a = ViewId::next();
        let b = ViewId::next();
        container.add_child(ChildView::Other(a));
        container.add_child(ChildView::Other(b));
        container.add_child(ChildView::Other(a));
        let order: Vec<_> = container.children().iter().map(ChildView::id).collect();
        assert_eq!(order, vec![b, a]);

        assert!(container.remove_child(a));
        assert!(!container.remove_child(a));
        assert_eq!(container.child_count(), 1);

        container.subscribe_bounds(b);
        container.subscribe_bounds(b);
        assert!(container.is_subscribed(b));
        container.unsubscribe_bounds(b);
        assert!(!container.is_subscribed(b));
    }
}
