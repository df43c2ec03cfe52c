//! Lookup of HUDs attached to a container

use std::rc::Rc;

use crate::host::{ChildView, Container};
use crate::lifecycle::{Hud, SharedHud};

/// Topmost HUD covering `container`
pub fn hud_for(container: &dyn Container) -> Option<SharedHud> {
    container
        .children()
        .iter()
        .rev()
        .find_map(ChildView::as_hud)
        .cloned()
}

/// Every HUD covering `container`, back to front
pub fn all_huds_for(container: &dyn Container) -> Vec<SharedHud> {
    container
        .children()
        .iter()
        .filter_map(ChildView::as_hud)
        .cloned()
        .collect()
}

/// Attach `hud` to `container` and show it. The HUD detaches itself once
/// hidden.
pub fn show_hud_added_to<C: Container + 'static>(
    container: &Rc<C>,
    mut hud: Hud,
    animated: bool,
) -> SharedHud {
    hud.set_remove_on_hide(true);
    let shared = SharedHud::attach(hud, container);
    shared.show(animated);
    shared
}

/// Hide the topmost HUD of `container`; returns `false` if there is none
pub fn hide_hud_for(container: &dyn Container, animated: bool) -> bool {
    match hud_for(container) {
        Some(hud) => {
            hud.with(|h| {
                h.set_remove_on_hide(true);
                h.hide(animated);
            });
            true
        }
        None => false,
    }
}

/// Hide every HUD of `container`; returns how many were found
pub fn hide_all_huds_for(container: &dyn Container, animated: bool) -> usize {
    let huds = all_huds_for(container);
    for hud in &huds {
        hud.with(|h| {
            h.set_remove_on_hide(true);
            h.hide(animated);
        });
    }
    huds.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hudkit_types::HudStyle;

    use crate::geometry::Size;
    use crate::host::{ApproximateMeasurer, HeadlessContainer, ViewId};
    use crate::lifecycle::{ManualClock, Phase};

    fn hud() -> Hud {
        Hud::new(HudStyle::default(), ManualClock::new(), ApproximateMeasurer)
    }

    #[test]
    fn test_no_hud_found() {
        let container = HeadlessContainer::new(Size::new(320.0, 480.0));
        container.add_child(ChildView::Other(ViewId::next()));
        assert!(hud_for(&*container).is_none());
        assert!(all_huds_for(&*container).is_empty());
        assert!(!hide_hud_for(&*container, false));
        assert_eq!(hide_all_huds_for(&*container, false), 0);
    }

    #[test]
    fn test_topmost_hud_wins() {
        let container = HeadlessContainer::new(Size::new(320.0, 480.0));
        let bottom = SharedHud::attach(hud(), &container);
        container.add_child(ChildView::Other(ViewId::next()));
        let top = SharedHud::attach(hud(), &container);

        assert!(hud_for(&*container).unwrap().ptr_eq(&top));
        let all = all_huds_for(&*container);
        assert_eq!(all.len(), 2);
        assert!(all[0].ptr_eq(&bottom));
    }

    #[test]
    fn test_show_added_then_hide_detaches() {
        let container = HeadlessContainer::new(Size::new(320.0, 480.0));
        let shared = show_hud_added_to(&container, hud(), false);
        assert_eq!(shared.borrow().phase(), Phase::Visible);
        assert_eq!(container.child_count(), 1);
        assert!(container.is_subscribed(shared.id()));

        assert!(hide_hud_for(&*container, false));
        assert_eq!(shared.borrow().phase(), Phase::Hidden);
        assert_eq!(container.child_count(), 0);
        assert!(!container.is_subscribed(shared.id()));
    }

    #[test]
    fn test_hide_all() {
        let container = HeadlessContainer::new(Size::new(320.0, 480.0));
        show_hud_added_to(&container, hud(), false);
        show_hud_added_to(&container, hud(), false);
        container.add_child(ChildView::Other(ViewId::next()));

        assert_eq!(hide_all_huds_for(&*container, false), 2);
        assert_eq!(container.child_count(), 1);
    }
}
