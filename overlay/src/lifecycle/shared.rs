use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

use super::{deliver, Hud};
use crate::dispatch::HudCommand;
use crate::host::{ChildView, Container, ViewId};

/// Reference-counted HUD that can live in a container's child list
///
/// Container layout and redraw requests, completion callbacks, delegate
/// notifications and detaching run after the inner borrow is released, so
/// they may call back into the same HUD.
#[derive(Clone)]
pub struct SharedHud {
    id: ViewId,
    inner: Rc<RefCell<Hud>>,
}

impl SharedHud {
    pub fn new(mut hud: Hud) -> Self {
        hud.defer_effects();
        Self {
            id: hud.id(),
            inner: Rc::new(RefCell::new(hud)),
        }
    }

    /// Wrap `hud`, cover `container` with it and follow its bounds
    pub fn attach<C: Container + 'static>(hud: Hud, container: &Rc<C>) -> Self {
        let shared = Self::new(hud);
        let dyn_container: Rc<dyn Container> = container.clone();
        shared
            .inner
            .borrow_mut()
            .set_container(Rc::downgrade(&dyn_container));
        container.subscribe_bounds(shared.id);
        container.add_child(ChildView::Hud(shared.clone()));
        shared.relayout();
        tracing::debug!(id = shared.id.raw(), "hud attached");
        shared
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn ptr_eq(&self, other: &SharedHud) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn borrow(&self) -> Ref<'_, Hud> {
        self.inner.borrow()
    }

    /// Run `f` against the HUD, then deliver any side effects it queued
    pub fn with<R>(&self, f: impl FnOnce(&mut Hud) -> R) -> R {
        let (result, effects) = {
            let mut hud = self.inner.borrow_mut();
            let result = f(&mut hud);
            (result, hud.take_effects())
        };
        deliver(effects);
        result
    }

    pub fn show(&self, animated: bool) {
        self.with(|hud| hud.show(animated));
    }

    pub fn hide(&self, animated: bool) {
        self.with(|hud| hud.hide(animated));
    }

    pub fn hide_after_delay(&self, animated: bool, delay: Duration) {
        self.with(|hud| hud.hide_after_delay(animated, delay));
    }

    pub fn poll(&self) -> bool {
        self.with(Hud::poll)
    }

    pub fn relayout(&self) {
        self.with(Hud::relayout);
    }

    pub fn apply(&self, command: HudCommand) {
        self.with(|hud| hud.apply(command));
    }

    pub fn drain_commands(&self) -> usize {
        self.with(Hud::drain_commands)
    }
}

impl std::fmt::Debug for SharedHud {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedHud").field("id", &self.id).finish()
    }
}
