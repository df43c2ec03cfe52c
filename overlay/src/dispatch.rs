//! Commands from other threads
//!
//! A [`Hud`] never leaves its thread. Worker threads hold a [`HudSender`] and
//! queue [`HudCommand`]s; the owning thread applies them in arrival order with
//! [`Hud::drain_commands`], typically right before [`Hud::poll`].

use std::time::Duration;

use hudkit_types::{AnimationStyle, HudStyle, Mode};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::lifecycle::Hud;

/// A state change that can be requested from any thread
#[derive(Debug, Clone, PartialEq)]
pub enum HudCommand {
    Show { animated: bool },
    Hide { animated: bool },
    HideAfterDelay { animated: bool, delay: Duration },
    SetMode(Mode),
    SetAnimation(AnimationStyle),
    SetProgress(f32),
    SetLabel(String),
    SetDetails(String),
    SetIndicatorColor([u8; 4]),
    SetTaskInProgress(bool),
    SetStyle(Box<HudStyle>),
}

/// Cloneable, `Send` handle that queues commands for one HUD
#[derive(Debug, Clone)]
pub struct HudSender {
    tx: UnboundedSender<HudCommand>,
}

impl HudSender {
    /// Queue a command; returns `false` once the HUD is gone
    pub fn send(&self, command: HudCommand) -> bool {
        self.tx.send(command).is_ok()
    }

    pub fn show(&self, animated: bool) -> bool {
        self.send(HudCommand::Show { animated })
    }

    pub fn hide(&self, animated: bool) -> bool {
        self.send(HudCommand::Hide { animated })
    }

    pub fn set_progress(&self, progress: f32) -> bool {
        self.send(HudCommand::SetProgress(progress))
    }

    pub fn set_label(&self, text: impl Into<String>) -> bool {
        self.send(HudCommand::SetLabel(text.into()))
    }

    pub fn set_details(&self, text: impl Into<String>) -> bool {
        self.send(HudCommand::SetDetails(text.into()))
    }

    pub fn set_task_in_progress(&self, running: bool) -> bool {
        self.send(HudCommand::SetTaskInProgress(running))
    }
}

/// Receiving end owned by the HUD
#[derive(Debug)]
pub(crate) struct CommandQueue {
    tx: UnboundedSender<HudCommand>,
    rx: UnboundedReceiver<HudCommand>,
}

impl CommandQueue {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub(crate) fn sender(&self) -> HudSender {
        HudSender {
            tx: self.tx.clone(),
        }
    }

    pub(crate) fn try_next(&mut self) -> Option<HudCommand> {
        self.rx.try_recv().ok()
    }
}

impl Hud {
    /// Apply a single command on the owning thread
    pub fn apply(&mut self, command: HudCommand) {
        tracing::trace!(id = self.id().raw(), ?command, "applying command");
        match command {
            HudCommand::Show { animated } => self.show(animated),
            HudCommand::Hide { animated } => self.hide(animated),
            HudCommand::HideAfterDelay { animated, delay } => {
                self.hide_after_delay(animated, delay)
            }
            HudCommand::SetMode(mode) => self.set_mode(mode),
            HudCommand::SetAnimation(animation) => self.set_animation(animation),
            HudCommand::SetProgress(progress) => self.set_progress(progress),
            HudCommand::SetLabel(text) => self.set_label(text),
            HudCommand::SetDetails(text) => self.set_details(text),
            HudCommand::SetIndicatorColor(rgba) => self.set_indicator_color(rgba),
            HudCommand::SetTaskInProgress(running) => self.set_task_in_progress(running),
            HudCommand::SetStyle(style) => self.set_style(*style),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ApproximateMeasurer;
    use crate::indicator::IndicatorKind;
    use crate::lifecycle::{ManualClock, Phase};

    fn hud() -> Hud {
        Hud::new(HudStyle::default(), ManualClock::new(), ApproximateMeasurer)
    }

    #[test]
    fn test_sender_is_send() {
        fn assert_send<T: Send + 'static>() {}
        assert_send::<HudSender>();
        assert_send::<HudCommand>();
    }

    #[test]
    fn test_commands_from_worker_thread_apply_in_order() {
        let mut hud = hud();
        let sender = hud.sender();

        std::thread::spawn(move || {
            sender.set_label("Uploading");
            sender.send(HudCommand::SetMode(Mode::DeterminateBar));
            sender.set_progress(0.25);
            sender.set_progress(0.75);
            sender.show(false);
        })
        .join()
        .unwrap();

        assert_eq!(hud.phase(), Phase::Hidden);
        assert_eq!(hud.drain_commands(), 5);
        assert_eq!(hud.label(), "Uploading");
        assert_eq!(hud.indicator().kind(), IndicatorKind::Bar);
        assert_eq!(hud.progress(), 0.75);
        assert_eq!(hud.phase(), Phase::Visible);
        assert_eq!(hud.drain_commands(), 0);
    }

    #[test]
    fn test_sender_fails_after_hud_dropped() {
        let hud = hud();
        let sender = hud.sender();
        assert!(sender.set_progress(0.1));
        drop(hud);
        assert!(!sender.set_progress(0.2));
    }
}
