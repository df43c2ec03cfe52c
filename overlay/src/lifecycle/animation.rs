//! Show/hide transitions of the whole HUD

use std::time::{Duration, Instant};

/// Length of every show and hide transition
pub const TRANSITION_DURATION: Duration = Duration::from_millis(300);

/// Opacity an animated hide fades to before the HUD is finalized
pub const HIDE_TARGET_OPACITY: f32 = 0.02;

/// Opacity and scale of the whole HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub opacity: f32,
    pub scale: f32,
}

impl Appearance {
    pub const HIDDEN: Appearance = Appearance {
        opacity: 0.0,
        scale: 1.0,
    };

    pub const VISIBLE: Appearance = Appearance {
        opacity: 1.0,
        scale: 1.0,
    };

    fn lerp(self, to: Appearance, t: f32) -> Appearance {
        Appearance {
            opacity: self.opacity + (to.opacity - self.opacity) * t,
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self::HIDDEN
    }
}

/// A tween between two appearances, sampled by the host every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: Appearance,
    pub to: Appearance,
    pub start: Instant,
    pub duration: Duration,
}

impl Transition {
    pub fn new(from: Appearance, to: Appearance, start: Instant) -> Self {
        Self {
            from,
            to,
            start,
            duration: TRANSITION_DURATION,
        }
    }

    pub fn end(&self) -> Instant {
        self.start + self.duration
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now >= self.end()
    }

    pub fn sample(&self, now: Instant) -> Appearance {
        if self.duration.is_zero() || now >= self.end() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.start);
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from.lerp(self.to, ease_in_out(t))
    }
}

fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
