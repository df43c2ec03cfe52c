//! Owned, cancelable one-shot timers

use std::time::Instant;

/// Handle to a scheduled timer. Canceling a fired handle is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Grace period before showing is over
    Grace,
    /// Minimum show time reached, the pending hide can run
    MinShow,
    /// Scheduled `hide_after_delay`
    DeferredHide { animated: bool },
    ShowAnimationEnd,
    HideAnimationEnd,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    handle: TimerHandle,
    deadline: Instant,
    kind: TimerKind,
}

/// Timers owned by a single HUD
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    pending: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline: Instant, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Timer {
            handle,
            deadline,
            kind,
        });
        tracing::trace!(?kind, id = handle.0, "timer scheduled");
        handle
    }

    /// Returns `true` if the timer was still pending
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        let canceled = self.pending.len() != before;
        if canceled {
            tracing::trace!(id = handle.0, "timer canceled");
        }
        canceled
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|t| t.deadline).min()
    }

    /// Remove and return the earliest timer due at `now`.
    ///
    /// Timers with equal deadlines fire in scheduling order.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TimerHandle, TimerKind, Instant)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| (t.deadline, t.handle))
            .map(|(i, _)| i)?;
        let timer = self.pending.remove(index);
        Some((timer.handle, timer.kind, timer.deadline))
    }
}
