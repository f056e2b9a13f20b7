//! One-shot, cancellable tick scheduling.
//!
//! The countdown never relies on a recurring timer. Each tick is armed as a
//! single deferred callback and re-armed only after the previous one has
//! been handled, so two ticks can never be in flight at once.

use std::collections::VecDeque;
use std::pin::Pin;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Sleep;

/// Identifies one armed callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Arms and cancels deferred tick callbacks.
pub trait TickScheduler {
    /// Arm a callback to fire once, `after` from now.
    fn schedule(&mut self, after: Duration) -> TickHandle;

    /// Cancel an armed callback. Once this returns the handle never fires.
    /// Cancelling an unknown or already-fired handle is a no-op.
    fn cancel(&mut self, handle: TickHandle);
}

/// Deterministic scheduler driven by hand, for tests and simulations.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: VecDeque<(TickHandle, Duration)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> impl Iterator<Item = &(TickHandle, Duration)> {
        self.pending.iter()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Remove and return the oldest armed callback, as if it fired.
    pub fn take_next(&mut self) -> Option<TickHandle> {
        self.pending.pop_front().map(|(handle, _)| handle)
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, after: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.pending.push_back((handle, after));
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.pending.retain(|(h, _)| *h != handle);
    }
}

/// Scheduler backed by a single `tokio::time::Sleep`.
///
/// Arming must happen inside a tokio runtime with the time driver enabled.
/// [`TokioScheduler::fired`] is cancel-safe, so it can sit in a
/// `tokio::select!` next to other input sources.
#[derive(Debug, Default)]
pub struct TokioScheduler {
    next_id: u64,
    armed: Option<(TickHandle, Pin<Box<Sleep>>)>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Wait for the armed callback. Pends forever when nothing is armed.
    pub async fn fired(&mut self) -> TickHandle {
        let Some((handle, sleep)) = self.armed.as_mut() else {
            return std::future::pending().await;
        };
        sleep.as_mut().await;
        let handle = *handle;
        self.armed = None;
        handle
    }
}

impl TickScheduler for TokioScheduler {
    fn schedule(&mut self, after: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        // Only one tick is ever armed; a new arm replaces the old one.
        self.armed = Some((handle, Box::pin(tokio::time::sleep(after))));
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if matches!(self.armed, Some((armed, _)) if armed == handle) {
            self.armed = None;
        }
    }
}
