//! Scheduled driver around [`TimerEngine`].
//!
//! Holds at most one armed tick. `pause()` and `reset()` cancel it before
//! returning; a handle that fires after being superseded is dropped as stale.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::engine::TimerEngine;
use super::phase::Phase;
use super::scheduler::{TickHandle, TickScheduler, TokioScheduler};
use crate::events::Event;
use crate::notify::Notifier;

pub struct Countdown<S, N> {
    engine: TimerEngine,
    scheduler: S,
    notifier: N,
    pending: Option<TickHandle>,
    interval: Duration,
    cue_enabled: bool,
}

impl<S: TickScheduler, N: Notifier> Countdown<S, N> {
    pub fn new(engine: TimerEngine, scheduler: S, notifier: N) -> Self {
        Self {
            engine,
            scheduler,
            notifier,
            pending: None,
            interval: Duration::from_secs(1),
            cue_enabled: true,
        }
    }

    /// Delay between ticks. One second unless a simulation speeds it up.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn set_cue_enabled(&mut self, enabled: bool) {
        self.cue_enabled = enabled;
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.pending
    }

    pub fn start(&mut self) -> Option<Event> {
        let event = self.engine.start()?;
        self.arm();
        Some(event)
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.disarm();
        self.engine.pause()
    }

    pub fn reset(&mut self) -> Event {
        self.disarm();
        self.engine.reset()
    }

    /// Handle a fired callback. Returns the completion event when the tick
    /// finished a phase.
    pub fn fire(&mut self, handle: TickHandle) -> Option<Event> {
        if self.pending != Some(handle) {
            debug!(handle = handle.id(), "ignoring stale tick");
            return None;
        }
        self.pending = None;

        let event = self.engine.tick();
        if let Some(Event::PhaseCompleted {
            finished,
            next,
            completed_focus_sessions,
            ..
        }) = &event
        {
            info!(
                ?finished,
                ?next,
                completed_focus_sessions,
                "phase completed"
            );
            self.play_cue(*finished);
        }
        if self.engine.is_running() {
            self.arm();
        }
        event
    }

    fn play_cue(&mut self, finished: Phase) {
        if !self.cue_enabled {
            return;
        }
        if let Err(e) = self.notifier.notify(finished) {
            warn!(error = %e, "completion cue failed");
        }
    }

    fn arm(&mut self) {
        if let Some(stale) = self.pending.take() {
            self.scheduler.cancel(stale);
        }
        self.pending = Some(self.scheduler.schedule(self.interval));
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<N: Notifier> Countdown<TokioScheduler, N> {
    /// Wait for the next armed tick and apply it. Cancel-safe; pends
    /// forever while the timer is idle.
    pub async fn next_tick(&mut self) -> Option<Event> {
        let handle = self.scheduler.fired().await;
        self.fire(handle)
    }
}
