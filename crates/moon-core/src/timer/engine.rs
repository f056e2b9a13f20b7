//! Countdown engine.
//!
//! A second-granular state machine alternating between a focus phase and a
//! break phase. It owns no clock and no thread: something else calls
//! `tick()` once per elapsed second while the engine is running (see
//! [`Countdown`](super::Countdown) for the scheduled driver).
//!
//! ## State Transitions
//!
//! ```text
//! Idle(Focus) <-> Running(Focus)
//!                     | remaining hits 0
//!                     v
//! Idle(Break) <-> Running(Break) -- remaining hits 0 --> Running(Focus)
//! ```
//!
//! ## Usage
//!
//! ```
//! use moon_core::timer::{Phase, TimerEngine};
//!
//! let mut engine = TimerEngine::new();
//! engine.start();
//! for _ in 0..1500 {
//!     engine.tick();
//! }
//! assert_eq!(engine.phase(), Phase::Break);
//! assert_eq!(engine.completed_focus_sessions(), 1);
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::phase::{format_clock, Phase, PhaseDurations};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
}

/// Display record for a timer front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub phase: Phase,
    pub remaining_secs: u64,
    pub total_secs: u64,
    /// 0.0 .. 1.0 through the current phase.
    pub progress: f64,
    /// `MM:SS` rendering of `remaining_secs`.
    pub clock: String,
    pub completed_focus_sessions: u32,
}

/// Core countdown engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    durations: PhaseDurations,
    phase: Phase,
    state: TimerState,
    remaining_secs: u64,
    /// Only ever grows; lives as long as the engine.
    completed_focus_sessions: u32,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    /// Engine with the standard 25/5 minute phases, idle in focus.
    pub fn new() -> Self {
        Self::with_durations(PhaseDurations::default())
    }

    pub fn with_durations(durations: PhaseDurations) -> Self {
        Self {
            durations,
            phase: Phase::Focus,
            state: TimerState::Idle,
            remaining_secs: durations.of(Phase::Focus),
            completed_focus_sessions: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn completed_focus_sessions(&self) -> u32 {
        self.completed_focus_sessions
    }

    pub fn durations(&self) -> PhaseDurations {
        self.durations
    }

    /// Full length of the current phase.
    pub fn total_secs(&self) -> u64 {
        self.durations.of(self.phase)
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.total_secs().saturating_sub(self.remaining_secs)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        (self.elapsed_secs() as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state,
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            progress: self.progress(),
            clock: format_clock(self.remaining_secs),
            completed_focus_sessions: self.completed_focus_sessions,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Idle -> Running. Returns `None` when already running.
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running;
                Some(Event::TimerStarted {
                    phase: self.phase,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Running => None,
        }
    }

    /// Running -> Idle, keeping the remaining time. Returns `None` when idle.
    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Idle;
                Some(Event::TimerPaused {
                    phase: self.phase,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Idle => None,
        }
    }

    /// Stop and refill the current phase. The phase itself is kept.
    pub fn reset(&mut self) -> Event {
        self.state = TimerState::Idle;
        self.remaining_secs = self.total_secs();
        Event::TimerReset {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Advance one second. Returns `Some(Event::PhaseCompleted)` when the
    /// phase runs out; the engine then keeps running in the next phase.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }

        let finished = self.phase;
        if finished == Phase::Focus {
            self.completed_focus_sessions += 1;
        }
        self.phase = finished.next();
        self.remaining_secs = self.total_secs();
        Some(Event::PhaseCompleted {
            finished,
            next: self.phase,
            completed_focus_sessions: self.completed_focus_sessions,
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_at(phase_secs: (u64, u64), remaining: u64, phase: Phase) -> TimerEngine {
        let mut engine = TimerEngine::with_durations(
            PhaseDurations::new(phase_secs.0, phase_secs.1).unwrap(),
        );
        engine.phase = phase;
        engine.remaining_secs = remaining;
        engine.start();
        engine
    }

    #[test]
    fn starts_idle_in_focus() {
        let engine = TimerEngine::new();
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.phase(), Phase::Focus);
        assert_eq!(engine.remaining_secs(), 1500);
        assert_eq!(engine.completed_focus_sessions(), 0);
    }

    #[test]
    fn start_is_noop_when_running() {
        let mut engine = TimerEngine::new();
        assert!(engine.start().is_some());
        assert!(engine.start().is_none());
        assert!(engine.is_running());
    }

    #[test]
    fn tick_does_nothing_while_idle() {
        let mut engine = TimerEngine::new();
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining_secs(), 1500);
    }

    #[test]
    fn focus_completion_flips_to_break_and_counts() {
        let mut engine = running_at((1500, 300), 1, Phase::Focus);
        let event = engine.tick();
        assert!(matches!(
            event,
            Some(Event::PhaseCompleted {
                finished: Phase::Focus,
                next: Phase::Break,
                completed_focus_sessions: 1,
                ..
            })
        ));
        assert_eq!(engine.state(), TimerState::Running);
        assert_eq!(engine.phase(), Phase::Break);
        assert_eq!(engine.remaining_secs(), 300);
        assert_eq!(engine.completed_focus_sessions(), 1);
    }

    #[test]
    fn break_completion_does_not_count() {
        let mut engine = running_at((1500, 300), 1, Phase::Break);
        engine.tick();
        assert_eq!(engine.phase(), Phase::Focus);
        assert_eq!(engine.remaining_secs(), 1500);
        assert_eq!(engine.completed_focus_sessions(), 0);
    }

    #[test]
    fn pause_twice_keeps_remaining() {
        let mut engine = TimerEngine::new();
        engine.start();
        engine.tick();
        engine.tick();
        assert!(engine.pause().is_some());
        assert!(engine.pause().is_none());
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining_secs(), 1498);
    }

    #[test]
    fn reset_refills_current_phase() {
        let mut engine = running_at((1500, 300), 42, Phase::Break);
        engine.reset();
        assert_eq!(engine.phase(), Phase::Break);
        assert_eq!(engine.remaining_secs(), 300);
        assert_eq!(engine.state(), TimerState::Idle);

        let mut engine = running_at((1500, 300), 7, Phase::Focus);
        engine.reset();
        assert_eq!(engine.remaining_secs(), 1500);
    }

    #[test]
    fn progress_tracks_elapsed_fraction() {
        let mut engine = TimerEngine::with_durations(PhaseDurations::new(4, 2).unwrap());
        assert_eq!(engine.progress(), 0.0);
        engine.start();
        engine.tick();
        assert!((engine.progress() - 0.25).abs() < f64::EPSILON);
        engine.tick();
        engine.tick();
        assert!((engine.progress() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn snapshot_reports_display_fields() {
        let engine = TimerEngine::new();
        let snap = engine.snapshot();
        assert_eq!(snap.state, TimerState::Idle);
        assert_eq!(snap.phase, Phase::Focus);
        assert_eq!(snap.remaining_secs, 1500);
        assert_eq!(snap.total_secs, 1500);
        assert_eq!(snap.clock, "25:00");
    }
}
