mod countdown;
mod engine;
mod phase;
mod scheduler;

pub use countdown::Countdown;
pub use engine::{TimerEngine, TimerSnapshot, TimerState};
pub use phase::{format_clock, Phase, PhaseDurations, BREAK_SECS, FOCUS_SECS};
pub use scheduler::{ManualScheduler, TickHandle, TickScheduler, TokioScheduler};
