use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// State changes worth reporting to a front end.
/// Timer commands return these; the CLI prints them as JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A phase ran out and the timer rolled into the next one.
    PhaseCompleted {
        finished: Phase,
        next: Phase,
        completed_focus_sessions: u32,
        at: DateTime<Utc>,
    },
    HabitToggled {
        habit_id: String,
        date: NaiveDate,
        completed: bool,
        streak_days: i32,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = Event::PhaseCompleted {
            finished: Phase::Focus,
            next: Phase::Break,
            completed_focus_sessions: 3,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "phase_completed");
        assert_eq!(json["finished"], "focus");
        assert_eq!(json["next"], "break");
        assert_eq!(json["completed_focus_sessions"], 3);
    }
}
