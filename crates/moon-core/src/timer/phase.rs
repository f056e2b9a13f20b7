use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default focus interval: 25 minutes.
pub const FOCUS_SECS: u64 = 25 * 60;
/// Default break interval: 5 minutes.
pub const BREAK_SECS: u64 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    /// The phase that follows this one.
    pub fn next(self) -> Self {
        match self {
            Phase::Focus => Phase::Break,
            Phase::Break => Phase::Focus,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Phase::Focus => "Focus Time",
            Phase::Break => "Break Time",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Phase::Focus => "Stay focused on your task",
            Phase::Break => "Take a short break",
        }
    }
}

/// Full length of each phase, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub focus_secs: u64,
    pub break_secs: u64,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            focus_secs: FOCUS_SECS,
            break_secs: BREAK_SECS,
        }
    }
}

impl PhaseDurations {
    /// Build durations, rejecting zero-length phases.
    pub fn new(focus_secs: u64, break_secs: u64) -> Result<Self, ValidationError> {
        if focus_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "focus_secs",
                message: "phase length must be at least one second".into(),
            });
        }
        if break_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "break_secs",
                message: "phase length must be at least one second".into(),
            });
        }
        Ok(Self {
            focus_secs,
            break_secs,
        })
    }

    pub fn of(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Focus => self.focus_secs,
            Phase::Break => self.break_secs,
        }
    }
}

/// Render seconds as `MM:SS`. Minutes are not wrapped at 60.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
