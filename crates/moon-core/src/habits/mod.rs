//! Habit tracking: per-habit completion dates, a toggle counter shown as the
//! streak, and a rolling window of recent days for compact display.

mod record;
mod tracker;
mod window;

pub use record::{toggle_completion, HabitRecord, NewHabit};
pub use tracker::HabitTracker;
pub use window::{current_run, rolling_window, DayMark, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
