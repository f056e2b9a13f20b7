use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::record::HabitRecord;

/// Length of the compact tracker shown under each habit.
pub const DEFAULT_WINDOW_DAYS: usize = 7;

/// Longest window any caller can ask for; longer requests are clamped.
pub const MAX_WINDOW_DAYS: usize = 366;

/// One day of a rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMark {
    pub date: NaiveDate,
    pub completed: bool,
}

/// The `days` calendar dates ending at `today`, oldest first, each flagged
/// with whether the habit was completed that day. At most
/// [`MAX_WINDOW_DAYS`] days are returned.
pub fn rolling_window(habit: &HabitRecord, today: NaiveDate, days: usize) -> Vec<DayMark> {
    (0..days.min(MAX_WINDOW_DAYS) as u64)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| DayMark {
            date,
            completed: habit.is_completed_on(date),
        })
        .collect()
}

/// Consecutive completed days ending at `today`.
///
/// If today is not done yet the run may still end yesterday, so an open day
/// does not read as a broken run. This is derived from `completed_dates`
/// and is independent of the stored `streak_days` counter.
pub fn current_run(habit: &HabitRecord, today: NaiveDate) -> u32 {
    let mut day = if habit.is_completed_on(today) {
        Some(today)
    } else {
        today.pred_opt()
    };
    let mut run = 0;
    while let Some(d) = day {
        if !habit.is_completed_on(d) {
            break;
        }
        run += 1;
        day = d.pred_opt();
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habits::NewHabit;
    use chrono::Weekday;

    fn day(offset: i64) -> NaiveDate {
        let base = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        base + chrono::Duration::days(offset)
    }

    fn habit_with(done: &[i64]) -> HabitRecord {
        let mut h = NewHabit::new("Read 20 pages", day(-30))
            .days([Weekday::Mon])
            .into_record("r".into())
            .unwrap();
        h.completed_dates = done.iter().map(|o| day(*o)).collect();
        h
    }

    #[test]
    fn window_is_oldest_first_and_flags_members() {
        let h = habit_with(&[-1, -3]);
        let window = rolling_window(&h, day(0), DEFAULT_WINDOW_DAYS);

        let dates: Vec<_> = window.iter().map(|m| m.date).collect();
        let expected: Vec<_> = (-6..=0).map(day).collect();
        assert_eq!(dates, expected);

        let flags: Vec<_> = window.iter().map(|m| m.completed).collect();
        assert_eq!(flags, vec![false, false, false, true, false, true, false]);
    }

    #[test]
    fn window_crosses_month_boundary() {
        let h = habit_with(&[]);
        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let window = rolling_window(&h, today, 3);
        assert_eq!(window[0].date, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(window[2].date, today);
    }

    #[test]
    fn zero_length_window_is_empty() {
        assert!(rolling_window(&habit_with(&[0]), day(0), 0).is_empty());
    }

    #[test]
    fn huge_window_is_clamped() {
        let window = rolling_window(&habit_with(&[0]), day(0), usize::MAX);
        assert_eq!(window.len(), MAX_WINDOW_DAYS);
        assert_eq!(window.last().map(|m| m.date), Some(day(0)));
    }

    #[test]
    fn run_counts_back_from_today() {
        assert_eq!(current_run(&habit_with(&[0, -1, -2, -4]), day(0)), 3);
    }

    #[test]
    fn run_may_end_yesterday() {
        assert_eq!(current_run(&habit_with(&[-1, -2]), day(0)), 2);
    }

    #[test]
    fn gap_breaks_run() {
        assert_eq!(current_run(&habit_with(&[-2, -3]), day(0)), 0);
    }
}
