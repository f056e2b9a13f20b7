use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A tracked habit.
///
/// `streak_days` moves by one with every toggle. It is a toggle count, not a
/// recomputed run of consecutive days; see [`current_run`](super::current_run)
/// for the latter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRecord {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Monday-first, no duplicates.
    pub scheduled_days: Vec<Weekday>,
    #[serde(default)]
    pub reward: Option<String>,
    #[serde(default)]
    pub completed_dates: BTreeSet<NaiveDate>,
    #[serde(default)]
    /// Can go negative when dates are un-toggled below the starting count.
    pub streak_days: i32,
}

impl HabitRecord {
    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    pub fn is_scheduled_on(&self, date: NaiveDate) -> bool {
        self.scheduled_days.contains(&date.weekday())
    }

    /// Whether `date` falls within `start_date ..= end_date`.
    /// Informational only: toggles are accepted outside the range too.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.map_or(true, |end| date <= end)
    }

    /// Comma-separated short day names, e.g. `Mon, Wed, Fri`.
    pub fn days_label(&self) -> String {
        self.scheduled_days
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Flip completion for `date`. Returns whether the habit is now completed.
///
/// Adding the date bumps `streak_days`; removing it takes one off. Toggling
/// the same date twice restores the record.
pub fn toggle_completion(habit: &mut HabitRecord, date: NaiveDate) -> bool {
    if habit.completed_dates.remove(&date) {
        habit.streak_days -= 1;
        false
    } else {
        habit.completed_dates.insert(date);
        habit.streak_days += 1;
        true
    }
}

/// Fields collected by the add-habit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHabit {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub scheduled_days: Vec<Weekday>,
    pub reward: Option<String>,
}

impl NewHabit {
    pub fn new(name: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start_date,
            end_date: None,
            scheduled_days: Vec::new(),
            reward: None,
        }
    }

    pub fn days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.scheduled_days = days.into_iter().collect();
        self
    }

    pub fn ending(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn reward(mut self, reward: impl Into<String>) -> Self {
        self.reward = Some(reward.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        if self.scheduled_days.is_empty() {
            return Err(ValidationError::NoScheduledDays);
        }
        Ok(())
    }

    /// Validate and build a fresh record: nothing completed, streak zero.
    pub fn into_record(self, id: String) -> Result<HabitRecord, ValidationError> {
        self.validate()?;
        let mut days = self.scheduled_days;
        days.sort_by_key(|d| d.num_days_from_monday());
        days.dedup();
        Ok(HabitRecord {
            id,
            name: self.name.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            scheduled_days: days,
            reward: self
                .reward
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
            completed_dates: BTreeSet::new(),
            streak_days: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn habit() -> HabitRecord {
        NewHabit::new("Morning meditation", date(2026, 1, 1))
            .days([Weekday::Fri, Weekday::Mon, Weekday::Mon])
            .reward("  ")
            .into_record("h1".into())
            .unwrap()
    }

    #[test]
    fn new_record_starts_empty() {
        let h = habit();
        assert!(h.completed_dates.is_empty());
        assert_eq!(h.streak_days, 0);
        assert_eq!(h.scheduled_days, vec![Weekday::Mon, Weekday::Fri]);
        assert_eq!(h.reward, None);
        assert_eq!(h.days_label(), "Mon, Fri");
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = NewHabit::new("   ", date(2026, 1, 1))
            .days([Weekday::Mon])
            .into_record("x".into())
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("name"));
    }

    #[test]
    fn no_days_is_rejected() {
        let err = NewHabit::new("Read", date(2026, 1, 1))
            .into_record("x".into())
            .unwrap_err();
        assert_eq!(err, ValidationError::NoScheduledDays);
    }

    #[test]
    fn toggle_twice_restores_record() {
        let mut h = habit();
        h.completed_dates.insert(date(2026, 3, 1));
        h.streak_days = 4;
        let before = h.clone();

        assert!(toggle_completion(&mut h, date(2026, 3, 2)));
        assert_eq!(h.streak_days, 5);
        assert!(h.is_completed_on(date(2026, 3, 2)));

        assert!(!toggle_completion(&mut h, date(2026, 3, 2)));
        assert_eq!(h, before);
    }

    #[test]
    fn toggle_twice_restores_zero_counter() {
        let mut h = habit();
        h.completed_dates.insert(date(2026, 3, 1));
        h.streak_days = 0;
        let before = h.clone();

        assert!(!toggle_completion(&mut h, date(2026, 3, 1)));
        assert_eq!(h.streak_days, -1);
        assert!(toggle_completion(&mut h, date(2026, 3, 1)));
        assert_eq!(h, before);
    }

    #[test]
    fn active_range_is_inclusive() {
        let h = NewHabit::new("Walk", date(2026, 5, 1))
            .days([Weekday::Sat])
            .ending(date(2026, 5, 31))
            .into_record("w".into())
            .unwrap();
        assert!(!h.is_active_on(date(2026, 4, 30)));
        assert!(h.is_active_on(date(2026, 5, 1)));
        assert!(h.is_active_on(date(2026, 5, 31)));
        assert!(!h.is_active_on(date(2026, 6, 1)));
    }

    #[test]
    fn scheduled_on_matches_weekday() {
        let h = habit();
        // 2026-10-19 is a Monday.
        assert!(h.is_scheduled_on(date(2026, 10, 19)));
        assert!(!h.is_scheduled_on(date(2026, 10, 20)));
    }
}
