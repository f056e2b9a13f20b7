use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use super::record::{toggle_completion, HabitRecord, NewHabit};
use super::window::{rolling_window, DayMark};
use crate::error::{CoreError, Result};
use crate::events::Event;

/// The habit list owned by a session.
#[derive(Debug, Clone, Default)]
pub struct HabitTracker {
    habits: Vec<HabitRecord>,
}

impl HabitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing records, e.g. seeded sample data.
    pub fn from_records(habits: Vec<HabitRecord>) -> Self {
        Self { habits }
    }

    pub fn list(&self) -> &[HabitRecord] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&HabitRecord> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Validate the form and append the new habit.
    pub fn add(&mut self, form: NewHabit) -> Result<&HabitRecord> {
        let record = form.into_record(Uuid::new_v4().to_string())?;
        info!(id = %record.id, name = %record.name, "habit added");
        let idx = self.habits.len();
        self.habits.push(record);
        Ok(&self.habits[idx])
    }

    /// Toggle `date` on the habit with `id`.
    pub fn toggle(&mut self, id: &str, date: NaiveDate) -> Result<Event> {
        let habit = self
            .habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| CoreError::not_found("habit", id))?;
        let completed = toggle_completion(habit, date);
        Ok(Event::HabitToggled {
            habit_id: habit.id.clone(),
            date,
            completed,
            streak_days: habit.streak_days,
            at: Utc::now(),
        })
    }

    pub fn window(&self, id: &str, today: NaiveDate, days: usize) -> Result<Vec<DayMark>> {
        self.get(id)
            .map(|h| rolling_window(h, today, days))
            .ok_or_else(|| CoreError::not_found("habit", id))
    }

    pub fn completed_on(&self, date: NaiveDate) -> usize {
        self.habits.iter().filter(|h| h.is_completed_on(date)).count()
    }
}
