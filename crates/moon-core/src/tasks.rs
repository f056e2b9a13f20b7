//! Day-planned tasks with an optional time slot and reward.

use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{CoreError, Result, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reward: String,
    #[serde(default)]
    pub completed: bool,
}

/// Fields collected by the add-task form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub name: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub description: String,
    pub reward: String,
}

impl NewTask {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
            time: None,
            description: String::new(),
            reward: String::new(),
        }
    }

    pub fn at(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn reward(mut self, reward: impl Into<String>) -> Self {
        self.reward = reward.into();
        self
    }

    pub fn into_record(self, id: String) -> Result<TaskRecord, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        Ok(TaskRecord {
            id,
            name: self.name.trim().to_string(),
            date: self.date,
            time: self.time,
            description: self.description,
            reward: self.reward,
            completed: false,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<TaskRecord>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(tasks: Vec<TaskRecord>) -> Self {
        Self { tasks }
    }

    pub fn list(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&TaskRecord> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn add(&mut self, form: NewTask) -> Result<&TaskRecord> {
        let record = form.into_record(Uuid::new_v4().to_string())?;
        info!(id = %record.id, name = %record.name, "task added");
        let idx = self.tasks.len();
        self.tasks.push(record);
        Ok(&self.tasks[idx])
    }

    /// Flip the completed flag. Returns the new value.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::not_found("task", id))?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    /// Tasks planned for `date`, earliest time first; untimed tasks last.
    pub fn for_date(&self, date: NaiveDate) -> Vec<&TaskRecord> {
        let mut day: Vec<_> = self.tasks.iter().filter(|t| t.date == date).collect();
        day.sort_by_key(|t| (t.time.is_none(), t.time));
        day
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

/// `days` consecutive dates starting at `today`, for the date selector.
pub fn date_strip(today: NaiveDate, days: usize) -> Vec<NaiveDate> {
    (0..days as u64)
        .filter_map(|ahead| today.checked_add_days(Days::new(ahead)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn add_requires_name() {
        let mut list = TaskList::new();
        assert!(list.add(NewTask::new("  ", today())).is_err());
        assert!(list.list().is_empty());
    }

    #[test]
    fn toggle_flips_completion() {
        let mut list = TaskList::new();
        let id = list
            .add(NewTask::new("Write report", today()).reward("Coffee"))
            .unwrap()
            .id
            .clone();
        assert!(list.toggle(&id).unwrap());
        assert_eq!(list.completed_count(), 1);
        assert!(!list.toggle(&id).unwrap());
        assert_eq!(list.completed_count(), 0);
    }

    #[test]
    fn toggle_unknown_is_not_found() {
        let mut list = TaskList::new();
        assert!(matches!(
            list.toggle("missing"),
            Err(CoreError::NotFound { kind: "task", .. })
        ));
    }

    #[test]
    fn day_view_orders_by_time() {
        let mut list = TaskList::new();
        list.add(NewTask::new("untimed", today())).unwrap();
        list.add(NewTask::new("evening", today()).at(hm(20, 0))).unwrap();
        list.add(NewTask::new("morning", today()).at(hm(8, 0))).unwrap();
        list.add(NewTask::new("tomorrow", today().succ_opt().unwrap()))
            .unwrap();

        let names: Vec<_> = list.for_date(today()).iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["morning", "evening", "untimed"]);
    }

    #[test]
    fn strip_covers_next_week() {
        let strip = date_strip(today(), 7);
        assert_eq!(strip.len(), 7);
        assert_eq!(strip[0], today());
        assert_eq!(strip[6], NaiveDate::from_ymd_opt(2026, 10, 25).unwrap());
    }
}
