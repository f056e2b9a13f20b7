//! Sleep log: bed and wake times per night, with derived durations.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{Result, ValidationError};

pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 5;
pub const DEFAULT_QUALITY: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepEntry {
    pub id: String,
    pub date: NaiveDate,
    pub sleep_time: NaiveTime,
    pub wake_time: NaiveTime,
    pub duration_min: u32,
    pub quality: u8,
    #[serde(default)]
    pub notes: String,
}

/// Fields collected by the add-sleep form. Times are optional until the user
/// has filled them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSleepEntry {
    pub date: Option<NaiveDate>,
    pub sleep_time: Option<NaiveTime>,
    pub wake_time: Option<NaiveTime>,
    pub quality: u8,
    pub notes: String,
}

impl Default for NewSleepEntry {
    fn default() -> Self {
        Self {
            date: None,
            sleep_time: None,
            wake_time: None,
            quality: DEFAULT_QUALITY,
            notes: String::new(),
        }
    }
}

impl NewSleepEntry {
    pub fn into_entry(self, id: String) -> Result<SleepEntry, ValidationError> {
        let date = self.date.ok_or(ValidationError::EmptyField("date"))?;
        let sleep_time = self.sleep_time.ok_or(ValidationError::EmptyField("sleep_time"))?;
        let wake_time = self.wake_time.ok_or(ValidationError::EmptyField("wake_time"))?;
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&self.quality) {
            return Err(ValidationError::OutOfRange {
                field: "quality",
                min: MIN_QUALITY.into(),
                max: MAX_QUALITY.into(),
                value: self.quality.into(),
            });
        }
        Ok(SleepEntry {
            id,
            date,
            sleep_time,
            wake_time,
            duration_min: sleep_duration_min(sleep_time, wake_time),
            quality: self.quality,
            notes: self.notes,
        })
    }
}

/// Minutes between going to bed and waking. A wake time earlier than the
/// bed time is taken to be on the next day.
pub fn sleep_duration_min(sleep: NaiveTime, wake: NaiveTime) -> u32 {
    let sleep = sleep.num_seconds_from_midnight() / 60;
    let wake = wake.num_seconds_from_midnight() / 60;
    if wake < sleep {
        wake + 24 * 60 - sleep
    } else {
        wake - sleep
    }
}

/// `7h 30m` style rendering.
pub fn format_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[derive(Debug, Clone, Default)]
pub struct SleepLog {
    entries: Vec<SleepEntry>,
}

impl SleepLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<SleepEntry>) -> Self {
        Self { entries }
    }

    /// Newest night first.
    pub fn entries(&self) -> Vec<&SleepEntry> {
        let mut out: Vec<_> = self.entries.iter().collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }

    pub fn add(&mut self, form: NewSleepEntry) -> Result<&SleepEntry> {
        let entry = form.into_entry(Uuid::new_v4().to_string())?;
        info!(date = %entry.date, duration_min = entry.duration_min, "sleep entry added");
        let idx = self.entries.len();
        self.entries.push(entry);
        Ok(&self.entries[idx])
    }

    /// Mean duration in whole minutes, rounded; zero for an empty log.
    pub fn average_duration_min(&self) -> u32 {
        if self.entries.is_empty() {
            return 0;
        }
        let total: u64 = self.entries.iter().map(|e| u64::from(e.duration_min)).sum();
        (total as f64 / self.entries.len() as f64).round() as u32
    }

    pub fn average_quality(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let total: u32 = self.entries.iter().map(|e| u32::from(e.quality)).sum();
        Some(f64::from(total) / self.entries.len() as f64)
    }
}
