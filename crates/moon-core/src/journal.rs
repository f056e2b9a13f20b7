//! One free-text journal entry per calendar day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{Result, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub date: NaiveDate,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStep {
    Prev,
    Next,
}

#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<JournalEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn entry_for(&self, date: NaiveDate) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    pub fn has_entry(&self, date: NaiveDate) -> bool {
        self.entry_for(date).is_some()
    }

    /// Dates with an entry, ascending.
    pub fn entry_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<_> = self.entries.iter().map(|e| e.date).collect();
        dates.sort();
        dates
    }

    /// Write the entry for `date`, replacing any earlier text for that day.
    pub fn save(&mut self, date: NaiveDate, content: impl Into<String>) -> Result<&JournalEntry> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyField("content").into());
        }

        let idx = match self.entries.iter().position(|e| e.date == date) {
            Some(idx) => {
                self.entries[idx].content = content;
                idx
            }
            None => {
                self.entries.push(JournalEntry {
                    id: Uuid::new_v4().to_string(),
                    date,
                    content,
                });
                self.entries.len() - 1
            }
        };
        info!(%date, "journal entry saved");
        Ok(&self.entries[idx])
    }
}

/// The day before or after `date`.
pub fn adjacent_day(date: NaiveDate, step: DayStep) -> Option<NaiveDate> {
    match step {
        DayStep::Prev => date.pred_opt(),
        DayStep::Next => date.succ_opt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn save_upserts_by_day() {
        let mut journal = Journal::new();
        let first_id = journal.save(date(19), "Started the app").unwrap().id.clone();
        let second = journal.save(date(19), "Rewrote today's entry").unwrap();
        assert_eq!(second.id, first_id);
        assert_eq!(journal.entries().len(), 1);
        assert_eq!(
            journal.entry_for(date(19)).map(|e| e.content.as_str()),
            Some("Rewrote today's entry")
        );
    }

    #[test]
    fn empty_content_is_rejected() {
        let mut journal = Journal::new();
        assert!(matches!(
            journal.save(date(19), " \n "),
            Err(CoreError::Validation(ValidationError::EmptyField("content")))
        ));
        assert!(!journal.has_entry(date(19)));
    }

    #[test]
    fn entry_dates_are_sorted() {
        let mut journal = Journal::new();
        journal.save(date(19), "b").unwrap();
        journal.save(date(17), "a").unwrap();
        assert_eq!(journal.entry_dates(), vec![date(17), date(19)]);
    }

    #[test]
    fn navigation_moves_one_day() {
        assert_eq!(adjacent_day(date(19), DayStep::Prev), Some(date(18)));
        assert_eq!(adjacent_day(date(19), DayStep::Next), Some(date(20)));
    }
}
