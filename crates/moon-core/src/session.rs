//! The single owner of every per-session list.
//!
//! Nothing here outlives the process. Each screen reads and mutates its own
//! collection through the session; there is no shared global state.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate, NaiveTime, Weekday};

use crate::config::Config;
use crate::habits::{HabitRecord, HabitTracker};
use crate::journal::{Journal, JournalEntry};
use crate::profile::UserProfile;
use crate::settings::Settings;
use crate::sleep::{sleep_duration_min, SleepEntry, SleepLog};
use crate::tasks::{TaskList, TaskRecord};
use crate::timer::TimerEngine;

#[derive(Debug, Clone)]
pub struct Session {
    pub tasks: TaskList,
    pub habits: HabitTracker,
    pub journal: Journal,
    pub sleep: SleepLog,
    pub profile: UserProfile,
    pub settings: Settings,
}

impl Session {
    /// Empty lists; profile and settings come from configuration.
    pub fn new(config: &Config, today: NaiveDate) -> Self {
        Self {
            tasks: TaskList::new(),
            habits: HabitTracker::new(),
            journal: Journal::new(),
            sleep: SleepLog::new(),
            profile: UserProfile::new(config.profile.name.clone(), config.profile.age, today),
            settings: config.settings,
        }
    }

    /// A session pre-filled with a few example records on every screen.
    pub fn with_samples(config: &Config, today: NaiveDate) -> Self {
        let mut session = Self::new(config, today);
        session.profile.join_date = days_before(today, 30);
        session.tasks = TaskList::from_records(sample_tasks(today));
        session.habits = HabitTracker::from_records(sample_habits(today));
        session.journal = Journal::from_entries(sample_journal(today));
        session.sleep = SleepLog::from_entries(sample_sleep(today));
        session
    }

    /// Recompute the profile counters from the other lists.
    ///
    /// Focus time counts whole completed focus sessions only.
    pub fn refresh_profile_stats(&mut self, timer: &TimerEngine) {
        let focus_secs =
            u64::from(timer.completed_focus_sessions()) * timer.durations().focus_secs;
        self.profile.sleep_average_min = self.sleep.average_duration_min();
        self.profile.focus_time_min = focus_secs / 60;
        self.profile.tasks_completed = self.tasks.completed_count() as u32;
        self.profile.habits_tracked = self.habits.len() as u32;
    }
}

fn days_before(today: NaiveDate, n: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(n)).unwrap_or(today)
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}

fn sample_id(prefix: &str, n: u32) -> String {
    format!("{prefix}-{n}")
}

fn sample_tasks(today: NaiveDate) -> Vec<TaskRecord> {
    let tomorrow = today.succ_opt().unwrap_or(today);
    vec![
        TaskRecord {
            id: sample_id("task", 1),
            name: "Complete Moon App design".into(),
            date: today,
            time: Some(hm(14, 0)),
            description: "Finish the UI design for all screens".into(),
            reward: "30 mins break".into(),
            completed: false,
        },
        TaskRecord {
            id: sample_id("task", 2),
            name: "Meditation session".into(),
            date: today,
            time: Some(hm(8, 0)),
            description: "Morning meditation for focus".into(),
            reward: "Coffee break".into(),
            completed: true,
        },
        TaskRecord {
            id: sample_id("task", 3),
            name: "Read book chapter".into(),
            date: tomorrow,
            time: Some(hm(20, 0)),
            description: "Chapter 5 of \"Atomic Habits\"".into(),
            reward: "Episode of favorite show".into(),
            completed: false,
        },
    ]
}

fn sample_habits(today: NaiveDate) -> Vec<HabitRecord> {
    use Weekday::*;

    let dates = |back: &[u64]| -> BTreeSet<NaiveDate> {
        back.iter().map(|n| days_before(today, *n)).collect()
    };
    let ymd = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or(today);

    vec![
        HabitRecord {
            id: sample_id("habit", 1),
            name: "Morning meditation".into(),
            start_date: ymd(2023, 1, 1),
            end_date: None,
            scheduled_days: vec![Mon, Tue, Wed, Thu, Fri],
            reward: Some("5 stars per week".into()),
            completed_dates: dates(&[0, 1, 2]),
            streak_days: 12,
        },
        HabitRecord {
            id: sample_id("habit", 2),
            name: "Read 20 pages".into(),
            start_date: ymd(2023, 1, 15),
            end_date: None,
            scheduled_days: vec![Mon, Wed, Fri, Sun],
            reward: Some("1 movie night per week".into()),
            completed_dates: dates(&[0, 1]),
            streak_days: 5,
        },
        HabitRecord {
            id: sample_id("habit", 3),
            name: "Drink 8 glasses of water".into(),
            start_date: ymd(2023, 2, 1),
            end_date: None,
            scheduled_days: vec![Mon, Tue, Wed, Thu, Fri, Sat, Sun],
            reward: Some("Healthy skin".into()),
            completed_dates: dates(&[1]),
            streak_days: 30,
        },
    ]
}

fn sample_journal(today: NaiveDate) -> Vec<JournalEntry> {
    vec![
        JournalEntry {
            id: sample_id("journal", 1),
            date: today,
            content: "Today I started using the Moon app to track my productivity. \
                      I'm excited to see how it helps me organize my tasks and build better habits."
                .into(),
        },
        JournalEntry {
            id: sample_id("journal", 2),
            date: days_before(today, 1),
            content: "Had a productive day at work. Completed the presentation for \
                      tomorrow's meeting and went for a 30-minute walk during lunch break."
                .into(),
        },
    ]
}

fn sample_sleep(today: NaiveDate) -> Vec<SleepEntry> {
    let night = |n: u32, back: u64, sleep: NaiveTime, wake: NaiveTime, quality: u8, notes: &str| {
        SleepEntry {
            id: sample_id("sleep", n),
            date: days_before(today, back),
            sleep_time: sleep,
            wake_time: wake,
            duration_min: sleep_duration_min(sleep, wake),
            quality,
            notes: notes.into(),
        }
    };
    vec![
        night(1, 1, hm(23, 0), hm(7, 0), 4, "Slept well, but woke up once during the night."),
        night(2, 2, hm(23, 30), hm(7, 30), 3, "Had trouble falling asleep."),
        night(3, 3, hm(22, 45), hm(6, 45), 5, "Great sleep, felt refreshed."),
    ]
}
