//! # Moon Core Library
//!
//! Domain logic for the Moon personal productivity client. Every screen of
//! the client (tasks, habits, journal, sleep log, timer, profile, settings)
//! is backed by in-memory state owned by a single [`Session`]; the CLI is a
//! thin front end over the same types.
//!
//! ## Architecture
//!
//! - **Timer**: a second-granular focus/break countdown ([`TimerEngine`])
//!   driven by explicitly armed, cancellable one-shot ticks ([`Countdown`])
//! - **Habits**: completion dates, toggle-count streaks and rolling windows
//! - **Records**: tasks, journal entries, sleep log, profile and settings
//! - **Config**: TOML preferences under `~/.config/moon/`
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Countdown state machine
//! - [`Countdown`]: Scheduled driver with completion cue
//! - [`HabitTracker`]: Habit list and streak bookkeeping
//! - [`Session`]: Owner of all per-session lists
//! - [`Config`]: Application configuration management

pub mod config;
pub mod error;
pub mod events;
pub mod habits;
pub mod journal;
pub mod notify;
pub mod profile;
pub mod session;
pub mod settings;
pub mod sleep;
pub mod tasks;
pub mod timer;

pub use config::Config;
pub use error::{ConfigError, CoreError, NotifyError, ValidationError};
pub use events::Event;
pub use habits::{HabitRecord, HabitTracker, NewHabit};
pub use notify::Notifier;
pub use session::Session;
pub use settings::{SettingKey, Settings};
pub use timer::{Countdown, Phase, TimerEngine, TimerState};
