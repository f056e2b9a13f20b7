//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Focus and break lengths, tick interval
//! - Completion cue (enabled, player command, sound file)
//! - Initial settings switches for a new session
//! - Profile defaults
//!
//! Configuration is stored at `~/.config/moon/config.toml`. Session records
//! are never written here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ValidationError};
use crate::settings::Settings;
use crate::timer::{PhaseDurations, BREAK_SECS, FOCUS_SECS};

/// Returns the configuration directory.
///
/// `MOON_CONFIG_DIR` wins when set. Otherwise `~/.config/moon`, or
/// `~/.config/moon-dev` when `MOON_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("MOON_CONFIG_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("MOON_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("moon-dev")
            } else {
                base_dir.join("moon")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::NoDirectory(format!(
        "{}: {e}",
        dir.display()
    )))?;
    Ok(dir)
}

/// Countdown configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus_secs")]
    pub focus_secs: u64,
    #[serde(default = "default_break_secs")]
    pub break_secs: u64,
    /// Milliseconds between ticks.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

/// Completion cue configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// External player, e.g. `paplay`. Unset means the terminal bell.
    #[serde(default)]
    pub sound_command: Option<String>,
    #[serde(default)]
    pub sound_args: Vec<String>,
    /// Cue file handed to the player as its last argument.
    #[serde(default)]
    pub sound_file: Option<String>,
}

/// Profile defaults for a new session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_profile_name")]
    pub name: String,
    #[serde(default = "default_age")]
    pub age: u32,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub profile: ProfileConfig,
}

fn default_focus_secs() -> u64 {
    FOCUS_SECS
}
fn default_break_secs() -> u64 {
    BREAK_SECS
}
fn default_tick_ms() -> u64 {
    1000
}
fn default_true() -> bool {
    true
}
fn default_profile_name() -> String {
    "Moon User".into()
}
fn default_age() -> u32 {
    28
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_secs: default_focus_secs(),
            break_secs: default_break_secs(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sound_command: None,
            sound_args: Vec::new(),
            sound_file: None,
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: default_profile_name(),
            age: default_age(),
        }
    }
}

impl TimerConfig {
    pub fn durations(&self) -> Result<PhaseDurations, ValidationError> {
        PhaseDurations::new(self.focus_secs, self.break_secs)
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let parse_err = |what: &str| {
                    ConfigError::ParseFailed(format!("cannot parse '{value}' as {what} for {key}"))
                };
                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|_| parse_err("bool"))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value.parse::<u64>().map_err(|_| parse_err("number"))?.into(),
                    ),
                    serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|_| parse_err("array"))?
                    }
                    serde_json::Value::Object(_) => return Err(unknown()),
                    // Strings and unset options.
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default config file location.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if there is no file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_err = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_err(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_err(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// into the key's type.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        updated
            .timer
            .durations()
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save to the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.timer.focus_secs, 1500);
        assert_eq!(parsed.timer.break_secs, 300);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("timer.focus_secs").as_deref(), Some("1500"));
        assert_eq!(cfg.get("settings.dark_mode").as_deref(), Some("true"));
        assert_eq!(cfg.get("profile.name").as_deref(), Some("Moon User"));
        assert!(cfg.get("timer.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_value_updates_typed_fields() {
        let mut cfg = Config::default();
        cfg.set_value("timer.break_secs", "600").unwrap();
        cfg.set_value("settings.privacy", "true").unwrap();
        cfg.set_value("notifications.sound_command", "paplay").unwrap();
        cfg.set_value("notifications.sound_args", r#"["--volume", "40000"]"#)
            .unwrap();
        assert_eq!(cfg.timer.break_secs, 600);
        assert!(cfg.settings.privacy);
        assert_eq!(cfg.notifications.sound_command.as_deref(), Some("paplay"));
        assert_eq!(cfg.notifications.sound_args, vec!["--volume", "40000"]);
    }

    #[test]
    fn set_value_rejects_bad_input() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set_value("timer.nope", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.set_value("timer", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.set_value("settings.privacy", "maybe"),
            Err(ConfigError::ParseFailed(_))
        ));
        assert!(matches!(
            cfg.set_value("timer.focus_secs", "0"),
            Err(ConfigError::ParseFailed(_))
        ));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_keeps_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set_value("profile.age", "35").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().profile.age, 35);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timer = 5").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
