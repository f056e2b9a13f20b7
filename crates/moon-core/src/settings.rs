use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Per-session preference switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub notifications: bool,
    pub dark_mode: bool,
    pub privacy: bool,
    pub reminders: bool,
    pub sleep_reminders: bool,
    pub focus_reminders: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: true,
            dark_mode: true,
            privacy: false,
            reminders: true,
            sleep_reminders: true,
            focus_reminders: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    Notifications,
    DarkMode,
    Privacy,
    Reminders,
    SleepReminders,
    FocusReminders,
}

impl SettingKey {
    pub const ALL: [SettingKey; 6] = [
        SettingKey::Notifications,
        SettingKey::DarkMode,
        SettingKey::Privacy,
        SettingKey::Reminders,
        SettingKey::SleepReminders,
        SettingKey::FocusReminders,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::Notifications => "notifications",
            SettingKey::DarkMode => "dark_mode",
            SettingKey::Privacy => "privacy",
            SettingKey::Reminders => "reminders",
            SettingKey::SleepReminders => "sleep_reminders",
            SettingKey::FocusReminders => "focus_reminders",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        SettingKey::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "setting",
                message: format!("unknown setting '{s}'"),
            })
    }
}

impl Settings {
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::Notifications => self.notifications,
            SettingKey::DarkMode => self.dark_mode,
            SettingKey::Privacy => self.privacy,
            SettingKey::Reminders => self.reminders,
            SettingKey::SleepReminders => self.sleep_reminders,
            SettingKey::FocusReminders => self.focus_reminders,
        }
    }

    fn slot(&mut self, key: SettingKey) -> &mut bool {
        match key {
            SettingKey::Notifications => &mut self.notifications,
            SettingKey::DarkMode => &mut self.dark_mode,
            SettingKey::Privacy => &mut self.privacy,
            SettingKey::Reminders => &mut self.reminders,
            SettingKey::SleepReminders => &mut self.sleep_reminders,
            SettingKey::FocusReminders => &mut self.focus_reminders,
        }
    }

    /// Flip one switch and return its new value.
    pub fn toggle(&mut self, key: SettingKey) -> bool {
        let slot = self.slot(key);
        *slot = !*slot;
        *slot
    }

    pub fn iter(&self) -> impl Iterator<Item = (SettingKey, bool)> + '_ {
        SettingKey::ALL.into_iter().map(|k| (k, self.get(k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert!(s.notifications);
        assert!(s.dark_mode);
        assert!(!s.privacy);
        assert!(s.reminders);
        assert!(s.sleep_reminders);
        assert!(!s.focus_reminders);
    }

    #[test]
    fn toggle_touches_one_key() {
        let mut s = Settings::default();
        assert!(s.toggle(SettingKey::Privacy));
        assert!(s.privacy);
        let mut expected = Settings::default();
        expected.privacy = true;
        assert_eq!(s, expected);
        assert!(!s.toggle(SettingKey::Privacy));
    }

    #[test]
    fn keys_parse_loosely() {
        assert_eq!("dark-mode".parse::<SettingKey>().unwrap(), SettingKey::DarkMode);
        assert_eq!(
            "Sleep_Reminders".parse::<SettingKey>().unwrap(),
            SettingKey::SleepReminders
        );
        assert!("volume".parse::<SettingKey>().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let s: Settings = toml::from_str("privacy = true").unwrap();
        assert!(s.privacy);
        assert!(s.notifications);
    }
}
