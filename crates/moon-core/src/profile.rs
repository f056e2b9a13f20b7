use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

pub const DEFAULT_AVATAR: &str = "/placeholder.svg?height=200&width=200";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub join_date: NaiveDate,
    pub avatar: String,
    /// Average night, in minutes.
    pub sleep_average_min: u32,
    /// Total focused time, in minutes.
    pub focus_time_min: u64,
    pub tasks_completed: u32,
    pub habits_tracked: u32,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, age: u32, join_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            age,
            join_date,
            avatar: DEFAULT_AVATAR.to_string(),
            sleep_average_min: 0,
            focus_time_min: 0,
            tasks_completed: 0,
            habits_tracked: 0,
        }
    }

    /// Apply the edit-profile form.
    ///
    /// The name is required. Age text that does not parse as a whole number
    /// leaves the current age in place.
    pub fn apply_edit(&mut self, edit: ProfileEdit) -> Result<()> {
        let name = edit.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("name").into());
        }
        self.name = name.to_string();
        if let Ok(age) = edit.age.trim().parse::<u32>() {
            self.age = age;
        }
        Ok(())
    }
}

/// Fields collected by the edit-profile form, as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileEdit {
    pub name: String,
    pub age: String,
}

impl ProfileEdit {
    /// Pre-fill the form from the current profile.
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            age: profile.age.to_string(),
        }
    }
}
