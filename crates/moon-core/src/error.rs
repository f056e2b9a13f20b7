//! Core error types for moon-core.
//!
//! Errors are grouped by concern with thiserror. Validation failures carry
//! the offending field so a front end can point the user at it.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for moon-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A form or record failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A record lookup by id found nothing
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Dotted key does not name a config value
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse a configuration value
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// No usable configuration directory
    #[error("Configuration directory unavailable: {0}")]
    NoDirectory(String),
}

/// Validation errors raised by the add/edit forms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trimming
    #[error("'{0}' must not be empty")]
    EmptyField(&'static str),

    /// A habit needs at least one weekday
    #[error("at least one scheduled day must be selected")]
    NoScheduledDays,

    /// Numeric value outside its allowed range
    #[error("'{field}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

/// Failure to play the completion cue. Never escapes the countdown.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("failed to launch sound player '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("sound player '{program}' exited with {status}")]
    PlayerFailed { program: String, status: String },

    #[error("no sound player configured")]
    NotConfigured,

    #[error("terminal bell failed: {0}")]
    Bell(#[source] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
