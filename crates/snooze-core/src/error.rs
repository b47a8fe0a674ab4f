//! Core error types for snooze-core.
//!
//! Every failure in a run is fatal: configuration problems, date/time
//! parsing, building the Monitoring client, and the remote create call
//! itself. The variants below keep those kinds apart so the CLI can report
//! them, but nothing downstream tries to recover from any of them.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for snooze-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Date/time parsing errors
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Monitoring API errors
    #[error("Monitoring API error: {0}")]
    Api(#[from] ApiError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to load configuration from {path}: {source}")]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration
    #[error("Failed to parse configuration from {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    /// File extension does not map to a known format
    #[error("Unsupported configuration format for {path} (expected .yaml, .yml, .toml or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Date/time parsing errors raised while resolving a schedule.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// `weekday_start_date_time` is not RFC3339
    #[error("Invalid start date-time '{value}': {source}")]
    InvalidStartDateTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// `weekend_start_time` is not HH:MM
    #[error("Invalid weekend start time '{value}' (expected HH:MM): {source}")]
    InvalidTimeOfDay {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The range end falls outside what chrono can represent
    #[error("Schedule range of {days} days starting {start} is out of range")]
    RangeOverflow { start: String, days: u64 },
}

/// Errors talking to the Cloud Monitoring API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP client could not be constructed
    #[error("Failed to build Monitoring client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Endpoint URL is malformed
    #[error("Invalid Monitoring endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    /// No access token could be obtained
    #[error("Failed to obtain access token from {source_name}: {message}")]
    Token {
        source_name: &'static str,
        message: String,
    },

    /// The create call failed in transport or was rejected by the API
    #[error("could not create custom snooze: {message}")]
    CreateSnooze {
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The API accepted the request but its reply could not be decoded
    #[error("snooze created but response unreadable (HTTP {status}): {source}")]
    UnreadableResponse {
        status: u16,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    pub(crate) fn rejected(status: u16, message: impl Into<String>) -> Self {
        ApiError::CreateSnooze {
            message: format!("HTTP {status}: {}", message.into()),
            status: Some(status),
            source: None,
        }
    }

    pub(crate) fn transport(err: reqwest::Error) -> Self {
        ApiError::CreateSnooze {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
            source: Some(err),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
