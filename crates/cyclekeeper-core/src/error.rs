//! Core error types for cyclekeeper-core.
//!
//! Errors are grouped by the boundary that raises them: user input
//! (validation), the credential file, the configuration file and the
//! history database. [`CoreError`] wraps all of them for callers that
//! don't care which boundary failed.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for cyclekeeper-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Credential store errors
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A stored row no longer parses as a cycle
    #[error("Corrupt cycle row {id}: {message}")]
    CorruptRow { id: i64, message: String },

    /// Database is locked
    #[error("Database is locked")]
    Locked,
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

    /// Unknown dotted key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Credential store errors.
///
/// The credential store keeps plaintext passwords; these errors are about
/// bookkeeping, not security.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// Username or password did not match a registered user
    #[error("Invalid username or password.")]
    Mismatch,

    /// Registration attempted with an empty username or password
    #[error("Please enter both a username and password.")]
    MissingFields,

    /// Credential file could not be read or written
    #[error("Credential file {path}: {message}")]
    File { path: PathBuf, message: String },
}

/// Validation errors raised at the input boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A date string did not match `YYYY-MM-DD`
    #[error("Invalid {field} date '{value}': please enter the date in the format YYYY-MM-DD.")]
    DateFormat { field: String, value: String },

    /// End date before start date
    #[error("Invalid date range: end date ({end}) is before start date ({start})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Flow label outside light/medium/heavy
    #[error("Unknown flow '{0}': expected light, medium or heavy")]
    UnknownFlow(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
