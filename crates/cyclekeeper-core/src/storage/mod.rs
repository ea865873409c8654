mod config;
pub mod database;
pub mod migrations;

pub use config::{CalendarConfig, Config, PredictionConfig, StorageConfig, WeekStart};
pub use database::{CycleRow, Database};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `CYCLEKEEPER_HOME` overrides the location outright. Otherwise the
/// directory is `~/.config/cyclekeeper[-dev]/`, with the `-dev` suffix
/// selected by `CYCLEKEEPER_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("CYCLEKEEPER_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("CYCLEKEEPER_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("cyclekeeper-dev")
            } else {
                base_dir.join("cyclekeeper")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
