//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - How history is ordered before prediction
//! - Calendar rendering (highlight label, first day of the week)
//! - File names for the credential store and history database
//!
//! Configuration is stored at `<data dir>/config.toml`.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::data_dir;
use crate::credentials::DEFAULT_CREDENTIALS_FILE;
use crate::cycle::PERIOD_LABEL;
use crate::error::ConfigError;
use crate::predictor::HistoryOrder;

/// Prediction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionConfig {
    #[serde(default)]
    pub order: HistoryOrder,
}

/// First column of rendered month grids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
        }
    }
}

/// Calendar configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Label attached to each highlighted day
    #[serde(default = "default_label")]
    pub label: String,
    #[serde(default)]
    pub week_start: WeekStart,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
            week_start: WeekStart::default(),
        }
    }
}

/// File locations, relative to the data directory unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,
    #[serde(default = "default_database_file")]
    pub database_file: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub prediction: PredictionConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_label() -> String {
    PERIOD_LABEL.into()
}
fn default_credentials_file() -> String {
    DEFAULT_CREDENTIALS_FILE.into()
}
fn default_database_file() -> String {
    "cyclekeeper.db".into()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            credentials_file: default_credentials_file(),
            database_file: default_database_file(),
        }
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
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                // Every leaf is a string or a lowercase enum tag.
                if existing.is_object() {
                    return Err(invalid("cannot set a whole section".into()));
                }
                obj.insert(part.to_string(), serde_json::Value::String(value.into()));
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

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "config missing, writing defaults");
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

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
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

    /// Set a config value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit
    /// the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Resolve a configured file name against `dir`.
    pub fn resolve(dir: &Path, file: &str) -> PathBuf {
        let p = Path::new(file);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            dir.join(p)
        }
    }

    pub fn credentials_path(&self, dir: &Path) -> PathBuf {
        Self::resolve(dir, &self.storage.credentials_file)
    }

    pub fn database_path(&self, dir: &Path) -> PathBuf {
        Self::resolve(dir, &self.storage.database_file)
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
        assert_eq!(parsed.prediction.order, HistoryOrder::Insertion);
        assert_eq!(parsed.calendar.week_start, WeekStart::Monday);
        assert_eq!(parsed.storage.credentials_file, "users.json");
    }

    #[test]
    fn empty_file_yields_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.storage.database_file, "cyclekeeper.db");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("prediction.order").as_deref(), Some("insertion"));
        assert_eq!(cfg.get("calendar.week_start").as_deref(), Some("monday"));
        assert!(cfg.get("calendar.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_enum_fields() {
        let mut cfg = Config::default();
        cfg.set("prediction.order", "chronological").unwrap();
        assert_eq!(cfg.prediction.order, HistoryOrder::Chronological);
        cfg.set("calendar.week_start", "sunday").unwrap();
        assert_eq!(cfg.calendar.week_start.weekday(), Weekday::Sun);
    }

    #[test]
    fn calendar_label_defaults_to_period_and_can_be_set() {
        let mut cfg = Config::default();
        assert_eq!(cfg.get("calendar.label").as_deref(), Some("Period"));
        cfg.set("calendar.label", "Flow day").unwrap();
        assert_eq!(cfg.calendar.label, "Flow day");

        let parsed: Config = toml::from_str("[calendar]\nweek_start = \"sunday\"\n").unwrap();
        assert_eq!(parsed.calendar.label, "Period");
        assert_eq!(parsed.calendar.week_start, WeekStart::Sunday);
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_value() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("prediction.window", "3"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.set("prediction.order", "sideways"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set("prediction", "x"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg.prediction.order, HistoryOrder::Insertion);
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.prediction.order, HistoryOrder::Insertion);

        let mut cfg = cfg;
        cfg.set("storage.credentials_file", "people.json").unwrap();
        cfg.save_to(&path).unwrap();
        let again = Config::load_from(&path).unwrap();
        assert_eq!(again.credentials_path(dir.path()), dir.path().join("people.json"));
    }

    #[test]
    fn resolve_keeps_absolute_paths() {
        let dir = Path::new("/data");
        let abs = if cfg!(windows) { "C:\\x\\users.json" } else { "/x/users.json" };
        assert_eq!(Config::resolve(dir, abs), PathBuf::from(abs));
        assert_eq!(Config::resolve(dir, "users.json"), dir.join("users.json"));
    }
}
