use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{load_json_file, save_json_atomic, Result};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory holding reminders.json and settings.json
    pub data_dir: PathBuf,

    /// Default due date offset for new reminders (in minutes)
    #[serde(default = "default_due_offset_minutes")]
    pub default_due_offset_minutes: i64,

    /// Optional JSON file overriding the built-in onboarding questions
    #[serde(default)]
    pub question_catalog: Option<PathBuf>,

    /// Whether to request calendar events for reminders that ask for one
    #[serde(default = "default_calendar_sync")]
    pub calendar_sync: bool,
}

fn default_due_offset_minutes() -> i64 {
    60
}

fn default_calendar_sync() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = ProjectDirs::from("com", "bizplanner", "bizplanner")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".bizplanner"));

        Self {
            data_dir,
            default_due_offset_minutes: default_due_offset_minutes(),
            question_catalog: None,
            calendar_sync: default_calendar_sync(),
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("com", "bizplanner", "bizplanner")
            .map(|dirs| dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from(".bizplanner").join("config.json"))
    }

    /// Reads the config file, falling back to defaults when it doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        match load_json_file(path)? {
            Some(config) => {
                info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            None => {
                debug!("No configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_json_atomic(path, self)?;
        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    pub fn reminders_path(&self) -> PathBuf {
        self.data_dir.join("reminders.json")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.default_due_offset_minutes, 60);
        assert!(config.calendar_sync);
        assert!(config.question_catalog.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"data_dir": "/tmp/plans"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/plans"));
        assert_eq!(config.default_due_offset_minutes, 60);
        assert_eq!(config.reminders_path(), PathBuf::from("/tmp/plans/reminders.json"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            default_due_offset_minutes: 15,
            question_catalog: Some(dir.path().join("questions.json")),
            calendar_sync: false,
        };

        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
