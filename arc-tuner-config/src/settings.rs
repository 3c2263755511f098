//! The tuner's own preferences, kept in a small YAML file.
//!
//! These are separate from the game config: they remember which game file to
//! open, whether to snapshot before saving and how chatty the log should be.

use crate::error::ConfigError;
use crate::store::write_atomic;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Log level for debug logging to file.
///
/// `RUST_LOG` and the `--log-level` CLI flag take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging (log file not created)
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            LogLevel::Off => "Off",
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    pub fn all() -> &'static [LogLevel] {
        &[
            LogLevel::Off,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
    }

    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_backup_on_save() -> bool {
    true
}

/// Persistent tuner preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunerSettings {
    /// Game config to open when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<PathBuf>,
    /// Snapshot the game config before every save
    #[serde(default = "default_backup_on_save")]
    pub backup_on_save: bool,
    pub log_level: LogLevel,
}

impl Default for TunerSettings {
    fn default() -> Self {
        Self {
            config_path: None,
            backup_on_save: default_backup_on_save(),
            log_level: LogLevel::default(),
        }
    }
}

impl TunerSettings {
    /// Load from the default location, writing defaults there on first run.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::settings_path();
        log::info!("Settings path: {:?}", path);
        if path.exists() {
            Self::load_from(&path)
        } else {
            log::info!("Settings file not found, creating default at {:?}", path);
            let settings = Self::default();
            if let Err(e) = settings.save_to(&path) {
                log::error!("Failed to save default settings: {e}");
                return Err(e);
            }
            Ok(settings)
        }
    }

    /// Parse settings from `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound(path.display().to_string()),
            _ => ConfigError::Io(e),
        })?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(&contents)?)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::settings_path())
    }

    /// Save to `path`, creating its parent directory.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml_ng::to_string(self)?;
        write_atomic(path, yaml.as_bytes())
    }

    /// Settings file path (using XDG convention)
    pub fn settings_path() -> PathBuf {
        Self::settings_dir().join("settings.yaml")
    }

    /// Settings directory path (using XDG convention)
    pub fn settings_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("arc-tuner")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("arc-tuner")
            } else {
                PathBuf::from(".")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = TunerSettings::default();
        assert!(settings.backup_on_save);
        assert_eq!(settings.log_level, LogLevel::Info);
        assert!(settings.config_path.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.yaml");
        let settings = TunerSettings {
            config_path: Some(PathBuf::from("/games/GameUserSettings.ini")),
            backup_on_save: false,
            log_level: LogLevel::Debug,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(TunerSettings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "log_level: trace\n").unwrap();
        let settings = TunerSettings::load_from(&path).unwrap();
        assert_eq!(settings.log_level, LogLevel::Trace);
        assert!(settings.backup_on_save);
    }

    #[test]
    fn test_empty_file_is_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "").unwrap();
        assert_eq!(
            TunerSettings::load_from(&path).unwrap(),
            TunerSettings::default()
        );
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "log_level: [nope\n").unwrap();
        assert!(matches!(
            TunerSettings::load_from(&path),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            TunerSettings::load_from(&dir.path().join("none.yaml")),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_log_level_filters() {
        assert_eq!(LogLevel::Off.to_level_filter(), log::LevelFilter::Off);
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::all().len(), 6);
    }
}
