//! Named snapshots of a whole config document, stored as JSON.
//!
//! A profile file looks like:
//!
//! ```json
//! {
//!   "name": "Test Profile",
//!   "created": "2026-01-01T12:00:00+01:00",
//!   "config": { "Section": { "Key": "Value" } }
//! }
//! ```

use crate::document::ConfigDocument;
use crate::error::ConfigError;
use crate::path_validation::validate_path;
use crate::store::write_atomic;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory created next to the config file to hold profiles.
pub const PROFILES_DIR_NAME: &str = "ArcTuner_Profiles";

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[derive(Serialize)]
struct ProfileRecord<'a> {
    name: &'a str,
    created: String,
    config: &'a ConfigDocument,
}

#[derive(Deserialize)]
struct ProfileBody {
    config: ConfigDocument,
}

#[derive(Deserialize)]
struct ProfileHeader {
    name: Option<String>,
    created: Option<String>,
}

/// Listing entry for one profile file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub path: PathBuf,
    /// Name recorded in the file, or the file stem when absent
    pub name: String,
    /// Creation timestamp as written, or `"Unknown"`
    pub created: String,
}

/// Profile files in one directory.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store for the `ArcTuner_Profiles` directory beside `config_path`.
    pub fn for_config(config_path: &Path) -> Self {
        Self::new(
            config_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(PROFILES_DIR_NAME),
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path used for profile `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_name(name)))
    }

    /// Write `document` as profile `name`, replacing any existing profile
    /// with the same sanitized name.
    pub fn save(&self, name: &str, document: &ConfigDocument) -> Result<PathBuf, ConfigError> {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation("profile name is empty".to_string()));
        }
        fs::create_dir_all(&self.dir)?;
        let path = validate_path(&self.path_for(name))?;

        let record = ProfileRecord {
            name,
            created: chrono::Local::now().to_rfc3339(),
            config: document,
        };
        let json = serde_json::to_string_pretty(&record)?;
        write_atomic(&path, json.as_bytes())?;

        log::info!("Profile saved: {name} -> {:?}", path);
        Ok(path)
    }

    /// Load the document stored in profile `name`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotFound`] when the file is absent or cannot be parsed.
    /// Parse problems are logged rather than returned.
    pub fn load(&self, name: &str) -> Result<ConfigDocument, ConfigError> {
        let path = self.path_for(name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(format!("profile '{name}'")));
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<ProfileBody>(&text) {
            Ok(body) => {
                log::info!("Profile loaded: {name}");
                Ok(body.config)
            }
            Err(e) => {
                log::error!("Failed to parse profile {:?}: {e}", path);
                Err(ConfigError::NotFound(format!("profile '{name}'")))
            }
        }
    }

    /// Every readable profile, sorted by name. Unparseable files are skipped.
    pub fn list(&self) -> Vec<ProfileSummary> {
        let Ok(read_dir) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        let mut profiles: Vec<ProfileSummary> = read_dir
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            })
            .filter_map(|path| {
                let text = fs::read_to_string(&path).ok()?;
                let header: ProfileHeader = match serde_json::from_str(&text) {
                    Ok(h) => h,
                    Err(e) => {
                        log::warn!("Skipping unreadable profile {:?}: {e}", path);
                        return None;
                    }
                };
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Some(ProfileSummary {
                    name: header.name.unwrap_or(stem),
                    created: header.created.unwrap_or_else(|| "Unknown".to_string()),
                    path,
                })
            })
            .collect();

        profiles.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
        profiles
    }

    /// Remove profile `name`.
    pub fn delete(&self, name: &str) -> Result<(), ConfigError> {
        let path = self.path_for(name);
        if !path.is_file() {
            return Err(ConfigError::NotFound(format!("profile '{name}'")));
        }
        fs::remove_file(&path)?;
        log::info!("Profile deleted: {name}");
        Ok(())
    }
}
