//! Timestamped snapshots of the live config file.
//!
//! Snapshots are plain copies named `<stem>_<YYYYMMDD_HHMMSS>[_<tag>].ini`
//! in a directory next to the config. They are never pruned.

use crate::error::ConfigError;
use crate::path_validation::validate_path;
use crate::profiles::sanitize_name;
use crate::store::write_atomic;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory created next to the config file to hold snapshots.
pub const BACKUP_DIR_NAME: &str = "ArcTuner_Backups";

/// Tag used for the snapshot taken before a restore.
pub const PRE_RESTORE_TAG: &str = "pre_restore";

/// Tag used for the snapshot taken before a save.
pub const PRE_SAVE_TAG: &str = "pre_save";

/// One snapshot file found by [`BackupManager::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    pub path: PathBuf,
    pub name: String,
    pub modified: DateTime<Local>,
    pub size: u64,
}

/// Creates, lists and restores snapshots in one directory.
#[derive(Debug, Clone)]
pub struct BackupManager {
    dir: PathBuf,
    stem: String,
}

impl BackupManager {
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
        }
    }

    /// Manager for the `ArcTuner_Backups` directory beside `config_path`,
    /// using the config's file stem as the snapshot prefix.
    pub fn for_config(config_path: &Path) -> Self {
        let dir = config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(BACKUP_DIR_NAME);
        let stem = config_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "GameUserSettings".to_string());
        Self::new(dir, stem)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Copy `config_path` into a new snapshot and return its path.
    ///
    /// An empty `tag` omits the suffix. When two snapshots land in the same
    /// second a counter is appended so neither is overwritten.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotFound`] when the source file is missing,
    /// [`ConfigError::InvalidPath`] or [`ConfigError::Io`] otherwise.
    pub fn create(&self, config_path: &Path, tag: &str) -> Result<PathBuf, ConfigError> {
        if !config_path.is_file() {
            return Err(ConfigError::NotFound(config_path.display().to_string()));
        }
        fs::create_dir_all(&self.dir)?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let base = if tag.is_empty() {
            format!("{}_{timestamp}", self.stem)
        } else {
            format!("{}_{timestamp}_{}", self.stem, sanitize_name(tag))
        };

        let mut backup_path = self.dir.join(format!("{base}.ini"));
        let mut n = 1;
        while backup_path.exists() {
            backup_path = self.dir.join(format!("{base}_{n}.ini"));
            n += 1;
        }

        let backup_path = validate_path(&backup_path)?;
        fs::copy(config_path, &backup_path).inspect_err(|e| {
            log::error!("Backup of {:?} failed: {e}", config_path);
        })?;
        log::info!("Backup created: {:?}", backup_path);
        Ok(backup_path)
    }

    /// All snapshots for this stem, newest first. Ties on modification time
    /// are broken by name, descending. An absent directory yields an empty
    /// list.
    pub fn list(&self) -> Vec<BackupEntry> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(rd) => rd,
            Err(e) => {
                if self.dir.exists() {
                    log::warn!("Failed to read backup directory {:?}: {e}", self.dir);
                }
                return Vec::new();
            }
        };

        let prefix = format!("{}_", self.stem);
        let mut entries: Vec<BackupEntry> = read_dir
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let path = entry.path();
                let name = entry.file_name().to_string_lossy().into_owned();
                let is_backup = name.starts_with(&prefix)
                    && path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("ini"));
                if !is_backup {
                    return None;
                }
                let meta = entry.metadata().ok().filter(|m| m.is_file())?;
                let modified = meta.modified().ok()?.into();
                Some(BackupEntry {
                    path,
                    name,
                    modified,
                    size: meta.len(),
                })
            })
            .collect();

        entries.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| b.name.cmp(&a.name))
        });
        entries
    }

    /// Replace `live_path` with the contents of `backup_path`.
    ///
    /// The current live file is snapshotted with the `pre_restore` tag first;
    /// if that snapshot fails the restore does not happen.
    pub fn restore(&self, backup_path: &Path, live_path: &Path) -> Result<(), ConfigError> {
        let backup = validate_path(backup_path)?;
        let live = validate_path(live_path)?;

        if !backup.is_file() {
            return Err(ConfigError::NotFound(backup_path.display().to_string()));
        }

        if live.exists() {
            let snapshot = self.create(&live, PRE_RESTORE_TAG).inspect_err(|e| {
                log::error!("Restore aborted, could not snapshot {:?}: {e}", live);
            })?;
            log::info!("Pre-restore snapshot: {:?}", snapshot);
        }

        let contents = fs::read(&backup)?;
        write_atomic(&live, &contents)?;
        log::info!("Restored backup {:?} to {:?}", backup, live);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::{Duration, SystemTime};
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, PathBuf, BackupManager) {
        let dir = tempdir().unwrap();
        let config = dir.path().join("GameUserSettings.ini");
        fs::write(&config, "[S]\nA=1\n").unwrap();
        let manager = BackupManager::for_config(&config);
        (dir, config, manager)
    }

    fn set_mtime(path: &Path, secs_ago: u64) {
        let time = SystemTime::now() - Duration::from_secs(secs_ago);
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    #[test]
    fn test_for_config_layout() {
        let (dir, _config, manager) = setup();
        assert_eq!(manager.dir(), dir.path().join(BACKUP_DIR_NAME));
        assert_eq!(manager.stem(), "GameUserSettings");
    }

    #[test]
    fn test_create_with_tag() {
        let (_dir, config, manager) = setup();
        let backup = manager.create(&config, "manual").unwrap();
        let name = backup.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("GameUserSettings_"));
        assert!(name.ends_with("_manual.ini"));
        // GameUserSettings_ + YYYYMMDD_HHMMSS + _manual.ini
        assert_eq!(name.len(), "GameUserSettings_".len() + 15 + "_manual.ini".len());
        assert_eq!(fs::read(&backup).unwrap(), fs::read(&config).unwrap());
    }

    #[test]
    fn test_create_without_tag() {
        let (_dir, config, manager) = setup();
        let backup = manager.create(&config, "").unwrap();
        let name = backup.file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(name.len(), "GameUserSettings_".len() + 15 + ".ini".len());
    }

    #[test]
    fn test_same_second_snapshots_do_not_collide() {
        let (_dir, config, manager) = setup();
        let first = manager.create(&config, "x").unwrap();
        let second = manager.create(&config, "x").unwrap();
        let third = manager.create(&config, "x").unwrap();
        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_eq!(manager.list().len(), 3);
    }

    #[test]
    fn test_create_missing_source() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("GameUserSettings.ini");
        let manager = BackupManager::for_config(&config);
        assert!(matches!(
            manager.create(&config, ""),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_tag_cannot_escape_directory() {
        let (_dir, config, manager) = setup();
        let backup = manager.create(&config, "../../evil").unwrap();
        assert_eq!(backup.parent(), Some(fs::canonicalize(manager.dir()).unwrap().as_path()));
    }

    #[test]
    fn test_list_newest_first_and_filtered() {
        let (_dir, config, manager) = setup();
        let older = manager.create(&config, "older").unwrap();
        let newer = manager.create(&config, "newer").unwrap();
        set_mtime(&older, 120);
        set_mtime(&newer, 10);
        fs::write(manager.dir().join("notes.txt"), "x").unwrap();
        fs::write(manager.dir().join("Other_20250101_000000.ini"), "x").unwrap();

        let list = manager.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].path, newer);
        assert_eq!(list[1].path, older);
        assert!(list[0].size > 0);
    }

    #[test]
    fn test_list_absent_directory() {
        let dir = tempdir().unwrap();
        let manager = BackupManager::new(dir.path().join("nope"), "GameUserSettings");
        assert!(manager.list().is_empty());
    }

    #[test]
    fn test_restore_takes_pre_restore_snapshot() {
        let (_dir, config, manager) = setup();
        let backup = manager.create(&config, "manual").unwrap();
        fs::write(&config, "[S]\nA=2\n").unwrap();

        manager.restore(&backup, &config).unwrap();

        assert_eq!(fs::read_to_string(&config).unwrap(), "[S]\nA=1\n");
        let pre = manager
            .list()
            .into_iter()
            .find(|e| e.name.contains(PRE_RESTORE_TAG))
            .expect("pre_restore snapshot");
        assert_eq!(fs::read_to_string(pre.path).unwrap(), "[S]\nA=2\n");
    }

    #[test]
    fn test_restore_missing_backup() {
        let (_dir, config, manager) = setup();
        let missing = manager.dir().join("GameUserSettings_missing.ini");
        assert!(matches!(
            manager.restore(&missing, &config),
            Err(ConfigError::NotFound(_))
        ));
        assert!(manager.list().is_empty());
    }

    #[test]
    fn test_restore_rejects_bad_extension() {
        let (dir, config, manager) = setup();
        let bogus = dir.path().join("payload.exe");
        fs::write(&bogus, "x").unwrap();
        assert!(matches!(
            manager.restore(&bogus, &config),
            Err(ConfigError::InvalidPath(_))
        ));
    }
}
