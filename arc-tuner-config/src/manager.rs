//! Editing session over one game config file.
//!
//! [`ConfigManager`] ties the pieces together: it finds the file, keeps the
//! current [`ConfigDocument`] in memory, translates setting keys to file
//! locations through the catalog, and owns the backup and profile
//! directories that sit next to the config.
//!
//! Session state moves `Unloaded -> Clean` on read, `Clean -> Dirty` on any
//! edit and back to `Clean` on a successful write. Reading again replaces the
//! document; callers that care about unsaved edits check [`is_dirty`] first.
//!
//! [`is_dirty`]: ConfigManager::is_dirty

use crate::backup::{BackupEntry, BackupManager, PRE_SAVE_TAG};
use crate::catalog::{SettingCatalog, SettingDefinition};
use crate::codec::{self, DisplayValue};
use crate::document::ConfigDocument;
use crate::error::ConfigError;
use crate::locator::{ConfigLocator, DefaultLocator};
use crate::path_validation::validate_path;
use crate::presets::PresetTable;
use crate::profiles::{ProfileStore, ProfileSummary};
use crate::store::{read_document, write_document};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the in-memory document stands relative to the file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing read yet
    #[default]
    Unloaded,
    /// Matches the file as last read or written
    Clean,
    /// Edited since the last read or write
    Dirty,
}

impl SessionState {
    pub fn display_name(&self) -> &'static str {
        match self {
            SessionState::Unloaded => "Not loaded",
            SessionState::Clean => "Saved",
            SessionState::Dirty => "Unsaved changes",
        }
    }
}

pub struct ConfigManager {
    catalog: Arc<SettingCatalog>,
    presets: Arc<PresetTable>,
    locator: Box<dyn ConfigLocator>,
    backup_on_save: bool,
    config_path: Option<PathBuf>,
    backups: Option<BackupManager>,
    profiles: Option<ProfileStore>,
    document: ConfigDocument,
    state: SessionState,
}

impl std::fmt::Debug for ConfigManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigManager")
            .field("config_path", &self.config_path)
            .field("backup_on_save", &self.backup_on_save)
            .field("state", &self.state)
            .field("sections", &self.document.len())
            .finish_non_exhaustive()
    }
}

impl ConfigManager {
    pub fn new(catalog: Arc<SettingCatalog>, presets: Arc<PresetTable>) -> Self {
        Self {
            catalog,
            presets,
            locator: Box::new(DefaultLocator),
            backup_on_save: true,
            config_path: None,
            backups: None,
            profiles: None,
            document: ConfigDocument::new(),
            state: SessionState::Unloaded,
        }
    }

    /// Manager over the built-in catalog and presets.
    pub fn builtin() -> Self {
        Self::new(SettingCatalog::builtin(), PresetTable::builtin())
    }

    /// Replace the locator consulted by [`initialize`](Self::initialize)
    /// when no explicit path is given.
    pub fn with_locator(mut self, locator: Box<dyn ConfigLocator>) -> Self {
        self.locator = locator;
        self
    }

    pub fn with_backup_on_save(mut self, enabled: bool) -> Self {
        self.backup_on_save = enabled;
        self
    }

    /// Bind the session to a config file and create its backup and profile
    /// directories.
    ///
    /// Uses `explicit` when given, otherwise asks the locator.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotFound`] when no path is known or the file does not
    /// exist; [`ConfigError::Io`] when a directory cannot be created.
    pub fn initialize(&mut self, explicit: Option<&Path>) -> Result<(), ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| self.locator.locate())
            .ok_or_else(|| ConfigError::NotFound("no config path given or detected".to_string()))?;

        if !path.is_file() {
            log::warn!("Config file not found at {:?}", path);
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let backups = BackupManager::for_config(&path);
        let profiles = ProfileStore::for_config(&path);
        fs::create_dir_all(backups.dir())?;
        fs::create_dir_all(profiles.dir())?;

        log::info!("Using config file {:?}", path);
        self.config_path = Some(path);
        self.backups = Some(backups);
        self.profiles = Some(profiles);
        self.document = ConfigDocument::new();
        self.state = SessionState::Unloaded;
        Ok(())
    }

    fn require_path(&self) -> Result<&Path, ConfigError> {
        self.config_path
            .as_deref()
            .ok_or_else(|| ConfigError::Validation("config manager is not initialized".to_string()))
    }

    fn require_backups(&self) -> Result<&BackupManager, ConfigError> {
        self.backups
            .as_ref()
            .ok_or_else(|| ConfigError::Validation("config manager is not initialized".to_string()))
    }

    fn require_profiles(&self) -> Result<&ProfileStore, ConfigError> {
        self.profiles
            .as_ref()
            .ok_or_else(|| ConfigError::Validation("config manager is not initialized".to_string()))
    }

    fn definition(&self, key: &str) -> Result<&SettingDefinition, ConfigError> {
        self.catalog
            .lookup(key)
            .ok_or_else(|| ConfigError::UnknownSetting(key.to_string()))
    }

    fn mark_dirty(&mut self) {
        self.state = SessionState::Dirty;
    }

    // ── Load / store ─────────────────────────────────────────────────────

    /// Read the config file, replacing the in-memory document.
    pub fn read(&mut self) -> Result<&ConfigDocument, ConfigError> {
        let document = read_document(self.require_path()?)?;
        self.document = document;
        self.state = SessionState::Clean;
        Ok(&self.document)
    }

    /// Same as [`read`](Self::read); discards unsaved edits.
    pub fn reload(&mut self) -> Result<&ConfigDocument, ConfigError> {
        self.read()
    }

    /// Write `document` to the config file and make it current.
    ///
    /// The path and document are checked before anything touches disk. With
    /// backup-on-save enabled a `pre_save` snapshot is then attempted; a
    /// failed snapshot is logged and the write goes ahead. If the write fails
    /// the previous document and state are kept.
    pub fn write(&mut self, document: ConfigDocument) -> Result<(), ConfigError> {
        let path = self.require_path()?;
        validate_path(path)?;
        document.validate_for_write()?;

        if self.backup_on_save
            && path.exists()
            && let Some(backups) = &self.backups
        {
            match backups.create(path, PRE_SAVE_TAG) {
                Ok(backup) => log::info!("Backup created before save: {:?}", backup),
                Err(e) => log::warn!("Pre-save backup failed, saving anyway: {e}"),
            }
        }

        write_document(&document, path)?;
        self.document = document;
        self.state = SessionState::Clean;
        Ok(())
    }

    /// Write the current document.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        self.write(self.document.clone())
    }

    // ── Settings ─────────────────────────────────────────────────────────

    /// Stored value for `key`, or the definition default when the file does
    /// not have it. `None` for keys the catalog does not know.
    pub fn get_setting(&self, key: &str) -> Option<String> {
        let def = self.catalog.lookup(key)?;
        Some(
            self.document
                .get(&def.section, &def.stored_key)
                .map_or_else(|| def.default_stored(), str::to_string),
        )
    }

    /// Write a stored value without type checking.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let def = self.definition(key)?;
        let (section, stored_key) = (def.section.clone(), def.stored_key.clone());
        self.document.set(&section, stored_key, value);
        self.mark_dirty();
        Ok(())
    }

    /// Current value of `key` as shown to the user.
    pub fn display_value(&self, key: &str) -> Option<DisplayValue> {
        let def = self.catalog.lookup(key)?;
        let stored = self.get_setting(key)?;
        Some(codec::to_display(def, &stored))
    }

    /// Set `key` from a display value. Numbers are clamped to the setting's
    /// range.
    pub fn set_display_value(&mut self, key: &str, value: DisplayValue) -> Result<(), ConfigError> {
        let def = self.definition(key)?;
        let value = match (value, def.kind.range()) {
            (DisplayValue::Number(n), Some(range)) => DisplayValue::Number(range.clamp(n)),
            (other, _) => other,
        };
        let stored = codec::to_stored(def, &value);
        self.set_setting(key, &stored)
    }

    /// Apply a named preset to the current document.
    pub fn apply_preset(&mut self, name: &str) -> Result<usize, ConfigError> {
        let applied = self.presets.apply(name, &self.catalog, &mut self.document)?;
        self.mark_dirty();
        Ok(applied)
    }

    /// Set every setting to its default. Optional settings are only reset
    /// when already present, so none are added. Returns the number reset.
    pub fn reset_to_defaults(&mut self) -> usize {
        let mut count = 0;
        for def in self.catalog.iter() {
            if def.is_optional() && !self.document.contains(&def.section, &def.stored_key) {
                continue;
            }
            self.document
                .set(&def.section, def.stored_key.clone(), def.default_stored());
            count += 1;
        }
        self.mark_dirty();
        log::info!("Reset {count} settings to defaults");
        count
    }

    /// Whether the document contains an entry for `key`.
    pub fn is_present(&self, key: &str) -> bool {
        self.catalog
            .lookup(key)
            .is_some_and(|def| self.document.contains(&def.section, &def.stored_key))
    }

    /// Add `key` with its default value. Returns `false` when it was already
    /// present (the value is left alone).
    pub fn add_optional_setting(&mut self, key: &str) -> Result<bool, ConfigError> {
        let def = self.definition(key)?;
        if self.document.contains(&def.section, &def.stored_key) {
            return Ok(false);
        }
        let (section, stored_key, value) =
            (def.section.clone(), def.stored_key.clone(), def.default_stored());
        self.document.set(&section, stored_key, value);
        self.mark_dirty();
        log::info!("Added setting {key}");
        Ok(true)
    }

    /// Remove `key` from the document. Returns `false` when it was absent.
    pub fn remove_setting(&mut self, key: &str) -> Result<bool, ConfigError> {
        let def = self.definition(key)?;
        let (section, stored_key) = (def.section.clone(), def.stored_key.clone());
        if self.document.remove(&section, &stored_key).is_none() {
            return Ok(false);
        }
        self.mark_dirty();
        log::info!("Removed setting {key}");
        Ok(true)
    }

    /// Add every optional setting not yet present. Returns how many were added.
    pub fn add_all_optional(&mut self) -> usize {
        let keys: Vec<String> = self.catalog.optional().map(|d| d.key.clone()).collect();
        keys.iter()
            .filter(|key| matches!(self.add_optional_setting(key), Ok(true)))
            .count()
    }

    /// Remove every optional setting that is present. Returns how many were
    /// removed.
    pub fn remove_all_optional(&mut self) -> usize {
        let keys: Vec<String> = self.catalog.optional().map(|d| d.key.clone()).collect();
        keys.iter()
            .filter(|key| matches!(self.remove_setting(key), Ok(true)))
            .count()
    }

    // ── Backups ──────────────────────────────────────────────────────────

    pub fn create_backup(&self, tag: &str) -> Result<PathBuf, ConfigError> {
        self.require_backups()?.create(self.require_path()?, tag)
    }

    pub fn list_backups(&self) -> Vec<BackupEntry> {
        self.backups.as_ref().map(BackupManager::list).unwrap_or_default()
    }

    /// Restore a snapshot over the config file, then re-read it.
    pub fn restore_backup(&mut self, backup_path: &Path) -> Result<(), ConfigError> {
        self.require_backups()?
            .restore(backup_path, self.require_path()?)?;
        self.read()?;
        Ok(())
    }

    // ── Profiles ─────────────────────────────────────────────────────────

    /// Save the current document as profile `name`.
    pub fn save_profile(&self, name: &str) -> Result<PathBuf, ConfigError> {
        self.require_profiles()?.save(name, &self.document)
    }

    /// Replace the document with profile `name`. Nothing is written to disk
    /// until the next save.
    pub fn load_profile(&mut self, name: &str) -> Result<(), ConfigError> {
        let document = self.require_profiles()?.load(name)?;
        self.document = document;
        self.mark_dirty();
        Ok(())
    }

    pub fn list_profiles(&self) -> Vec<ProfileSummary> {
        self.profiles.as_ref().map(ProfileStore::list).unwrap_or_default()
    }

    pub fn delete_profile(&self, name: &str) -> Result<(), ConfigError> {
        self.require_profiles()?.delete(name)
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn backup_dir(&self) -> Option<&Path> {
        self.backups.as_ref().map(BackupManager::dir)
    }

    pub fn profiles_dir(&self) -> Option<&Path> {
        self.profiles.as_ref().map(ProfileStore::dir)
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == SessionState::Dirty
    }

    pub fn backup_on_save(&self) -> bool {
        self.backup_on_save
    }

    pub fn catalog(&self) -> &SettingCatalog {
        &self.catalog
    }

    pub fn presets(&self) -> &PresetTable {
        &self.presets
    }
}
