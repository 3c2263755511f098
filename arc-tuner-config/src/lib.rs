//! Configuration model for the Arc Raiders settings tuner.
//!
//! This crate reads, edits and writes the game's `GameUserSettings.ini`.
//! It includes:
//!
//! - The setting catalog (what can be tuned, where it lives, its value domain)
//! - An order-preserving INI document with a lenient parser
//! - Conversion between stored strings and user-facing values
//! - Named presets
//! - Timestamped backups and named JSON profiles
//! - A path safety check applied before every write
//! - The editing session facade ([`ConfigManager`])
//! - The tuner's own YAML preferences ([`TunerSettings`])

pub mod backup;
pub mod catalog;
pub mod codec;
pub mod document;
pub mod error;
pub mod locator;
pub mod manager;
pub mod path_validation;
pub mod presets;
pub mod profiles;
pub mod settings;
pub mod store;

// Re-export main types for convenience
pub use backup::{BackupEntry, BackupManager};
pub use catalog::{
    ChoiceOption, NumericRange, OPTIONAL_CATEGORY, PerformanceImpact, SettingCatalog,
    SettingDefinition, SettingKind,
};
pub use codec::DisplayValue;
pub use document::{ConfigDocument, Section};
pub use error::ConfigError;
pub use locator::{ConfigLocator, DefaultLocator, FixedLocator};
pub use manager::{ConfigManager, SessionState};
pub use path_validation::{is_safe_path, validate_path};
pub use presets::{Preset, PresetTable};
pub use profiles::{ProfileStore, ProfileSummary, sanitize_name};
pub use settings::{LogLevel, TunerSettings};
pub use store::{read_document, write_document};
