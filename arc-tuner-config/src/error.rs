//! Typed error variants for the arc-tuner-config crate.
//!
//! Every fallible operation in this crate returns [`ConfigError`] so that a
//! front end can match on the failure category (missing file, rejected path,
//! I/O problem) and decide what to tell the user. Nothing in the crate panics
//! on bad input; recoverable parse problems (numeric values, profile JSON) are
//! absorbed before they reach this type.
//!
//! # Example
//!
//! ```rust,no_run
//! use arc_tuner_config::ConfigError;
//!
//! fn describe(e: &ConfigError) -> &'static str {
//!     match e {
//!         ConfigError::NotFound(_) => "missing",
//!         ConfigError::InvalidPath(_) => "unsafe path",
//!         ConfigError::UnknownSetting(_) => "unknown setting",
//!         ConfigError::Validation(_) => "invalid data",
//!         ConfigError::Json(_) | ConfigError::Yaml(_) => "parse failure",
//!         ConfigError::Io(_) => "I/O failure",
//!     }
//! }
//! ```

use thiserror::Error;

/// Errors produced by the configuration store, backups, profiles and the
/// session facade.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file, backup, profile or preset does not exist.
    ///
    /// The inner string names what was looked up.
    #[error("not found: {0}")]
    NotFound(String),

    /// A path failed the safety check (system directory or bad extension).
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The key is not registered in the setting catalog.
    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    /// Data failed semantic validation (catalog invariants, values that
    /// cannot be represented in the file format, uninitialized session).
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON could not be produced or parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML could not be produced or parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// An underlying file-system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// True when the error means "the thing was not there".
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::NotFound(_))
    }
}
