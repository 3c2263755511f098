//! Shared integration test helpers for arc-tuner.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{TestContext, SAMPLE_CONFIG};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers are used per file.

#![allow(dead_code)]

use arc_tuner::config::ConfigManager;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Representative stock config: two sections, no competitive settings.
pub const SAMPLE_CONFIG: &str = "[/Script/EmbarkUserSettings.EmbarkGameUserSettings]
DLSSMode=Quality
NvReflexMode=Enabled
bUseVSync=False
FrameRateLimit=0.000000

[ScalabilityGroups]
sg.ShadowQuality=3
sg.TextureQuality=3
sg.ResolutionQuality=100
";

pub const EMBARK_SECTION: &str = "/Script/EmbarkUserSettings.EmbarkGameUserSettings";

/// A temp directory holding `GameUserSettings.ini`.
///
/// Keep the context alive for the duration of the test; dropping it removes
/// the directory.
pub struct TestContext {
    pub dir: TempDir,
    pub config_path: PathBuf,
}

impl TestContext {
    /// Temp dir with [`SAMPLE_CONFIG`] written to `GameUserSettings.ini`.
    pub fn new() -> Self {
        Self::with_contents(SAMPLE_CONFIG)
    }

    pub fn with_contents(contents: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = dir.path().join("GameUserSettings.ini");
        fs::write(&config_path, contents).expect("Failed to write sample config");
        Self { dir, config_path }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Initialized and read session over the context's config file.
    pub fn manager(&self) -> ConfigManager {
        let mut manager = ConfigManager::builtin();
        manager
            .initialize(Some(&self.config_path))
            .expect("Failed to initialize manager");
        manager.read().expect("Failed to read config");
        manager
    }

    pub fn read_config(&self) -> String {
        fs::read_to_string(&self.config_path).expect("Failed to read config file")
    }
}
