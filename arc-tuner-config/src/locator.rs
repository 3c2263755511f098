//! Finding the game's config file when no path is given.

use std::path::PathBuf;

/// Source of a default config path.
pub trait ConfigLocator {
    /// Candidate config path, or `None` when this locator has no guess.
    /// The file is not required to exist.
    fn locate(&self) -> Option<PathBuf>;
}

/// Standard install location.
///
/// On Windows this is
/// `%LOCALAPPDATA%\PioneerGame\Saved\Config\WindowsClient\GameUserSettings.ini`.
/// Other platforms have no default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLocator;

impl ConfigLocator for DefaultLocator {
    fn locate(&self) -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            dirs::data_local_dir().map(|dir| {
                dir.join("PioneerGame")
                    .join("Saved")
                    .join("Config")
                    .join("WindowsClient")
                    .join("GameUserSettings.ini")
            })
        }
        #[cfg(not(target_os = "windows"))]
        {
            None
        }
    }
}

/// Always returns the same path.
#[derive(Debug, Clone)]
pub struct FixedLocator(pub PathBuf);

impl ConfigLocator for FixedLocator {
    fn locate(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}
