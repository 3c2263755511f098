//! Safety check applied to every path before the tuner writes to it.
//!
//! This is a deny-list heuristic, not a sandbox: it refuses paths that
//! resolve into well-known system directories and files whose extension is
//! not one the tuner produces. Nothing is cached; the check runs each time a
//! path is about to be used.

use crate::error::ConfigError;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Directories the tuner never writes under. Entries that do not exist on the
/// current machine are ignored.
const DENIED_ROOTS: &[&str] = &[
    "C:/Windows",
    "C:/Program Files",
    "C:/Program Files (x86)",
    "/etc",
    "/usr",
    "/bin",
    "/sbin",
    "/boot",
];

/// Extensions accepted (case-insensitive). A path with no extension is also
/// accepted.
const ALLOWED_EXTENSIONS: &[&str] = &["ini", "json"];

/// Validate `path` and return its resolved form.
///
/// Resolution makes the path absolute and canonicalizes its longest existing
/// prefix, so symlinks and any `..` after them resolve the way the OS does.
/// Only the part that does not exist yet is folded lexically.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPath`] when the resolved path lies under a
/// denied directory or the extension is not allowed, and
/// [`ConfigError::Io`] when the current directory cannot be determined.
pub fn validate_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let resolved = resolve(path)?;

    for root in DENIED_ROOTS {
        let root = Path::new(root);
        if !root.exists() {
            continue;
        }
        let canonical_root = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        if resolved.starts_with(&canonical_root) {
            log::error!(
                "Refusing path in system directory: {} (resolves to {})",
                path.display(),
                resolved.display()
            );
            return Err(ConfigError::InvalidPath(format!(
                "'{}' is inside system directory '{}'",
                path.display(),
                root.display()
            )));
        }
    }

    if let Some(ext) = path.extension() {
        let ext = ext.to_string_lossy().to_ascii_lowercase();
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            log::error!("Refusing path with extension .{ext}: {}", path.display());
            return Err(ConfigError::InvalidPath(format!(
                "'{}' has unsupported extension '.{ext}'",
                path.display()
            )));
        }
    }

    Ok(resolved)
}

/// Boolean form of [`validate_path`].
pub fn is_safe_path(path: &Path) -> bool {
    validate_path(path).is_ok()
}

fn resolve(path: &Path) -> Result<PathBuf, ConfigError> {
    let absolute = std::path::absolute(path)?;
    let components: Vec<Component> = absolute.components().collect();

    // Longest prefix the OS can resolve; `..` inside it follows symlinks.
    let mut split = components.len();
    let mut out = loop {
        let prefix: PathBuf = components[..split].iter().collect();
        if let Ok(canonical) = fs::canonicalize(&prefix) {
            break canonical;
        }
        if split == 0 {
            return Ok(absolute.clone());
        }
        split -= 1;
    };

    // Components past the first missing one. Anything that exists again after
    // a `..` is canonicalized so links are still followed.
    for component in &components[split..] {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => {
                out.push(other.as_os_str());
                if let Ok(canonical) = fs::canonicalize(&out) {
                    out = canonical;
                }
            }
        }
    }
    Ok(out)
}
