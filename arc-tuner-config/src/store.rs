//! Reading and writing config documents on disk.

use crate::document::ConfigDocument;
use crate::error::ConfigError;
use crate::path_validation::validate_path;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read and leniently parse the config file at `path`.
///
/// # Errors
///
/// [`ConfigError::NotFound`] when the file does not exist,
/// [`ConfigError::Io`] for any other read failure.
pub fn read_document(path: &Path) -> Result<ConfigDocument, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound(path.display().to_string()),
        _ => ConfigError::Io(e),
    })?;
    let doc = ConfigDocument::parse(&text);
    log::info!(
        "Read {} sections ({} entries) from {:?}",
        doc.len(),
        doc.entry_count(),
        path
    );
    Ok(doc)
}

/// Serialize `document` to `path`.
///
/// The path is validated on every call and the document is checked for
/// values the INI format cannot hold before anything touches the disk.
pub fn write_document(document: &ConfigDocument, path: &Path) -> Result<(), ConfigError> {
    let target = validate_path(path)?;
    document.validate_for_write()?;
    write_atomic(&target, document.to_string().as_bytes())?;
    log::info!("Wrote config to {:?}", target);
    Ok(())
}

/// Write `contents` to a sibling temp file, then rename it over `path`, so a
/// crash never leaves a half-written file behind.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ConfigError> {
    let temp_path = temp_path_for(path);
    if let Err(e) = fs::write(&temp_path, contents) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let result = read_document(&dir.path().join("absent.ini"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("GameUserSettings.ini");

        let mut doc = ConfigDocument::new();
        doc.set("/Script/Engine.GameUserSettings", "bUseVSync", "False");
        doc.set("ScalabilityGroups", "sg.ShadowQuality", "2");
        doc.set("ScalabilityGroups", "sg.ResolutionQuality", "75");

        write_document(&doc, &path).unwrap();
        let back = read_document(&path).unwrap();
        assert_eq!(back, doc);
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_write_output_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.ini");
        let doc = ConfigDocument::parse("[A]\nk = v\n");
        write_document(&doc, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[A]\nk=v\n\n");
    }

    #[test]
    fn test_write_rejects_bad_extension() {
        let dir = tempdir().unwrap();
        let doc = ConfigDocument::new();
        let result = write_document(&doc, &dir.path().join("out.exe"));
        assert!(matches!(result, Err(ConfigError::InvalidPath(_))));
        assert!(!dir.path().join("out.exe").exists());
    }

    #[test]
    fn test_write_rejects_newline_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.ini");
        let mut doc = ConfigDocument::new();
        doc.set("S", "k", "a\nb");
        assert!(matches!(
            write_document(&doc, &path),
            Err(ConfigError::Validation(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_overwrites_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.ini");
        fs::write(&path, "[Old]\nx=1\n").unwrap();
        write_document(&ConfigDocument::parse("[New]\ny=2\n"), &path).unwrap();
        let back = read_document(&path).unwrap();
        assert!(back.section("Old").is_none());
        assert_eq!(back.get("New", "y"), Some("2"));
    }
}
