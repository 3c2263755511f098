mod common;

use arc_tuner::config::{
    ConfigDocument, ConfigError, ConfigManager, SessionState, SettingCatalog, is_safe_path,
    read_document, validate_path, write_document,
};
use common::{EMBARK_SECTION, SAMPLE_CONFIG, TestContext};
use std::fs;
use std::path::Path;

#[test]
fn test_read_sample_config() {
    let ctx = TestContext::new();
    let doc = read_document(&ctx.config_path).unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.get(EMBARK_SECTION, "DLSSMode"), Some("Quality"));
    assert_eq!(doc.get(EMBARK_SECTION, "NvReflexMode"), Some("Enabled"));
}

#[test]
fn test_get_and_set_setting() {
    let ctx = TestContext::new();
    let mut manager = ctx.manager();
    assert_eq!(manager.get_setting("DLSSMode").as_deref(), Some("Quality"));

    manager.set_setting("DLSSMode", "Performance").unwrap();
    assert_eq!(
        manager.document().get(EMBARK_SECTION, "DLSSMode"),
        Some("Performance")
    );
    assert_eq!(manager.state(), SessionState::Dirty);

    manager.save().unwrap();
    assert_eq!(manager.state(), SessionState::Clean);

    let mut fresh = ctx.manager();
    fresh.reload().unwrap();
    assert_eq!(fresh.get_setting("DLSSMode").as_deref(), Some("Performance"));
}

#[test]
fn test_write_read_round_trip_preserves_every_entry() {
    let ctx = TestContext::new();
    let original = read_document(&ctx.config_path).unwrap();
    let out = ctx.path().join("copy.ini");
    write_document(&original, &out).unwrap();
    let back = read_document(&out).unwrap();

    for section in original.sections() {
        for (key, value) in section.iter() {
            assert_eq!(back.get(section.name(), key), Some(value));
        }
    }
    assert_eq!(back, original);
}

#[test]
fn test_garbage_before_sections() {
    let ctx = TestContext::with_contents("garbage\n[SectionA]\nK=V1\n\n[SectionB]\nK2=V2\n");
    let doc = read_document(&ctx.config_path).unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.get("SectionA", "K"), Some("V1"));
    assert_eq!(doc.get("SectionB", "K2"), Some("V2"));
}

#[test]
fn test_unknown_entries_survive_save() {
    let ctx = TestContext::with_contents(
        "[/Script/Engine.GameUserSettings]\nResolutionSizeX=2560\nbUseDynamicResolution=False\n",
    );
    let mut manager = ctx.manager();
    manager.set_setting("bUseVSync", "True").unwrap();
    manager.save().unwrap();

    let doc = ConfigDocument::parse(&ctx.read_config());
    assert_eq!(
        doc.get("/Script/Engine.GameUserSettings", "ResolutionSizeX"),
        Some("2560")
    );
    assert_eq!(doc.get(EMBARK_SECTION, "bUseVSync"), Some("True"));
}

#[test]
fn test_every_setting_set_then_get() {
    let ctx = TestContext::new();
    let mut manager = ctx.manager();
    let catalog = SettingCatalog::builtin();
    for def in catalog.iter() {
        let value = def.default_stored();
        manager.set_setting(&def.key, &value).unwrap();
        assert_eq!(manager.get_setting(&def.key), Some(value), "{}", def.key);
    }
}

#[test]
fn test_validate_path_accepts_temp_ini() {
    let ctx = TestContext::new();
    assert!(is_safe_path(&ctx.config_path));
    assert!(validate_path(&ctx.path().join("new.ini")).is_ok());
}

#[test]
fn test_validate_path_rejects_exe() {
    let ctx = TestContext::new();
    assert!(matches!(
        validate_path(&ctx.path().join("tool.exe")),
        Err(ConfigError::InvalidPath(_))
    ));
}

#[cfg(unix)]
#[test]
fn test_validate_path_rejects_etc() {
    if Path::new("/etc").exists() {
        assert!(!is_safe_path(Path::new("/etc/passwd")));
        assert!(!is_safe_path(Path::new("/etc/GameUserSettings.ini")));
    }
}

#[test]
fn test_missing_config_is_not_found() {
    let ctx = TestContext::new();
    let mut manager = arc_tuner::config::ConfigManager::builtin();
    let err = manager
        .initialize(Some(&ctx.path().join("missing.ini")))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[cfg(unix)]
#[test]
fn test_save_through_symlink_parent_updates_live_file() {
    let ctx = TestContext::new();
    let real = ctx.path().join("real");
    fs::create_dir_all(real.join("sub")).unwrap();
    let live = real.join("GameUserSettings.ini");
    fs::write(&live, "[S]\nA=1\n").unwrap();
    let link = ctx.path().join("link");
    std::os::unix::fs::symlink(real.join("sub"), &link).unwrap();

    let mut manager = ConfigManager::builtin();
    manager
        .initialize(Some(&link.join("../GameUserSettings.ini")))
        .unwrap();
    manager.read().unwrap();
    let mut doc = manager.document().clone();
    doc.set("S", "A", "2");
    manager.write(doc).unwrap();

    assert_eq!(fs::read_to_string(&live).unwrap(), "[S]\nA=2\n\n");
    assert!(!ctx.path().join("GameUserSettings.ini.tmp").exists());
    assert_eq!(
        fs::read_to_string(&ctx.config_path).unwrap(),
        SAMPLE_CONFIG
    );
}
