mod common;

use arc_tuner::config::{PresetTable, SettingCatalog, SettingKind};
use common::TestContext;

#[test]
fn test_every_preset_key_is_valid() {
    let catalog = SettingCatalog::builtin();
    let presets = PresetTable::builtin();
    for preset in presets.iter() {
        assert!(!preset.description.is_empty(), "{} missing description", preset.name);
        for (key, value) in &preset.settings {
            let def = catalog
                .lookup(key)
                .unwrap_or_else(|| panic!("{} references unknown {key}", preset.name));
            if let SettingKind::Choice { options, .. } = &def.kind {
                assert!(
                    options.iter().any(|o| &o.stored == value),
                    "{}: {key}={value} is not an option",
                    preset.name
                );
            }
        }
    }
}

#[test]
fn test_apply_twice_equals_once() {
    let ctx = TestContext::new();
    for name in ["Competitive", "Balanced", "Quality", "Cinematic"] {
        let mut manager = ctx.manager();
        manager.apply_preset(name).unwrap();
        let once = manager.document().clone();
        manager.apply_preset(name).unwrap();
        assert_eq!(manager.document(), &once, "{name}");
    }
}

#[test]
fn test_competitive_preset_persists() {
    let ctx = TestContext::new();
    let mut manager = ctx.manager();
    manager.apply_preset("Competitive").unwrap();
    manager.save().unwrap();

    let text = ctx.read_config();
    assert!(text.contains("DLSSMode=Performance"));
    assert!(text.contains("[SystemSettings]"));
    assert!(text.contains("r.MaxAnisotropy=16"));
    assert!(text.contains("[/Script/Engine.InputSettings]"));
}
