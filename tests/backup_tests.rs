mod common;

use arc_tuner::config::backup::{BACKUP_DIR_NAME, PRE_RESTORE_TAG};
use common::TestContext;
use std::fs;

#[test]
fn test_create_manual_backup() {
    let ctx = TestContext::new();
    let manager = ctx.manager();

    let backup = manager.create_backup("manual").unwrap();
    assert!(backup.exists());
    assert_eq!(
        backup.parent().unwrap().file_name().unwrap(),
        BACKUP_DIR_NAME
    );

    let name = backup.file_name().unwrap().to_string_lossy().into_owned();
    let stamp = name
        .strip_prefix("GameUserSettings_")
        .and_then(|rest| rest.strip_suffix("_manual.ini"))
        .expect("backup name format");
    // YYYYMMDD_HHMMSS
    assert_eq!(stamp.len(), 15);
    assert_eq!(&stamp[8..9], "_");
    assert!(stamp.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));

    assert_eq!(fs::read(&backup).unwrap(), fs::read(&ctx.config_path).unwrap());

    let list = manager.list_backups();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].path, backup);
}

#[test]
fn test_backups_listed_most_recent_first() {
    let ctx = TestContext::new();
    let manager = ctx.manager();
    let first = manager.create_backup("one").unwrap();
    let second = manager.create_backup("two").unwrap();

    let old = std::time::SystemTime::now() - std::time::Duration::from_secs(3600);
    fs::File::options()
        .write(true)
        .open(&first)
        .unwrap()
        .set_modified(old)
        .unwrap();

    let list = manager.list_backups();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].path, second);
    assert_eq!(list[1].path, first);
}

#[test]
fn test_save_takes_pre_save_backup() {
    let ctx = TestContext::new();
    let mut manager = ctx.manager();
    manager.set_setting("DLSSMode", "DLAA").unwrap();
    manager.save().unwrap();

    let backups = manager.list_backups();
    assert_eq!(backups.len(), 1);
    assert!(backups[0].name.ends_with("_pre_save.ini"));
    let snapshot = fs::read_to_string(&backups[0].path).unwrap();
    assert!(snapshot.contains("DLSSMode=Quality"));
}

#[test]
fn test_restore_leaves_pre_restore_backup() {
    let ctx = TestContext::new();
    let mut manager = ctx.manager();
    let backup = manager.create_backup("manual").unwrap();

    fs::write(&ctx.config_path, "[Changed]\nA=1\n").unwrap();
    manager.restore_backup(&backup).unwrap();

    assert!(ctx.read_config().contains("DLSSMode=Quality"));
    assert_eq!(manager.get_setting("DLSSMode").as_deref(), Some("Quality"));

    let pre_restore: Vec<_> = manager
        .list_backups()
        .into_iter()
        .filter(|b| b.name.contains(PRE_RESTORE_TAG))
        .collect();
    assert_eq!(pre_restore.len(), 1);
    assert_eq!(
        fs::read_to_string(&pre_restore[0].path).unwrap(),
        "[Changed]\nA=1\n"
    );
}

#[test]
fn test_restore_missing_backup_fails() {
    let ctx = TestContext::new();
    let mut manager = ctx.manager();
    let missing = ctx.path().join(BACKUP_DIR_NAME).join("GameUserSettings_none.ini");
    let err = manager.restore_backup(&missing).unwrap_err();
    assert!(err.is_not_found());
    assert!(ctx.read_config().contains("DLSSMode=Quality"));
}
