//! Subcommand implementations.
//!
//! Every command opens a session on the target config, performs its edit and
//! saves when the command changes something.

use super::{
    BackupAction, Cli, Commands, OptionalAction, OptionalTarget, PresetAction, ProfileAction,
};
use anyhow::{Context, Result, anyhow, bail};
use arc_tuner_config::codec::{self, DisplayValue};
use arc_tuner_config::{ConfigManager, SettingDefinition, SettingKind, TunerSettings};
use std::io::Write;
use std::path::Path;

/// Execute the parsed command, writing human-readable output to `out`.
pub fn execute(cli: &Cli, settings: &TunerSettings, out: &mut dyn Write) -> Result<()> {
    let explicit = cli.config.as_deref().or(settings.config_path.as_deref());
    let mut manager = open_session(explicit, settings.backup_on_save)?;

    match &cli.command {
        Commands::Show { category } => show(&manager, category.as_deref(), out),
        Commands::Categories => categories(&manager, out),
        Commands::Get { key } => get(&manager, key, out),
        Commands::Set { key, value } => set(&mut manager, key, value, out),
        Commands::Preset { action } => preset(&mut manager, action, out),
        Commands::Reset => {
            let count = manager.reset_to_defaults();
            manager.save().context("Failed to save config")?;
            writeln!(out, "Reset {count} settings to defaults.")?;
            Ok(())
        }
        Commands::Optional { action } => optional(&mut manager, action, out),
        Commands::Backup { action } => backup(&mut manager, action, out),
        Commands::Profile { action } => profile(&mut manager, action, out),
    }
}

fn open_session(explicit: Option<&Path>, backup_on_save: bool) -> Result<ConfigManager> {
    let mut manager = ConfigManager::builtin().with_backup_on_save(backup_on_save);
    manager.initialize(explicit).context(
        "Could not find GameUserSettings.ini; pass --config <PATH> or set config_path in settings.yaml",
    )?;
    manager.read().context("Failed to read config")?;
    Ok(manager)
}

fn lookup<'a>(manager: &'a ConfigManager, key: &str) -> Result<&'a SettingDefinition> {
    manager
        .catalog()
        .lookup(key)
        .ok_or_else(|| anyhow!("Unknown setting '{key}'. Run `arc-tuner show` to list settings."))
}

/// Describe what a setting accepts, for error messages.
fn accepted_values(def: &SettingDefinition) -> String {
    match &def.kind {
        SettingKind::Choice { options, .. } => options
            .iter()
            .map(|o| {
                if o.label == o.stored {
                    o.label.clone()
                } else {
                    format!("{} ({})", o.label, o.stored)
                }
            })
            .collect::<Vec<_>>()
            .join(", "),
        SettingKind::Boolean { .. } => "on, off".to_string(),
        SettingKind::Integer { range, .. } | SettingKind::Scalar { range, .. } => {
            format!("{} to {}", range.min, range.max)
        }
    }
}

fn show(manager: &ConfigManager, category: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let catalog = manager.catalog();
    let categories: Vec<&str> = match category {
        Some(name) => {
            let found = catalog
                .categories()
                .into_iter()
                .find(|c| c.eq_ignore_ascii_case(name))
                .ok_or_else(|| anyhow!("Unknown category '{name}'"))?;
            vec![found]
        }
        None => catalog.categories(),
    };

    for (i, name) in categories.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "== {name} ==")?;
        for def in catalog.by_category(name) {
            let present = manager.is_present(&def.key);
            let value = manager
                .display_value(&def.key)
                .map(|v| v.to_string())
                .unwrap_or_default();
            let marker = if def.is_optional() && !present {
                "  (not in file)"
            } else {
                ""
            };
            writeln!(
                out,
                "  {:<34} {:<22} [{}]{marker}",
                def.key,
                value,
                def.impact.display_name()
            )?;
        }
    }
    Ok(())
}

fn categories(manager: &ConfigManager, out: &mut dyn Write) -> Result<()> {
    let catalog = manager.catalog();
    for name in catalog.categories() {
        writeln!(out, "{name} ({})", catalog.by_category(name).len())?;
    }
    Ok(())
}

fn get(manager: &ConfigManager, key: &str, out: &mut dyn Write) -> Result<()> {
    let def = lookup(manager, key)?;
    let stored = manager.get_setting(key).unwrap_or_default();
    let display = codec::to_display(def, &stored);
    writeln!(out, "{key} = {display} (stored: {stored})")?;
    writeln!(out, "  {}: {}", def.display_name, def.description)?;
    if !manager.is_present(key) {
        writeln!(out, "  not in file; showing the default")?;
    }
    Ok(())
}

fn set(manager: &mut ConfigManager, key: &str, value: &str, out: &mut dyn Write) -> Result<()> {
    let def = lookup(manager, key)?;
    let display: DisplayValue = codec::parse_display(def, value).ok_or_else(|| {
        anyhow!(
            "Invalid value '{value}' for {key}. Accepted: {}",
            accepted_values(def)
        )
    })?;
    manager.set_display_value(key, display)?;
    manager.save().context("Failed to save config")?;
    let shown = manager
        .display_value(key)
        .map(|v| v.to_string())
        .unwrap_or_default();
    writeln!(out, "{key} = {shown}")?;
    Ok(())
}

fn preset(manager: &mut ConfigManager, action: &PresetAction, out: &mut dyn Write) -> Result<()> {
    match action {
        PresetAction::List => {
            for preset in manager.presets().iter() {
                writeln!(out, "{:<12} {}", preset.name, preset.description)?;
            }
        }
        PresetAction::Apply { name } => {
            let applied = manager.apply_preset(name)?;
            manager.save().context("Failed to save config")?;
            writeln!(out, "Applied preset '{name}' ({applied} settings).")?;
        }
    }
    Ok(())
}

fn optional(
    manager: &mut ConfigManager,
    action: &OptionalAction,
    out: &mut dyn Write,
) -> Result<()> {
    let (adding, target) = match action {
        OptionalAction::Add(target) => (true, target),
        OptionalAction::Remove(target) => (false, target),
    };

    let changed = match target {
        OptionalTarget { all: true, .. } => {
            if adding {
                manager.add_all_optional()
            } else {
                manager.remove_all_optional()
            }
        }
        OptionalTarget { key: Some(key), .. } => {
            let def = lookup(manager, key)?;
            if !def.is_optional() {
                bail!("'{key}' is not an optional setting");
            }
            let did = if adding {
                manager.add_optional_setting(key)?
            } else {
                manager.remove_setting(key)?
            };
            usize::from(did)
        }
        OptionalTarget { key: None, .. } => bail!("Specify a setting key or --all"),
    };

    if changed > 0 {
        manager.save().context("Failed to save config")?;
    }
    let verb = if adding { "Added" } else { "Removed" };
    writeln!(out, "{verb} {changed} optional settings.")?;
    Ok(())
}

fn backup(manager: &mut ConfigManager, action: &BackupAction, out: &mut dyn Write) -> Result<()> {
    match action {
        BackupAction::Create { tag } => {
            let path = manager.create_backup(tag)?;
            writeln!(out, "Backup created: {}", path.display())?;
        }
        BackupAction::List => {
            let backups = manager.list_backups();
            if backups.is_empty() {
                writeln!(out, "No backups.")?;
            }
            for entry in backups {
                writeln!(
                    out,
                    "{}  {}  {} bytes",
                    entry.modified.format("%Y-%m-%d %H:%M:%S"),
                    entry.name,
                    entry.size
                )?;
            }
        }
        BackupAction::Restore { path } => {
            manager
                .restore_backup(path)
                .with_context(|| format!("Failed to restore {}", path.display()))?;
            writeln!(out, "Restored {}", path.display())?;
        }
    }
    Ok(())
}

fn profile(manager: &mut ConfigManager, action: &ProfileAction, out: &mut dyn Write) -> Result<()> {
    match action {
        ProfileAction::Save { name } => {
            let path = manager.save_profile(name)?;
            writeln!(out, "Profile '{name}' saved to {}", path.display())?;
        }
        ProfileAction::Load { name } => {
            manager.load_profile(name)?;
            manager.save().context("Failed to save config")?;
            writeln!(out, "Profile '{name}' loaded.")?;
        }
        ProfileAction::List => {
            let profiles = manager.list_profiles();
            if profiles.is_empty() {
                writeln!(out, "No profiles.")?;
            }
            for summary in profiles {
                writeln!(out, "{:<24} {}", summary.name, summary.created)?;
            }
        }
        ProfileAction::Delete { name } => {
            manager.delete_profile(name)?;
            writeln!(out, "Profile '{name}' deleted.")?;
        }
    }
    Ok(())
}
