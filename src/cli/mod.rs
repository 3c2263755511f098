//! Command-line interface for arc-tuner.
//!
//! This module handles argument parsing. Subcommand implementations live in
//! the [`commands`] submodule.

pub mod commands;

use arc_tuner_config::TunerSettings;
use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::PathBuf;

/// arc-tuner - Arc Raiders graphics and input settings tuner
#[derive(Parser, Debug)]
#[command(name = "arc-tuner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to GameUserSettings.ini (auto-detected if not provided)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides settings file and RUST_LOG)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show settings with their current values
    Show {
        /// Only show one category
        #[arg(long, value_name = "NAME")]
        category: Option<String>,
    },

    /// List setting categories
    Categories,

    /// Print one setting
    Get {
        /// Setting key, e.g. DLSSMode or sg.ShadowQuality
        key: String,
    },

    /// Change one setting and save
    Set {
        key: String,
        /// Option label, stored value, on/off or a number
        value: String,
    },

    /// List or apply presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },

    /// Reset every setting to its default and save
    Reset,

    /// Add or remove competitive settings that a stock config omits
    Optional {
        #[command(subcommand)]
        action: OptionalAction,
    },

    /// Create, list or restore backups
    Backup {
        #[command(subcommand)]
        action: BackupAction,
    },

    /// Save, load, list or delete named profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum PresetAction {
    /// List available presets
    List,
    /// Apply a preset and save
    Apply { name: String },
}

/// A single setting key, or every optional setting.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct OptionalTarget {
    /// Setting key
    pub key: Option<String>,

    /// Apply to every optional setting
    #[arg(long)]
    pub all: bool,
}

#[derive(Subcommand, Debug)]
pub enum OptionalAction {
    /// Add settings with their default values and save
    Add(OptionalTarget),
    /// Remove settings from the file and save
    Remove(OptionalTarget),
}

#[derive(Subcommand, Debug)]
pub enum BackupAction {
    /// Snapshot the current config
    Create {
        /// Suffix added to the backup file name
        #[arg(long, default_value = "")]
        tag: String,
    },
    /// List backups, newest first
    List,
    /// Restore a backup over the current config
    Restore { path: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    /// Save the current config as a profile
    Save { name: String },
    /// Load a profile and save it to the config
    Load { name: String },
    /// List saved profiles
    List,
    /// Delete a profile
    Delete { name: String },
}

/// Run a parsed command line, printing results to stdout and failures to
/// stderr. Returns the process exit code.
pub fn run(cli: &Cli, settings: &TunerSettings) -> i32 {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match commands::execute(cli, settings, &mut out) {
        Ok(()) => 0,
        Err(e) => {
            log::error!("Command failed: {e:#}");
            eprintln!("arc-tuner: error: {e:#}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "arc-tuner",
            "get",
            "DLSSMode",
            "--config",
            "/games/GameUserSettings.ini",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/games/GameUserSettings.ini")));
        assert!(matches!(cli.log_level, Some(LogLevelArg::Debug)));
        assert!(matches!(cli.command, Commands::Get { ref key } if key == "DLSSMode"));
    }

    #[test]
    fn test_optional_requires_key_or_all() {
        assert!(Cli::try_parse_from(["arc-tuner", "optional", "add"]).is_err());
        assert!(
            Cli::try_parse_from(["arc-tuner", "optional", "add", "r.BloomQuality", "--all"])
                .is_err()
        );
        let cli = Cli::try_parse_from(["arc-tuner", "optional", "remove", "--all"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Optional {
                action: OptionalAction::Remove(OptionalTarget { all: true, .. })
            }
        ));
    }

    #[test]
    fn test_backup_tag_defaults_to_empty() {
        let cli = Cli::try_parse_from(["arc-tuner", "backup", "create"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Backup {
                action: BackupAction::Create { ref tag }
            } if tag.is_empty()
        ));
    }
}
