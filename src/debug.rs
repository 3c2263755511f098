//! Log bridge for arc-tuner.
//!
//! Routes every `log::info!()` / `log::warn!()` etc. to a debug file in the
//! system temp directory (`/tmp/arc_tuner_debug.log` on most Unix systems,
//! `%TEMP%\arc_tuner_debug.log` on Windows) so CLI output stays clean. When
//! `RUST_LOG` is set, records are also mirrored to stderr.
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then the level in
//! the tuner settings file.

use arc_tuner_config::LogLevel;
use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Name of the debug log file inside the temp directory.
pub const LOG_FILE_NAME: &str = "arc_tuner_debug.log";

struct LogBridge {
    level: LevelFilter,
    file: Option<Mutex<File>>,
    mirror_stderr: bool,
}

impl LogBridge {
    fn format(record: &Record) -> String {
        format!(
            "[{}] [{:<5}] [{}] {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(record);
        if let Some(file) = &self.file {
            let mut file = file.lock();
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            let _ = file.lock().flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

/// Pick the effective level. An unparseable `RUST_LOG` value counts as
/// `info` so that setting the variable at all still turns logging on.
pub fn resolve_level(
    cli_level: Option<LevelFilter>,
    rust_log: Option<&str>,
    configured: LogLevel,
) -> LevelFilter {
    if let Some(level) = cli_level {
        return level;
    }
    if let Some(value) = rust_log {
        return value.trim().parse().unwrap_or(LevelFilter::Info);
    }
    configured.to_level_filter()
}

/// Install the bridge as the global logger. Calling it again is a no-op.
pub fn init_log_bridge(cli_level: Option<LevelFilter>, configured: LogLevel) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = resolve_level(cli_level, rust_log.as_deref(), configured);

    let bridge = BRIDGE.get_or_init(|| {
        let file = if level == LevelFilter::Off {
            None
        } else {
            // Silently skip file logging if the file can't be opened
            OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(log_path())
                .ok()
                .map(|mut f| {
                    let _ = writeln!(
                        f,
                        "{}\narc-tuner debug session started at {} (level={})\n{}",
                        "=".repeat(80),
                        Local::now().to_rfc3339(),
                        level,
                        "=".repeat(80)
                    );
                    Mutex::new(f)
                })
        };
        LogBridge {
            level,
            file,
            mirror_stderr: rust_log.is_some(),
        }
    });

    if log::set_logger(bridge).is_ok() {
        log::set_max_level(bridge.level);
    }
}
