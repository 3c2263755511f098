use arc_tuner::cli::{self, Cli};
use arc_tuner::config::TunerSettings;
use clap::Parser;

fn main() {
    // Parse CLI arguments first (before logging init for cleaner output)
    let cli = Cli::parse();

    // Tool settings may be missing or broken; the game config is still usable.
    let (settings, settings_error) = match TunerSettings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (TunerSettings::default(), Some(e)),
    };

    // CLI --log-level flag takes highest precedence, then RUST_LOG, then settings.
    arc_tuner::debug::init_log_bridge(
        cli.log_level.map(|l| l.to_level_filter()),
        settings.log_level,
    );
    log::info!("Starting arc-tuner {}", arc_tuner::VERSION);
    if let Some(e) = settings_error {
        log::warn!("Using default tuner settings: {e}");
    }

    std::process::exit(cli::run(&cli, &settings));
}
