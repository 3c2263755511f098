// Library exports for testing and potential library use

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;

pub use arc_tuner_config as config;
