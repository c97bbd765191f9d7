//! CLI configuration: thin wrapper around `satsignal_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides (--config,
//! --output, --color).

use std::path::PathBuf;

use clap::ValueEnum;
use tracing::warn;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Re-exports from shared crate ────────────────────────────────────

pub use satsignal_config::{Config, load_config, load_config_from, save_config_to};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Config file in effect: `--config` if given, else the platform default.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(satsignal_config::config_path)
}

/// Load the config named by `--config` (which must exist), or the default
/// file if present.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let config = match &global.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Effective settings for rendering, flags first then config.
#[derive(Debug, Clone, Copy)]
pub struct Presentation {
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
}

impl Presentation {
    pub fn resolve(global: &GlobalOpts, config: &Config) -> Self {
        let output = global.output.unwrap_or_else(|| {
            from_config("defaults.output", &config.defaults.output, OutputFormat::Table)
        });
        let color = global.color.unwrap_or_else(|| {
            from_config("defaults.color", &config.defaults.color, ColorMode::Auto)
        });
        Self {
            output,
            color: output::should_color(color),
            quiet: global.quiet,
        }
    }
}

fn from_config<T: ValueEnum>(field: &str, value: &str, fallback: T) -> T {
    T::from_str(value, true).unwrap_or_else(|_| {
        warn!(field, value, "ignoring unsupported config value");
        fallback
    })
}
