//! Shared configuration for satsignal.
//!
//! TOML file plus `SATSIGNAL_*` environment overrides, layered with
//! `figment`, and translation to a `satsignal_core::MessageCatalog`.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use satsignal_core::MessageCatalog;

/// Environment variable prefix; nested keys are separated by `__`
/// (`SATSIGNAL_DEFAULTS__OUTPUT=json`).
pub const ENV_PREFIX: &str = "SATSIGNAL_";

const OUTPUT_FORMATS: &[&str] = &["table", "json", "json-compact", "yaml", "plain"];
const COLOR_MODES: &[&str] = &["auto", "always", "never"];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Locale tag for alert messages.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// The wallet assumed by `correlate`.
    #[serde(default)]
    pub wallet: WalletDefaults,

    /// Message-key to template overrides.
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            defaults: Defaults::default(),
            wallet: WalletDefaults::default(),
            messages: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Run each alert's action without asking.
    #[serde(default)]
    pub auto_accept: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            auto_accept: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WalletDefaults {
    /// Start with a wallet open.
    #[serde(default)]
    pub open: bool,

    #[serde(default = "default_wallet_label")]
    pub label: String,
}

impl Default for WalletDefaults {
    fn default() -> Self {
        Self {
            open: false,
            label: default_wallet_label(),
        }
    }
}

fn default_locale() -> String {
    "en".into()
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_wallet_label() -> String {
    "Default wallet".into()
}

impl Config {
    /// Message catalog for this config's locale with its overrides applied.
    pub fn catalog(&self) -> MessageCatalog {
        let overrides: HashMap<String, String> = self
            .messages
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        MessageCatalog::new(self.locale.clone()).with_overrides(overrides)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locale.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "locale".into(),
                reason: "must not be empty".into(),
            });
        }
        check_one_of("defaults.output", &self.defaults.output, OUTPUT_FORMATS)?;
        check_one_of("defaults.color", &self.defaults.color, COLOR_MODES)?;
        Ok(())
    }
}

fn check_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), ConfigError> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(ConfigError::Validation {
        field: field.into(),
        reason: format!("expected one of {}, got '{value}'", allowed.join(", ")),
    })
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "satsignal", "satsignal").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("satsignal");
    p
}

// ── Config loading ──────────────────────────────────────────────────

fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load the full Config from the canonical file (if any) + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let config: Config = figment(&config_path()).extract()?;
    config.validate()?;
    Ok(config)
}

/// Load from an explicit file, which must exist, + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let config: Config = figment(path).extract()?;
    config.validate()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use satsignal_core::Localizer;

    fn write(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn file_values_layer_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            r#"
locale = "en-GB"

[defaults]
output = "json"

[wallet]
open = true

[messages]
payment_received_alert = "Received {0}!"
"#,
        );

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.locale, "en-GB");
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.color, "auto");
        assert!(cfg.wallet.open);
        assert_eq!(cfg.wallet.label, "Default wallet");
        assert_eq!(
            cfg.messages.get("payment_received_alert").map(String::as_str),
            Some("Received {0}!")
        );
    }

    #[test]
    fn catalog_applies_overrides() {
        let mut cfg = Config::default();
        cfg.messages
            .insert("payment_received_alert".into(), "Got {0}".into());

        let catalog = cfg.catalog();
        assert_eq!(catalog.locale(), "en");
        assert_eq!(
            catalog.text("payment_received_alert", &["1 BTC".into()]),
            "Got 1 BTC"
        );
        assert_eq!(
            catalog.text("payment_request_expired", &[]),
            "The payment request has expired"
        );
    }

    #[test]
    fn invalid_output_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[defaults]\noutput = \"xml\"\n");
        let err = load_config_from(&path).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "defaults.output"),
            "expected Validation error, got: {err:?}"
        );
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn malformed_toml_is_a_figment_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "locale = [unterminated");
        assert!(matches!(
            load_config_from(&path).unwrap_err(),
            ConfigError::Figment(_)
        ));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.defaults.auto_accept = true;
        cfg.wallet.label = "Savings".into();

        save_config_to(&cfg, &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }
}
