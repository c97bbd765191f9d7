//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use satsignal_config::ConfigError;
use satsignal_core::CoreError;
use satsignal_core::model::UriError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const INPUT: i32 = 4;
    /// A broken contract between the alert layer and its callers.
    pub const INTERNAL: i32 = 70;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Input ────────────────────────────────────────────────────────

    #[error("Invalid payment URI: {source}")]
    #[diagnostic(
        code(satsignal::invalid_uri),
        help("Expected bitcoin:<address>?amount=<btc>&label=<text>&message=<text>&r=<url>")
    )]
    InvalidUri {
        #[source]
        source: UriError,
    },

    #[error("Line {line}: {reason}")]
    #[diagnostic(
        code(satsignal::invalid_event),
        help(
            "Each line must be a JSON event such as\n\
             {{\"type\": \"transaction_seen\", \"payload\": {{\"transaction_id\": \"..\", \"amount\": 1500}}}}\n\
             or a raw bitcoin: URI."
        )
    )]
    InvalidEvent { line: usize, reason: String },

    #[error("Malformed event: {source}")]
    #[diagnostic(
        code(satsignal::malformed_event),
        help("Events are JSON objects with a \"type\" tag and a \"payload\".")
    )]
    MalformedEvent {
        #[source]
        source: serde_json::Error,
    },

    // ── Contract violations ──────────────────────────────────────────

    #[error("No wallet is open for '{action}'")]
    #[diagnostic(
        code(satsignal::no_wallet_open),
        help("Pass --wallet-open, or set `open = true` under [wallet] in the config.")
    )]
    NoWalletOpen { action: String },

    #[error("Hardware wallet event {event_type} does not raise alerts")]
    #[diagnostic(
        code(satsignal::unrecognized_device_event),
        help("Only SHOW_DEVICE_READY and SHOW_DEVICE_FAILED events belong in the alert stream.")
    )]
    UnrecognizedDeviceEvent { event_type: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(satsignal::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file not found")]
    #[diagnostic(
        code(satsignal::no_config),
        help(
            "Create one with: satsignal config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration file already exists")]
    #[diagnostic(
        code(satsignal::config_exists),
        help(
            "Use --force to overwrite it.\n\
             Path: {path}"
        )
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(satsignal::config))]
    Config(ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(satsignal::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(satsignal::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to render TOML: {0}")]
    #[diagnostic(code(satsignal::toml))]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidUri { .. } | Self::InvalidEvent { .. } | Self::MalformedEvent { .. } => {
                exit_code::INPUT
            }
            Self::NoWalletOpen { .. } | Self::UnrecognizedDeviceEvent { .. } => {
                exit_code::INTERNAL
            }
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            Self::NoConfig { .. } | Self::Config(_) => exit_code::CONFIG,
            Self::Io(_) | Self::Json(_) | Self::Yaml(_) | Self::Toml(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoWalletOpen { action } => CliError::NoWalletOpen {
                action: action.into(),
            },
            CoreError::UnrecognizedDeviceEvent { event_type } => {
                CliError::UnrecognizedDeviceEvent {
                    event_type: event_type.to_string(),
                }
            }
            CoreError::InvalidUri(source) => CliError::InvalidUri { source },
            CoreError::Decode(source) => CliError::MalformedEvent { source },
        }
    }
}

impl From<UriError> for CliError {
    fn from(source: UriError) -> Self {
        CliError::InvalidUri { source }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { path } => CliError::NoConfig {
                path: path.display().to_string(),
            },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}
