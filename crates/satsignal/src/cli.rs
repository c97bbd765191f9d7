//! Clap derive structures for the `satsignal` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// satsignal -- turn wallet events into user alerts
#[derive(Debug, Parser)]
#[command(
    name = "satsignal",
    version,
    about = "Correlate wallet events into user-facing alerts",
    long_about = "Reads payment URIs, payment-protocol session summaries, transaction\n\
        sightings and hardware wallet events, decides which deserve an alert,\n\
        and optionally runs the follow-up action each alert offers.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "SATSIGNAL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Correlate a stream of events into alerts
    #[command(alias = "c")]
    Correlate(CorrelateArgs),

    /// Decode a bitcoin: URI and show the alert it would raise
    Uri(UriArgs),

    /// List alert message keys and their templates
    #[command(alias = "msgs")]
    Messages,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Correlate ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CorrelateArgs {
    /// Read events from FILE instead of stdin.
    ///
    /// One event per line: a JSON-encoded event
    /// ({"type": "...", "payload": {...}}) or a raw bitcoin: URI.
    /// Blank lines and lines starting with '#' are skipped.
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Run each alert's action as if the user accepted it
    #[arg(long, short = 'a')]
    pub accept: bool,

    /// Start with a wallet open
    #[arg(long, short = 'w')]
    pub wallet_open: bool,

    /// Label for the open wallet
    #[arg(long, value_name = "LABEL", requires = "wallet_open")]
    pub wallet_label: Option<String>,
}

// ── Uri ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UriArgs {
    /// The URI, e.g. "bitcoin:175tWpb8K1S7NmH4Zx6rewF9WQrcZv245W?amount=0.01"
    pub uri: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_correlate_flags() {
        let cli = Cli::try_parse_from([
            "satsignal",
            "-o",
            "json",
            "correlate",
            "--accept",
            "--wallet-open",
            "--wallet-label",
            "Savings",
            "-i",
            "events.jsonl",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(cli.global.output, Some(OutputFormat::Json));
        let Command::Correlate(args) = cli.command else {
            panic!("expected correlate");
        };
        assert!(args.accept);
        assert!(args.wallet_open);
        assert_eq!(args.wallet_label.as_deref(), Some("Savings"));
        assert_eq!(args.input, Some(PathBuf::from("events.jsonl")));
    }

    #[test]
    fn wallet_label_requires_wallet_open() {
        assert!(
            Cli::try_parse_from(["satsignal", "correlate", "--wallet-label", "x"]).is_err()
        );
    }
}
